use rand::Rng;

use crate::config::HydraulicParams;
use crate::grid::HeightGrid;

// Upper bound on the height difference a droplet acts on per step
const MAX_SLOPE: f32 = 1.15;

// Droplets spawned at or below this height are dropped without simulating
const SEA_LEVEL: f32 = 0.0;

// Von Neumann neighbourhood in tie-break priority order:
// left, right, up (j + 1), down (j - 1)
const VON_NEUMANN: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, 1), (0, -1)];

// Summary of one hydraulic pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DropletStats {
    pub spawned: u32,
    // Spawned at or below sea level, never simulated
    pub skipped: u32,
    // Steps in which the droplet found a lower neighbour and moved
    pub steps: u64,
    // Steps left over when a droplet reached a cell with no lower neighbour
    pub stalled: u64,
    pub eroded: f64,
    pub deposited: f64,
    // Decayed persistence multiplier of the last simulated droplet
    pub final_persistence: f32,
}

// Water droplets wandering downhill, picking up sediment until full and
// dropping it afterwards. Droplets run strictly one after another on the
// live grid, so each sees the terrain its predecessors left.
pub struct HydraulicErosion {
    params: HydraulicParams,
}

// In-flight state of a single droplet
struct Droplet {
    i: usize,
    j: usize,
    carried: f32,
    persistence: f32,
}

impl HydraulicErosion {
    pub fn new(params: HydraulicParams) -> Self {
        Self { params }
    }

    pub fn apply<R: Rng + ?Sized>(&self, grid: &mut HeightGrid, rng: &mut R) -> DropletStats {
        let mut stats = DropletStats {
            final_persistence: 1.0,
            ..DropletStats::default()
        };
        if grid.is_degenerate() || self.params.drop_count == 0 || self.params.iterations == 0 {
            log::debug!(
                "hydraulic: nothing to do (resolution {}, {} drops, {} iterations)",
                grid.resolution(),
                self.params.drop_count,
                self.params.iterations
            );
            return stats;
        }

        let res = grid.resolution();
        for _ in 0..self.params.drop_count {
            let i = rng.gen_range(0..res);
            let j = rng.gen_range(0..res);
            stats.spawned += 1;

            if grid.height(i, j) <= SEA_LEVEL {
                stats.skipped += 1;
                continue;
            }

            let mut droplet = Droplet {
                i,
                j,
                carried: 0.0,
                persistence: 1.0,
            };
            self.run_droplet(grid, &mut droplet, &mut stats);
            stats.final_persistence = droplet.persistence;
            log::trace!(
                "droplet ({i}, {j}) ended at ({}, {}) carrying {}",
                droplet.i,
                droplet.j,
                droplet.carried
            );
        }

        log::debug!(
            "hydraulic: {} droplets, {} below sea level, {} steps, eroded {:.4}, deposited {:.4}",
            stats.spawned,
            stats.skipped,
            stats.steps,
            stats.eroded,
            stats.deposited
        );
        stats
    }

    fn run_droplet(&self, grid: &mut HeightGrid, droplet: &mut Droplet, stats: &mut DropletStats) {
        let res = grid.resolution();
        let p = &self.params;

        for step in 0..p.iterations {
            let here = grid.height(droplet.i, droplet.j);
            let Some((ti, tj, target)) = Self::flow_target(grid, droplet.i, droplet.j) else {
                stats.stalled += u64::from(p.iterations - step);
                return;
            };
            if target >= here {
                // Nothing below us: every remaining step would stall in place
                stats.stalled += u64::from(p.iterations - step);
                return;
            }

            let slope = MAX_SLOPE.min(here - target);
            let transfer = (p.deposition_speed * slope).max(0.0);

            if droplet.carried > p.carrying_capacity {
                // Over capacity: drop sediment, never more than is carried
                let amount = transfer.min(droplet.carried);
                droplet.carried -= amount;
                grid.add_height(droplet.i, droplet.j, amount * p.persistence);
                stats.deposited += f64::from(amount * p.persistence);
            } else {
                // Pick up sediment; past capacity only the excess is taken
                let amount = if droplet.carried + transfer > p.carrying_capacity {
                    droplet.carried + transfer - p.carrying_capacity
                } else {
                    transfer
                };
                droplet.carried += amount;
                grid.add_height(droplet.i, droplet.j, -(amount * p.persistence));
                stats.eroded += f64::from(amount * p.persistence);
            }

            // Keep the droplet on [0, res - 1], never clamp to res (one past the last cell)
            droplet.i = ti.min(res - 1);
            droplet.j = tj.min(res - 1);
            droplet.persistence *= p.persistence;
            stats.steps += 1;
        }
    }

    // Lowest von Neumann neighbour of (i, j). Comparisons are strict, so on a
    // tie the earlier direction in left, right, up, down order is kept.
    fn flow_target(grid: &HeightGrid, i: usize, j: usize) -> Option<(usize, usize, f32)> {
        let res = grid.resolution();
        let mut best: Option<(usize, usize, f32)> = None;
        for &(di, dj) in &VON_NEUMANN {
            let (Some(ni), Some(nj)) = (i.checked_add_signed(di), j.checked_add_signed(dj)) else {
                continue;
            };
            if ni >= res || nj >= res {
                continue;
            }
            let h = grid.height(ni, nj);
            if best.is_none_or(|(_, _, b)| h < b) {
                best = Some((ni, nj, h));
            }
        }
        best
    }
}
