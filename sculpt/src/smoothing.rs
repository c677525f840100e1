use crate::config::SmoothingParams;
use crate::grid::HeightGrid;

// Moore neighbourhood as (di, dj) in the order neighbours are summed:
// left, right, the row below (j + 1) left to right, the row above (j - 1) left to right.
// Float sums depend on this order, so it is fixed.
pub(crate) const MOORE: [(isize, isize); 8] = [
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
    (-1, -1),
    (0, -1),
    (1, -1),
];

// Neighbour coordinates of (i, j) that fall inside a res×res grid, in `MOORE` order.
// Corners get 3, edges 5, interior cells 8.
pub(crate) fn moore_neighbors(
    i: usize,
    j: usize,
    res: usize,
) -> impl Iterator<Item = (usize, usize)> {
    MOORE.iter().filter_map(move |&(di, dj)| {
        let ni = i.checked_add_signed(di)?;
        let nj = j.checked_add_signed(dj)?;
        (ni < res && nj < res).then_some((ni, nj))
    })
}

// Blends each in-band cell towards its neighbourhood average.
// Single in-place sweep in row-major order: a cell sees the already
// smoothed values of the cells before it.
pub struct Smoother {
    params: SmoothingParams,
}

impl Smoother {
    pub fn new(params: SmoothingParams) -> Self {
        Self { params }
    }

    pub fn apply(&self, grid: &mut HeightGrid) {
        if grid.is_degenerate() {
            log::debug!("smooth: resolution {} has no neighbours, skipped", grid.resolution());
            return;
        }

        let res = grid.resolution();
        let weight = self.params.weight;
        for j in 0..res {
            for i in 0..res {
                let h = grid.height(i, j);
                if !(h < self.params.upper_bound && h > self.params.lower_bound) {
                    continue;
                }

                let mut sum = 0.0f32;
                let mut count = 0u8;
                for (ni, nj) in moore_neighbors(i, j, res) {
                    sum += grid.height(ni, nj);
                    count += 1;
                }
                let avg = sum / count as f32;
                grid.set_height(i, j, h * (1.0 - weight) + avg * weight);
            }
        }
    }
}
