use std::time::{Duration, Instant};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::NoiseBank;
use crate::config::{StageParams, TerrainConfig};
use crate::error::TerrainError;
use crate::fractal::FractalSynth;
use crate::grid::HeightGrid;
use crate::hydraulic::{DropletStats, HydraulicErosion};
use crate::normals::reconstruct_normals;
use crate::smoothing::Smoother;
use crate::thermal::ThermalErosion;

// Wall time of one executed stage
#[derive(Debug, Clone, PartialEq)]
pub struct StageReport {
    pub name: &'static str,
    pub elapsed: Duration,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineReport {
    pub stages: Vec<StageReport>,
    // One entry per hydraulic stage, in run order
    pub droplets: Vec<DropletStats>,
}

impl PipelineReport {
    pub fn total(&self) -> Duration {
        self.stages.iter().map(|s| s.elapsed).sum()
    }

    fn record(&mut self, name: &'static str, started: Instant) {
        let elapsed = started.elapsed();
        log::info!("{name}: {:.2?}", elapsed);
        self.stages.push(StageReport { name, elapsed });
    }
}

// A finished heightfield with normals, ready for a mesh builder
#[derive(Debug, Clone)]
pub struct Terrain {
    pub grid: HeightGrid,
    pub report: PipelineReport,
}

// Synthesis, then the configured stages in list order, then normals.
// Normals always run last since every stage before them edits heights.
pub struct TerrainPipeline {
    config: TerrainConfig,
}

impl TerrainPipeline {
    pub fn new(config: TerrainConfig) -> Self {
        Self { config }
    }

    // Droplets draw from `rng`; everything else is deterministic
    pub fn run<R: Rng + ?Sized>(
        &self,
        bank: &NoiseBank,
        rng: &mut R,
    ) -> Result<Terrain, TerrainError> {
        let cfg = &self.config;
        let mut grid = HeightGrid::with_extent(cfg.resolution, cfg.extent);
        let mut report = PipelineReport::default();
        log::info!(
            "building {0}x{0} terrain, {1} stage(s)",
            cfg.resolution,
            cfg.stages.len()
        );

        let started = Instant::now();
        let synth = FractalSynth::new(cfg.synthesis.clone());
        synth.apply(&mut grid, bank.get(cfg.synthesis.noise));
        report.record("fbm", started);

        for stage in &cfg.stages {
            let started = Instant::now();
            match stage {
                StageParams::Smooth(params) => Smoother::new(params.clone()).apply(&mut grid),
                StageParams::Thermal(params) => {
                    ThermalErosion::new(params.clone()).apply(&mut grid)
                }
                StageParams::Hydraulic(params) => {
                    let stats = HydraulicErosion::new(params.clone()).apply(&mut grid, rng);
                    report.droplets.push(stats);
                }
            }
            report.record(stage.name(), started);
        }

        let started = Instant::now();
        reconstruct_normals(&mut grid)?;
        report.record("normals", started);

        Ok(Terrain { grid, report })
    }

    // Same as `run` with droplets drawn from ChaCha8 seeded by `seed`
    pub fn run_seeded(&self, bank: &NoiseBank, seed: u64) -> Result<Terrain, TerrainError> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        self.run(bank, &mut rng)
    }
}
