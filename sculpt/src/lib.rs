// sculpt holds the heightfield pipeline: noise, fBm synthesis, smoothing,
// thermal + hydraulic erosion and normal reconstruction
pub mod config;
pub mod error;
pub mod fractal;
pub mod grid;
pub mod hydraulic;
pub mod mesh;
pub mod normals;
pub mod perlin3;
pub mod permutation;
pub mod pipeline;
pub mod simplex3;
pub mod smoothing;
pub mod thermal;
pub mod utils;

use serde::{Deserialize, Serialize};

pub use config::{
    HydraulicParams, SmoothingParams, StageParams, SynthesisParams, TerrainConfig, ThermalParams,
};
pub use error::TerrainError;
pub use fractal::FractalSynth;
pub use grid::{Cell, HeightGrid};
pub use hydraulic::{DropletStats, HydraulicErosion};
pub use mesh::{GridSnapshot, MeshBuilder, TriangleWinding};
pub use normals::reconstruct_normals;
pub use perlin3::ImprovedNoise;
pub use pipeline::{PipelineReport, StageReport, Terrain, TerrainPipeline};
pub use simplex3::SimplexNoise;
pub use smoothing::Smoother;
pub use thermal::{ThermalErosion, UpdateOrder};
pub use utils::{HillshadePreview, save_preview};

// Deterministic scalar field sampled in 3D, output roughly in [-1, 1].
// Implementations are immutable after construction so one instance can
// feed any number of grids, on any number of threads.
pub trait NoiseSource: Send + Sync {
    fn noise(&self, x: f64, y: f64, z: f64) -> f64;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoiseKind {
    #[default]
    Classic,
    Simplex,
}

// Both noise variants side by side, picked per synthesis call
pub struct NoiseBank {
    classic: ImprovedNoise,
    simplex: SimplexNoise,
}

impl NoiseBank {
    pub fn new() -> Self {
        Self {
            classic: ImprovedNoise::new(),
            simplex: SimplexNoise::new(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            classic: ImprovedNoise::with_seed(seed),
            simplex: SimplexNoise::with_seed(seed.wrapping_add(1)),
        }
    }

    pub fn get(&self, kind: NoiseKind) -> &dyn NoiseSource {
        match kind {
            NoiseKind::Classic => &self.classic,
            NoiseKind::Simplex => &self.simplex,
        }
    }
}

impl Default for NoiseBank {
    fn default() -> Self {
        Self::new()
    }
}
