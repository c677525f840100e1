// Per-stage parameters and the whole-terrain configuration.
// Every struct falls back to its Default for missing fields, so a config
// file only needs to name what it changes.

use serde::{Deserialize, Serialize};

use crate::NoiseKind;
use crate::grid::DEFAULT_EXTENT;
use crate::thermal::UpdateOrder;

// Fractal Brownian motion over one of the noise sources
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthesisParams {
    pub offset_x: f32,
    pub offset_z: f32,
    // Base frequency of the first octave; doubles every octave
    pub frequency: f32,
    // Amplitude of the first octave; multiplied by `persistence` every octave
    pub amplitude: f32,
    pub ridged: bool,
    pub noise: NoiseKind,
    pub octaves: u32,
    pub persistence: f32,
    // Base height every octave is added onto
    pub offset_y: f32,
}

impl Default for SynthesisParams {
    fn default() -> Self {
        Self {
            offset_x: 0.0,
            offset_z: 0.0,
            frequency: 0.02,
            amplitude: 10.0,
            ridged: false,
            noise: NoiseKind::Classic,
            octaves: 8,
            persistence: 0.5,
            offset_y: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmoothingParams {
    // 0 keeps the cell, 1 replaces it with its neighbourhood average
    pub weight: f32,
    // Only cells strictly between the bounds are smoothed
    pub upper_bound: f32,
    pub lower_bound: f32,
}

impl Default for SmoothingParams {
    fn default() -> Self {
        Self {
            weight: 0.5,
            upper_bound: f32::MAX,
            lower_bound: f32::MIN,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThermalParams {
    pub iterations: u32,
    pub update: UpdateOrder,
}

impl Default for ThermalParams {
    fn default() -> Self {
        Self {
            iterations: 10,
            update: UpdateOrder::InPlace,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HydraulicParams {
    // Sediment a droplet holds before it starts depositing
    pub carrying_capacity: f32,
    pub deposition_speed: f32,
    // Maximum steps per droplet
    pub iterations: u32,
    pub drop_count: u32,
    // Scales every height change a droplet makes
    pub persistence: f32,
}

impl Default for HydraulicParams {
    fn default() -> Self {
        Self {
            carrying_capacity: 1.0,
            deposition_speed: 0.03,
            iterations: 64,
            drop_count: 50_000,
            persistence: 0.9,
        }
    }
}

// One optional sculpting pass. Passes run in list order and may repeat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "stage", rename_all = "snake_case")]
pub enum StageParams {
    Smooth(SmoothingParams),
    Thermal(ThermalParams),
    Hydraulic(HydraulicParams),
}

impl StageParams {
    pub fn name(&self) -> &'static str {
        match self {
            StageParams::Smooth(_) => "smooth",
            StageParams::Thermal(_) => "thermal",
            StageParams::Hydraulic(_) => "hydraulic",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    pub resolution: usize,
    // World-space side length of the grid
    pub extent: f64,
    // Seed for droplet placement; None lets the caller pick one
    pub seed: Option<u64>,
    pub synthesis: SynthesisParams,
    pub stages: Vec<StageParams>,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            resolution: 128,
            extent: DEFAULT_EXTENT,
            seed: None,
            synthesis: SynthesisParams::default(),
            stages: vec![
                StageParams::Smooth(SmoothingParams::default()),
                StageParams::Thermal(ThermalParams::default()),
                StageParams::Hydraulic(HydraulicParams::default()),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{StageParams, TerrainConfig, ThermalParams};
    use crate::NoiseKind;
    use crate::thermal::UpdateOrder;

    #[test]
    fn partial_config_fills_defaults() {
        let json = r#"{
            "resolution": 64,
            "synthesis": { "noise": "simplex", "ridged": true },
            "stages": [
                { "stage": "thermal", "iterations": 3, "update": "double_buffered" },
                { "stage": "smooth", "weight": 1.0 }
            ]
        }"#;
        let cfg: TerrainConfig = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.resolution, 64);
        assert_eq!(cfg.extent, 100.0);
        assert_eq!(cfg.seed, None);
        assert_eq!(cfg.synthesis.noise, NoiseKind::Simplex);
        assert!(cfg.synthesis.ridged);
        assert_eq!(cfg.synthesis.octaves, 8);
        assert_eq!(
            cfg.stages[0],
            StageParams::Thermal(ThermalParams {
                iterations: 3,
                update: UpdateOrder::DoubleBuffered,
            })
        );
        match &cfg.stages[1] {
            StageParams::Smooth(s) => {
                assert_eq!(s.weight, 1.0);
                assert_eq!(s.upper_bound, f32::MAX);
            }
            other => panic!("unexpected stage {other:?}"),
        }
    }

    #[test]
    fn stage_names() {
        let cfg = TerrainConfig::default();
        let names: Vec<_> = cfg.stages.iter().map(StageParams::name).collect();
        assert_eq!(names, ["smooth", "thermal", "hydraulic"]);
    }
}
