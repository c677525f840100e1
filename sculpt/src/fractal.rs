use crate::NoiseSource;
use crate::config::SynthesisParams;
use crate::grid::HeightGrid;

// Second-coordinate offset of the decorrelated sample used for ridges
const RIDGE_CHANNEL: f64 = 150.0;

// Each octave doubles the frequency
const LACUNARITY: f32 = 2.0;

// Fractal Brownian motion height synthesis
// Overwrites every height: the result never depends on what the grid held before.
pub struct FractalSynth {
    params: SynthesisParams,
}

impl FractalSynth {
    pub fn new(params: SynthesisParams) -> Self {
        Self { params }
    }

    pub fn apply(&self, grid: &mut HeightGrid, noise: &dyn NoiseSource) {
        let res = grid.resolution();
        if self.params.octaves == 0 {
            log::debug!("fbm: zero octaves, heights set to base offset");
        }

        for j in 0..res {
            for i in 0..res {
                let cell = grid.cell(i, j);
                let x = cell.x + self.params.offset_x;
                let z = cell.z + self.params.offset_z;
                let height = self.params.offset_y + self.sample(noise, x, z);
                grid.set_height(i, j, height);
            }
        }
    }

    // Sum of all octaves at world position (x, z), without the base offset
    pub fn sample(&self, noise: &dyn NoiseSource, x: f32, z: f32) -> f32 {
        let mut amplitude = self.params.amplitude; // weight of the current octave
        let mut frequency = self.params.frequency; // zoom of the current octave
        let mut total = 0.0f32;

        for _ in 0..self.params.octaves {
            total += self.octave(noise, x * frequency, z * frequency, amplitude);
            amplitude *= self.params.persistence;
            frequency *= LACUNARITY;
        }

        total
    }

    // One scaled noise layer at an already frequency-scaled position
    fn octave(&self, noise: &dyn NoiseSource, fx: f32, fz: f32, amplitude: f32) -> f32 {
        let mut value = (noise.noise(fx as f64, 0.0, fz as f64) * amplitude as f64) as f32;
        if self.params.ridged {
            let second =
                (noise.noise(fx as f64, RIDGE_CHANNEL, fz as f64) * amplitude as f64) as f32;
            // Keeping the larger sample gives valleys, folding them gives ridges
            if second > value {
                value = second;
            }
            value = -value.abs();
        }
        value
    }
}
