use std::path::Path;

use glam::Vec3;
use image::{Rgb, RgbImage};
use palette::{Gradient, LinSrgb};

use crate::error::TerrainError;
use crate::grid::HeightGrid;
use crate::mesh::{GridSnapshot, MeshBuilder};

// (min, max) over every height, None for an empty grid
pub fn height_range(heights: &[f32]) -> Option<(f32, f32)> {
    let mut iter = heights.iter().copied();
    let first = iter.next()?;
    Some(iter.fold((first, first), |(lo, hi), h| (lo.min(h), hi.max(h))))
}

// Heights rescaled into [0, 1]; a flat grid maps to 0.5
pub fn normalized_heights(heights: &[f32]) -> Vec<f32> {
    let Some((min, max)) = height_range(heights) else {
        return Vec::new();
    };
    let span = max - min;
    heights
        .iter()
        .map(|&h| {
            if span.abs() < f32::EPSILON {
                0.5
            } else {
                (h - min) / span
            }
        })
        .collect()
}

// Top-down colour render lit by the reconstructed vertex normals
pub struct HillshadePreview {
    gradient: Gradient<LinSrgb>,
    // Direction towards the light, normalised
    light: Vec3,
    // Light level of a cell facing away from the light
    ambient: f32,
}

impl HillshadePreview {
    pub fn new() -> Self {
        // deep water, sand, grass, rock, snow
        let gradient = Gradient::with_domain(vec![
            (0.00, LinSrgb::new(0.0, 0.0, 0.5)),
            (0.30, LinSrgb::new(0.8, 0.8, 0.5)),
            (0.50, LinSrgb::new(0.1, 0.6, 0.2)),
            (0.75, LinSrgb::new(0.5, 0.4, 0.3)),
            (1.00, LinSrgb::new(1.0, 1.0, 1.0)),
        ]);
        Self {
            gradient,
            light: Vec3::new(-1.0, 1.0, -1.0).normalize(),
            ambient: 0.35,
        }
    }

    pub fn with_light(mut self, towards_light: Vec3) -> Self {
        self.light = towards_light.try_normalize().unwrap_or(Vec3::Y);
        self
    }

    // Lambert term mapped into [ambient, 1]
    fn shade(&self, normal: Vec3) -> f32 {
        let lambert = normal.dot(self.light).max(0.0);
        (self.ambient + (1.0 - self.ambient) * lambert).clamp(0.0, 1.0)
    }
}

impl Default for HillshadePreview {
    fn default() -> Self {
        Self::new()
    }
}

impl MeshBuilder for HillshadePreview {
    type Output = RgbImage;

    fn build(&mut self, snapshot: &GridSnapshot<'_>) -> RgbImage {
        let res = snapshot.resolution();
        let heights: Vec<f32> = snapshot.vertices().map(|(p, _)| p.y).collect();
        let levels = normalized_heights(&heights);

        let mut img = RgbImage::new(res as u32, res as u32);
        for j in 0..res {
            for i in 0..res {
                let colour: LinSrgb = self.gradient.get(levels[res * j + i]);
                let rgb = colour.into_format::<u8>();
                let light = self.shade(snapshot.normal(i, j));
                let pixel = Rgb([
                    (rgb.red as f32 * light) as u8,
                    (rgb.green as f32 * light) as u8,
                    (rgb.blue as f32 * light) as u8,
                ]);
                img.put_pixel(i as u32, j as u32, pixel);
            }
        }
        img
    }
}

pub fn save_preview(grid: &HeightGrid, path: impl AsRef<Path>) -> Result<(), TerrainError> {
    let path = path.as_ref();
    let img = HillshadePreview::new().build(&grid.snapshot());
    img.save(path)?;
    log::info!("preview written to {}", path.display());
    Ok(())
}
