// Saves 256×256 greyscale slices of both noise sources, once on the
// reference permutation table and once on a seeded one

use image::{GrayImage, Luma};
use sculpt::utils::normalized_heights;
use sculpt::{ImprovedNoise, NoiseSource, SimplexNoise};

fn save_slice(
    noise: &dyn NoiseSource,
    size: usize,
    y: f64,
    filename: &str,
) -> image::ImageResult<()> {
    let scale = 8.0 / size as f64;
    let mut samples = Vec::with_capacity(size * size);
    for row in 0..size {
        for col in 0..size {
            let v = noise.noise(col as f64 * scale, y, row as f64 * scale);
            samples.push(v as f32);
        }
    }

    let levels = normalized_heights(&samples);
    let mut img = GrayImage::new(size as u32, size as u32);
    for (k, level) in levels.iter().enumerate() {
        let gray = (level * 255.0).round() as u8;
        img.put_pixel((k % size) as u32, (k / size) as u32, Luma([gray]));
    }
    img.save(filename)?;
    println!("Saved {filename}");
    Ok(())
}

fn main() -> image::ImageResult<()> {
    let size = 256;

    save_slice(&ImprovedNoise::new(), size, 0.0, "improved_slice.png")?;
    save_slice(&SimplexNoise::new(), size, 0.0, "simplex_slice.png")?;

    // The channel ridged synthesis reads its second sample from
    save_slice(&ImprovedNoise::new(), size, 150.0, "improved_ridge_channel.png")?;

    save_slice(&ImprovedNoise::with_seed(2025), size, 0.0, "improved_seeded.png")?;
    save_slice(&SimplexNoise::with_seed(2025), size, 0.0, "simplex_seeded.png")?;
    Ok(())
}
