// Saves a greyscale heightfield after each stage of a 257×257 run:
// fBm, smoothing, thermal erosion, hydraulic erosion

use image::{GrayImage, Luma};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use sculpt::utils::normalized_heights;
use sculpt::{
    FractalSynth, HeightGrid, HydraulicErosion, HydraulicParams, NoiseBank, Smoother,
    SmoothingParams, SynthesisParams, ThermalErosion, ThermalParams,
};

fn save_grayscale(grid: &HeightGrid, filename: &str) -> image::ImageResult<()> {
    let size = grid.resolution();
    let levels = normalized_heights(&grid.heights());
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
    let size = 257;
    let bank = NoiseBank::new();
    let synthesis = SynthesisParams {
        amplitude: 20.0,
        ..SynthesisParams::default()
    };
    let mut grid = HeightGrid::new(size);

    // 1) fBm
    FractalSynth::new(synthesis.clone()).apply(&mut grid, bank.get(synthesis.noise));
    save_grayscale(&grid, "stage_fbm.png")?;

    // 2) Smoothing
    Smoother::new(SmoothingParams::default()).apply(&mut grid);
    save_grayscale(&grid, "stage_smooth.png")?;

    // 3) Thermal
    ThermalErosion::new(ThermalParams::default()).apply(&mut grid);
    save_grayscale(&grid, "stage_thermal.png")?;

    // 4) Hydraulic
    let mut rng = ChaCha8Rng::seed_from_u64(2025);
    let stats = HydraulicErosion::new(HydraulicParams::default()).apply(&mut grid, &mut rng);
    println!("{stats:?}");
    save_grayscale(&grid, "stage_hydraulic.png")?;
    Ok(())
}
