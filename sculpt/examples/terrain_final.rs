// Runs the default pipeline on a 513×513 grid and writes a coloured,
// normal-shaded preview

use sculpt::{NoiseBank, SynthesisParams, TerrainConfig, TerrainError, TerrainPipeline};

fn main() -> Result<(), TerrainError> {
    let config = TerrainConfig {
        resolution: 513,
        synthesis: SynthesisParams {
            amplitude: 30.0,
            ridged: true,
            ..SynthesisParams::default()
        },
        ..TerrainConfig::default()
    };

    let terrain = TerrainPipeline::new(config).run_seeded(&NoiseBank::new(), 2025)?;
    for stage in &terrain.report.stages {
        println!("{:>10}: {:.2?}", stage.name, stage.elapsed);
    }

    sculpt::save_preview(&terrain.grid, "terrain_final.png")?;
    println!("Saved terrain_final.png");
    Ok(())
}
