use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use sculpt::{NoiseBank, NoiseKind, TerrainConfig, TerrainPipeline, save_preview};

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Noise {
    Classic,
    Simplex,
}

impl From<Noise> for NoiseKind {
    fn from(noise: Noise) -> Self {
        match noise {
            Noise::Classic => NoiseKind::Classic,
            Noise::Simplex => NoiseKind::Simplex,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "sculpt")]
#[command(about = "Synthesize and erode a terrain heightfield, then write a shaded preview")]
struct Args {
    /// JSON terrain config; missing fields fall back to defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Grid side length in cells (overrides the config)
    #[arg(short, long)]
    resolution: Option<usize>,

    /// Droplet seed (config seed, else random)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Noise source for synthesis (overrides the config)
    #[arg(short, long, value_enum)]
    noise: Option<Noise>,

    /// Shuffle the noise permutation tables with this seed instead of the reference table
    #[arg(long)]
    noise_seed: Option<u64>,

    /// Force ridged synthesis
    #[arg(long)]
    ridged: bool,

    /// Preview image path
    #[arg(short, long, default_value = "terrain.png")]
    output: PathBuf,

    /// Print the effective config as JSON and exit
    #[arg(long)]
    dump_config: bool,
}

fn load_config(args: &Args) -> Result<TerrainConfig, Box<dyn Error>> {
    let mut config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)?;
            serde_json::from_str(&text)?
        }
        None => TerrainConfig::default(),
    };

    if let Some(resolution) = args.resolution {
        config.resolution = resolution;
    }
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(noise) = args.noise {
        config.synthesis.noise = noise.into();
    }
    if args.ridged {
        config.synthesis.ridged = true;
    }
    Ok(config)
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = load_config(&args)?;
    if args.dump_config {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    let seed = config.seed.unwrap_or_else(rand::random);
    log::info!("droplet seed: {seed}");

    let bank = match args.noise_seed {
        Some(noise_seed) => {
            log::info!("noise tables shuffled with seed {noise_seed}");
            NoiseBank::with_seed(noise_seed)
        }
        None => NoiseBank::new(),
    };

    let terrain = TerrainPipeline::new(config).run_seeded(&bank, seed)?;

    for stats in &terrain.report.droplets {
        log::info!(
            "droplets: {} spawned, {} skipped, {} steps, eroded {:.3}, deposited {:.3}",
            stats.spawned,
            stats.skipped,
            stats.steps,
            stats.eroded,
            stats.deposited
        );
    }
    log::info!("total: {:.2?}", terrain.report.total());

    save_preview(&terrain.grid, &args.output)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{Args, load_config};
    use clap::Parser;
    use sculpt::NoiseKind;

    #[test]
    fn flags_override_defaults() {
        let args = Args::parse_from([
            "sculpt", "--resolution", "33", "--seed", "4", "--noise", "simplex", "--ridged",
        ]);
        let cfg = load_config(&args).unwrap();
        assert_eq!(cfg.resolution, 33);
        assert_eq!(cfg.seed, Some(4));
        assert_eq!(cfg.synthesis.noise, NoiseKind::Simplex);
        assert!(cfg.synthesis.ridged);
        assert_eq!(cfg.stages.len(), 3);
    }

    #[test]
    fn no_flags_keeps_defaults() {
        let args = Args::parse_from(["sculpt"]);
        let cfg = load_config(&args).unwrap();
        assert_eq!(cfg.resolution, 128);
        assert_eq!(cfg.seed, None);
        assert_eq!(args.output.to_str(), Some("terrain.png"));
    }
}
