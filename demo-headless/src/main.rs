use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use terrain_noise_core::world::{DEFAULT_SEED, DEFAULT_SIZE};
use terrain_noise_core::{
    generate_terrain, FractalNoise, GradientSelector, HashSelector, MersenneSelector, NoiseParams,
    TerrainGrid, WorldGrid, WorldRequest,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Output document format
#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    /// `{"size": N, "tiles": [[...]]}` on stdout
    Json,
    /// One glyph per tile: `~` water, `.` grass, `^` mountain
    Ascii,
}

/// Gradient selection strategy
#[derive(Clone, Copy, Debug, ValueEnum)]
enum Selector {
    /// Reference-compatible per-corner Mersenne Twister streams
    Mersenne,
    /// Faster avalanche hash (different terrain for the same seed)
    Hash,
}

/// Terrain generation demo with configurable parameters
#[derive(Parser, Debug)]
#[command(name = "terrain-demo")]
#[command(about = "Seedable fractal-noise terrain generator", long_about = None)]
struct Args {
    /// World seed
    #[arg(short, long, default_value_t = DEFAULT_SEED, allow_negative_numbers = true)]
    seed: i64,

    /// Side length of the square world in tiles
    #[arg(long, default_value_t = DEFAULT_SIZE, allow_negative_numbers = true)]
    size: i64,

    /// JSON file with noise parameters (missing fields use defaults)
    #[arg(short, long)]
    params: Option<PathBuf>,

    /// Number of octaves (overrides --params)
    #[arg(short, long)]
    octaves: Option<u32>,

    /// Amplitude decay per octave (overrides --params)
    #[arg(long)]
    persistence: Option<f64>,

    /// Frequency growth per octave (overrides --params)
    #[arg(long)]
    lacunarity: Option<f64>,

    /// Pixel-to-noise-space divisor (overrides --params)
    #[arg(long, allow_negative_numbers = true)]
    scale: Option<f64>,

    /// Gradient selection strategy
    #[arg(long, value_enum, default_value_t = Selector::Mersenne)]
    selector: Selector,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Json)]
    format: Format,
}

fn load_params(args: &Args) -> Result<NoiseParams> {
    let mut params = match &args.params {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading noise parameters from {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("parsing noise parameters in {}", path.display()))?
        }
        None => NoiseParams::default(),
    };

    if let Some(octaves) = args.octaves {
        params = params.with_octaves(octaves);
    }
    if let Some(persistence) = args.persistence {
        params = params.with_persistence(persistence);
    }
    if let Some(lacunarity) = args.lacunarity {
        params = params.with_lacunarity(lacunarity);
    }
    if let Some(scale) = args.scale {
        params = params.with_scale(scale);
    }
    Ok(params)
}

fn run<S: GradientSelector>(
    request: &WorldRequest,
    params: NoiseParams,
    selector: S,
) -> Result<TerrainGrid> {
    let noise =
        FractalNoise::with_selector(params, selector).context("invalid noise parameters")?;
    generate_terrain(request, &noise).context("world generation failed")
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let params = load_params(&args)?;
    let request = WorldRequest::new(args.seed, args.size);

    info!(
        octaves = params.octaves,
        persistence = params.persistence,
        lacunarity = params.lacunarity,
        scale = params.scale,
        selector = ?args.selector,
        "Noise parameters"
    );

    let terrain = match args.selector {
        Selector::Mersenne => run(&request, params, MersenneSelector)?,
        Selector::Hash => run(&request, params, HashSelector)?,
    };

    match args.format {
        Format::Json => println!("{}", serde_json::to_string(&WorldGrid::from(&terrain))?),
        Format::Ascii => print!("{}", terrain.render_ascii()),
    }

    Ok(())
}
