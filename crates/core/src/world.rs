//! World generation entry point consumed by transport layers.
//!
//! A transport (HTTP handler, CLI, FFI shim) parses a [`WorldRequest`],
//! calls [`generate_world`], and serializes the returned [`WorldGrid`] as
//! `{"size": <size>, "tiles": [[...], ...]}`. Nothing here depends on a
//! particular transport.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::NoiseError;
use crate::noise::{FractalNoise, GradientSelector, NoiseParams};
use crate::terrain::{classify, TerrainCensus, TerrainGrid};

/// Seed used when the caller does not specify one.
pub const DEFAULT_SEED: i64 = 0;
/// Side length used when the caller does not specify one.
pub const DEFAULT_SIZE: i64 = 64;

/// Caller-supplied world parameters.
///
/// Missing fields take [`DEFAULT_SEED`] and [`DEFAULT_SIZE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldRequest {
    pub seed: i64,
    /// Side length of the square world. Kept signed so that transports can
    /// pass parsed input through and get a proper error for `size <= 0`.
    pub size: i64,
}

impl Default for WorldRequest {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            size: DEFAULT_SIZE,
        }
    }
}

impl WorldRequest {
    pub fn new(seed: i64, size: i64) -> Self {
        Self { seed, size }
    }
}

/// Square grid of terrain codes, row-major.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldGrid {
    /// Echo of the requested side length.
    pub size: usize,
    /// `size` rows of `size` codes in `{0, 1, 2}`.
    pub tiles: Vec<Vec<u8>>,
}

impl From<&TerrainGrid> for WorldGrid {
    /// Document form of a square terrain grid; `size` is its width.
    fn from(terrain: &TerrainGrid) -> Self {
        Self {
            size: terrain.width(),
            tiles: terrain.codes(),
        }
    }
}

/// Generate a world with the reference noise parameters.
///
/// # Errors
///
/// Returns [`NoiseError::InvalidParameter`] if `request.size` is not positive.
pub fn generate_world(request: &WorldRequest) -> Result<WorldGrid, NoiseError> {
    let noise = FractalNoise::new(NoiseParams::default())?;
    generate_world_with(request, &noise)
}

/// Generate a world with a caller-configured noise generator.
///
/// # Errors
///
/// Same conditions as [`generate_terrain`].
pub fn generate_world_with<S: GradientSelector>(
    request: &WorldRequest,
    noise: &FractalNoise<S>,
) -> Result<WorldGrid, NoiseError> {
    generate_terrain(request, noise).map(|terrain| WorldGrid::from(&terrain))
}

/// Generate the classified `size x size` terrain for a request.
///
/// # Errors
///
/// Returns [`NoiseError::InvalidParameter`] if `request.size` is not positive,
/// does not fit in `usize`, or pushes the field past the noise lattice.
pub fn generate_terrain<S: GradientSelector>(
    request: &WorldRequest,
    noise: &FractalNoise<S>,
) -> Result<TerrainGrid, NoiseError> {
    let size = usize::try_from(request.size)
        .ok()
        .filter(|&size| size > 0)
        .ok_or_else(|| {
            NoiseError::invalid_parameter("size", format!("must be positive, got {}", request.size))
        })?;

    info!(seed = request.seed, size, "Generating world");

    let field = noise.generate(size, size, request.seed)?;
    let terrain = classify(&field);
    let TerrainCensus {
        water,
        grass,
        mountain,
    } = terrain.census();

    info!(
        seed = request.seed,
        water,
        grass,
        mountain,
        "World generated with {}x{} tiles",
        terrain.height(),
        terrain.width()
    );

    Ok(terrain)
}
