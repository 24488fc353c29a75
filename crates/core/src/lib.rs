//! Terrain Noise Core Library
//!
//! A deterministic, seedable 2D terrain generator. Fractal gradient noise is
//! accumulated over a grid, normalized to `[0, 1]`, and classified into water,
//! grass and mountain tiles.
//!
//! Same seed and same size always give the same tiles, bit for bit. The
//! default gradient selection reproduces the reference generator exactly, so
//! `seed = 123, size = 64` yields the canonical conformance grid.
//!
//! ## Pipeline
//!
//! 1. [`noise::FractalNoise`] sums octaves per pixel (parallel over rows)
//! 2. [`noise::RawNoiseField::normalize`] rescales to `[0, 1]`
//! 3. [`terrain::classify`] maps values to [`TerrainKind`] tiles
//!
//! [`generate_world`] runs the whole pipeline with the reference parameters.
//!
//! ```rust
//! use terrain_noise_core::{generate_world, WorldRequest};
//!
//! let world = generate_world(&WorldRequest::new(123, 64)).unwrap();
//! assert_eq!(world.tiles.len(), 64);
//! ```

pub mod error;
pub mod grid;
pub mod noise;
pub mod profiler;
pub mod terrain;
pub mod world;

pub use error::NoiseError;
pub use grid::Grid;
pub use noise::{
    FractalNoise, GradientSelector, HashSelector, MersenneSelector, NoiseParams,
    NormalizedNoiseField, RawNoiseField,
};
pub use terrain::{classify, TerrainCensus, TerrainGrid, TerrainKind};
pub use world::{generate_terrain, generate_world, generate_world_with, WorldGrid, WorldRequest};
