//! Fractal (multi-octave) noise over a whole grid.
//!
//! Generation runs in two phases:
//!
//! 1. **Accumulation** - every pixel sums its octaves independently. Rows are
//!    filled in parallel; each worker writes a disjoint slice of one
//!    preallocated buffer.
//! 2. **Normalization** - after every pixel is final, one pass finds the
//!    global min/max and a second rescales the field to `[0, 1]`.
//!
//! A flat field (`max == min`) is a normal outcome, not an error: every cell
//! becomes `0.5`.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::gradient::{GradientSelector, MersenneSelector};
use super::octave::{octave_value, OctaveConfig, LATTICE_LIMIT, OCTAVE_VALUE_BOUND};
use crate::error::NoiseError;
use crate::grid::Grid;
use crate::profiler::ProfilerScope;

/// Value every cell takes when the raw field is flat.
pub const FLAT_FIELD_VALUE: f64 = 0.5;

/// Fractal noise parameters.
///
/// `Default` is the reference terrain configuration: 4 octaves, persistence
/// 0.01, lacunarity 2.0, scale 30.0.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseParams {
    /// Number of octaves (at least 1).
    pub octaves: u32,
    /// Amplitude decay per octave (positive).
    pub persistence: f64,
    /// Frequency growth per octave (positive).
    pub lacunarity: f64,
    /// Pixel-to-noise-space divisor (non-zero, finite). Larger values zoom in.
    pub scale: f64,
}

impl Default for NoiseParams {
    fn default() -> Self {
        Self {
            octaves: 4,
            persistence: 0.01,
            lacunarity: 2.0,
            scale: 30.0,
        }
    }
}

impl NoiseParams {
    /// Replace the octave count.
    pub fn with_octaves(mut self, octaves: u32) -> Self {
        self.octaves = octaves;
        self
    }

    /// Replace the per-octave amplitude decay.
    pub fn with_persistence(mut self, persistence: f64) -> Self {
        self.persistence = persistence;
        self
    }

    /// Replace the per-octave frequency growth.
    pub fn with_lacunarity(mut self, lacunarity: f64) -> Self {
        self.lacunarity = lacunarity;
        self
    }

    /// Replace the pixel-to-noise-space divisor.
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Check every parameter against its domain.
    ///
    /// # Errors
    ///
    /// Returns [`NoiseError::InvalidParameter`] if `octaves < 1`, `scale` is
    /// zero or not finite, `persistence`/`lacunarity` is not a finite
    /// positive number, or the octave schedule overflows `f64` (the last
    /// frequency, or the worst-case raw value spread, is infinite).
    pub fn validate(&self) -> Result<(), NoiseError> {
        if self.octaves < 1 {
            return Err(NoiseError::invalid_parameter(
                "octaves",
                format!("must be at least 1, got {}", self.octaves),
            ));
        }
        if self.scale == 0.0 || !self.scale.is_finite() {
            return Err(NoiseError::invalid_parameter(
                "scale",
                format!("must be finite and non-zero, got {}", self.scale),
            ));
        }
        for (name, value) in [
            ("persistence", self.persistence),
            ("lacunarity", self.lacunarity),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(NoiseError::invalid_parameter(
                    name,
                    format!("must be finite and positive, got {value}"),
                ));
            }
        }

        let last = f64::from(self.octaves - 1);
        let top_frequency = self.lacunarity.powf(last);
        if !top_frequency.is_finite() {
            return Err(NoiseError::invalid_parameter(
                "lacunarity",
                format!(
                    "{}^{last} overflows with {} octaves",
                    self.lacunarity, self.octaves
                ),
            ));
        }
        // Raw values lie within +-(octaves * top amplitude * bound) and
        // normalization takes max - min across that whole range
        let top_amplitude = self.persistence.powf(last).max(1.0);
        let spread = f64::from(self.octaves) * top_amplitude * OCTAVE_VALUE_BOUND * 2.0;
        if !spread.is_finite() {
            return Err(NoiseError::invalid_parameter(
                "persistence",
                format!(
                    "{}^{last} overflows the raw value range with {} octaves",
                    self.persistence, self.octaves
                ),
            ));
        }
        Ok(())
    }

    /// Octave schedule for these parameters.
    pub fn octave_config(&self) -> OctaveConfig {
        OctaveConfig::new(self.octaves, self.persistence, self.lacunarity)
    }
}

/// Accumulated fractal noise, before normalization.
#[derive(Clone, Debug, PartialEq)]
pub struct RawNoiseField {
    grid: Grid<f64>,
}

impl RawNoiseField {
    pub fn grid(&self) -> &Grid<f64> {
        &self.grid
    }

    /// Global `(min, max)` over all cells.
    pub fn min_max(&self) -> (f64, f64) {
        self.grid
            .as_slice()
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            })
    }

    /// Rescale to `[0, 1]`, consuming the raw field.
    ///
    /// `min` maps to `0.0` and `max` to `1.0`. A flat field maps every cell
    /// to [`FLAT_FIELD_VALUE`].
    pub fn normalize(mut self) -> NormalizedNoiseField {
        let _scope = ProfilerScope::new("normalize");
        let (min, max) = self.min_max();
        let range = max - min;

        let flat = range == 0.0;
        if flat {
            warn!(
                width = self.grid.width(),
                height = self.grid.height(),
                value = min,
                "Noise field is flat, filling with {}",
                FLAT_FIELD_VALUE
            );
            self.grid.as_mut_slice().fill(FLAT_FIELD_VALUE);
        } else {
            for v in self.grid.as_mut_slice() {
                *v = (*v - min) / range;
            }
        }

        NormalizedNoiseField {
            grid: self.grid,
            flat,
        }
    }
}

/// Noise field rescaled to `[0, 1]`. Immutable once built.
#[derive(Clone, Debug, PartialEq)]
pub struct NormalizedNoiseField {
    grid: Grid<f64>,
    flat: bool,
}

impl NormalizedNoiseField {
    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    /// Normalized value at `(x, y)`, or `None` outside the field.
    pub fn value(&self, x: usize, y: usize) -> Option<f64> {
        self.grid.get(x, y).copied()
    }

    pub fn grid(&self) -> &Grid<f64> {
        &self.grid
    }

    /// All values in row-major order.
    pub fn as_slice(&self) -> &[f64] {
        self.grid.as_slice()
    }

    /// `true` if the raw field was flat and every cell holds [`FLAT_FIELD_VALUE`].
    pub fn is_flat(&self) -> bool {
        self.flat
    }
}

/// Fractal noise generator: parameters plus a gradient selection strategy.
///
/// Holds no per-generation state; one instance can serve any number of
/// concurrent `generate` calls.
#[derive(Clone, Debug)]
pub struct FractalNoise<S = MersenneSelector> {
    params: NoiseParams,
    octaves: OctaveConfig,
    selector: S,
}

impl FractalNoise<MersenneSelector> {
    /// Generator using the reference gradient selection.
    ///
    /// # Errors
    ///
    /// Returns [`NoiseError::InvalidParameter`] if `params` fails
    /// [`NoiseParams::validate`].
    pub fn new(params: NoiseParams) -> Result<Self, NoiseError> {
        Self::with_selector(params, MersenneSelector)
    }
}

impl<S: GradientSelector> FractalNoise<S> {
    /// Generator using a custom gradient selection strategy.
    ///
    /// # Errors
    ///
    /// Returns [`NoiseError::InvalidParameter`] if `params` fails
    /// [`NoiseParams::validate`].
    pub fn with_selector(params: NoiseParams, selector: S) -> Result<Self, NoiseError> {
        params.validate()?;
        Ok(Self {
            octaves: params.octave_config(),
            params,
            selector,
        })
    }

    pub fn params(&self) -> &NoiseParams {
        &self.params
    }

    pub fn selector(&self) -> &S {
        &self.selector
    }

    /// Raw (unnormalized) fractal value of pixel `(x, y)`.
    pub fn sample(&self, x: usize, y: usize, seed: i64) -> f64 {
        let base_x = x as f64 / self.params.scale;
        let base_y = y as f64 / self.params.scale;

        let mut value = 0.0;
        for octave in self.octaves.octaves() {
            let sample_x = base_x * octave.frequency;
            let sample_y = base_y * octave.frequency;
            value += octave_value(&self.selector, sample_x, sample_y, seed) * octave.amplitude;
        }
        value
    }

    /// Fill a `width x height` raw field.
    ///
    /// # Errors
    ///
    /// Returns [`NoiseError::InvalidParameter`] if `width` or `height` is zero,
    /// the cell count overflows `usize`, or the farthest pixel lands outside
    /// `±LATTICE_LIMIT` in noise space.
    pub fn accumulate(
        &self,
        width: usize,
        height: usize,
        seed: i64,
    ) -> Result<RawNoiseField, NoiseError> {
        validate_dimensions(width, height)?;
        self.validate_extent(width, height)?;
        let _scope = ProfilerScope::new("accumulate");

        let mut grid = Grid::with_value(width, height, 0.0);
        grid.as_mut_slice()
            .par_chunks_mut(width)
            .enumerate()
            .for_each(|(y, row)| {
                for (x, cell) in row.iter_mut().enumerate() {
                    *cell = self.sample(x, y, seed);
                }
            });

        Ok(RawNoiseField { grid })
    }

    /// Generate a normalized `width x height` field.
    ///
    /// # Errors
    ///
    /// Same conditions as [`FractalNoise::accumulate`].
    pub fn generate(
        &self,
        width: usize,
        height: usize,
        seed: i64,
    ) -> Result<NormalizedNoiseField, NoiseError> {
        Ok(self.accumulate(width, height, seed)?.normalize())
    }

    /// Every sample coordinate is `pixel / scale * frequency`, and its
    /// magnitude grows with the pixel index and the frequency. Checking the
    /// farthest pixel against the highest frequency bounds the whole field.
    fn validate_extent(&self, width: usize, height: usize) -> Result<(), NoiseError> {
        let far_pixel = (width.max(height) - 1) as f64;
        let base = (far_pixel / self.params.scale).abs();
        let extent = base * self.octaves.max_frequency();
        if extent < LATTICE_LIMIT {
            return Ok(());
        }

        let name = if base < LATTICE_LIMIT {
            "lacunarity"
        } else {
            "scale"
        };
        Err(NoiseError::invalid_parameter(
            name,
            format!("noise coordinate {extent:e} exceeds {LATTICE_LIMIT:e} at {width}x{height}"),
        ))
    }
}

/// Generate a normalized field with the reference gradient selection.
///
/// # Errors
///
/// Returns [`NoiseError::InvalidParameter`] if a dimension is zero, any
/// parameter fails [`NoiseParams::validate`], or the field would leave the
/// `i64` lattice. Nothing is sampled on error.
pub fn generate(
    width: usize,
    height: usize,
    params: &NoiseParams,
    seed: i64,
) -> Result<NormalizedNoiseField, NoiseError> {
    validate_dimensions(width, height)?;
    FractalNoise::new(*params)?.generate(width, height, seed)
}

fn validate_dimensions(width: usize, height: usize) -> Result<(), NoiseError> {
    if width == 0 {
        return Err(NoiseError::invalid_parameter("width", "must be positive, got 0"));
    }
    if height == 0 {
        return Err(NoiseError::invalid_parameter("height", "must be positive, got 0"));
    }
    if width.checked_mul(height).is_none() {
        return Err(NoiseError::invalid_parameter(
            "height",
            format!("{width}x{height} cells overflow the address space"),
        ));
    }
    Ok(())
}
