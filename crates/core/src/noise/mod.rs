//! Seedable 2D fractal gradient noise.
//!
//! Layered leaf to root:
//!
//! - [`mersenne`] - per-corner pseudo-random streams
//! - [`gradient`] - corner gradient selection and influence
//! - [`octave`] - one fade-interpolated octave at a sample point
//! - [`field`] - multi-octave accumulation over a grid and normalization
//!
//! # Example
//!
//! ```rust
//! use terrain_noise_core::noise::{generate, NoiseParams};
//!
//! let field = generate(64, 64, &NoiseParams::default(), 123).unwrap();
//! assert!(field.as_slice().iter().all(|v| (0.0..=1.0).contains(v)));
//! ```

pub mod field;
pub mod gradient;
pub mod mersenne;
pub mod octave;

pub use field::{
    generate, FractalNoise, NoiseParams, NormalizedNoiseField, RawNoiseField, FLAT_FIELD_VALUE,
};
pub use gradient::{
    draw_gradient_index, gradient_influence, GradientSelector, HashSelector, MersenneSelector,
    GRADIENTS,
};
pub use mersenne::Mt19937;
pub use octave::{fade, lerp, octave_value, Octave, OctaveConfig, LATTICE_LIMIT, OCTAVE_VALUE_BOUND};
