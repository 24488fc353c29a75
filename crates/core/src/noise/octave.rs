//! Single-octave gradient noise and the octave schedule.
//!
//! One octave is classic 2D gradient noise: the four lattice corners around
//! the sample point each contribute a gradient influence, blended with
//! quintic fade weights.
//!
//! # References
//!
//! - Perlin, K. (2002). Improving noise. ACM Transactions on Graphics, 21(3), 681-682.

use super::gradient::{gradient_influence, GradientSelector};

/// Largest sample coordinate magnitude (2^62) whose lattice corners, including
/// the `+1` neighbor, fit in `i64`.
pub const LATTICE_LIMIT: f64 = 4_611_686_018_427_387_904.0;

/// Upper bound on `|octave_value|`: `|g| * |d| <= sqrt(2) * sqrt(2)` inside a cell.
pub const OCTAVE_VALUE_BOUND: f64 = 2.0;

/// One layer of the fractal sum.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Octave {
    /// Multiplier applied to the scaled sample coordinates.
    pub frequency: f64,
    /// Weight of this octave in the sum.
    pub amplitude: f64,
}

impl Octave {
    /// Create a new octave.
    pub fn new(frequency: f64, amplitude: f64) -> Self {
        Self {
            frequency,
            amplitude,
        }
    }
}

/// Precomputed `(frequency, amplitude)` schedule.
///
/// Octave `i` has `frequency = lacunarity^i` and `amplitude = persistence^i`.
#[derive(Clone, Debug, PartialEq)]
pub struct OctaveConfig {
    octaves: Vec<Octave>,
}

impl OctaveConfig {
    /// Build the schedule for `count` octaves.
    pub fn new(count: u32, persistence: f64, lacunarity: f64) -> Self {
        // powf, not powi: powi's repeated multiplication rounds differently
        let octaves = (0..count)
            .map(|i| {
                let exponent = f64::from(i);
                Octave::new(lacunarity.powf(exponent), persistence.powf(exponent))
            })
            .collect();
        Self { octaves }
    }

    /// Octaves from coarsest to finest.
    pub fn octaves(&self) -> &[Octave] {
        &self.octaves
    }

    /// Number of octaves.
    pub fn len(&self) -> usize {
        self.octaves.len()
    }

    /// `true` if the schedule has no octaves.
    pub fn is_empty(&self) -> bool {
        self.octaves.is_empty()
    }

    /// Highest frequency in the schedule (`0.0` when empty).
    pub fn max_frequency(&self) -> f64 {
        self.octaves
            .iter()
            .fold(0.0, |max, octave| f64::max(max, octave.frequency))
    }
}

/// Quintic smootherstep `6t^5 - 15t^4 + 10t^3`.
///
/// Zero first and second derivatives at `t = 0` and `t = 1`.
#[inline]
pub fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

/// Linear interpolation.
#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + t * (b - a)
}

/// Noise value of one octave at an already-scaled sample point.
///
/// The caller multiplies the result by the octave amplitude. Both coordinates
/// must lie strictly within `±LATTICE_LIMIT`; [`FractalNoise`] rejects
/// parameters that would leave that range.
///
/// [`FractalNoise`]: super::FractalNoise
pub fn octave_value<S: GradientSelector + ?Sized>(
    selector: &S,
    sample_x: f64,
    sample_y: f64,
    seed: i64,
) -> f64 {
    debug_assert!(
        sample_x.abs() < LATTICE_LIMIT && sample_y.abs() < LATTICE_LIMIT,
        "sample ({sample_x}, {sample_y}) outside the i64 lattice"
    );
    let floor_x = sample_x.floor();
    let floor_y = sample_y.floor();
    let x0 = floor_x as i64;
    let y0 = floor_y as i64;
    let x1 = x0 + 1;
    let y1 = y0 + 1;

    let sx = fade(sample_x - floor_x);
    let sy = fade(sample_y - floor_y);

    let n00 = gradient_influence(selector, x0, y0, sample_x, sample_y, seed);
    let n10 = gradient_influence(selector, x1, y0, sample_x, sample_y, seed);
    let n01 = gradient_influence(selector, x0, y1, sample_x, sample_y, seed);
    let n11 = gradient_influence(selector, x1, y1, sample_x, sample_y, seed);

    let nx0 = lerp(n00, n10, sx);
    let nx1 = lerp(n01, n11, sx);
    lerp(nx0, nx1, sy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise::gradient::{HashSelector, MersenneSelector};
    use approx::assert_abs_diff_eq;

    #[test]
    fn fade_endpoints_and_midpoint() {
        assert_eq!(fade(0.0), 0.0);
        assert_eq!(fade(1.0), 1.0);
        assert_eq!(fade(0.5), 0.5);
    }

    #[test]
    fn fade_is_flat_at_endpoints() {
        let h = 1e-4;
        assert_abs_diff_eq!((fade(h) - fade(0.0)) / h, 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!((fade(1.0) - fade(1.0 - h)) / h, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn lerp_endpoints() {
        assert_eq!(lerp(2.0, 6.0, 0.0), 2.0);
        assert_eq!(lerp(2.0, 6.0, 1.0), 6.0);
        assert_eq!(lerp(2.0, 6.0, 0.25), 3.0);
    }

    #[test]
    fn schedule_is_geometric() {
        let config = OctaveConfig::new(4, 0.5, 2.0);
        let expected = [(1.0, 1.0), (2.0, 0.5), (4.0, 0.25), (8.0, 0.125)];
        assert_eq!(config.len(), 4);
        for (octave, (frequency, amplitude)) in config.octaves().iter().zip(expected) {
            assert_eq!(octave.frequency, frequency);
            assert_eq!(octave.amplitude, amplitude);
        }
        assert_eq!(config.max_frequency(), 8.0);
    }

    #[test]
    fn max_frequency_of_shrinking_schedule_is_first_octave() {
        let config = OctaveConfig::new(3, 0.5, 0.25);
        assert_eq!(config.max_frequency(), 1.0);
    }

    #[test]
    fn empty_schedule() {
        let config = OctaveConfig::new(0, 0.5, 2.0);
        assert!(config.is_empty());
        assert_eq!(config.max_frequency(), 0.0);
    }

    #[test]
    fn reference_octave_values() {
        // Bit-exact values from the reference generator
        assert_eq!(octave_value(&MersenneSelector, 0.5, 0.25, 0), 0.0732421875);
        assert_eq!(
            octave_value(&MersenneSelector, 1.7, 3.2, 123),
            0.1777605593599999
        );
        assert_eq!(
            octave_value(&MersenneSelector, -2.4, 0.9, 7),
            0.1792469145600002
        );
    }

    #[test]
    fn octave_vanishes_on_lattice_points() {
        // Every corner influence is zero at its own corner and the fade weights
        // select exactly that corner
        for (x, y) in [(0.0, 0.0), (3.0, -2.0), (-7.0, 11.0)] {
            assert_eq!(octave_value(&MersenneSelector, x, y, 99), 0.0);
            assert_eq!(octave_value(&HashSelector, x, y, 99), 0.0);
        }
    }

    #[test]
    fn octave_is_finite_near_lattice_limit() {
        let edge = LATTICE_LIMIT - 4096.0;
        for (x, y) in [(edge, 0.5), (-edge, -edge), (0.25, -edge)] {
            let value = octave_value(&MersenneSelector, x, y, i64::MIN);
            assert!(value.is_finite(), "octave value {value} at ({x}, {y})");
        }
    }

    #[test]
    fn octave_is_continuous_across_cell_edges() {
        let eps = 1e-9;
        for seed in [0, 1, 42] {
            let left = octave_value(&MersenneSelector, 2.0 - eps, 0.37, seed);
            let right = octave_value(&MersenneSelector, 2.0 + eps, 0.37, seed);
            assert_abs_diff_eq!(left, right, epsilon = 1e-6);
        }
    }

    #[test]
    fn octave_value_is_bounded() {
        // |influence| <= |g| * |d| <= sqrt(2) * sqrt(2) within a unit cell
        for i in 0..200 {
            let x = f64::from(i) * 0.173 - 10.0;
            let y = f64::from(i) * 0.291 - 20.0;
            let value = octave_value(&HashSelector, x, y, 3);
            assert!(value.abs() <= OCTAVE_VALUE_BOUND, "octave value {value} at ({x}, {y})");
        }
    }
}
