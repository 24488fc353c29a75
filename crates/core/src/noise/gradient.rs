//! Per-corner gradient selection and influence.
//!
//! Every integer lattice corner `(cell_x, cell_y)` gets one of eight fixed
//! gradient vectors. The choice is a pure function of `(seed, cell_x, cell_y)`:
//! each lookup builds its own generator state, so lookups never share mutable
//! state and can run on any thread in any order.
//!
//! The diagonal gradients are deliberately not normalized (magnitude √2).
//! Normalizing them would change the raw value range and with it the
//! normalized terrain.

use rand::RngCore;

use super::mersenne::Mt19937;

/// Gradient vectors, in selection-index order.
pub const GRADIENTS: [(f64, f64); 8] = [
    (1.0, 0.0),
    (-1.0, 0.0),
    (0.0, 1.0),
    (0.0, -1.0),
    (1.0, 1.0),
    (1.0, -1.0),
    (-1.0, 1.0),
    (-1.0, -1.0),
];

/// Seed-space stride between adjacent columns of lattice corners.
pub const CELL_X_STRIDE: i128 = 100_000;
/// Seed-space stride between adjacent rows of lattice corners.
pub const CELL_Y_STRIDE: i128 = 1_000;

/// Strategy mapping a lattice corner to an index into [`GRADIENTS`].
///
/// Implementations must be pure: the same `(seed, cell_x, cell_y)` always
/// yields the same index, and the result is always `< GRADIENTS.len()`.
pub trait GradientSelector: Send + Sync {
    /// Gradient index for the corner `(cell_x, cell_y)` under `seed`.
    fn select(&self, seed: i64, cell_x: i64, cell_y: i64) -> usize;
}

/// Reference selector: reseeds a fresh `MT19937` stream per corner.
///
/// The stream seed is `seed + cell_x * 100000 + cell_y * 1000`, computed in
/// 128-bit arithmetic so no corner of an `i64` lattice wraps. Output is
/// bit-compatible with the reference terrain generator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MersenneSelector;

impl MersenneSelector {
    /// Mixed stream seed for a corner.
    #[inline]
    pub fn local_seed(seed: i64, cell_x: i64, cell_y: i64) -> i128 {
        i128::from(seed) + i128::from(cell_x) * CELL_X_STRIDE + i128::from(cell_y) * CELL_Y_STRIDE
    }
}

impl GradientSelector for MersenneSelector {
    fn select(&self, seed: i64, cell_x: i64, cell_y: i64) -> usize {
        let mut rng = Mt19937::from_int_seed(Self::local_seed(seed, cell_x, cell_y));
        draw_gradient_index(&mut rng)
    }
}

/// Hash-based selector: avalanche hash of `(seed, cell_x, cell_y)`.
///
/// Cheaper than reseeding a Mersenne Twister and free of the collisions the
/// linear stride mixing has (e.g. `cell_y + 100` and `cell_x + 1` land on the
/// same stream). NOT bit-compatible with [`MersenneSelector`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HashSelector;

impl HashSelector {
    /// 64-bit hash of a corner (`SplitMix64` finalizer over the mixed inputs).
    #[inline]
    pub fn hash(seed: i64, cell_x: i64, cell_y: i64) -> u64 {
        let mut h = (seed as u64)
            ^ (cell_x as u64).wrapping_mul(0x9e37_79b9_7f4a_7c15)
            ^ (cell_y as u64).wrapping_mul(0xc2b2_ae3d_27d4_eb4f);
        h = (h ^ (h >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        h = (h ^ (h >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        h ^ (h >> 31)
    }
}

impl GradientSelector for HashSelector {
    fn select(&self, seed: i64, cell_x: i64, cell_y: i64) -> usize {
        // Top 3 bits carry the best-mixed output
        (Self::hash(seed, cell_x, cell_y) >> 61) as usize
    }
}

/// Draw a uniform index in `[0, 8)` from a 32-bit stream.
///
/// Takes the top 4 bits of each word and rejects values `>= 8`, matching the
/// reference terrain generator's bounded draw.
pub fn draw_gradient_index<R: RngCore + ?Sized>(rng: &mut R) -> usize {
    loop {
        let candidate = (rng.next_u32() >> 28) as usize;
        if candidate < GRADIENTS.len() {
            return candidate;
        }
    }
}

/// Influence of the corner `(cell_x, cell_y)` at `(sample_x, sample_y)`.
///
/// Dot product of the corner's gradient with the displacement from the
/// corner to the sample point.
#[inline]
pub fn gradient_influence<S: GradientSelector + ?Sized>(
    selector: &S,
    cell_x: i64,
    cell_y: i64,
    sample_x: f64,
    sample_y: f64,
    seed: i64,
) -> f64 {
    let (gx, gy) = GRADIENTS[selector.select(seed, cell_x, cell_y)];
    let dx = sample_x - cell_x as f64;
    let dy = sample_y - cell_y as f64;
    gx * dx + gy * dy
}
