//! Fractal Noise
//!
//! One seeded 2D simplex field per shaking entity. The first coordinate is
//! time, the second is a fixed per-axis offset; X and Y read two parallel
//! lines of the same field, which keeps them uncorrelated without needing a
//! second generator.

use std::fmt;
use noise::{NoiseFn, Simplex};

/// Per-octave amplitude multiplier.
pub const GAIN: f64 = 0.5;

/// Per-octave frequency multiplier.
pub const LACUNARITY: f64 = 2.0;

/// Second noise coordinate sampled for the X axis.
pub const AXIS_SEED_X: f64 = 1.0;

/// Second noise coordinate sampled for the Y axis.
pub const AXIS_SEED_Y: f64 = 2.0;

/// Seed used when none is given.
pub const DEFAULT_NOISE_SEED: u32 = 0;

/// Fractal Brownian motion over a 2D noise function.
///
/// Sums `octaves` layers, starting at amplitude 1 and frequency 1, then
/// multiplying by [`GAIN`] and [`LACUNARITY`] per layer. Only `x` is scaled
/// by the layer frequency; `y` selects the line and stays fixed.
///
/// Raw samples are clamped to [-1, 1]. The sum is not renormalized, so
/// `n` octaves stay within `2 - 2^(1-n)` in magnitude.
pub fn fbm<N>(noise: &N, x: f64, y: f64, octaves: u32) -> f64
where
    N: NoiseFn<f64, 2>,
{
    let mut value = 0.0;
    let mut amplitude = 1.0;
    let mut frequency = 1.0;

    for _ in 0..octaves {
        let sample = noise.get([x * frequency, y]).clamp(-1.0, 1.0);
        value += amplitude * sample;
        amplitude *= GAIN;
        frequency *= LACUNARITY;
    }

    value
}

/// Seeded simplex noise source owned by one shake generator.
#[derive(Clone)]
pub struct ShakeNoise {
    seed: u32,
    simplex: Simplex,
}

impl Default for ShakeNoise {
    fn default() -> Self {
        Self::new(DEFAULT_NOISE_SEED)
    }
}

impl ShakeNoise {
    /// Create a noise source. The permutation table is built once here.
    pub fn new(seed: u32) -> Self {
        Self {
            seed,
            simplex: Simplex::new(seed),
        }
    }

    /// Seed this source was built from.
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Sample fBm along the line selected by `axis_seed`.
    #[inline]
    pub fn sample(&self, time: f64, axis_seed: f64, octaves: u32) -> f64 {
        fbm(&self.simplex, time, axis_seed, octaves)
    }
}

impl fmt::Debug for ShakeNoise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShakeNoise").field("seed", &self.seed).finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================
