//! Trauma Accumulator
//!
//! Trauma is a normalized [0, 1] intensity. Impulses push it up, time pulls
//! it down linearly. Every mutation clamps, so callers never need to check
//! the current level before adding an impulse.

use serde::{Serialize, Deserialize};

/// Accumulated, linearly decaying trauma.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TraumaAccumulator {
    trauma: f64,
}

impl TraumaAccumulator {
    /// Lowest possible trauma.
    pub const MIN: f64 = 0.0;

    /// Highest possible trauma.
    pub const MAX: f64 = 1.0;

    /// Create an accumulator with zero trauma.
    pub const fn new() -> Self {
        Self { trauma: Self::MIN }
    }

    /// Add an impulse. Negative amounts reduce trauma.
    ///
    /// The result is clamped to [0, 1]. A NaN amount is ignored.
    #[inline]
    pub fn add(&mut self, amount: f64) {
        if amount.is_nan() {
            return;
        }
        self.trauma = (self.trauma + amount).clamp(Self::MIN, Self::MAX);
    }

    /// Decay linearly over `dt` seconds.
    ///
    /// Trauma hits exactly zero after `trauma / decay_per_second` seconds and
    /// stays there. Callers guarantee `dt >= 0`.
    #[inline]
    pub fn decay(&mut self, dt: f64, decay_per_second: f64) {
        let next = self.trauma - decay_per_second * dt;
        if next.is_nan() {
            return;
        }
        self.trauma = next.clamp(Self::MIN, Self::MAX);
    }

    /// Current trauma.
    #[inline]
    pub fn value(&self) -> f64 {
        self.trauma
    }

    /// Whether trauma has fully decayed.
    #[inline]
    pub fn is_calm(&self) -> bool {
        self.trauma == Self::MIN
    }
}

// =============================================================================
// TESTS
// =============================================================================
