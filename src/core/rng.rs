//! Noise Seed Derivation
//!
//! Every shaking entity needs its own noise seed, otherwise two cameras
//! shaken at the same time move in lockstep. Seeds come from one of two
//! deterministic sources:
//!
//! - [`SeedSequence`]: SplitMix64 counter, for entities spawned in order
//! - [`seed_from_label`]: SHA-256 of a stable name ("camera", "player-1")
//!
//! Given the same base or label, the same seed comes out on every platform.

use serde::{Serialize, Deserialize};
use sha2::{Sha256, Digest};

/// Domain separator for label-derived seeds.
const SEED_DOMAIN: &[u8] = b"TRAUMA_SHAKE_SEED_V1";

/// Deterministic sequence of noise seeds.
///
/// # Example
///
/// ```
/// use trauma_shake::core::rng::SeedSequence;
///
/// let mut seeds = SeedSequence::new(42);
/// assert_eq!(seeds.next_seed(), 3184996902); // Always the same!
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedSequence {
    state: u64,
}

impl Default for SeedSequence {
    fn default() -> Self {
        Self::new(0)
    }
}

impl SeedSequence {
    /// Create a sequence from a 64-bit base seed.
    pub fn new(base: u64) -> Self {
        Self { state: base }
    }

    /// Next 32-bit noise seed.
    ///
    /// Takes the upper half of the SplitMix64 output, which mixes best.
    #[inline]
    pub fn next_seed(&mut self) -> u32 {
        (splitmix64(&mut self.state) >> 32) as u32
    }

    /// Get current state (for checkpointing).
    pub fn state(&self) -> u64 {
        self.state
    }
}

impl Iterator for SeedSequence {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        Some(self.next_seed())
    }
}

/// SplitMix64 step.
/// Produces well-distributed values from sequential states.
#[inline]
fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9E3779B97F4A7C15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}

/// Derive a noise seed from a stable entity label.
///
/// The first 4 bytes of `SHA-256(domain || label)` are read little-endian.
pub fn seed_from_label(label: &str) -> u32 {
    let mut hasher = Sha256::new();
    hasher.update(SEED_DOMAIN);
    hasher.update(label.as_bytes());
    let hash = hasher.finalize();

    u32::from_le_bytes([hash[0], hash[1], hash[2], hash[3]])
}

// =============================================================================
// TESTS
// =============================================================================
