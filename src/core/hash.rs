//! Trace Hashing for Verification
//!
//! Digests a sequence of shake offsets so two runs can be compared with a
//! single 32-byte value. Floats are hashed by bit pattern, so "equal hash"
//! means bit-for-bit identical output.

use sha2::{Sha256, Digest};
use super::vec2::Vec2;

/// Hash output type (256 bits / 32 bytes)
pub type TraceHash = [u8; 32];

/// Deterministic hasher for shake traces.
///
/// Wraps SHA-256 with helpers for float and vector types.
/// Order of updates is critical for determinism.
pub struct TraceHasher {
    hasher: Sha256,
}

impl TraceHasher {
    /// Create a new hasher with domain separator.
    pub fn new(domain: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(domain);
        Self { hasher }
    }

    /// Create hasher for offset traces.
    pub fn for_offsets() -> Self {
        Self::new(b"TRAUMA_SHAKE_TRACE_V1")
    }

    /// Update with a u32 value (little-endian).
    #[inline]
    pub fn update_u32(&mut self, value: u32) {
        self.hasher.update(value.to_le_bytes());
    }

    /// Update with an f64 bit pattern (little-endian).
    #[inline]
    pub fn update_f64(&mut self, value: f64) {
        self.hasher.update(value.to_bits().to_le_bytes());
    }

    /// Update with a Vec2.
    #[inline]
    pub fn update_vec2(&mut self, value: Vec2) {
        self.update_f64(value.x);
        self.update_f64(value.y);
    }

    /// Finalize and return the hash.
    pub fn finalize(self) -> TraceHash {
        self.hasher.finalize().into()
    }
}

/// Hash a full offset sequence.
///
/// The length goes in first so a prefix never collides with the whole trace.
pub fn hash_offsets(offsets: &[Vec2]) -> TraceHash {
    let mut hasher = TraceHasher::for_offsets();
    hasher.update_u32(offsets.len() as u32);
    for offset in offsets {
        hasher.update_vec2(*offset);
    }
    hasher.finalize()
}

// =============================================================================
// TESTS
// =============================================================================
