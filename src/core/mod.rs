//! Core primitives.
//!
//! Vector math, noise seed derivation and trace hashing. Nothing here
//! knows about trauma; the `shake` module builds on top of it.

pub mod vec2;
pub mod rng;
pub mod hash;

// Re-export core types
pub use vec2::Vec2;
pub use rng::{SeedSequence, seed_from_label};
pub use hash::{TraceHash, TraceHasher, hash_offsets};
