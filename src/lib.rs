//! # Trauma Shake
//!
//! Trauma-driven screen shake: a decaying intensity scalar drives fractal
//! simplex noise, producing a 2D offset the host adds to a node every frame.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       TRAUMA SHAKE                           │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Primitives                                │
//! │  ├── vec2.rs     - f64 2D vector                             │
//! │  ├── rng.rs      - Per-entity noise seed derivation          │
//! │  └── hash.rs     - Offset trace hashing                      │
//! │                                                              │
//! │  shake/          - Shake logic                               │
//! │  ├── settings.rs - Parameters, patches, env/JSON config      │
//! │  ├── trauma.rs   - Clamped linear-decay accumulator          │
//! │  ├── fractal.rs  - Simplex source and fBm                    │
//! │  ├── shaker.rs   - Per-entity generator                      │
//! │  └── command.rs  - Host commands and replay                  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Frame Contract
//!
//! Each frame the host calls `update(dt)` with wall-clock seconds since the
//! previous frame. The generator advances time, decays trauma, computes
//! `trauma ^ trauma_power`, samples fBm for each axis and returns the offset.
//! Impulses (`add_trauma`) and settings patches may arrive between frames.
//!
//! ## Determinism Guarantee
//!
//! Noise is a pure function of its seed and inputs. Two generators built with
//! the same settings and seed, fed the same command stream, produce
//! **bit-identical** offsets.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod shake;

// Re-export commonly used types
pub use crate::core::vec2::Vec2;
pub use crate::core::rng::{SeedSequence, seed_from_label};
pub use shake::settings::{ShakeSettings, ShakeSettingsPatch, DEFAULT_SHAKE_SETTINGS};
pub use shake::shaker::{TraumaShake, ShakeError};
pub use shake::command::{ShakeCommand, ShakeTrace, replay};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Frame rate the demo host simulates (Hz)
pub const DEMO_FRAME_RATE: u32 = 60;
