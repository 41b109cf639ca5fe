//! Shake Logic Module
//!
//! Trauma accumulation, fractal noise and the per-entity generator.
//!
//! ## Module Structure
//!
//! - `settings`: Tunable parameters, partial patches, env/JSON loading
//! - `trauma`: Clamped, linearly decaying trauma scalar
//! - `fractal`: Seeded simplex source and fBm summation
//! - `shaker`: The generator hosts drive once per frame
//! - `command`: Host interactions as data, and replay

pub mod settings;
pub mod trauma;
pub mod fractal;
pub mod shaker;
pub mod command;

// Re-export key types
pub use settings::{ShakeSettings, ShakeSettingsPatch, SettingsError, DEFAULT_SHAKE_SETTINGS};
pub use trauma::TraumaAccumulator;
pub use fractal::{fbm, ShakeNoise};
pub use shaker::{TraumaShake, ShakeError, ShakeSnapshot};
pub use command::{ShakeCommand, ShakeTrace, replay};
