//! Trauma Shake Demo
//!
//! Headless host loop: a node sits at the center of a 1280x720 screen, the
//! "player" hits space every 1.5 seconds, and a tuning panel bumps the
//! octave count halfway through. The recorded session is then replayed to
//! check the offsets are reproducible.
//!
//! Usage: `trauma-shake-demo [settings.json]`
//!
//! Settings come from `TRAUMA_*` environment variables, overridden by the
//! optional JSON patch file. Log level follows `RUST_LOG` (default `info`).

use std::fs;

use anyhow::{bail, Context, Result};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use trauma_shake::{
    replay, seed_from_label, ShakeCommand, ShakeSettingsPatch, TraumaShake, Vec2,
    DEMO_FRAME_RATE, VERSION,
};
use trauma_shake::core::hash::hash_offsets;

/// Simulated session length in frames (5 seconds).
const DEMO_FRAMES: u32 = 5 * DEMO_FRAME_RATE;

/// Frames between space-bar impulses.
const IMPULSE_INTERVAL: u32 = 90;

/// Impulse size, same as the "Add Fixed Trauma" button.
const IMPULSE_AMOUNT: f64 = 0.5;

fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    info!("Trauma Shake Demo v{}", VERSION);

    let patch = load_settings()?;
    demo_session(patch)
}

/// Environment patch, overridden by the JSON file given as first argument.
fn load_settings() -> Result<ShakeSettingsPatch> {
    let mut patch = ShakeSettingsPatch::from_env().context("Reading TRAUMA_* environment")?;

    if let Some(path) = std::env::args().nth(1) {
        let json = fs::read_to_string(&path)
            .with_context(|| format!("Reading settings file {}", path))?;
        let file_patch = ShakeSettingsPatch::from_json(&json)
            .with_context(|| format!("Parsing settings file {}", path))?;
        patch = patch.merge(&file_patch);
        info!("Loaded settings from {}", path);
    }

    Ok(patch)
}

/// Run a recorded session, then replay it.
fn demo_session(patch: ShakeSettingsPatch) -> Result<()> {
    info!("=== Starting Demo Session ===");

    let seed = seed_from_label("camera");
    let mut shake = TraumaShake::with_seed(patch, seed);
    info!("Noise seed: {}", seed);
    info!("Settings: {:?}", shake.settings());

    let mut position = Vec2::new(640.0, 360.0);
    let mut commands = Vec::new();
    let mut offsets = Vec::new();
    let mut peak = 0.0f64;

    info!("Running {} frames...", DEMO_FRAMES);

    for frame in 0..DEMO_FRAMES {
        if frame % IMPULSE_INTERVAL == 0 {
            shake.add_trauma(IMPULSE_AMOUNT);
            commands.push(ShakeCommand::AddTrauma { amount: IMPULSE_AMOUNT });
        }

        if frame == DEMO_FRAMES / 2 {
            let tweak = ShakeSettingsPatch::new().octaves(3);
            shake.update_settings(tweak);
            commands.push(ShakeCommand::UpdateSettings { patch: tweak });
        }

        // Ticker reports elapsed frames; the core wants seconds.
        let delta_frames = 1.0;
        let dt = delta_frames / DEMO_FRAME_RATE as f64;

        shake.update_position(dt, &mut position)?;
        commands.push(ShakeCommand::Update { dt });

        let offset = shake.offset();
        offsets.push(offset);
        peak = peak.max(offset.length());

        if frame % 30 == 0 {
            info!(
                "Frame {:3}: trauma {:.3}, offset {}, position {}",
                frame,
                shake.trauma(),
                offset,
                position
            );
        }
    }

    info!("=== Session Results ===");
    let hash = hash_offsets(&offsets);
    info!("Peak displacement: {:.2}", peak);
    info!("Final trauma: {:.3}", shake.trauma());
    info!("Trace Hash: {}", hex::encode(hash));

    info!("=== Verifying Determinism ===");
    let trace = replay(patch, seed, &commands)?;
    info!("Replay Trace Hash: {}", hex::encode(trace.hash));

    if trace.hash == hash {
        info!("DETERMINISM VERIFIED: Hashes match!");
        Ok(())
    } else {
        warn!("DETERMINISM FAILURE: Hashes differ!");
        bail!("replayed session diverged from the live one")
    }
}
