//! Shake Commands and Replay
//!
//! Everything a host can do to a generator, as data. Recording the command
//! stream of a session and replaying it on a fresh generator with the same
//! seed must reproduce every offset bit for bit.

use serde::{Serialize, Deserialize};
use tracing::debug;

use crate::core::hash::{hash_offsets, TraceHash};
use crate::core::vec2::Vec2;
use crate::shake::settings::ShakeSettingsPatch;
use crate::shake::shaker::{ShakeError, TraumaShake};

/// A single host interaction.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ShakeCommand {
    /// Inject a trauma impulse.
    AddTrauma {
        /// Impulse size; negative calms.
        amount: f64,
    },

    /// Advance one frame.
    Update {
        /// Seconds since the previous frame.
        dt: f64,
    },

    /// Merge a settings patch.
    UpdateSettings {
        /// Fields to change.
        patch: ShakeSettingsPatch,
    },

    /// Move the resting position.
    SetAnchor {
        /// New anchor X.
        x: f64,
        /// New anchor Y.
        y: f64,
    },
}

/// Result of replaying a command stream.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShakeTrace {
    /// Offset after each `Update` command, in order.
    pub offsets: Vec<Vec2>,
    /// Trauma after the last command.
    pub final_trauma: f64,
    /// Digest of `offsets`.
    pub hash: TraceHash,
}

impl TraumaShake {
    /// Apply one command. Returns the new offset for `Update`.
    pub fn apply(&mut self, command: &ShakeCommand) -> Result<Option<Vec2>, ShakeError> {
        match *command {
            ShakeCommand::AddTrauma { amount } => {
                self.add_trauma(amount);
                Ok(None)
            }
            ShakeCommand::Update { dt } => self.update(dt).map(Some),
            ShakeCommand::UpdateSettings { patch } => {
                self.update_settings(patch);
                Ok(None)
            }
            ShakeCommand::SetAnchor { x, y } => {
                self.set_anchor(Vec2::new(x, y));
                Ok(None)
            }
        }
    }
}

/// Replay a command stream on a fresh generator.
///
/// Stops at the first rejected command.
pub fn replay(
    patch: ShakeSettingsPatch,
    seed: u32,
    commands: &[ShakeCommand],
) -> Result<ShakeTrace, ShakeError> {
    let mut shake = TraumaShake::with_seed(patch, seed);
    let mut offsets = Vec::new();

    for command in commands {
        if let Some(offset) = shake.apply(command)? {
            offsets.push(offset);
        }
    }

    let hash = hash_offsets(&offsets);
    debug!(
        commands = commands.len(),
        frames = offsets.len(),
        hash = %hex::encode(hash),
        "replay finished"
    );

    Ok(ShakeTrace {
        offsets,
        final_trauma: shake.trauma(),
        hash,
    })
}

// =============================================================================
// TESTS
// =============================================================================
