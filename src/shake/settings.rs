//! Shake Settings
//!
//! Tunable parameters for a shake generator, plus the partial "patch" type
//! hosts use to change some of them at runtime. Patches can come from code,
//! from environment variables, or from JSON.

use std::str::FromStr;
use serde::{Serialize, Deserialize};
use thiserror::Error;

/// Environment variable for [`ShakeSettings::amplitude`].
pub const ENV_AMPLITUDE: &str = "TRAUMA_AMPLITUDE";
/// Environment variable for [`ShakeSettings::trauma_power`].
pub const ENV_TRAUMA_POWER: &str = "TRAUMA_POWER";
/// Environment variable for [`ShakeSettings::decay_per_second`].
pub const ENV_DECAY_PER_SECOND: &str = "TRAUMA_DECAY_PER_SECOND";
/// Environment variable for [`ShakeSettings::frequency`].
pub const ENV_FREQUENCY: &str = "TRAUMA_FREQUENCY";
/// Environment variable for [`ShakeSettings::octaves`].
pub const ENV_OCTAVES: &str = "TRAUMA_OCTAVES";

/// Settings used when a field is not provided.
pub const DEFAULT_SHAKE_SETTINGS: ShakeSettings = ShakeSettings {
    amplitude: 100.0,
    trauma_power: 2.0,
    decay_per_second: 0.94,
    frequency: 15.0,
    octaves: 1,
};

/// Shake generator configuration.
///
/// Values are not validated. A negative amplitude simply flips the output,
/// zero decay means trauma never fades.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShakeSettings {
    /// Maximum displacement at full trauma (pixels / world units).
    pub amplitude: f64,
    /// Exponent applied to trauma before scaling.
    /// Values above 1 make small trauma produce disproportionately small shake.
    pub trauma_power: f64,
    /// Linear trauma decay per second.
    pub decay_per_second: f64,
    /// Noise sampling rate along the time axis.
    pub frequency: f64,
    /// Number of fBm layers summed.
    pub octaves: u32,
}

impl Default for ShakeSettings {
    fn default() -> Self {
        DEFAULT_SHAKE_SETTINGS
    }
}

impl ShakeSettings {
    /// Build settings from a patch applied over the defaults.
    pub fn from_patch(patch: &ShakeSettingsPatch) -> Self {
        let mut settings = Self::default();
        settings.apply(patch);
        settings
    }

    /// Merge the provided fields of `patch` into these settings.
    pub fn apply(&mut self, patch: &ShakeSettingsPatch) {
        if let Some(amplitude) = patch.amplitude {
            self.amplitude = amplitude;
        }
        if let Some(trauma_power) = patch.trauma_power {
            self.trauma_power = trauma_power;
        }
        if let Some(decay_per_second) = patch.decay_per_second {
            self.decay_per_second = decay_per_second;
        }
        if let Some(frequency) = patch.frequency {
            self.frequency = frequency;
        }
        if let Some(octaves) = patch.octaves {
            self.octaves = octaves;
        }
    }
}

/// Partial settings. `None` fields keep their previous value on merge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShakeSettingsPatch {
    /// New amplitude.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amplitude: Option<f64>,
    /// New trauma exponent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trauma_power: Option<f64>,
    /// New decay rate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decay_per_second: Option<f64>,
    /// New noise frequency.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency: Option<f64>,
    /// New octave count.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub octaves: Option<u32>,
}

impl From<ShakeSettings> for ShakeSettingsPatch {
    fn from(settings: ShakeSettings) -> Self {
        Self {
            amplitude: Some(settings.amplitude),
            trauma_power: Some(settings.trauma_power),
            decay_per_second: Some(settings.decay_per_second),
            frequency: Some(settings.frequency),
            octaves: Some(settings.octaves),
        }
    }
}

impl ShakeSettingsPatch {
    /// Empty patch (changes nothing).
    pub const fn new() -> Self {
        Self {
            amplitude: None,
            trauma_power: None,
            decay_per_second: None,
            frequency: None,
            octaves: None,
        }
    }

    /// Set the amplitude.
    pub fn amplitude(mut self, value: f64) -> Self {
        self.amplitude = Some(value);
        self
    }

    /// Set the trauma exponent.
    pub fn trauma_power(mut self, value: f64) -> Self {
        self.trauma_power = Some(value);
        self
    }

    /// Set the decay rate.
    pub fn decay_per_second(mut self, value: f64) -> Self {
        self.decay_per_second = Some(value);
        self
    }

    /// Set the noise frequency.
    pub fn frequency(mut self, value: f64) -> Self {
        self.frequency = Some(value);
        self
    }

    /// Set the octave count.
    pub fn octaves(mut self, value: u32) -> Self {
        self.octaves = Some(value);
        self
    }

    /// Whether the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        *self == Self::new()
    }

    /// Layer `other` on top of this patch. Fields set in `other` win.
    pub fn merge(mut self, other: &Self) -> Self {
        self.amplitude = other.amplitude.or(self.amplitude);
        self.trauma_power = other.trauma_power.or(self.trauma_power);
        self.decay_per_second = other.decay_per_second.or(self.decay_per_second);
        self.frequency = other.frequency.or(self.frequency);
        self.octaves = other.octaves.or(self.octaves);
        self
    }

    /// Parse a JSON patch, e.g. `{"amplitude": 40.0, "octaves": 3}`.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Create a patch from environment variables.
    ///
    /// Unset variables leave the field `None`.
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create a patch from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            amplitude: parse_var(&lookup, ENV_AMPLITUDE)?,
            trauma_power: parse_var(&lookup, ENV_TRAUMA_POWER)?,
            decay_per_second: parse_var(&lookup, ENV_DECAY_PER_SECOND)?,
            frequency: parse_var(&lookup, ENV_FREQUENCY)?,
            octaves: parse_var(&lookup, ENV_OCTAVES)?,
        })
    }
}

fn parse_var<F, T>(lookup: &F, key: &'static str) -> Result<Option<T>, SettingsError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| SettingsError::InvalidValue { key, value: raw }),
    }
}

/// Settings loading errors.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// A configuration value could not be parsed.
    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue {
        /// Variable name.
        key: &'static str,
        /// Raw value as found.
        value: String,
    },

    /// Malformed JSON patch.
    #[error("Invalid settings JSON: {0}")]
    Json(#[from] serde_json::Error),
}

// =============================================================================
// TESTS
// =============================================================================
