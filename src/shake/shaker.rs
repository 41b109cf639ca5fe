//! Shake Offset Generator
//!
//! Standalone per-entity shake state. The host calls [`TraumaShake::update`]
//! once per frame and adds the returned offset to its node, or lets
//! [`TraumaShake::update_position`] rewrite a position it owns.

use serde::{Serialize, Deserialize};
use thiserror::Error;
use tracing::{debug, warn};
#[cfg(feature = "debug-tracing")]
use tracing::trace;

use crate::core::rng::seed_from_label;
use crate::core::vec2::Vec2;
use crate::shake::fractal::{ShakeNoise, AXIS_SEED_X, AXIS_SEED_Y, DEFAULT_NOISE_SEED};
use crate::shake::settings::{ShakeSettings, ShakeSettingsPatch};
use crate::shake::trauma::TraumaAccumulator;

/// Shake update errors.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ShakeError {
    /// Frame delta was negative or not finite.
    #[error("Invalid frame delta: {dt} (must be finite and >= 0)")]
    InvalidDelta {
        /// Rejected delta in seconds.
        dt: f64,
    },
}

/// Read-only snapshot of a generator, for debug overlays and logging.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShakeSnapshot {
    /// Current trauma in [0, 1].
    pub trauma: f64,
    /// Seconds of simulated time.
    pub elapsed: f64,
    /// Latest offset.
    pub offset: Vec2,
    /// Resting position, once known.
    pub anchor: Option<Vec2>,
}

/// Trauma-driven shake generator for a single entity.
///
/// # Example
///
/// ```
/// use trauma_shake::{TraumaShake, ShakeSettingsPatch, Vec2};
///
/// let mut shake = TraumaShake::new(ShakeSettingsPatch::new().decay_per_second(0.0));
/// shake.add_trauma(0.5);
///
/// let mut position = Vec2::new(400.0, 300.0);
/// shake.update_position(1.0 / 60.0, &mut position).unwrap();
/// assert_eq!(shake.anchor(), Some(Vec2::new(400.0, 300.0)));
/// assert!(position.distance(Vec2::new(400.0, 300.0)) <= 100.0 * 0.25 * 2.0f64.sqrt());
/// ```
#[derive(Clone, Debug)]
pub struct TraumaShake {
    settings: ShakeSettings,
    trauma: TraumaAccumulator,
    noise: ShakeNoise,
    elapsed: f64,
    anchor: Option<Vec2>,
    offset: Vec2,
}

impl Default for TraumaShake {
    fn default() -> Self {
        Self::new(ShakeSettingsPatch::new())
    }
}

impl TraumaShake {
    /// Create a generator with the default noise seed.
    ///
    /// Fields missing from `patch` take their default value.
    pub fn new(patch: ShakeSettingsPatch) -> Self {
        Self::with_seed(patch, DEFAULT_NOISE_SEED)
    }

    /// Create a generator with an explicit noise seed.
    pub fn with_seed(patch: ShakeSettingsPatch, seed: u32) -> Self {
        Self {
            settings: ShakeSettings::from_patch(&patch),
            trauma: TraumaAccumulator::new(),
            noise: ShakeNoise::new(seed),
            elapsed: 0.0,
            anchor: None,
            offset: Vec2::ZERO,
        }
    }

    /// Create a generator seeded from a stable entity label.
    pub fn for_entity(patch: ShakeSettingsPatch, label: &str) -> Self {
        Self::with_seed(patch, seed_from_label(label))
    }

    /// Create a generator with a random noise seed.
    ///
    /// Output is not reproducible across runs; use [`Self::with_seed`] when
    /// replays matter.
    pub fn random_seeded(patch: ShakeSettingsPatch) -> Self {
        Self::with_seed(patch, rand::random())
    }

    /// Add a trauma impulse. Negative amounts calm the shake.
    pub fn add_trauma(&mut self, amount: f64) {
        self.trauma.add(amount);
        debug!(amount, trauma = self.trauma.value(), "trauma impulse");
    }

    /// Current trauma in [0, 1].
    #[inline]
    pub fn trauma(&self) -> f64 {
        self.trauma.value()
    }

    /// Current normalized shake strength, `trauma ^ trauma_power`.
    #[inline]
    pub fn magnitude(&self) -> f64 {
        self.trauma.value().powf(self.settings.trauma_power)
    }

    /// Advance by `dt` seconds and compute the new offset.
    ///
    /// A negative or non-finite `dt` is rejected and leaves all state as is.
    pub fn update(&mut self, dt: f64) -> Result<Vec2, ShakeError> {
        if !dt.is_finite() || dt < 0.0 {
            warn!(dt, "rejected frame delta");
            return Err(ShakeError::InvalidDelta { dt });
        }

        self.elapsed += dt;
        self.trauma.decay(dt, self.settings.decay_per_second);

        let magnitude = self.magnitude();
        self.offset = if magnitude > 0.0 {
            let time = self.settings.frequency * self.elapsed;
            let octaves = self.settings.octaves;
            let scale = self.settings.amplitude * magnitude;
            Vec2::new(
                scale * self.noise.sample(time, AXIS_SEED_X, octaves),
                scale * self.noise.sample(time, AXIS_SEED_Y, octaves),
            )
        } else {
            Vec2::ZERO
        };

        #[cfg(feature = "debug-tracing")]
        trace!(
            elapsed = self.elapsed,
            trauma = self.trauma.value(),
            magnitude,
            offset = %self.offset,
            "shake update"
        );

        Ok(self.offset)
    }

    /// Advance and write the shaken position into `position`.
    ///
    /// The first call latches `position` as the anchor unless one was set
    /// with [`Self::set_anchor`]. Every call resets to the anchor before
    /// adding the new offset, so the previous frame's shake never accumulates.
    pub fn update_position(&mut self, dt: f64, position: &mut Vec2) -> Result<(), ShakeError> {
        let anchor = match self.anchor {
            Some(anchor) => anchor,
            None => {
                let latched = *position;
                debug!(anchor = %latched, "anchor latched");
                self.anchor = Some(latched);
                latched
            }
        };

        let offset = self.update(dt)?;
        *position = anchor + offset;
        Ok(())
    }

    /// Set the resting position the shake is applied around.
    ///
    /// Call this whenever the host deliberately moves the entity.
    pub fn set_anchor(&mut self, anchor: Vec2) {
        debug!(%anchor, "anchor set");
        self.anchor = Some(anchor);
    }

    /// Resting position, once latched or set.
    #[inline]
    pub fn anchor(&self) -> Option<Vec2> {
        self.anchor
    }

    /// Offset produced by the latest update.
    #[inline]
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Shaken position (`anchor + offset`), once an anchor is known.
    #[inline]
    pub fn position(&self) -> Option<Vec2> {
        self.anchor.map(|anchor| anchor + self.offset)
    }

    /// Seconds of simulated time.
    #[inline]
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Noise seed.
    #[inline]
    pub fn seed(&self) -> u32 {
        self.noise.seed()
    }

    /// Current settings.
    #[inline]
    pub fn settings(&self) -> &ShakeSettings {
        &self.settings
    }

    /// Merge a settings patch. Missing fields keep their value.
    pub fn update_settings(&mut self, patch: ShakeSettingsPatch) {
        self.settings.apply(&patch);
        debug!(?patch, settings = ?self.settings, "settings updated");
    }

    /// Snapshot of the current state.
    pub fn snapshot(&self) -> ShakeSnapshot {
        ShakeSnapshot {
            trauma: self.trauma.value(),
            elapsed: self.elapsed,
            offset: self.offset,
            anchor: self.anchor,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shake::settings::DEFAULT_SHAKE_SETTINGS;

    fn no_decay() -> ShakeSettingsPatch {
        ShakeSettingsPatch::new()
            .amplitude(100.0)
            .trauma_power(2.0)
            .decay_per_second(0.0)
            .frequency(15.0)
            .octaves(1)
    }

    #[test]
    fn test_new_uses_defaults() {
        let shake = TraumaShake::default();
        assert_eq!(*shake.settings(), DEFAULT_SHAKE_SETTINGS);
        assert_eq!(shake.trauma(), 0.0);
        assert_eq!(shake.elapsed(), 0.0);
        assert_eq!(shake.anchor(), None);
        assert_eq!(shake.offset(), Vec2::ZERO);
        assert_eq!(shake.seed(), DEFAULT_NOISE_SEED);
    }

    #[test]
    fn test_partial_settings_on_construction() {
        let shake = TraumaShake::new(ShakeSettingsPatch::new().octaves(3));
        assert_eq!(shake.settings().octaves, 3);
        assert_eq!(shake.settings().amplitude, DEFAULT_SHAKE_SETTINGS.amplitude);
    }

    #[test]
    fn test_trauma_clamps_to_one() {
        let mut shake = TraumaShake::default();
        shake.add_trauma(0.5);
        shake.add_trauma(0.5);
        shake.add_trauma(0.5);
        assert_eq!(shake.trauma(), 1.0);
    }

    #[test]
    fn test_full_trauma_offset_bounded() {
        let mut shake = TraumaShake::new(no_decay());
        shake.add_trauma(1.0);
        assert_eq!(shake.magnitude(), 1.0);

        let offset = shake.update(0.0).unwrap();
        assert!(offset.x.abs() <= 100.0, "x = {}", offset.x);
        assert!(offset.y.abs() <= 100.0, "y = {}", offset.y);

        // Reproducible
        let mut again = TraumaShake::new(no_decay());
        again.add_trauma(1.0);
        assert_eq!(again.update(0.0).unwrap(), offset);
    }

    #[test]
    fn test_single_update_decays_to_zero() {
        let mut shake = TraumaShake::new(no_decay().decay_per_second(0.4));
        shake.add_trauma(1.0);
        shake.update(2.5).unwrap();
        assert_eq!(shake.trauma(), 0.0);
        assert_eq!(shake.offset(), Vec2::ZERO);
    }

    #[test]
    fn test_monotonic_decay() {
        let mut shake = TraumaShake::new(no_decay().decay_per_second(0.5));
        shake.add_trauma(1.0);

        let mut previous = shake.trauma();
        let mut frames = 0;
        while shake.trauma() > 0.0 {
            shake.update(0.1).unwrap();
            assert!(shake.trauma() < previous);
            previous = shake.trauma();
            frames += 1;
            assert!(frames < 100, "trauma never reached zero");
        }

        for _ in 0..10 {
            shake.update(0.1).unwrap();
            assert_eq!(shake.trauma(), 0.0);
        }
    }

    #[test]
    fn test_zero_decay_keeps_trauma() {
        let mut shake = TraumaShake::new(no_decay());
        shake.add_trauma(0.6);
        for _ in 0..600 {
            shake.update(1.0 / 60.0).unwrap();
        }
        assert_eq!(shake.trauma(), 0.6);
    }

    #[test]
    fn test_zero_trauma_returns_to_anchor() {
        let mut shake = TraumaShake::default();
        let mut position = Vec2::new(400.0, 300.0);

        for _ in 0..10 {
            shake.update_position(1.0 / 60.0, &mut position).unwrap();
            assert_eq!(position, Vec2::new(400.0, 300.0));
        }
    }

    #[test]
    fn test_anchor_latched_once() {
        let mut shake = TraumaShake::new(no_decay());
        shake.add_trauma(0.8);

        let mut position = Vec2::new(400.0, 300.0);
        for _ in 0..30 {
            shake.update_position(1.0 / 60.0, &mut position).unwrap();
            assert_eq!(shake.anchor(), Some(Vec2::new(400.0, 300.0)));
            assert_eq!(position, Vec2::new(400.0, 300.0) + shake.offset());
            assert_eq!(shake.position(), Some(position));
        }
    }

    #[test]
    fn test_shake_relative_to_anchor() {
        let mut shake = TraumaShake::new(no_decay());
        shake.add_trauma(1.0);

        let mut position = Vec2::new(-50.0, 20.0);
        shake.update_position(0.25, &mut position).unwrap();
        let offset = position - Vec2::new(-50.0, 20.0);
        assert!(offset.x.abs() <= 100.0 && offset.y.abs() <= 100.0);
    }

    #[test]
    fn test_set_anchor_overrides_latch() {
        let mut shake = TraumaShake::default();
        shake.set_anchor(Vec2::new(10.0, 10.0));

        let mut position = Vec2::new(999.0, 999.0);
        shake.update_position(0.016, &mut position).unwrap();
        assert_eq!(position, Vec2::new(10.0, 10.0));

        // Re-anchor after the host moves the entity
        shake.set_anchor(Vec2::new(50.0, 60.0));
        shake.update_position(0.016, &mut position).unwrap();
        assert_eq!(position, Vec2::new(50.0, 60.0));
    }

    #[test]
    fn test_position_unset_without_anchor() {
        let mut shake = TraumaShake::new(no_decay());
        shake.add_trauma(1.0);
        shake.update(0.1).unwrap();
        assert_eq!(shake.position(), None);
    }

    #[test]
    fn test_negative_delta_rejected() {
        let mut shake = TraumaShake::new(no_decay().decay_per_second(1.0));
        shake.add_trauma(0.5);
        shake.update(0.1).unwrap();
        let before = shake.snapshot();

        assert_eq!(shake.update(-0.1), Err(ShakeError::InvalidDelta { dt: -0.1 }));
        assert_eq!(shake.snapshot(), before);
    }

    #[test]
    fn test_non_finite_delta_rejected() {
        let mut shake = TraumaShake::default();
        assert!(shake.update(f64::NAN).is_err());
        assert!(shake.update(f64::INFINITY).is_err());
        assert_eq!(shake.elapsed(), 0.0);
    }

    #[test]
    fn test_rejected_delta_leaves_position() {
        let mut shake = TraumaShake::default();
        let mut position = Vec2::new(1.0, 2.0);
        assert!(shake.update_position(-1.0, &mut position).is_err());
        assert_eq!(position, Vec2::new(1.0, 2.0));
    }

    #[test]
    fn test_elapsed_accumulates() {
        let mut shake = TraumaShake::default();
        shake.update(0.5).unwrap();
        shake.update(0.25).unwrap();
        assert_eq!(shake.elapsed(), 0.75);
    }

    #[test]
    fn test_amplitude_scales_offset() {
        let mut full = TraumaShake::new(no_decay());
        let mut half = TraumaShake::new(no_decay().amplitude(50.0));
        full.add_trauma(1.0);
        half.add_trauma(1.0);

        for _ in 0..20 {
            let a = full.update(0.05).unwrap();
            let b = half.update(0.05).unwrap();
            assert_eq!(a, b.scale(2.0));
        }
    }

    #[test]
    fn test_trauma_power_shapes_magnitude() {
        let mut linear = TraumaShake::new(no_decay().trauma_power(1.0));
        let mut squared = TraumaShake::new(no_decay());
        linear.add_trauma(0.5);
        squared.add_trauma(0.5);

        assert_eq!(linear.magnitude(), 0.5);
        assert_eq!(squared.magnitude(), 0.25);

        let a = linear.update(0.3).unwrap();
        let b = squared.update(0.3).unwrap();
        assert_eq!(b, a.scale(0.5));
    }

    #[test]
    fn test_negative_amplitude_accepted() {
        let mut pos = TraumaShake::new(no_decay());
        let mut neg = TraumaShake::new(no_decay().amplitude(-100.0));
        pos.add_trauma(1.0);
        neg.add_trauma(1.0);
        assert_eq!(neg.update(0.2).unwrap(), -pos.update(0.2).unwrap());
    }

    #[test]
    fn test_update_settings_is_per_instance() {
        let mut a = TraumaShake::default();
        let b = TraumaShake::default();

        a.update_settings(ShakeSettingsPatch::new().amplitude(5.0));
        assert_eq!(a.settings().amplitude, 5.0);
        assert_eq!(a.settings().frequency, DEFAULT_SHAKE_SETTINGS.frequency);
        assert_eq!(b.settings().amplitude, DEFAULT_SHAKE_SETTINGS.amplitude);
        assert_eq!(DEFAULT_SHAKE_SETTINGS.amplitude, 100.0);
    }

    #[test]
    fn test_seeds_give_different_shake() {
        let mut a = TraumaShake::with_seed(no_decay(), 1);
        let mut b = TraumaShake::with_seed(no_decay(), 2);
        a.add_trauma(1.0);
        b.add_trauma(1.0);

        let differs = (0..30).any(|_| a.update(0.07).unwrap() != b.update(0.07).unwrap());
        assert!(differs);
    }

    #[test]
    fn test_random_seeded_uses_patch() {
        let shake = TraumaShake::random_seeded(ShakeSettingsPatch::new().amplitude(7.0));
        assert_eq!(shake.settings().amplitude, 7.0);
        assert_eq!(shake.trauma(), 0.0);
    }

    #[test]
    fn test_generator_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TraumaShake>();
    }

    #[test]
    fn test_for_entity_seed() {
        let camera = TraumaShake::for_entity(ShakeSettingsPatch::new(), "camera");
        assert_eq!(camera.seed(), seed_from_label("camera"));
    }
}
