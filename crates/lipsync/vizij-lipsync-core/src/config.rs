//! Configuration for lip-sync synthesis.

use serde::{Deserialize, Serialize};

use crate::error::LipSyncError;
use crate::synth::KeyInterpolation;

/// Half strength ease, as the panel has always applied it.
pub const DEFAULT_EASE_INFLUENCE: f64 = 50.0;
/// Moderate speed (value units per second).
pub const DEFAULT_EASE_SPEED: f64 = 33.0;
/// One frame at 24 fps.
pub const DEFAULT_MAX_GUARD_SECONDS: f64 = 1.0 / 24.0;
/// Name of the slider control the visibility expressions read.
pub const DEFAULT_CONTROL_NAME: &str = "Viseme Index";

/// Temporal ease applied to every keyframe (`{ easeInfluence, easeSpeed }` on the wire).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EaseConfig {
    /// Influence in percent, 0..=100.
    pub ease_influence: f64,
    /// Speed, >= 0.
    pub ease_speed: f64,
}

impl Default for EaseConfig {
    fn default() -> Self {
        Self {
            ease_influence: DEFAULT_EASE_INFLUENCE,
            ease_speed: DEFAULT_EASE_SPEED,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LipSyncConfig {
    #[serde(flatten)]
    pub ease: EaseConfig,
    /// Upper bound for the guard width; the effective width may be smaller for short
    /// segments.
    pub max_guard_seconds: f64,
    pub interpolation: KeyInterpolation,
    /// Fill the time between 0 and the first phoneme with a neutral segment.
    pub lead_in_from_zero: bool,
    pub control_name: String,
}

impl Default for LipSyncConfig {
    fn default() -> Self {
        Self {
            ease: EaseConfig::default(),
            max_guard_seconds: DEFAULT_MAX_GUARD_SECONDS,
            interpolation: KeyInterpolation::default(),
            lead_in_from_zero: true,
            control_name: DEFAULT_CONTROL_NAME.to_string(),
        }
    }
}

impl LipSyncConfig {
    pub fn validate(&self) -> Result<(), LipSyncError> {
        let influence = self.ease.ease_influence;
        if !(0.0..=100.0).contains(&influence) {
            return Err(invalid(format!(
                "easeInfluence must be within 0..=100, got {influence}"
            )));
        }
        let speed = self.ease.ease_speed;
        if !speed.is_finite() || speed < 0.0 {
            return Err(invalid(format!(
                "easeSpeed must be finite and >= 0, got {speed}"
            )));
        }
        let guard = self.max_guard_seconds;
        if !guard.is_finite() || guard <= 0.0 {
            return Err(invalid(format!(
                "maxGuardSeconds must be finite and > 0, got {guard}"
            )));
        }
        if self.control_name.trim().is_empty() {
            return Err(invalid("controlName must not be empty".to_string()));
        }
        Ok(())
    }
}

fn invalid(reason: String) -> LipSyncError {
    LipSyncError::InvalidConfig { reason }
}
