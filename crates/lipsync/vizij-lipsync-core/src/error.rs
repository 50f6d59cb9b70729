//! Fatal error type for lip-sync synthesis.
//!
//! Anything recoverable is reported through [`crate::diagnostics`] instead; a run that
//! returns one of these produced no curve at all.

use serde::{Deserialize, Serialize};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LipSyncError {
    /// Interval with a non-finite or negative start, or `start >= end`.
    #[error("invalid interval #{position} ('{phoneme}'): start {start} must be finite, >= 0 and < end {end}")]
    InvalidInterval {
        position: usize,
        phoneme: String,
        start: f64,
        end: f64,
    },

    /// Configuration outside its documented range.
    #[error("invalid config: {reason}")]
    InvalidConfig { reason: String },

    /// Keyframe sequence that violates curve invariants (e.g. from a host document).
    #[error("invalid curve: {reason}")]
    InvalidCurve { reason: String },

    /// Input document could not be parsed or serialized.
    #[error("parse error: {reason}")]
    Parse { reason: String },
}

impl From<serde_json::Error> for LipSyncError {
    fn from(e: serde_json::Error) -> Self {
        LipSyncError::Parse {
            reason: e.to_string(),
        }
    }
}
