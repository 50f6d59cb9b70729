//! Keyframe synthesis: normalized segments → a curve that decodes to the right index
//! everywhere except inside the guard bands.
//!
//! Layout for segments `S0..Sn` with indices `v0..vn` and guard width `ε`:
//!
//! ```text
//!   S0.start      S0.end-ε  S1.start      S1.end-ε  S2.start ...
//!   [v0] -------- [v0] ~~~~ [v1] -------- [v1] ~~~~ [v2]
//!        hold          guard     hold          guard
//! ```
//!
//! Holds are flat spans between equal keys, so any interpolation reads back the
//! exact index. A non-neutral final segment is followed by an implicit neutral tail:
//! it gets a guard key and the curve ends with a `0` key at the timeline end.

use serde::{Deserialize, Serialize};

use crate::error::LipSyncError;
use crate::index::VisemeIndex;
use crate::normalize::NormalizedSegment;

/// Guard width as a fraction of the shortest segment. Must stay below 0.5 so guards of
/// neighbouring segments can never meet.
pub const GUARD_FRACTION: f64 = 0.25;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Keyframe {
    pub time: f64,
    pub value: u32,
    pub ease_in_percent: f64,
    pub ease_out_percent: f64,
    pub ease_in_speed: f64,
    pub ease_out_speed: f64,
}

impl Keyframe {
    /// Key without any ease (linear on both sides).
    pub fn hold(time: f64, value: u32) -> Self {
        Self {
            time,
            value,
            ease_in_percent: 0.0,
            ease_out_percent: 0.0,
            ease_in_speed: 0.0,
            ease_out_speed: 0.0,
        }
    }

    pub fn index(&self) -> VisemeIndex {
        VisemeIndex(self.value)
    }
}

/// How the host interpolates between keys.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyInterpolation {
    /// Bezier timing between keys; transitions happen inside guard bands.
    #[default]
    Eased,
    /// Stepped keys: the left key holds until the next one.
    Hold,
}

/// Immutable keyframe curve with strictly increasing key times.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "CurveRepr")]
pub struct Curve {
    keyframes: Vec<Keyframe>,
    guard_seconds: f64,
    interpolation: KeyInterpolation,
    max_index: VisemeIndex,
}

impl Curve {
    /// Validate and wrap a keyframe sequence (e.g. one read back from a host document).
    pub fn new(
        keyframes: Vec<Keyframe>,
        guard_seconds: f64,
        interpolation: KeyInterpolation,
    ) -> Result<Self, LipSyncError> {
        if !guard_seconds.is_finite() || guard_seconds < 0.0 {
            return Err(LipSyncError::InvalidCurve {
                reason: format!("guard width {guard_seconds} must be finite and >= 0"),
            });
        }
        for (i, k) in keyframes.iter().enumerate() {
            if !k.time.is_finite() {
                return Err(LipSyncError::InvalidCurve {
                    reason: format!("keyframe {i} has non-finite time"),
                });
            }
        }
        if let Some(i) = keyframes.windows(2).position(|w| w[1].time <= w[0].time) {
            return Err(LipSyncError::InvalidCurve {
                reason: format!(
                    "keyframe times must strictly increase (key {} at {} after {})",
                    i + 1,
                    keyframes[i + 1].time,
                    keyframes[i].time
                ),
            });
        }
        let max_index = keyframes
            .iter()
            .map(Keyframe::index)
            .max()
            .unwrap_or(VisemeIndex::NEUTRAL);
        Ok(Self {
            keyframes,
            guard_seconds,
            interpolation,
            max_index,
        })
    }

    pub fn keyframes(&self) -> &[Keyframe] {
        &self.keyframes
    }

    pub fn guard_seconds(&self) -> f64 {
        self.guard_seconds
    }

    pub fn interpolation(&self) -> KeyInterpolation {
        self.interpolation
    }

    /// Highest index any key carries; decode clamps to `[0, max_index]`.
    pub fn max_index(&self) -> VisemeIndex {
        self.max_index
    }

    pub fn len(&self) -> usize {
        self.keyframes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keyframes.is_empty()
    }

    /// Time of the last key (0 for an empty curve).
    pub fn end_time(&self) -> f64 {
        self.keyframes.last().map(|k| k.time).unwrap_or(0.0)
    }

    /// Same keys with new ease fields; times and values are untouched so the curve
    /// invariants still hold.
    pub(crate) fn with_keyframes(&self, keyframes: Vec<Keyframe>) -> Self {
        debug_assert_eq!(keyframes.len(), self.keyframes.len());
        Self {
            keyframes,
            guard_seconds: self.guard_seconds,
            interpolation: self.interpolation,
            max_index: self.max_index,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CurveRepr {
    keyframes: Vec<Keyframe>,
    guard_seconds: f64,
    #[serde(default)]
    interpolation: KeyInterpolation,
}

impl TryFrom<CurveRepr> for Curve {
    type Error = LipSyncError;

    fn try_from(r: CurveRepr) -> Result<Self, Self::Error> {
        Curve::new(r.keyframes, r.guard_seconds, r.interpolation)
    }
}

/// Guard width for a set of segments: `min(max_guard, GUARD_FRACTION * shortest)`.
/// Zero-length segments (the empty-timeline case) are ignored; with no positive
/// duration at all the guard is 0.
pub fn guard_width(segments: &[NormalizedSegment], max_guard: f64) -> f64 {
    let shortest = segments
        .iter()
        .map(NormalizedSegment::duration)
        .filter(|d| *d > 0.0)
        .fold(f64::INFINITY, f64::min);
    if !shortest.is_finite() {
        return 0.0;
    }
    (shortest * GUARD_FRACTION).min(max_guard)
}

/// Emit hold-pair keyframes for `segments` (as produced by [`crate::normalize`]).
pub fn synthesize(
    segments: &[NormalizedSegment],
    max_guard: f64,
    interpolation: KeyInterpolation,
) -> Result<Curve, LipSyncError> {
    let eps = guard_width(segments, max_guard);
    let mut keys: Vec<Keyframe> = Vec::with_capacity(segments.len() * 2 + 1);

    let last = segments.len().saturating_sub(1);
    for (i, seg) in segments.iter().enumerate() {
        let value = seg.index.0;
        keys.push(Keyframe::hold(seg.start, value));

        // Something follows: the next segment, or the neutral tail after speech.
        let followed = i < last || !seg.index.is_neutral();
        if followed && seg.duration() > 0.0 {
            keys.push(Keyframe::hold(seg.end - eps, value));
        }
    }
    if let Some(tail) = segments.last() {
        if !tail.index.is_neutral() {
            keys.push(Keyframe::hold(tail.end, VisemeIndex::NEUTRAL.0));
        }
    }

    log::debug!(
        "lipsync: synthesized {} keyframes for {} segments (guard {eps}s)",
        keys.len(),
        segments.len()
    );
    Curve::new(keys, eps, interpolation)
}
