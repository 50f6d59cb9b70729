//! Interval normalization: raw, possibly overlapping phoneme intervals in, a sorted
//! gap-free run of index segments out.
//!
//! Rules, applied in order:
//! - every interval must have finite times with `0 <= start < end` (fatal otherwise);
//! - intervals are stably sorted by start;
//! - an interval overlapping the next one is truncated at the next one's start;
//! - phonemes without an index resolve to neutral;
//! - gaps become neutral segments (including the lead-in from 0 when requested);
//! - neighbours with the same index are merged.

use serde::{Deserialize, Serialize};

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::error::LipSyncError;
use crate::index::VisemeIndex;
use crate::phoneme::{PhonemeInterval, PhonemeSymbol};

/// Gaps no wider than this are float noise from upstream tools, not silence.
pub const GAP_TOLERANCE: f64 = 1e-9;

/// Half-open `[start, end)` span with one active index.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NormalizedSegment {
    pub index: VisemeIndex,
    pub start: f64,
    pub end: f64,
}

impl NormalizedSegment {
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    pub fn contains(&self, t: f64) -> bool {
        t >= self.start && t < self.end
    }
}

pub fn normalize<F>(
    intervals: &[PhonemeInterval],
    assign: F,
    lead_in_from_zero: bool,
    diagnostics: &mut Diagnostics,
) -> Result<Vec<NormalizedSegment>, LipSyncError>
where
    F: Fn(&PhonemeSymbol) -> Option<VisemeIndex>,
{
    for (position, iv) in intervals.iter().enumerate() {
        let valid = iv.start.is_finite() && iv.end.is_finite() && iv.start >= 0.0 && iv.start < iv.end;
        if !valid {
            return Err(LipSyncError::InvalidInterval {
                position,
                phoneme: iv.phoneme.to_string(),
                start: iv.start,
                end: iv.end,
            });
        }
    }

    if intervals.is_empty() {
        diagnostics.record(Diagnostic::EmptyTimeline);
        return Ok(vec![NormalizedSegment {
            index: VisemeIndex::NEUTRAL,
            start: 0.0,
            end: 0.0,
        }]);
    }

    // Stable: equal starts keep input order, so the later input wins the tie below.
    let mut order: Vec<&PhonemeInterval> = intervals.iter().collect();
    order.sort_by(|a, b| a.start.total_cmp(&b.start));

    let mut segments: Vec<NormalizedSegment> = Vec::with_capacity(order.len() * 2);
    let mut cursor = if lead_in_from_zero { 0.0 } else { order[0].start };

    for (i, iv) in order.iter().enumerate() {
        let mut end = iv.end;
        if let Some(next) = order.get(i + 1) {
            if next.start < end {
                diagnostics.record(Diagnostic::OverlapTruncated {
                    phoneme: iv.phoneme.clone(),
                    original_end: end,
                    truncated_end: next.start,
                    next_phoneme: next.phoneme.clone(),
                });
                end = next.start;
            }
        }
        // Swallowed entirely by a later interval with the same start.
        if end <= iv.start {
            continue;
        }

        let index = match assign(&iv.phoneme) {
            Some(index) => index,
            None => {
                diagnostics.record(Diagnostic::UnmappedPhoneme {
                    phoneme: iv.phoneme.clone(),
                    start: iv.start,
                    end,
                });
                VisemeIndex::NEUTRAL
            }
        };

        let start = if iv.start - cursor <= GAP_TOLERANCE {
            cursor
        } else {
            push_merged(&mut segments, VisemeIndex::NEUTRAL, cursor, iv.start);
            iv.start
        };
        push_merged(&mut segments, index, start, end);
        cursor = end;
    }

    log::debug!(
        "lipsync: normalized {} intervals into {} segments",
        intervals.len(),
        segments.len()
    );
    Ok(segments)
}

fn push_merged(segments: &mut Vec<NormalizedSegment>, index: VisemeIndex, start: f64, end: f64) {
    if end <= start {
        return;
    }
    if let Some(last) = segments.last_mut() {
        if last.index == index {
            last.end = end;
            return;
        }
    }
    segments.push(NormalizedSegment { index, start, end });
}
