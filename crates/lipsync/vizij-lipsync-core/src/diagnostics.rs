//! Non-fatal diagnostics recorded during a run.
//!
//! Every recoverable condition (dropped mapping, truncated overlap, unmapped phoneme,
//! clamped ease, ...) becomes one [`Diagnostic`]. Recording also forwards it to the
//! `log` facade so hosts with a logger installed see it without polling.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::phoneme::PhonemeSymbol;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Info,
}

/// Which side of a keyframe an ease applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EaseSide {
    In,
    Out,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all_fields = "camelCase")]
pub enum Diagnostic {
    /// Mapping entry with an empty phoneme or asset id; dropped.
    InvalidMapping {
        position: usize,
        phoneme: String,
        file_name: String,
    },
    /// Phoneme mapped twice; the later asset replaced the earlier one.
    DuplicateMapping {
        phoneme: PhonemeSymbol,
        previous: String,
        replacement: String,
    },
    /// No intervals at all; the curve is a single neutral key.
    EmptyTimeline,
    /// Interval end cut back to the start of the interval that overlapped it.
    OverlapTruncated {
        phoneme: PhonemeSymbol,
        original_end: f64,
        truncated_end: f64,
        next_phoneme: PhonemeSymbol,
    },
    /// Phoneme without a mapping; resolved to the neutral index.
    UnmappedPhoneme {
        phoneme: PhonemeSymbol,
        start: f64,
        end: f64,
    },
    /// Ease influence reduced so the span stays inside its guard band.
    EaseClamped {
        time: f64,
        side: EaseSide,
        requested: f64,
        applied: f64,
    },
}

impl Diagnostic {
    pub fn severity(&self) -> Severity {
        match self {
            Diagnostic::EaseClamped { .. } => Severity::Info,
            _ => Severity::Warning,
        }
    }

    /// Stable kind name, identical to the serialized `kind` tag.
    pub fn kind(&self) -> &'static str {
        match self {
            Diagnostic::InvalidMapping { .. } => "InvalidMapping",
            Diagnostic::DuplicateMapping { .. } => "DuplicateMapping",
            Diagnostic::EmptyTimeline => "EmptyTimeline",
            Diagnostic::OverlapTruncated { .. } => "OverlapTruncated",
            Diagnostic::UnmappedPhoneme { .. } => "UnmappedPhoneme",
            Diagnostic::EaseClamped { .. } => "EaseClamped",
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::InvalidMapping {
                position,
                phoneme,
                file_name,
            } => write!(
                f,
                "mapping #{position} dropped: phoneme '{phoneme}' / file '{file_name}' must both be non-empty"
            ),
            Diagnostic::DuplicateMapping {
                phoneme,
                previous,
                replacement,
            } => write!(
                f,
                "phoneme '{phoneme}' mapped twice: '{replacement}' replaces '{previous}'"
            ),
            Diagnostic::EmptyTimeline => f.write_str("timeline is empty; emitting a neutral curve"),
            Diagnostic::OverlapTruncated {
                phoneme,
                original_end,
                truncated_end,
                next_phoneme,
            } => write!(
                f,
                "'{phoneme}' overlaps '{next_phoneme}': end {original_end} truncated to {truncated_end}"
            ),
            Diagnostic::UnmappedPhoneme {
                phoneme,
                start,
                end,
            } => write!(
                f,
                "phoneme '{phoneme}' at [{start}, {end}) has no viseme; using neutral"
            ),
            Diagnostic::EaseClamped {
                time,
                side,
                requested,
                applied,
            } => write!(
                f,
                "ease {side:?} at {time}s clamped from {requested}% to {applied}%"
            ),
        }
    }
}

/// Ordered sink for diagnostics of a single run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, diagnostic: Diagnostic) {
        match diagnostic.severity() {
            Severity::Warning => log::warn!("lipsync: {diagnostic}"),
            Severity::Info => log::info!("lipsync: {diagnostic}"),
        }
        self.items.push(diagnostic);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.items.iter()
    }

    /// Number of recorded diagnostics with the given kind name.
    pub fn count_kind(&self, kind: &str) -> usize {
        self.items.iter().filter(|d| d.kind() == kind).count()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.items
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
