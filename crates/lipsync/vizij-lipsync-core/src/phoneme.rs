//! Phoneme labels and raw timeline intervals.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Normalized phoneme label (trimmed, uppercased).
///
/// Construction always normalizes, so `"a "` and `"A"` compare equal once wrapped.
/// The label may be empty; callers decide whether that is acceptable.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct PhonemeSymbol(String);

impl PhonemeSymbol {
    pub fn new(raw: &str) -> Self {
        Self(raw.trim().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for PhonemeSymbol {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for PhonemeSymbol {
    fn from(raw: String) -> Self {
        Self::new(&raw)
    }
}

impl From<PhonemeSymbol> for String {
    fn from(p: PhonemeSymbol) -> Self {
        p.0
    }
}

impl fmt::Display for PhonemeSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One raw timeline entry in seconds. May overlap or arrive unsorted; the normalizer
/// is responsible for making sense of a sequence of these.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhonemeInterval {
    pub phoneme: PhonemeSymbol,
    pub start: f64,
    pub end: f64,
}

impl PhonemeInterval {
    pub fn new(phoneme: impl Into<PhonemeSymbol>, start: f64, end: f64) -> Self {
        Self {
            phoneme: phoneme.into(),
            start,
            end,
        }
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}
