use serde::{Deserialize, Serialize};

use crate::error::LipSyncError;
use crate::phoneme::PhonemeInterval;

/// Public API: JSON documents exchanged with the panel and the phoneme extraction service.
///
/// Notes:
/// - Mapping tables are arrays of `{ phoneme, fileName }` (the saved `viseme_mappings.json`).
/// - Timelines are either a bare array of `{ phoneme, startTime, endTime }` or the
///   extraction response `{ transcription, phonemes: [...] }`.
/// - Times are seconds and kept as f64.
pub fn parse_mapping_json(s: &str) -> Result<Vec<MappingEntry>, LipSyncError> {
    Ok(serde_json::from_str(s)?)
}

/// Serialize mapping entries the way the panel saves them: pretty-printed, four-space indent.
pub fn mappings_to_json_pretty(entries: &[MappingEntry]) -> Result<String, LipSyncError> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    entries.serialize(&mut ser)?;
    String::from_utf8(buf).map_err(|e| LipSyncError::Parse {
        reason: e.to_string(),
    })
}

pub fn parse_timeline_json(s: &str) -> Result<PhonemeTimeline, LipSyncError> {
    let doc: TimelineDocument = serde_json::from_str(s)?;
    Ok(doc.into())
}

// ----- JSON schema (serde) -----

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingEntry {
    pub phoneme: String,
    pub file_name: String,
}

impl MappingEntry {
    pub fn new(phoneme: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self {
            phoneme: phoneme.into(),
            file_name: file_name.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEntry {
    pub phoneme: String,
    pub start_time: f64,
    pub end_time: f64,
}

impl TimelineEntry {
    pub fn new(phoneme: impl Into<String>, start_time: f64, end_time: f64) -> Self {
        Self {
            phoneme: phoneme.into(),
            start_time,
            end_time,
        }
    }
}

impl From<&TimelineEntry> for PhonemeInterval {
    fn from(e: &TimelineEntry) -> Self {
        PhonemeInterval::new(e.phoneme.as_str(), e.start_time, e.end_time)
    }
}

/// Parsed timeline with the optional transcript the extraction service returns.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PhonemeTimeline {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transcription: Option<String>,
    pub phonemes: Vec<TimelineEntry>,
}

impl PhonemeTimeline {
    pub fn intervals(&self) -> Vec<PhonemeInterval> {
        self.phonemes.iter().map(PhonemeInterval::from).collect()
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TimelineDocument {
    Bare(Vec<TimelineEntry>),
    Response {
        #[serde(default)]
        transcription: Option<String>,
        phonemes: Vec<TimelineEntry>,
    },
}

impl From<TimelineDocument> for PhonemeTimeline {
    fn from(doc: TimelineDocument) -> Self {
        match doc {
            TimelineDocument::Bare(phonemes) => PhonemeTimeline {
                transcription: None,
                phonemes,
            },
            TimelineDocument::Response {
                transcription,
                phonemes,
            } => PhonemeTimeline {
                transcription,
                phonemes,
            },
        }
    }
}
