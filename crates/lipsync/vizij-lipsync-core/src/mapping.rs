//! Validated phoneme → viseme asset table.
//!
//! Entries keep the position of their first occurrence even when a later duplicate
//! replaces the asset. That position order is the only source of ordering for index
//! assignment.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::interchange::MappingEntry;
use crate::phoneme::PhonemeSymbol;

/// One validated association.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisemeMapping {
    pub phoneme: PhonemeSymbol,
    pub asset_id: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MappingTable {
    entries: IndexMap<PhonemeSymbol, String>,
}

impl MappingTable {
    /// Build from raw `(phoneme, asset_id)` pairs in input order.
    ///
    /// Asset ids are stored trimmed. Pairs with an empty phoneme or asset id (after
    /// trimming) are dropped with an `InvalidMapping` warning. A repeated phoneme overwrites the asset in place and
    /// records `DuplicateMapping`.
    pub fn build<I, P, A>(pairs: I, diagnostics: &mut Diagnostics) -> Self
    where
        I: IntoIterator<Item = (P, A)>,
        P: AsRef<str>,
        A: AsRef<str>,
    {
        let mut entries: IndexMap<PhonemeSymbol, String> = IndexMap::new();
        for (position, (raw_phoneme, raw_asset)) in pairs.into_iter().enumerate() {
            let phoneme = PhonemeSymbol::new(raw_phoneme.as_ref());
            let asset = raw_asset.as_ref().trim();
            if phoneme.is_empty() || asset.is_empty() {
                diagnostics.record(Diagnostic::InvalidMapping {
                    position,
                    phoneme: raw_phoneme.as_ref().to_string(),
                    file_name: raw_asset.as_ref().to_string(),
                });
                continue;
            }
            // IndexMap::insert keeps the original slot for an existing key.
            if let Some(previous) = entries.insert(phoneme.clone(), asset.to_string()) {
                diagnostics.record(Diagnostic::DuplicateMapping {
                    phoneme,
                    previous,
                    replacement: asset.to_string(),
                });
            }
        }
        log::debug!("lipsync: mapping table built with {} entries", entries.len());
        Self { entries }
    }

    /// Build from wire records (`{ phoneme, fileName }`).
    pub fn from_entries(entries: &[MappingEntry], diagnostics: &mut Diagnostics) -> Self {
        Self::build(
            entries
                .iter()
                .map(|e| (e.phoneme.as_str(), e.file_name.as_str())),
            diagnostics,
        )
    }

    /// Distinct phonemes ordered by first occurrence in the input sequence.
    pub fn distinct_phonemes_in_canonical_order(&self) -> impl Iterator<Item = &PhonemeSymbol> {
        self.entries.keys()
    }

    pub fn asset_for(&self, phoneme: &PhonemeSymbol) -> Option<&str> {
        self.entries.get(phoneme).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PhonemeSymbol, &str)> {
        self.entries.iter().map(|(p, a)| (p, a.as_str()))
    }

    pub fn mappings(&self) -> Vec<VisemeMapping> {
        self.entries
            .iter()
            .map(|(phoneme, asset_id)| VisemeMapping {
                phoneme: phoneme.clone(),
                asset_id: asset_id.clone(),
            })
            .collect()
    }

    /// Wire records in canonical order, suitable for saving the table back to disk.
    pub fn to_entries(&self) -> Vec<MappingEntry> {
        self.entries
            .iter()
            .map(|(phoneme, asset)| MappingEntry {
                phoneme: phoneme.to_string(),
                file_name: asset.clone(),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
