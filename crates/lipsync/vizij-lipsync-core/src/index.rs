//! Viseme indices and the deterministic phoneme → index assignment.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::mapping::MappingTable;
use crate::phoneme::PhonemeSymbol;

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VisemeIndex(pub u32);

impl VisemeIndex {
    /// "No viseme active": silence, gaps and unmapped phonemes.
    pub const NEUTRAL: VisemeIndex = VisemeIndex(0);

    #[inline]
    pub fn is_neutral(self) -> bool {
        self == Self::NEUTRAL
    }

    #[inline]
    pub fn as_f64(self) -> f64 {
        f64::from(self.0)
    }
}

impl fmt::Display for VisemeIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Indices 1..=N in the table's canonical order, plus the reverse asset lookup used by
/// visibility compilation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexAssignment {
    phonemes: IndexMap<PhonemeSymbol, VisemeIndex>,
    assets: IndexMap<String, Vec<VisemeIndex>>,
}

impl IndexAssignment {
    pub fn assign(table: &MappingTable) -> Self {
        let mut phonemes = IndexMap::with_capacity(table.len());
        let mut assets: IndexMap<String, Vec<VisemeIndex>> = IndexMap::new();
        for (next, (phoneme, asset)) in (1u32..).zip(table.iter()) {
            let index = VisemeIndex(next);
            phonemes.insert(phoneme.clone(), index);
            assets.entry(asset.to_string()).or_default().push(index);
        }
        Self { phonemes, assets }
    }

    pub fn index_of(&self, phoneme: &PhonemeSymbol) -> Option<VisemeIndex> {
        self.phonemes.get(phoneme).copied()
    }

    /// Index for `phoneme`, falling back to [`VisemeIndex::NEUTRAL`].
    pub fn resolve(&self, phoneme: &PhonemeSymbol) -> VisemeIndex {
        self.index_of(phoneme).unwrap_or(VisemeIndex::NEUTRAL)
    }

    /// Indices that make `asset_id` visible. Usually one; several when more than one
    /// phoneme shares the asset.
    pub fn indices_for_asset(&self, asset_id: &str) -> &[VisemeIndex] {
        self.assets.get(asset_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Highest assigned index; `NEUTRAL` for an empty assignment.
    pub fn max_index(&self) -> VisemeIndex {
        VisemeIndex(self.phonemes.len() as u32)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PhonemeSymbol, VisemeIndex)> {
        self.phonemes.iter().map(|(p, i)| (p, *i))
    }

    /// Assets in first-mapped order with their indices.
    pub fn assets(&self) -> impl Iterator<Item = (&str, &[VisemeIndex])> {
        self.assets.iter().map(|(a, i)| (a.as_str(), i.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.phonemes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phonemes.is_empty()
    }
}
