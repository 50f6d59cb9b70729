//! End-to-end bake: mappings + timeline + config → curve, visibility, diagnostics.
//!
//! All-or-nothing: a fatal error returns no partial output. Runs share no state, so
//! a single [`LipSync`] can bake many timelines from many threads.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::config::LipSyncConfig;
use crate::decode::{compile_visibility, decode, VisibilityProgram};
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::easing::EasingPolicy;
use crate::error::LipSyncError;
use crate::index::{IndexAssignment, VisemeIndex};
use crate::interchange::{MappingEntry, TimelineEntry};
use crate::mapping::MappingTable;
use crate::normalize::{normalize, NormalizedSegment};
use crate::phoneme::PhonemeInterval;
use crate::synth::{synthesize, Curve};

/// Output document handed to the host.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LipSyncBake {
    pub control_name: String,
    pub curve: Curve,
    pub assignment: IndexAssignment,
    pub segments: Vec<NormalizedSegment>,
    pub visibility: IndexMap<String, VisibilityProgram>,
    pub diagnostics: Vec<Diagnostic>,
}

impl LipSyncBake {
    pub fn decode(&self, t: f64) -> VisemeIndex {
        decode(&self.curve, t)
    }

    /// `false` for assets that are not in the mapping table.
    pub fn is_visible(&self, asset_id: &str, t: f64) -> bool {
        self.visibility
            .get(asset_id)
            .is_some_and(|p| p.is_visible(&self.curve, t))
    }

    pub fn expression(&self, asset_id: &str) -> Option<&str> {
        self.visibility.get(asset_id).map(|p| p.expression.as_str())
    }

    /// Asset id → host expression, in mapping order.
    pub fn expressions(&self) -> IndexMap<String, String> {
        self.visibility
            .iter()
            .map(|(asset, p)| (asset.clone(), p.expression.clone()))
            .collect()
    }

    pub fn guard_seconds(&self) -> f64 {
        self.curve.guard_seconds()
    }

    pub fn to_json(&self) -> Result<String, LipSyncError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(s: &str) -> Result<Self, LipSyncError> {
        Ok(serde_json::from_str(s)?)
    }
}

#[derive(Clone, Debug)]
pub struct LipSync {
    config: LipSyncConfig,
    easing: EasingPolicy,
}

impl LipSync {
    pub fn new(config: LipSyncConfig) -> Result<Self, LipSyncError> {
        config.validate()?;
        let easing = EasingPolicy::new(&config.ease);
        Ok(Self { config, easing })
    }

    pub fn config(&self) -> &LipSyncConfig {
        &self.config
    }

    /// Bake from wire records.
    pub fn bake(
        &self,
        mappings: &[MappingEntry],
        timeline: &[TimelineEntry],
    ) -> Result<LipSyncBake, LipSyncError> {
        let mut diagnostics = Diagnostics::new();
        let table = MappingTable::from_entries(mappings, &mut diagnostics);
        let intervals: Vec<PhonemeInterval> = timeline.iter().map(PhonemeInterval::from).collect();
        self.run(&table, &intervals, diagnostics)
    }

    /// Bake from an already built table and typed intervals.
    pub fn bake_intervals(
        &self,
        table: &MappingTable,
        intervals: &[PhonemeInterval],
    ) -> Result<LipSyncBake, LipSyncError> {
        self.run(table, intervals, Diagnostics::new())
    }

    fn run(
        &self,
        table: &MappingTable,
        intervals: &[PhonemeInterval],
        mut diagnostics: Diagnostics,
    ) -> Result<LipSyncBake, LipSyncError> {
        let assignment = IndexAssignment::assign(table);
        let segments = normalize(
            intervals,
            |p| assignment.index_of(p),
            self.config.lead_in_from_zero,
            &mut diagnostics,
        )?;
        let raw = synthesize(
            &segments,
            self.config.max_guard_seconds,
            self.config.interpolation,
        )?;
        let curve = self.easing.apply(&raw, &mut diagnostics);
        let visibility = compile_visibility(&assignment, &self.config.control_name);

        log::debug!(
            "lipsync: baked {} keys, {} visemes, {} diagnostics",
            curve.len(),
            assignment.len(),
            diagnostics.len()
        );
        Ok(LipSyncBake {
            control_name: self.config.control_name.clone(),
            curve,
            assignment,
            segments,
            visibility,
            diagnostics: diagnostics.into_vec(),
        })
    }
}
