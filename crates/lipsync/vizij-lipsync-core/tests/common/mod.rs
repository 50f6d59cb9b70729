#![allow(dead_code)]

use vizij_lipsync_core::{
    parse_mapping_json, parse_timeline_json, LipSync, LipSyncBake, LipSyncConfig, MappingEntry,
    TimelineEntry,
};

pub fn mapping_fixture(name: &str) -> Vec<MappingEntry> {
    let json = vizij_test_fixtures::mappings::json(name).expect("load mapping fixture");
    parse_mapping_json(&json).expect("parse mapping fixture")
}

pub fn timeline_fixture(name: &str) -> Vec<TimelineEntry> {
    let json = vizij_test_fixtures::timelines::json(name).expect("load timeline fixture");
    parse_timeline_json(&json)
        .expect("parse timeline fixture")
        .phonemes
}

pub fn mk_map(pairs: &[(&str, &str)]) -> Vec<MappingEntry> {
    pairs
        .iter()
        .map(|(p, f)| MappingEntry::new(*p, *f))
        .collect()
}

pub fn mk_timeline(entries: &[(&str, f64, f64)]) -> Vec<TimelineEntry> {
    entries
        .iter()
        .map(|(p, s, e)| TimelineEntry::new(*p, *s, *e))
        .collect()
}

pub fn bake_default(mappings: &[MappingEntry], timeline: &[TimelineEntry]) -> LipSyncBake {
    LipSync::new(LipSyncConfig::default())
        .expect("default config")
        .bake(mappings, timeline)
        .expect("bake")
}

/// Sample every segment's hold region `[start, end - ε)` and require the segment index.
pub fn assert_holds_decode(bake: &LipSyncBake) {
    const STEPS: usize = 97;
    let eps = bake.guard_seconds();
    for seg in &bake.segments {
        let hold_end = seg.end - eps;
        if hold_end <= seg.start {
            assert_eq!(bake.decode(seg.start), seg.index);
            continue;
        }
        for k in 0..STEPS {
            let t = seg.start + (hold_end - seg.start) * (k as f64) / (STEPS as f64);
            assert_eq!(
                bake.decode(t),
                seg.index,
                "t={t} inside [{}, {}) should decode to {}",
                seg.start,
                hold_end,
                seg.index
            );
        }
    }
}
