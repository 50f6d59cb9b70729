//! Vizij Lip-Sync Core (engine-agnostic)
//!
//! Turns a phoneme timeline plus a phoneme → viseme asset table into a single numeric
//! animation channel ("Viseme Index") and the per-asset visibility logic that reads it.
//!
//! Pipeline, leaves first:
//! - [`MappingTable`]: validated phoneme → asset associations in input order.
//! - [`IndexAssignment`]: dense 1..N indices in canonical order (0 is neutral).
//! - [`normalize`]: sorted, non-overlapping, gap-filled, merged segments.
//! - [`synthesize`]: hold-pair keyframes with guard keys before every transition.
//! - [`EasingPolicy`]: temporal ease that never overshoots across a guard band.
//! - [`decode`] / [`compile_visibility`]: the reading side used by hosts.
//!
//! Every stage is a pure function of its inputs; [`LipSync::bake`] runs them all.

pub mod config;
pub mod decode;
pub mod diagnostics;
pub mod easing;
pub mod error;
pub mod index;
pub mod interchange;
pub mod interp;
pub mod mapping;
pub mod normalize;
pub mod phoneme;
pub mod pipeline;
pub mod sampling;
pub mod synth;

// Re-exports for consumers (adapters)
pub use config::{EaseConfig, LipSyncConfig};
pub use decode::{compile_visibility, decode, visibility_of, VisibilityProgram};
pub use diagnostics::{Diagnostic, Diagnostics, EaseSide, Severity};
pub use easing::EasingPolicy;
pub use error::LipSyncError;
pub use index::{IndexAssignment, VisemeIndex};
pub use interchange::{
    mappings_to_json_pretty, parse_mapping_json, parse_timeline_json, MappingEntry,
    PhonemeTimeline, TimelineEntry,
};
pub use mapping::{MappingTable, VisemeMapping};
pub use normalize::{normalize, NormalizedSegment};
pub use phoneme::{PhonemeInterval, PhonemeSymbol};
pub use pipeline::{LipSync, LipSyncBake};
pub use sampling::sample_curve;
pub use synth::{guard_width, synthesize, Curve, KeyInterpolation, Keyframe};
