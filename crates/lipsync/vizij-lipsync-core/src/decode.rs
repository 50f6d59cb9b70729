//! Reading side: decode a sampled curve back to an index, and compile per-asset
//! visibility for hosts.
//!
//! The compiled expression is evaluated by the host per frame against its own copy of
//! the channel, so it repeats the decode rule in host syntax: round half up, clamp to
//! the assigned range, compare against the asset's indices, yield opacity 100 or 0.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::index::{IndexAssignment, VisemeIndex};
use crate::sampling::sample_curve;
use crate::synth::Curve;

pub const VISIBLE_OPACITY: f64 = 100.0;
pub const HIDDEN_OPACITY: f64 = 0.0;

/// Round half up, then clamp to `[0, max]`. NaN decodes as neutral.
pub fn decode_value(value: f64, max: VisemeIndex) -> VisemeIndex {
    if value.is_nan() {
        return VisemeIndex::NEUTRAL;
    }
    let rounded = (value + 0.5).floor().clamp(0.0, max.as_f64());
    VisemeIndex(rounded as u32)
}

/// Index active at `t`. Inside a guard band the result is unspecified.
pub fn decode(curve: &Curve, t: f64) -> VisemeIndex {
    decode_value(sample_curve(curve, t), curve.max_index())
}

/// Whether `asset_id` is the visible viseme at `t`.
pub fn visibility_of(
    asset_id: &str,
    curve: &Curve,
    assignment: &IndexAssignment,
    t: f64,
) -> bool {
    let indices = assignment.indices_for_asset(asset_id);
    !indices.is_empty() && indices.contains(&decode(curve, t))
}

/// Compiled visibility for one asset: the callable form plus the host expression.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisibilityProgram {
    pub asset_id: String,
    pub indices: Vec<VisemeIndex>,
    pub max_index: VisemeIndex,
    pub expression: String,
}

impl VisibilityProgram {
    pub fn is_visible(&self, curve: &Curve, t: f64) -> bool {
        let v = decode_value(sample_curve(curve, t), self.max_index);
        self.indices.contains(&v)
    }

    pub fn opacity(&self, curve: &Curve, t: f64) -> f64 {
        if self.is_visible(curve, t) {
            VISIBLE_OPACITY
        } else {
            HIDDEN_OPACITY
        }
    }
}

/// One program per asset, keyed by asset id in first-mapped order.
pub fn compile_visibility(
    assignment: &IndexAssignment,
    control_name: &str,
) -> IndexMap<String, VisibilityProgram> {
    let max_index = assignment.max_index();
    assignment
        .assets()
        .map(|(asset, indices)| {
            let program = VisibilityProgram {
                asset_id: asset.to_string(),
                indices: indices.to_vec(),
                max_index,
                expression: visibility_expression(control_name, indices, max_index),
            };
            (asset.to_string(), program)
        })
        .collect()
}

/// Host expression for an opacity property. Pure: reads the slider, returns 100 or 0.
pub fn visibility_expression(
    control_name: &str,
    indices: &[VisemeIndex],
    max_index: VisemeIndex,
) -> String {
    let condition = if indices.is_empty() {
        "false".to_string()
    } else {
        indices
            .iter()
            .map(|i| format!("currentViseme == {i}"))
            .collect::<Vec<_>>()
            .join(" || ")
    };
    format!(
        "var index = effect({name})(\"Slider\");\n\
         var currentViseme = Math.min(Math.max(Math.round(index), 0), {max_index});\n\
         if ({condition}) {{ 100 }} else {{ 0 }}",
        name = js_string_literal(control_name),
    )
}

fn js_string_literal(s: &str) -> String {
    // A JSON string is a valid JS string literal.
    serde_json::Value::String(s.to_string()).to_string()
}
