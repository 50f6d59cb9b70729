use js_sys::JSON;
use serde::Serialize;
use serde_wasm_bindgen as swb;
use wasm_bindgen::prelude::*;

use vizij_lipsync_core::{
    mappings_to_json_pretty, parse_timeline_json, LipSync, LipSyncBake, LipSyncConfig,
    MappingEntry,
};

#[wasm_bindgen]
pub struct VizijLipSync {
    core: LipSync,
    bake: Option<LipSyncBake>,
}

fn jsvalue_is_undefined_or_null(v: &JsValue) -> bool {
    v.is_undefined() || v.is_null()
}

/// Plain JS objects (not `Map`) so the panel can hand results straight to the host script.
fn to_js<T: Serialize>(value: &T, what: &str) -> Result<JsValue, JsError> {
    value
        .serialize(&swb::Serializer::json_compatible())
        .map_err(|e| JsError::new(&format!("{what} error: {e}")))
}

fn stringify(value: &JsValue, what: &str) -> Result<String, JsError> {
    JSON::stringify(value)
        .map_err(|e| JsError::new(&format!("{what} stringify error: {:?}", e)))?
        .as_string()
        .ok_or_else(|| JsError::new(&format!("{what}: stringify produced non-string")))
}

fn parse_mappings(mappings: JsValue) -> Result<Vec<MappingEntry>, JsError> {
    if jsvalue_is_undefined_or_null(&mappings) {
        return Err(JsError::new("mappings are null/undefined"));
    }
    swb::from_value(mappings).map_err(|e| JsError::new(&format!("mappings parse error: {e}")))
}

impl VizijLipSync {
    fn current(&self) -> Result<&LipSyncBake, JsError> {
        self.bake
            .as_ref()
            .ok_or_else(|| JsError::new("no bake yet; call bake() first"))
    }
}

#[wasm_bindgen]
impl VizijLipSync {
    /// Create a baker. Pass a config object (`{ easeInfluence, easeSpeed, ... }`) or
    /// undefined/null for defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<VizijLipSync, JsError> {
        console_error_panic_hook::set_once();

        let cfg: LipSyncConfig = if jsvalue_is_undefined_or_null(&config) {
            LipSyncConfig::default()
        } else {
            swb::from_value(config).map_err(|e| JsError::new(&format!("config error: {e}")))?
        };
        let core = LipSync::new(cfg).map_err(|e| JsError::new(&e.to_string()))?;
        Ok(VizijLipSync { core, bake: None })
    }

    /// Bake a timeline. `mappings` is `[{ phoneme, fileName }]`; `timeline` is either a bare
    /// `[{ phoneme, startTime, endTime }]` array or the extraction response object.
    /// Returns the bake document and keeps it for `decode`/`is_visible`.
    #[wasm_bindgen]
    pub fn bake(&mut self, mappings: JsValue, timeline: JsValue) -> Result<JsValue, JsError> {
        let mappings = parse_mappings(mappings)?;
        if jsvalue_is_undefined_or_null(&timeline) {
            return Err(JsError::new("bake: timeline is null/undefined"));
        }
        // Stringify so both timeline shapes go through the core parser.
        let s = stringify(&timeline, "timeline")?;
        let timeline = parse_timeline_json(&s)
            .map_err(|e| JsError::new(&format!("timeline parse error: {e}")))?;

        let bake = self
            .core
            .bake(&mappings, &timeline.phonemes)
            .map_err(|e| JsError::new(&e.to_string()))?;
        let out = to_js(&bake, "bake")?;
        self.bake = Some(bake);
        Ok(out)
    }

    /// Viseme index active at `t` seconds.
    #[wasm_bindgen]
    pub fn decode(&self, t: f64) -> Result<u32, JsError> {
        Ok(self.current()?.decode(t).0)
    }

    #[wasm_bindgen(js_name = is_visible)]
    pub fn is_visible(&self, asset_id: String, t: f64) -> Result<bool, JsError> {
        Ok(self.current()?.is_visible(&asset_id, t))
    }

    /// `{ [fileName]: expression }` for the host to assign to each layer's opacity.
    #[wasm_bindgen]
    pub fn expressions(&self) -> Result<JsValue, JsError> {
        to_js(&self.current()?.expressions(), "expressions")
    }

    #[wasm_bindgen]
    pub fn diagnostics(&self) -> Result<JsValue, JsError> {
        to_js(&self.current()?.diagnostics, "diagnostics")
    }

    /// Sampled channel value at `t` (what the host slider reads).
    #[wasm_bindgen]
    pub fn sample(&self, t: f64) -> Result<f64, JsError> {
        Ok(vizij_lipsync_core::sample_curve(&self.current()?.curve, t))
    }
}

/// Pretty JSON for a mapping table (the saved `viseme_mappings.json` layout).
#[wasm_bindgen(js_name = save_mappings)]
pub fn save_mappings(mappings: JsValue) -> Result<String, JsError> {
    let entries = parse_mappings(mappings)?;
    mappings_to_json_pretty(&entries).map_err(|e| JsError::new(&e.to_string()))
}

/// Decode a bake document previously returned by `bake` without keeping an instance.
#[wasm_bindgen(js_name = decode_document)]
pub fn decode_document(bake: JsValue, t: f64) -> Result<u32, JsError> {
    let s = stringify(&bake, "bake document")?;
    let bake = LipSyncBake::from_json(&s).map_err(|e| JsError::new(&e.to_string()))?;
    Ok(bake.decode(t).0)
}

/// Numeric ABI version for compatibility checks at init.
#[wasm_bindgen]
pub fn abi_version() -> u32 {
    1
}
