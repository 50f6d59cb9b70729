mod common;

use common::{bake_default, mapping_fixture, timeline_fixture};
use vizij_lipsync_core::{
    mappings_to_json_pretty, parse_mapping_json, parse_timeline_json, Curve, Diagnostics,
    LipSyncBake, LipSyncError, MappingTable, VisemeIndex,
};

#[test]
fn mapping_table_saves_like_the_panel() {
    let json = vizij_test_fixtures::mappings::json("basic-ab").unwrap();
    let entries = parse_mapping_json(&json).unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[1].file_name, "mouB.png");

    let table = MappingTable::from_entries(&entries, &mut Diagnostics::new());
    let saved = mappings_to_json_pretty(&table.to_entries()).unwrap();
    assert_eq!(saved.trim_end(), json.trim_end());
}

#[test]
fn saved_table_is_normalized() {
    let mut diags = Diagnostics::new();
    let table = MappingTable::from_entries(&mapping_fixture("with-duplicates"), &mut diags);
    let saved = mappings_to_json_pretty(&table.to_entries()).unwrap();
    let reread = parse_mapping_json(&saved).unwrap();
    let pairs: Vec<(&str, &str)> = reread
        .iter()
        .map(|e| (e.phoneme.as_str(), e.file_name.as_str()))
        .collect();
    assert_eq!(pairs, vec![("A", "y.png"), ("O", "o.png")]);
}

#[test]
fn timeline_accepts_bare_arrays_and_service_responses() {
    let bare = parse_timeline_json(&vizij_test_fixtures::timelines::json("basic-ab").unwrap())
        .unwrap();
    assert_eq!(bare.transcription, None);
    assert_eq!(bare.phonemes.len(), 2);

    let response =
        parse_timeline_json(&vizij_test_fixtures::timelines::json("extraction-response").unwrap())
            .unwrap();
    assert_eq!(response.transcription.as_deref(), Some("a e i o u m n s t k"));
    assert_eq!(response.phonemes.len(), 10);
    assert_eq!(response.phonemes[9].start_time, 4.5);
    assert_eq!(response.intervals()[5].phoneme.as_str(), "M");
}

#[test]
fn malformed_documents_are_parse_errors() {
    assert!(matches!(
        parse_mapping_json(r#"{"phoneme": "A"}"#),
        Err(LipSyncError::Parse { .. })
    ));
    assert!(matches!(
        parse_timeline_json(r#"[{"phoneme": "A", "startTime": "zero"}]"#),
        Err(LipSyncError::Parse { .. })
    ));
}

#[test]
fn bake_document_reloads_for_decoding() {
    let bake = bake_default(&mapping_fixture("basic-ab"), &timeline_fixture("basic-ab"));
    let json = bake.to_json().unwrap();

    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["controlName"], "Viseme Index");
    assert_eq!(value["curve"]["interpolation"], "eased");
    assert!(value["curve"]["keyframes"][0]["easeInPercent"].is_number());
    assert_eq!(value["assignment"]["phonemes"]["A"], 1);
    assert!(value["visibility"]["mouA.png"]["expression"]
        .as_str()
        .unwrap()
        .contains("currentViseme == 1"));

    let reloaded = LipSyncBake::from_json(&json).unwrap();
    assert_eq!(reloaded.curve.len(), bake.curve.len());
    for t in [0.1, 0.3, 0.6, 0.9, 2.0] {
        assert_eq!(reloaded.decode(t), bake.decode(t), "t={t}");
    }
    assert!(reloaded.is_visible("mouA.png", 0.2));
}

#[test]
fn host_curve_with_unordered_keys_is_rejected() {
    let doc = r#"{
        "keyframes": [
            { "time": 0.5, "value": 1, "easeInPercent": 0, "easeOutPercent": 0, "easeInSpeed": 0, "easeOutSpeed": 0 },
            { "time": 0.2, "value": 2, "easeInPercent": 0, "easeOutPercent": 0, "easeInSpeed": 0, "easeOutSpeed": 0 }
        ],
        "guardSeconds": 0.01
    }"#;
    let err = serde_json::from_str::<Curve>(doc).unwrap_err();
    assert!(err.to_string().contains("strictly increase"), "{err}");

    let ok = r#"{ "keyframes": [ { "time": 0, "value": 3, "easeInPercent": 0, "easeOutPercent": 0, "easeInSpeed": 0, "easeOutSpeed": 0 } ], "guardSeconds": 0 }"#;
    let curve: Curve = serde_json::from_str(ok).unwrap();
    assert_eq!(curve.max_index(), VisemeIndex(3));
}
