//! WASM API test
//!
//! Exercises the JavaScript-facing wrappers; runs only on wasm32.
#![cfg(target_arch = "wasm32")]

mod common;

use common::{song_with_icon, SONG};
use gpif_tab::api::*;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn test_parse_gpif_json() {
    let json = parse_gpif_json(SONG).expect("song should parse");
    assert!(json.contains("Riff Study"));
}

#[wasm_bindgen_test]
fn test_parse_gpif_object() {
    let value = parse_gpif_score(SONG).expect("song should parse");
    assert!(value.is_object());
}

#[wasm_bindgen_test]
fn test_errors_are_strings() {
    let err = parse_gpif_json(&song_with_icon(11)).expect_err("icon 11 is rejected");
    let msg = err.as_string().expect("string error");
    assert!(msg.contains("Unsupported track"));
}

#[wasm_bindgen_test]
fn test_measure_rows_json_lines() {
    let rows = measure_rows_json(SONG, "riff").expect("rows");
    assert_eq!(rows.lines().count(), 4);
}

#[wasm_bindgen_test]
fn test_chord_library_object() {
    let value = chord_library(SONG).expect("library");
    assert!(value.is_object());
}
