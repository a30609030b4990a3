//! GPIF parsing entry points for JavaScript

use wasm_bindgen::prelude::*;

use super::helpers::{deserialize, js_error, serialize};
use crate::config::ParserSettings;
use crate::converters::{measure_rows, to_json_lines};
use crate::gpif::GpifIndex;
use crate::{wasm_info, wasm_log};

/// Parse GPIF XML into a score object
#[wasm_bindgen(js_name = parseGpif)]
pub fn parse_gpif_score(xml: &str) -> Result<JsValue, JsValue> {
    wasm_info!("parseGpif called ({} bytes)", xml.len());
    let score = crate::parse_gpif(xml).map_err(|e| js_error("GPIF parse error", e))?;
    wasm_log!("  {} parts", score.parts.len());
    serialize(&score, "Score serialization error")
}

/// Parse GPIF XML with settings given as a JS object
#[wasm_bindgen(js_name = parseGpifWith)]
pub fn parse_gpif_with_settings(xml: &str, settings: JsValue) -> Result<JsValue, JsValue> {
    wasm_info!("parseGpifWith called ({} bytes)", xml.len());
    let settings: ParserSettings = deserialize(settings, "Invalid parser settings")?;
    let score = crate::parse_gpif_with(xml, &settings).map_err(|e| js_error("GPIF parse error", e))?;
    serialize(&score, "Score serialization error")
}

/// Parse GPIF XML into a JSON score
#[wasm_bindgen(js_name = parseGpifJson)]
pub fn parse_gpif_json(xml: &str) -> Result<String, JsValue> {
    wasm_info!("parseGpifJson called ({} bytes)", xml.len());
    let score = crate::parse_gpif(xml).map_err(|e| js_error("GPIF parse error", e))?;
    serde_json::to_string(&score).map_err(|e| js_error("JSON serialization error", e))
}

/// Chord diagrams of a GPIF document, by id
#[wasm_bindgen(js_name = chordLibrary)]
pub fn chord_library(xml: &str) -> Result<JsValue, JsValue> {
    wasm_info!("chordLibrary called ({} bytes)", xml.len());
    let library = crate::chord_library(xml).map_err(|e| js_error("GPIF parse error", e))?;
    wasm_log!("  {} diagrams", library.len());
    serialize(&library, "Chord library serialization error")
}

/// Per-measure chord rows as JSON lines
#[wasm_bindgen(js_name = measureRows)]
pub fn measure_rows_json(xml: &str, file_id: &str) -> Result<String, JsValue> {
    wasm_info!("measureRows called for '{}'", file_id);
    let settings = ParserSettings::default();
    let index = GpifIndex::parse(xml).map_err(|e| js_error("GPIF parse error", e))?;
    let score = crate::converters::convert(&index, &settings).map_err(|e| js_error("GPIF parse error", e))?;
    let library = crate::diagrams::ChordLibrary::from_index(&index);
    let rows = measure_rows(&score, &library, file_id, settings.string_order);
    wasm_log!("  {} rows", rows.len());
    to_json_lines(&rows).map_err(|e| js_error("JSON serialization error", e))
}
