//! GPIF Tablature WASM Module
//!
//! Reads Guitar Pro XML (GPIF) into a typed tablature score: parts,
//! measures, voices, notes and chords, plus the guitar techniques linking
//! them (bends, hammer-ons and pull-offs, slides, ties).

pub mod api;
pub mod config;
pub mod converters;
pub mod diagrams;
pub mod error;
pub mod gpif;
pub mod models;

use std::path::Path;

pub use config::ParserSettings;
pub use converters::{measure_rows, to_json_lines, MeasureRow};
pub use diagrams::{ChordDiagram, ChordLibrary, StringOrder};
pub use error::{TabError, TabResult};
pub use gpif::GpifIndex;
pub use models::*;

use wasm_bindgen::prelude::*;

/// Parse a GPIF document with default settings
pub fn parse_gpif(xml: &str) -> TabResult<Score> {
    parse_gpif_with(xml, &ParserSettings::default())
}

pub fn parse_gpif_with(xml: &str, settings: &ParserSettings) -> TabResult<Score> {
    let index = GpifIndex::parse(xml)?;
    converters::convert(&index, settings)
}

/// Read a whole GPIF file, then parse it
pub fn parse_gpif_file(path: impl AsRef<Path>) -> TabResult<Score> {
    let path = path.as_ref();
    log::info!("Reading GPIF file {}", path.display());
    let xml = std::fs::read_to_string(path)?;
    parse_gpif(&xml)
}

/// Chord-diagram library of a GPIF document
pub fn chord_library(xml: &str) -> TabResult<ChordLibrary> {
    Ok(ChordLibrary::from_index(&GpifIndex::parse(xml)?))
}

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    // a second init (module re-instantiated) keeps the first logger
    #[cfg(feature = "console_log")]
    let _ = console_log::init_with_level(log::Level::Debug);

    log::info!("GPIF tablature WASM module initialized");
}
