//! GPIF Tab WASM API
//!
//! JavaScript-facing wrappers around the Rust entry points. Each returns
//! `Result<_, JsValue>` with the error message as a string.
//!
//! - `helpers`: serialization, error conversion and console logging
//! - `parse`: score, chord library and measure-row exports

pub mod helpers;
pub mod parse;

pub use parse::{chord_library, measure_rows_json, parse_gpif_json, parse_gpif_score, parse_gpif_with_settings};
