//! Format converters
//!
//! GPIF to the tablature model, and the tablature model to flat
//! per-measure rows.

pub mod gpif_to_tab;
pub mod measure_rows;

pub use gpif_to_tab::convert;
pub use measure_rows::{measure_rows, to_json_lines, MeasureRow};
