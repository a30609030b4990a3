//! Per-measure chord rows
//!
//! Flattens a score into one row per part measure: its length and the
//! chord labels it carries with their onsets and shapes. Rows are written
//! as JSON lines for downstream aggregation.

use serde::{Deserialize, Serialize};

use crate::diagrams::{ChordLibrary, StringOrder};
use crate::error::{TabError, TabResult};
use crate::models::{Rational, Score};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasureRow {
    pub file: String,
    pub part: usize,
    /// Index of the measure within its part
    pub measure: usize,
    /// End of the longest voice, in quarter notes
    pub duration: Rational,
    /// Chord names, from the library when the diagram is known
    pub chords: Vec<String>,
    pub chord_ids: Vec<String>,
    pub offsets: Vec<Rational>,
    /// Position string per chord; `None` when the diagram has no frets
    pub shapes: Vec<Option<String>>,
}

/// One row per measure of every part.
///
/// Labels are collected voice by voice, each voice in offset order.
pub fn measure_rows(score: &Score, library: &ChordLibrary, file: &str, order: StringOrder) -> Vec<MeasureRow> {
    let mut rows = Vec::new();
    for (part_index, part) in score.parts.iter().enumerate() {
        for (measure_index, measure) in part.measures.iter().enumerate() {
            let mut row = MeasureRow {
                file: file.to_string(),
                part: part_index,
                measure: measure_index,
                duration: measure.content_duration(),
                chords: Vec::new(),
                chord_ids: Vec::new(),
                offsets: Vec::new(),
                shapes: Vec::new(),
            };
            for voice in &measure.voices {
                for timed in &voice.events {
                    if let Some((name, diagram_id)) = timed.event.chord_label() {
                        let diagram = library.get(diagram_id);
                        row.chords.push(diagram.map_or(name, |d| d.name.as_str()).to_string());
                        row.chord_ids.push(diagram_id.to_string());
                        row.offsets.push(timed.offset);
                        row.shapes.push(
                            diagram
                                .filter(|d| d.has_frets())
                                .map(|d| d.position_string(order)),
                        );
                    }
                }
            }
            rows.push(row);
        }
    }
    rows
}

/// Serialize rows as newline-delimited JSON
pub fn to_json_lines(rows: &[MeasureRow]) -> TabResult<String> {
    let mut out = String::new();
    for row in rows {
        let line = serde_json::to_string(row)
            .map_err(|e| TabError::invalid("MeasureRow", &row.file, &e.to_string()))?;
        out.push_str(&line);
        out.push('\n');
    }
    Ok(out)
}
