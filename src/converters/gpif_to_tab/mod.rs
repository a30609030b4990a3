//! GPIF to tablature converter
//!
//! # Architecture
//!
//! ```text
//! GPIF String
//!   ↓ [GpifIndex::parse: roxmltree, one arena per section]
//! GpifIndex
//!   ↓ [measures → beats → note_builder, rhythm]
//! Parts (notes, chords, rests, grace notes; open hopo spans)
//!   ↓ [linker: slides, hopo directions]
//! Score
//! ```
//!
//! Any fatal error aborts the whole document. Missing rhythms, unresolved
//! slides and unmatched hopo markers degrade gracefully and are logged.

pub mod beats;
pub mod linker;
pub mod measures;
pub mod note_builder;
pub mod rhythm;

pub use note_builder::{HopoTracker, PartContext};
pub use rhythm::{resolve_rhythm, rhythm_duration};

use crate::config::ParserSettings;
use crate::error::TabResult;
use crate::gpif::GpifIndex;
use crate::models::{Rational, Score, TempoMark};

/// Convert an indexed GPIF document into a tablature score
pub fn convert(index: &GpifIndex, settings: &ParserSettings) -> TabResult<Score> {
    let mut hopos = HopoTracker::new(settings.hopo_lookback);
    let mut parts = measures::build_parts(index, settings, &mut hopos)?;

    linker::link_slides(&mut parts);
    let spans = linker::resolve_hopos(hopos.into_pairs())?;
    linker::attach_hopos(&mut parts, spans);

    let tempo = index.info.tempo.map(|(bpm, referent)| TempoMark {
        bpm,
        referent: Rational::new(referent as i32, 2),
    });

    log::info!(
        "Converted '{}': {} parts",
        index.info.title.as_deref().unwrap_or("untitled"),
        parts.len()
    );

    Ok(Score {
        title: index.info.title.clone(),
        subtitle: index.info.subtitle.clone(),
        artist: index.info.artist.clone(),
        tempo,
        anacrusis: index.info.anacrusis,
        parts,
    })
}
