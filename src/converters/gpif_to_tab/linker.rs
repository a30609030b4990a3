//! Technique Linker
//!
//! Runs once the whole score tree exists. Slides are completed by looking
//! forward in time; hammer-on/pull-off pairs get their direction and are
//! handed to the part that owns their first note.
//!
//! Slide targets are searched within the source note's measure only. A
//! slide into the next measure is left unresolved.

use crate::error::{TabError, TabResult};
use crate::models::{
    classify_hopo, Annotation, Event, HopoKind, HopoNote, HopoSpan, NoteRef, Part, Rational, SlideSpan,
};

/// (onset, voice position, event index)
type Onset = (Rational, usize, usize);

/// Sounding events of one measure, all voices merged by onset
fn onsets(part: &Part, measure: usize) -> Vec<Onset> {
    let mut events: Vec<Onset> = part.measures[measure]
        .voices
        .iter()
        .enumerate()
        .flat_map(|(v, voice)| {
            voice
                .events
                .iter()
                .enumerate()
                .filter(|(_, timed)| timed.event.is_sounding())
                .map(move |(e, timed)| (timed.offset, v, e))
        })
        .collect();
    events.sort();
    events
}

/// Find where a slide from `from` lands, if anywhere in its measure
///
/// Events sharing the source's onset only count when they follow it in its
/// own voice, as a principal note follows its grace note.
fn slide_target(part: &Part, from: &NoteRef, string: u8, merged: &[Onset]) -> Option<NoteRef> {
    let start = part.measures[from.measure].voices[from.voice].events[from.event].offset;
    let &(_, voice, event) = merged.iter().find(|&&(offset, voice, event)| {
        offset > start || (offset == start && voice == from.voice && event > from.event)
    })?;
    let to = |member| NoteRef { part: from.part, measure: from.measure, voice, event, member };
    match &part.measures[from.measure].voices[voice].events[event].event {
        Event::Note(_) => Some(to(None)),
        Event::Chord(chord) => match chord.note_on_string(string) {
            Some(member) => Some(to(Some(member))),
            None => {
                log::debug!("Slide on string {} meets a chord without that string; dropped", string);
                None
            }
        },
        _ => None,
    }
}

/// Pair every slide-to-next note with the next note on its string
pub fn link_slides(parts: &mut [Part]) {
    for (part_index, part) in parts.iter_mut().enumerate() {
        let mut links = Vec::new();
        for measure in 0..part.measures.len() {
            let merged = onsets(part, measure);
            let sources: Vec<(NoteRef, u8)> = part
                .notes(part_index)
                .filter(|(at, note)| at.measure == measure && note.slide_to_next)
                .map(|(at, note)| (at, note.string))
                .collect();
            for (from, string) in sources {
                match slide_target(part, &from, string, &merged) {
                    Some(to) => links.push(SlideSpan { from, to }),
                    None => log::warn!(
                        "Slide from measure {} string {} has no target in its measure; left unresolved",
                        part.measures[measure].number,
                        string
                    ),
                }
            }
        }
        for link in links {
            if let Some(target) = part.note_mut(&link.to) {
                target.annotate(Annotation::SlideIn);
            }
            part.slides.push(link);
        }
    }
}

/// Give each closed hopo pair its direction
///
/// Equal frets are a dead-note hopo when either side is muted and are
/// dropped; otherwise they are contradictory.
pub fn resolve_hopos(pairs: Vec<(HopoNote, HopoNote)>) -> TabResult<Vec<HopoSpan>> {
    let mut spans = Vec::with_capacity(pairs.len());
    for (first, second) in pairs {
        match classify_hopo(&first, &second) {
            HopoKind::Slur(_) => spans.push(HopoSpan { first, second }),
            HopoKind::Dead => log::debug!(
                "Muted hopo on string {} fret {} dropped",
                first.string,
                first.fret
            ),
            HopoKind::Contradictory => {
                return Err(TabError::ContradictoryHopo {
                    string: first.string,
                    fret: first.fret,
                })
            }
        }
    }
    Ok(spans)
}

/// Hand resolved spans to the parts owning their first note
pub fn attach_hopos(parts: &mut [Part], spans: Vec<HopoSpan>) {
    for span in spans {
        match parts.get_mut(span.first.at.part) {
            Some(part) => part.hopos.push(span),
            None => log::warn!("Hopo span points at missing part {}", span.first.at.part),
        }
    }
}
