//! Beat/Voice Assembler
//!
//! Walks a voice's beats in order, building one event per beat and
//! advancing the voice's running offset by each event's weight. Grace
//! notes sit at the current offset without moving it.

use super::note_builder::{build_note, HopoTracker, PartContext};
use super::rhythm::resolve_rhythm;
use crate::config::ParserSettings;
use crate::error::TabResult;
use crate::gpif::{BeatDecl, GpifIndex, Handle, VoiceDecl};
use crate::models::duration::zero;
use crate::models::{
    Annotation, Chord, Event, GraceNote, LegatoMark, NoteRef, Rest, TimedEvent, Voice,
};

/// Where the voice being assembled sits in the score
#[derive(Debug, Clone, Copy)]
pub struct VoiceLocation {
    pub measure: usize,
    /// Position in `Measure::voices`
    pub position: usize,
    /// Bar slot, 1..=4
    pub slot: u8,
}

/// Beat-level marks shared by whatever event the beat produces
fn beat_annotations(index: &GpifIndex, beat: &BeatDecl) -> TabResult<Vec<Annotation>> {
    let mut annotations = Vec::new();

    if let Some(diagram_id) = &beat.chord {
        let diagram = index.diagrams.get(index.diagrams.resolve(diagram_id)?);
        annotations.push(Annotation::ChordLabel {
            name: diagram.name.clone(),
            diagram_id: diagram_id.clone(),
        });
    }
    if let Some(text) = &beat.free_text {
        annotations.push(Annotation::FreeText(text.clone()));
    }
    if let Some(legato) = beat.legato {
        let mark = match (legato.origin, legato.destination) {
            (true, true) => Some(LegatoMark::Continue),
            (true, false) => Some(LegatoMark::Start),
            (false, true) => Some(LegatoMark::End),
            (false, false) => None,
        };
        annotations.extend(mark.map(Annotation::Legato));
    }
    if beat.tremolo_bar_vibrato {
        annotations.push(Annotation::TremoloBarVibrato);
    }
    if beat.whammy {
        annotations.push(Annotation::Whammy);
    }

    Ok(annotations)
}

/// Build the voice declared at `handle`
pub fn assemble_voice(
    index: &GpifIndex,
    settings: &ParserSettings,
    part: &PartContext,
    location: VoiceLocation,
    handle: Handle<VoiceDecl>,
    hopos: &mut HopoTracker,
) -> TabResult<Voice> {
    let mut voice = Voice::new(location.slot, index.voices.id_of(handle));
    let mut offset = zero();

    for &beat_handle in &index.voices.get(handle).beats {
        let beat = index.beats.get(beat_handle);
        let duration = resolve_rhythm(index, beat.rhythm);
        let annotations = beat_annotations(index, beat)?;
        let at = |member| NoteRef {
            part: part.index,
            measure: location.measure,
            voice: location.position,
            event: voice.events.len(),
            member,
        };

        let event = if let Some(grace) = &beat.grace {
            let first = match beat.notes.first() {
                Some(&first) => first,
                None => {
                    log::debug!("Grace beat '{}' has no notes; skipped", index.beats.id_of(beat_handle));
                    continue;
                }
            };
            let value = settings.grace_value.quarter_length();
            let mut note = build_note(index, first, value, part, at(None), hopos)?;
            annotations.into_iter().for_each(|a| note.annotate(a));
            Event::Grace(GraceNote {
                note,
                slash: grace.as_str() != "OnBeat",
            })
        } else {
            match beat.notes.as_slice() {
                [] => Event::Rest(Rest { duration, annotations }),
                [single] => {
                    let mut note = build_note(index, *single, duration, part, at(None), hopos)?;
                    annotations.into_iter().for_each(|a| note.annotate(a));
                    Event::Note(note)
                }
                members => {
                    let notes = members
                        .iter()
                        .enumerate()
                        .map(|(i, &n)| build_note(index, n, duration, part, at(Some(i)), hopos))
                        .collect::<TabResult<Vec<_>>>()?;
                    let mut annotations = annotations;
                    // members' glyphs show once on the chord
                    for glyph in notes.iter().flat_map(|n| n.annotations.iter()) {
                        if !annotations.contains(glyph) {
                            annotations.push(glyph.clone());
                        }
                    }
                    Event::Chord(Chord { notes, duration, annotations })
                }
            }
        };

        let weight = event.weight();
        voice.events.push(TimedEvent { offset, event });
        offset += weight;
    }

    log::debug!(
        "Voice {} (slot {}) of measure {}: {} events, ends at {}",
        voice.voice_id,
        voice.index,
        location.measure,
        voice.events.len(),
        offset
    );
    Ok(voice)
}
