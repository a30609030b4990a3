//! Note Builder
//!
//! Turns one note declaration into a tablature [`Note`] and records its
//! hammer-on/pull-off markers in an explicit [`HopoTracker`].

use crate::error::{TabError, TabResult};
use crate::gpif::{GpifIndex, Handle, NoteDecl};
use crate::models::{Annotation, BendEnvelope, HopoNote, Note, NoteRef, Pitch, Rational, TieState};

/// Slide flag bits meaning "slide into the next note" (shift, legato)
const SLIDE_TO_NEXT: u32 = 0b11;

/// Facts about the part a note is built for
#[derive(Debug, Clone, Copy)]
pub struct PartContext {
    pub index: usize,
    pub string_count: usize,
    pub let_ring_throughout: bool,
}

/// Open hammer-on/pull-off spans collected during one document pass.
///
/// A span opens on a "hopo origin" note and closes when a "hopo
/// destination" note on the same string joins it. A destination only
/// searches the most recent `lookback` spans.
#[derive(Debug)]
pub struct HopoTracker {
    lookback: usize,
    spans: Vec<(HopoNote, Option<HopoNote>)>,
}

impl HopoTracker {
    pub fn new(lookback: usize) -> Self {
        HopoTracker {
            lookback: lookback.max(1),
            spans: Vec::new(),
        }
    }

    /// Record a note's markers. A note may close one span and open the next.
    pub fn record(&mut self, note: HopoNote, origin: bool, destination: bool) {
        if destination {
            let open = self
                .spans
                .iter_mut()
                .rev()
                .take(self.lookback)
                .find(|(first, second)| second.is_none() && first.string == note.string);
            match open {
                Some((_, second)) => *second = Some(note),
                None => log::warn!(
                    "Hopo destination on string {} fret {} has no open span; ignored",
                    note.string,
                    note.fret
                ),
            }
        }
        if origin {
            self.spans.push((note, None));
        }
    }

    pub fn open_count(&self) -> usize {
        self.spans.iter().filter(|(_, second)| second.is_none()).count()
    }

    /// Closed pairs in the order their spans were opened
    pub fn into_pairs(self) -> Vec<(HopoNote, HopoNote)> {
        let open = self.open_count();
        if open > 0 {
            log::warn!("{} hopo span(s) never closed; ignored", open);
        }
        self.spans
            .into_iter()
            .filter_map(|(first, second)| second.map(|s| (first, s)))
            .collect()
    }
}

fn malformed(index: &GpifIndex, handle: Handle<NoteDecl>, reason: impl Into<String>) -> TabError {
    TabError::MalformedNote {
        note: index.notes.id_of(handle).to_string(),
        reason: reason.into(),
    }
}

/// Build the note declared at `handle`, placed at `at` with the given duration
pub fn build_note(
    index: &GpifIndex,
    handle: Handle<NoteDecl>,
    duration: Rational,
    part: &PartContext,
    at: NoteRef,
    hopos: &mut HopoTracker,
) -> TabResult<Note> {
    let decl = index.notes.get(handle);

    let midi = decl.midi.ok_or_else(|| malformed(index, handle, "no MIDI pitch"))?;
    let gpif_string = decl.string.ok_or_else(|| malformed(index, handle, "no string"))?;
    let fret = decl.fret.ok_or_else(|| malformed(index, handle, "no fret"))?;

    if usize::from(gpif_string) >= part.string_count {
        return Err(malformed(
            index,
            handle,
            format!("string {} outside a {}-string tuning", gpif_string, part.string_count),
        ));
    }
    // GPIF counts from the lowest string, tablature from the highest
    let string = (part.string_count - usize::from(gpif_string)) as u8;

    let let_ring = decl.let_ring || part.let_ring_throughout;
    let slide_flags = decl.slide_flags.unwrap_or(0);

    let mut note = Note {
        pitch: Pitch::new(midi),
        string,
        fret,
        duration,
        tie: TieState::from_markers(decl.tie_origin, decl.tie_destination),
        bend: decl.bend.as_ref().map(BendEnvelope::from_points),
        muted: decl.muted,
        let_ring,
        slide_to_next: slide_flags & SLIDE_TO_NEXT != 0,
        annotations: Vec::new(),
    };

    if let_ring {
        note.annotate(Annotation::LetRing);
    }
    if decl.wide_vibrato {
        note.annotate(Annotation::WideVibrato);
    }
    if decl.bended {
        note.annotate(Annotation::Bend);
    }
    if slide_flags & !SLIDE_TO_NEXT != 0 {
        note.annotate(Annotation::Slide(slide_flags & !SLIDE_TO_NEXT));
    }

    if decl.hopo_origin || decl.hopo_destination {
        let hopo = HopoNote { at, string, fret, muted: decl.muted };
        hopos.record(hopo, decl.hopo_origin, decl.hopo_destination);
    }

    log::trace!(
        "Note {}: string {} fret {} ({})",
        index.notes.id_of(handle),
        string,
        fret,
        note.pitch.name()
    );
    Ok(note)
}
