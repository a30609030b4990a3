//! Tablature score tree
//!
//! ```text
//! Score
//!   ├── metadata (title, subtitle, artist, tempo, anacrusis)
//!   └── Vec<Part>
//!         ├── tuning, instrument
//!         ├── hopos / slides (weak spans into the tree)
//!         └── Vec<Measure>
//!               ├── time / key signature, clef
//!               └── Vec<Voice> (indexed 1..=4)
//!                     └── Vec<TimedEvent> (Note | Chord | Rest | Grace)
//! ```

use serde::{Deserialize, Serialize};

use super::duration::{zero, Rational};
use super::note::{Annotation, Chord, Note, Pitch};
use super::signature::{Clef, KeySignature, TimeSignature};
use super::techniques::{HopoSpan, NoteRef, SlideSpan};

/// Metronome mark: `bpm` beats of `referent` quarter notes per minute
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TempoMark {
    pub bpm: u32,
    pub referent: Rational,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub artist: Option<String>,
    pub tempo: Option<TempoMark>,
    /// Piece starts with a pickup measure (numbering starts at 0)
    pub anacrusis: bool,
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instrument {
    pub name: Option<String>,
    pub kind: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    pub name: String,
    pub abbreviation: Option<String>,
    pub icon: u32,
    pub instrument: Instrument,
    /// Open-string pitches, index 0 = lowest string
    pub tuning: Vec<Pitch>,
    pub let_ring_throughout: bool,
    pub measures: Vec<Measure>,
    pub hopos: Vec<HopoSpan>,
    pub slides: Vec<SlideSpan>,
}

impl Part {
    pub fn string_count(&self) -> usize {
        self.tuning.len()
    }

    pub fn note(&self, at: &NoteRef) -> Option<&Note> {
        let event = self
            .measures
            .get(at.measure)?
            .voices
            .get(at.voice)?
            .events
            .get(at.event)?;
        match (&event.event, at.member) {
            (Event::Note(note), None) => Some(note),
            (Event::Grace(grace), None) => Some(&grace.note),
            (Event::Chord(chord), Some(member)) => chord.notes.get(member),
            _ => None,
        }
    }

    pub fn note_mut(&mut self, at: &NoteRef) -> Option<&mut Note> {
        let event = self
            .measures
            .get_mut(at.measure)?
            .voices
            .get_mut(at.voice)?
            .events
            .get_mut(at.event)?;
        match (&mut event.event, at.member) {
            (Event::Note(note), None) => Some(note),
            (Event::Grace(grace), None) => Some(&mut grace.note),
            (Event::Chord(chord), Some(member)) => chord.notes.get_mut(member),
            _ => None,
        }
    }

    /// Every note of the part with its address, in measure/voice/event order.
    /// `part` is this part's index in the score.
    pub fn notes(&self, part: usize) -> impl Iterator<Item = (NoteRef, &Note)> + '_ {
        self.measures.iter().enumerate().flat_map(move |(m, measure)| {
            measure.voices.iter().enumerate().flat_map(move |(v, voice)| {
                voice.events.iter().enumerate().flat_map(move |(e, timed)| {
                    let at = |member| NoteRef { part, measure: m, voice: v, event: e, member };
                    let notes: Vec<(NoteRef, &Note)> = match &timed.event {
                        Event::Note(note) => vec![(at(None), note)],
                        Event::Grace(grace) => vec![(at(None), &grace.note)],
                        Event::Chord(chord) => chord
                            .notes
                            .iter()
                            .enumerate()
                            .map(|(i, n)| (at(Some(i)), n))
                            .collect(),
                        Event::Rest(_) => Vec::new(),
                    };
                    notes
                })
            })
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measure {
    pub number: usize,
    /// GPIF bar id this measure was read from
    pub bar_id: String,
    pub time_signature: TimeSignature,
    /// Only present when it differs from the previous measure's key
    pub key_signature: Option<KeySignature>,
    pub clef: Option<Clef>,
    pub voices: Vec<Voice>,
}

impl Measure {
    /// Declared length in quarter notes
    pub fn declared_duration(&self) -> Rational {
        self.time_signature.quarter_length()
    }

    /// Length actually filled by the longest voice
    pub fn content_duration(&self) -> Rational {
        self.voices
            .iter()
            .map(Voice::end_offset)
            .max()
            .unwrap_or_else(zero)
    }

    pub fn voice(&self, index: u8) -> Option<&Voice> {
        self.voices.iter().find(|v| v.index == index)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Voice {
    /// Slot in the bar, 1..=4
    pub index: u8,
    /// GPIF voice id the contents were read from
    pub voice_id: String,
    pub events: Vec<TimedEvent>,
}

impl Voice {
    pub fn new(index: u8, voice_id: impl Into<String>) -> Self {
        Voice {
            index,
            voice_id: voice_id.into(),
            events: Vec::new(),
        }
    }

    /// Offset reached after the last event
    pub fn end_offset(&self) -> Rational {
        self.events
            .iter()
            .map(|e| e.offset + e.event.weight())
            .max()
            .unwrap_or_else(zero)
    }
}

/// An event placed at an offset within its measure (quarter notes)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimedEvent {
    pub offset: Rational,
    pub event: Event,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    Note(Note),
    Chord(Chord),
    Rest(Rest),
    Grace(GraceNote),
}

impl Event {
    /// Time this event advances its voice by
    pub fn weight(&self) -> Rational {
        match self {
            Event::Note(note) => note.duration,
            Event::Chord(chord) => chord.duration,
            Event::Rest(rest) => rest.duration,
            Event::Grace(_) => zero(),
        }
    }

    pub fn annotations(&self) -> &[Annotation] {
        match self {
            Event::Note(note) => &note.annotations,
            Event::Chord(chord) => &chord.annotations,
            Event::Rest(rest) => &rest.annotations,
            Event::Grace(grace) => &grace.note.annotations,
        }
    }

    /// Chord label carried by this event, if any
    pub fn chord_label(&self) -> Option<(&str, &str)> {
        self.annotations().iter().find_map(|a| match a {
            Annotation::ChordLabel { name, diagram_id } => Some((name.as_str(), diagram_id.as_str())),
            _ => None,
        })
    }

    pub fn is_sounding(&self) -> bool {
        matches!(self, Event::Note(_) | Event::Chord(_))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rest {
    pub duration: Rational,
    pub annotations: Vec<Annotation>,
}

/// Ornamental note that takes no time in its voice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraceNote {
    pub note: Note,
    /// Played before the beat (slashed) rather than on it
    pub slash: bool,
}
