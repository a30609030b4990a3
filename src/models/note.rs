//! Notes, chords and their annotations

use serde::{Deserialize, Serialize};

use super::bend::BendEnvelope;
use super::duration::Rational;

/// Pitch stored as a MIDI note number (60 = C4)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pitch {
    pub midi: u8,
}

impl Pitch {
    pub fn new(midi: u8) -> Self {
        Pitch { midi }
    }

    /// Octave number in scientific pitch notation
    pub fn octave(&self) -> i8 {
        (self.midi / 12) as i8 - 1
    }

    /// Semitone within the octave (0 = C)
    pub fn pitch_class(&self) -> u8 {
        self.midi % 12
    }

    /// Sharp-spelled name with octave, e.g. "F#3"
    pub fn name(&self) -> String {
        const NAMES: [&str; 12] = ["C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B"];
        format!("{}{}", NAMES[self.pitch_class() as usize], self.octave())
    }
}

/// Tie state of a note
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TieState {
    #[default]
    None,
    Start,
    Stop,
    Continue,
}

impl TieState {
    /// Combine the independent origin/destination tie markers
    pub fn from_markers(origin: bool, destination: bool) -> Self {
        match (origin, destination) {
            (true, true) => TieState::Continue,
            (true, false) => TieState::Start,
            (false, true) => TieState::Stop,
            (false, false) => TieState::None,
        }
    }
}

/// Position of a beat inside a legato phrase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LegatoMark {
    Start,
    Continue,
    End,
}

/// Display-only marks carried by notes, chords and rests
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Annotation {
    /// Named chord with the id of its diagram library entry
    ChordLabel { name: String, diagram_id: String },
    FreeText(String),
    Legato(LegatoMark),
    LetRing,
    TremoloBarVibrato,
    Whammy,
    Bend,
    WideVibrato,
    /// Slide other than a slide-to-next (raw GPIF flag bits)
    Slide(u32),
    /// Arrival point of a slide from the previous note on this string
    SlideIn,
}

/// A single fretted note
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub pitch: Pitch,
    /// Guitarist numbering: 1 = highest string
    pub string: u8,
    pub fret: u8,
    pub duration: Rational,
    pub tie: TieState,
    pub bend: Option<BendEnvelope>,
    pub muted: bool,
    pub let_ring: bool,
    pub slide_to_next: bool,
    pub annotations: Vec<Annotation>,
}

impl Note {
    /// Pitch actually heard, including any bend alteration
    pub fn sounding_pitch(&self) -> f64 {
        f64::from(self.pitch.midi) + self.bend.map_or(0.0, |b| b.alteration())
    }

    pub fn has_annotation(&self, annotation: &Annotation) -> bool {
        self.annotations.contains(annotation)
    }

    pub(crate) fn annotate(&mut self, annotation: Annotation) {
        if !self.annotations.contains(&annotation) {
            self.annotations.push(annotation);
        }
    }
}

/// Simultaneous notes sharing one onset and duration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chord {
    pub notes: Vec<Note>,
    pub duration: Rational,
    pub annotations: Vec<Annotation>,
}

impl Chord {
    /// Member sounding on the given string, if any
    pub fn note_on_string(&self, string: u8) -> Option<usize> {
        self.notes.iter().position(|n| n.string == string)
    }

    /// Diagram id of the chord label, if the chord is named
    pub fn diagram_id(&self) -> Option<&str> {
        self.annotations.iter().find_map(|a| match a {
            Annotation::ChordLabel { diagram_id, .. } => Some(diagram_id.as_str()),
            _ => None,
        })
    }
}
