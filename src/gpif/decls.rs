//! Typed declarations read from each GPIF section
//!
//! These mirror the document one-to-one. Cross-references between sections
//! are already resolved into [`Handle`]s; everything else is kept raw for
//! the converter to interpret.

use super::arena::Handle;
use crate::models::{BendPoints, KeySignature, NoteValue, Pitch, TimeSignature};

#[derive(Debug, Clone, PartialEq)]
pub struct RhythmDecl {
    pub note_value: NoteValue,
    pub dots: u8,
    /// Primary tuplet as (num, den): `num` notes in the time of `den`
    pub tuplet: Option<(u32, u32)>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NoteDecl {
    pub midi: Option<u8>,
    /// GPIF numbering: 0 = lowest string
    pub string: Option<u8>,
    pub fret: Option<u8>,
    pub tie_origin: bool,
    pub tie_destination: bool,
    pub muted: bool,
    pub let_ring: bool,
    pub wide_vibrato: bool,
    pub bended: bool,
    pub slide_flags: Option<u32>,
    pub hopo_origin: bool,
    pub hopo_destination: bool,
    pub bend: Option<BendPoints>,
}

/// `<Legato origin=".." destination=".."/>` on a beat
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegatoDecl {
    pub origin: bool,
    pub destination: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BeatDecl {
    pub notes: Vec<Handle<NoteDecl>>,
    /// `None` when the beat has no rhythm or references a missing one
    pub rhythm: Option<Handle<RhythmDecl>>,
    /// Diagram id from `<Chord>`
    pub chord: Option<String>,
    /// Text of `<GraceNotes>` (`OnBeat` / `BeforeBeat`)
    pub grace: Option<String>,
    pub free_text: Option<String>,
    pub legato: Option<LegatoDecl>,
    pub tremolo_bar_vibrato: bool,
    pub whammy: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VoiceDecl {
    pub beats: Vec<Handle<BeatDecl>>,
}

/// Measure repeat instruction on a bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimileMark {
    /// Repeat the previous measure
    Simple,
    /// Repeat from two measures back
    Double,
}

impl SimileMark {
    pub fn from_gpif(text: &str) -> Self {
        match text.trim() {
            "Simple" => SimileMark::Simple,
            other => {
                if !matches!(other, "FirstOfDouble" | "SecondOfDouble" | "Double") {
                    log::warn!("Unknown simile mark '{}', treating as double", other);
                }
                SimileMark::Double
            }
        }
    }

    /// How many measures back the contents come from
    pub fn lookback(self) -> usize {
        match self {
            SimileMark::Simple => 1,
            SimileMark::Double => 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarDecl {
    /// Four voice slots; `None` for the `-1` sentinel
    pub voices: Vec<Option<Handle<VoiceDecl>>>,
    pub simile: Option<SimileMark>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MasterBarDecl {
    pub time: TimeSignature,
    pub key: KeySignature,
    /// One bar per part, by part position
    pub bars: Vec<Handle<BarDecl>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrackDecl {
    pub id: String,
    pub name: String,
    pub short_name: Option<String>,
    pub icon: u32,
    pub instrument_name: Option<String>,
    pub instrument_type: Option<String>,
    pub tuning: Vec<Pitch>,
    pub let_ring_throughout: bool,
}

/// One `<Fret string=".." fret=".."/>` of a chord diagram
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiagramFretDecl {
    pub string: u8,
    pub fret: u8,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DiagramDecl {
    pub name: String,
    pub string_count: Option<u8>,
    pub base_fret: u8,
    pub frets: Vec<DiagramFretDecl>,
    /// (string, finger name) from `<Fingering><Position/></Fingering>`
    pub fingering: Vec<(u8, String)>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreInfo {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub artist: Option<String>,
    pub anacrusis: bool,
    /// First tempo automation as (bpm, referent code)
    pub tempo: Option<(u32, u32)>,
}
