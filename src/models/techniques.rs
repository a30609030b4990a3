//! Two-note techniques linking notes across beats
//!
//! Spans never own their notes. They point into the score tree with
//! [`NoteRef`] indices, which stay valid because the tree is not mutated
//! structurally after assembly.

use serde::{Deserialize, Serialize};

/// Address of a note inside a score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NoteRef {
    pub part: usize,
    /// Index into `Part::measures`
    pub measure: usize,
    /// Index into `Measure::voices`
    pub voice: usize,
    /// Index into `Voice::events`
    pub event: usize,
    /// Chord member index; `None` for single notes and grace notes
    pub member: Option<usize>,
}

/// Snapshot of the note facts a hammer-on/pull-off needs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HopoNote {
    pub at: NoteRef,
    pub string: u8,
    pub fret: u8,
    pub muted: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HopoDirection {
    HammerOn,
    PullOff,
}

/// What a closed pair of hopo notes amounts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HopoKind {
    Slur(HopoDirection),
    /// Equal frets with a muted side: a percussive hopo, not emitted
    Dead,
    /// Equal frets, nothing muted
    Contradictory,
}

/// Classify a hopo from its two frets and mute flags
pub fn classify_hopo(first: &HopoNote, second: &HopoNote) -> HopoKind {
    if first.fret > second.fret {
        HopoKind::Slur(HopoDirection::PullOff)
    } else if first.fret < second.fret {
        HopoKind::Slur(HopoDirection::HammerOn)
    } else if first.muted || second.muted {
        HopoKind::Dead
    } else {
        HopoKind::Contradictory
    }
}

/// Hammer-on or pull-off between two notes on one string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HopoSpan {
    pub first: HopoNote,
    pub second: HopoNote,
}

impl HopoSpan {
    /// Derived from the fret order; equal frets never reach a resolved span
    pub fn direction(&self) -> HopoDirection {
        if self.first.fret > self.second.fret {
            HopoDirection::PullOff
        } else {
            HopoDirection::HammerOn
        }
    }
}

/// A slide from one note to the next note on the same string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideSpan {
    pub from: NoteRef,
    pub to: NoteRef,
}
