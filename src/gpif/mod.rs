//! GPIF document layer
//!
//! Turns Guitar Pro XML into an immutable [`GpifIndex`]: one arena per
//! cross-referenced section, with every id reference already resolved into
//! a typed [`Handle`]. Nothing outside this module touches XML.

pub mod arena;
pub mod decls;
pub mod index;
pub mod xml;

pub use arena::{Arena, Handle, Section};
pub use decls::{
    BarDecl, BeatDecl, DiagramDecl, DiagramFretDecl, LegatoDecl, MasterBarDecl, NoteDecl, RhythmDecl,
    ScoreInfo, SimileMark, TrackDecl, VoiceDecl,
};
pub use index::GpifIndex;
