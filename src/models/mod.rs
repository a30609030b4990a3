//! Tablature data model
//!
//! Everything here is produced by the GPIF converter and consumed by
//! display and aggregation code. The model knows nothing about GPIF.

pub mod bend;
pub mod duration;
pub mod note;
pub mod score;
pub mod signature;
pub mod techniques;

pub use bend::{BendEnvelope, BendPoints};
pub use duration::{NoteValue, Rational};
pub use note::{Annotation, Chord, LegatoMark, Note, Pitch, TieState};
pub use score::{Event, GraceNote, Instrument, Measure, Part, Rest, Score, TempoMark, TimedEvent, Voice};
pub use signature::{Clef, KeySignature, Mode, TimeSignature};
pub use techniques::{classify_hopo, HopoDirection, HopoKind, HopoNote, HopoSpan, NoteRef, SlideSpan};
