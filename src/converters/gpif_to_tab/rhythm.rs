//! Rhythm Resolver: rhythm declarations to quarter-note durations

use crate::gpif::{GpifIndex, Handle, RhythmDecl};
use crate::models::duration::zero;
use crate::models::Rational;

/// Exact length of a rhythm in quarter notes.
///
/// Dots extend the base value; a `num:den` tuplet fits `num` notes in the
/// time of `den`, so the dotted length is scaled by `den/num`.
pub fn rhythm_duration(rhythm: &RhythmDecl) -> Rational {
    let length = rhythm.note_value.dotted_length(rhythm.dots);
    match rhythm.tuplet {
        Some((num, den)) => length * Rational::new(den as i32, num as i32),
        None => length,
    }
}

/// Duration of a beat's rhythm reference; a missing reference is zero
pub fn resolve_rhythm(index: &GpifIndex, rhythm: Option<Handle<RhythmDecl>>) -> Rational {
    rhythm
        .map(|handle| rhythm_duration(index.rhythms.get(handle)))
        .unwrap_or_else(zero)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NoteValue;

    fn rhythm(note_value: NoteValue, dots: u8, tuplet: Option<(u32, u32)>) -> RhythmDecl {
        RhythmDecl { note_value, dots, tuplet }
    }

    #[test]
    fn test_plain_values() {
        assert_eq!(rhythm_duration(&rhythm(NoteValue::Whole, 0, None)), Rational::from_integer(4));
        assert_eq!(rhythm_duration(&rhythm(NoteValue::Eighth, 0, None)), Rational::new(1, 2));
        assert_eq!(rhythm_duration(&rhythm(NoteValue::ThirtySecond, 0, None)), Rational::new(1, 8));
    }

    #[test]
    fn test_dots() {
        assert_eq!(rhythm_duration(&rhythm(NoteValue::Quarter, 1, None)), Rational::new(3, 2));
        assert_eq!(rhythm_duration(&rhythm(NoteValue::Half, 2, None)), Rational::new(7, 2));
    }

    #[test]
    fn test_tuplets() {
        // triplet eighths: three in the time of two
        assert_eq!(rhythm_duration(&rhythm(NoteValue::Eighth, 0, Some((3, 2)))), Rational::new(1, 3));
        // quintuplet sixteenths
        assert_eq!(rhythm_duration(&rhythm(NoteValue::Sixteenth, 0, Some((5, 4)))), Rational::new(1, 5));
    }
}
