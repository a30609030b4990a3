//! Durations in quarter-note units
//!
//! All offsets and durations are exact rationals so that a voice's final
//! offset can be compared with its measure's declared length without
//! rounding.

use num_rational::Rational32;
use serde::{Deserialize, Serialize};

/// Re-export Rational for duration calculations
pub type Rational = Rational32;

/// Zero-length duration (used for missing rhythms and grace-note weight)
pub fn zero() -> Rational {
    Rational::from_integer(0)
}

/// Base note value of a rhythm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NoteValue {
    DoubleWhole,
    Whole,
    Half,
    Quarter,
    Eighth,
    #[serde(rename = "16th")]
    Sixteenth,
    #[serde(rename = "32nd")]
    ThirtySecond,
    #[serde(rename = "64th")]
    SixtyFourth,
    #[serde(rename = "128th")]
    HundredTwentyEighth,
}

impl NoteValue {
    /// Parse the GPIF `<NoteValue>` text (case-insensitive)
    pub fn from_gpif(text: &str) -> Option<Self> {
        match text.trim().to_ascii_lowercase().as_str() {
            "doublewhole" | "breve" => Some(NoteValue::DoubleWhole),
            "whole" => Some(NoteValue::Whole),
            "half" => Some(NoteValue::Half),
            "quarter" => Some(NoteValue::Quarter),
            "eighth" => Some(NoteValue::Eighth),
            "16th" => Some(NoteValue::Sixteenth),
            "32nd" => Some(NoteValue::ThirtySecond),
            "64th" => Some(NoteValue::SixtyFourth),
            "128th" => Some(NoteValue::HundredTwentyEighth),
            _ => None,
        }
    }

    /// Undotted length in quarter notes
    pub fn quarter_length(self) -> Rational {
        match self {
            NoteValue::DoubleWhole => Rational::from_integer(8),
            NoteValue::Whole => Rational::from_integer(4),
            NoteValue::Half => Rational::from_integer(2),
            NoteValue::Quarter => Rational::from_integer(1),
            NoteValue::Eighth => Rational::new(1, 2),
            NoteValue::Sixteenth => Rational::new(1, 4),
            NoteValue::ThirtySecond => Rational::new(1, 8),
            NoteValue::SixtyFourth => Rational::new(1, 16),
            NoteValue::HundredTwentyEighth => Rational::new(1, 32),
        }
    }

    /// Length with `dots` augmentation dots: base * (2 - 1/2^dots)
    pub fn dotted_length(self, dots: u8) -> Rational {
        let dots = u32::from(dots.min(4));
        let multiplier = Rational::new((1 << (dots + 1)) - 1, 1 << dots);
        self.quarter_length() * multiplier
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dotted_lengths() {
        assert_eq!(NoteValue::Quarter.dotted_length(0), Rational::from_integer(1));
        assert_eq!(NoteValue::Quarter.dotted_length(1), Rational::new(3, 2));
        assert_eq!(NoteValue::Half.dotted_length(2), Rational::new(7, 2));
        assert_eq!(NoteValue::Eighth.dotted_length(1), Rational::new(3, 4));
    }

    #[test]
    fn test_from_gpif_is_case_insensitive() {
        assert_eq!(NoteValue::from_gpif("Quarter"), Some(NoteValue::Quarter));
        assert_eq!(NoteValue::from_gpif("16th"), Some(NoteValue::Sixteenth));
        assert_eq!(NoteValue::from_gpif("Whatever"), None);
    }
}
