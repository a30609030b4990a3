//! Time and key signatures attached to measures

use serde::{Deserialize, Serialize};

use super::duration::Rational;
use crate::error::{TabError, TabResult};

/// Time signature (e.g., 4/4, 3/4, 6/8)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSignature {
    pub numerator: u8,
    pub denominator: u8,
}

impl TimeSignature {
    /// Parse GPIF `<Time>` text such as `"4/4"`
    pub fn parse(text: &str) -> TabResult<Self> {
        let invalid = || TabError::invalid("Time", text, "Expected <numerator>/<denominator>");
        let (num, den) = text.trim().split_once('/').ok_or_else(invalid)?;
        let numerator: u8 = num.trim().parse().map_err(|_| invalid())?;
        let denominator: u8 = den.trim().parse().map_err(|_| invalid())?;
        if numerator == 0 || denominator == 0 {
            return Err(invalid());
        }
        Ok(TimeSignature { numerator, denominator })
    }

    /// Declared measure length in quarter notes
    pub fn quarter_length(&self) -> Rational {
        Rational::new(i32::from(self.numerator) * 4, i32::from(self.denominator))
    }
}

/// Scale mode of a key signature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Mode {
    #[default]
    Major,
    Minor,
}

/// Key signature: sharps (positive) or flats (negative) plus mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct KeySignature {
    pub accidental_count: i8,
    pub mode: Mode,
}

impl KeySignature {
    pub fn new(accidental_count: i8, mode: Mode) -> Self {
        KeySignature { accidental_count, mode }
    }

    /// Tonic name for display (e.g., "G major", "E minor")
    pub fn name(&self) -> String {
        const MAJOR: [&str; 15] = [
            "C♭", "G♭", "D♭", "A♭", "E♭", "B♭", "F", "C", "G", "D", "A", "E", "B", "F#", "C#",
        ];
        const MINOR: [&str; 15] = [
            "A♭", "E♭", "B♭", "F", "C", "G", "D", "A", "E", "B", "F#", "C#", "G#", "D#", "A#",
        ];
        let slot = usize::try_from(i16::from(self.accidental_count) + 7).ok();
        let table = match self.mode {
            Mode::Major => &MAJOR,
            Mode::Minor => &MINOR,
        };
        match slot.and_then(|s| table.get(s)) {
            Some(tonic) => match self.mode {
                Mode::Major => format!("{} major", tonic),
                Mode::Minor => format!("{} minor", tonic),
            },
            None => format!("{} sharps/flats", self.accidental_count),
        }
    }
}

/// Clef marker; tablature parts always start with a tab clef
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Clef {
    Tab,
}
