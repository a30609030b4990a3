//! Error types for GPIF import
//!
//! Every failure aborts the parse of the current document. There is no
//! partial-document recovery: measure offsets downstream depend on every
//! measure being fully resolved.

use thiserror::Error;

use crate::gpif::Section;

/// Result type for GPIF import operations
pub type TabResult<T> = Result<T, TabError>;

/// Top-level import error type
#[derive(Debug, Error)]
pub enum TabError {
    /// An id lookup into a section table found nothing
    #[error("Missing reference: no {section} entry with id '{id}'")]
    MissingReference { section: Section, id: String },

    /// A track uses an instrument icon outside the fretted-instrument allow-list
    #[error("Unsupported track '{track}': instrument icon {icon} is not a fretted instrument")]
    UnsupportedTrack { track: String, icon: u32 },

    /// Pitch, string or fret of a note is absent or out of range
    #[error("Malformed note '{note}': {reason}")]
    MalformedNote { note: String, reason: String },

    /// Hammer-on/pull-off between two identical, non-muted frets
    #[error("Contradictory hammer-on/pull-off on string {string}: both notes at fret {fret}")]
    ContradictoryHopo { string: u8, fret: u8 },

    /// A simile mark points before the start of the part
    #[error("Malformed simile at measure index {measure}: cannot repeat {lookback} measure(s) back")]
    MalformedSimile { measure: usize, lookback: usize },

    /// XML is not well-formed
    #[error("Invalid XML: {0}")]
    Xml(String),

    /// Required structural element is missing
    #[error("Missing required element: {0}")]
    MissingElement(String),

    /// Element text could not be interpreted
    #[error("Invalid value '{value}' for element '{element}': {reason}")]
    InvalidValue {
        element: String,
        value: String,
        reason: String,
    },

    /// Reading the document from disk failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Parser settings could not be decoded
    #[error("Invalid parser settings: {0}")]
    Settings(String),
}

impl TabError {
    pub(crate) fn missing(section: Section, id: impl Into<String>) -> Self {
        TabError::MissingReference {
            section,
            id: id.into(),
        }
    }

    pub(crate) fn invalid(element: &str, value: &str, reason: &str) -> Self {
        TabError::InvalidValue {
            element: element.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_reference_message_names_section() {
        let err = TabError::missing(Section::Rhythms, "42");
        assert_eq!(err.to_string(), "Missing reference: no Rhythms entry with id '42'");
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: TabError = io.into();
        assert!(matches!(err, TabError::Io(_)));
    }
}
