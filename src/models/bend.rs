//! String-bend envelopes
//!
//! GPIF describes a bend with three pitch values (origin, middle,
//! destination) and four time offsets. Pitch values count 50 per semitone
//! (100 = one whole tone); offsets are percentages of the note's length.
//!
//! Only a single bend per note is modelled. Re-bend patterns collapse onto
//! the middle value.

use serde::{Deserialize, Serialize};

/// Raw control points as read from the document
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BendPoints {
    pub origin_value: f64,
    pub middle_value: f64,
    pub destination_value: f64,
    pub origin_offset: f64,
    pub middle_offset1: f64,
    pub middle_offset2: f64,
    pub destination_offset: f64,
}

/// Reconstructed bend of one note
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BendEnvelope {
    pub origin: f64,
    pub middle: f64,
    /// Effective destination. A bend-and-release that returns to its origin
    /// uses the middle value here.
    pub destination: f64,
    pub origin_duration: f64,
    pub middle_duration: f64,
    pub end_duration: f64,
    pre_bend: bool,
    release: bool,
    alteration: f64,
}

impl BendEnvelope {
    pub fn from_points(points: &BendPoints) -> Self {
        let origin = points.origin_value;
        let middle = points.middle_value;
        let mut destination = points.destination_value;

        let origin_duration = points.middle_offset1 - points.origin_offset;
        let middle_duration = points.middle_offset2 - points.middle_offset1;
        let end_duration = points.destination_offset - points.middle_offset2;

        let pre_bend = origin > 0.0;
        let release = middle > destination;

        let alteration = if origin == destination {
            if origin == middle {
                // held pre-bend
                origin / 50.0
            } else {
                destination = middle;
                (destination - origin).abs() / 50.0
            }
        } else {
            (destination - origin).abs() / 50.0
        };

        BendEnvelope {
            origin,
            middle,
            destination,
            origin_duration,
            middle_duration,
            end_duration,
            pre_bend,
            release,
            alteration,
        }
    }

    /// The note starts already bent
    pub fn pre_bend(&self) -> bool {
        self.pre_bend
    }

    /// The pitch comes back down after its peak
    pub fn release(&self) -> bool {
        self.release
    }

    /// Net pitch alteration in semitones
    pub fn alteration(&self) -> f64 {
        self.alteration
    }

    /// Point (in note-length percent) where the release begins, if any
    pub fn release_point(&self) -> Option<f64> {
        self.release
            .then(|| self.origin_duration + self.middle_duration)
    }
}
