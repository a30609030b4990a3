//! Parser settings
//!
//! Everything here has a sensible default; a YAML document only needs the
//! keys it wants to change.

use serde::{Deserialize, Serialize};

use crate::diagrams::StringOrder;
use crate::error::{TabError, TabResult};
use crate::models::NoteValue;

/// Instrument icons of fretted, standard-tuned string instruments
pub const FRETTED_ICONS: [u32; 9] = [1, 2, 4, 5, 22, 23, 24, 25, 26];

/// Settings for GPIF import
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserSettings {
    /// Track icons accepted as tablature parts; any other icon rejects the document
    pub allowed_icons: Vec<u32>,

    /// How many open hammer-on/pull-off spans a destination note may search back through
    pub hopo_lookback: usize,

    /// Nominal value written on grace notes
    pub grace_value: NoteValue,

    /// Field order of chord-shape position strings
    pub string_order: StringOrder,
}

impl Default for ParserSettings {
    fn default() -> Self {
        Self {
            allowed_icons: FRETTED_ICONS.to_vec(),
            hopo_lookback: 3,
            grace_value: NoteValue::Eighth,
            string_order: StringOrder::LowToHigh,
        }
    }
}

impl ParserSettings {
    /// Decode settings from YAML, filling missing keys with defaults
    pub fn from_yaml(yaml: &str) -> TabResult<Self> {
        let settings: ParserSettings =
            serde_yaml::from_str(yaml).map_err(|e| TabError::Settings(e.to_string()))?;
        if settings.hopo_lookback == 0 {
            return Err(TabError::Settings("hopo_lookback must be at least 1".to_string()));
        }
        Ok(settings)
    }

    pub fn allows_icon(&self, icon: u32) -> bool {
        self.allowed_icons.contains(&icon)
    }
}
