//! Chord-diagram library
//!
//! A flat id → diagram table built from the `DiagramCollection` of a GPIF
//! document. Beats reference diagrams by id; the id, not the shape, is the
//! authoritative chord label.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::gpif::{DiagramDecl, GpifIndex};
use crate::models::Pitch;

/// String count assumed when neither the diagram nor the instrument says
pub const DEFAULT_STRING_COUNT: usize = 6;

/// Field order of a position string such as `x.3.2.0.1.0`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StringOrder {
    /// Lowest string first
    #[default]
    LowToHigh,
    /// Highest string first
    HighToLow,
}

/// Finger number for a GPIF finger name.
///
/// Thumb is 0, index to pinky 1..=4, `Unspecified` (or anything unknown)
/// is -1. `None` means the string carries no finger at all.
pub fn finger_number(name: &str) -> Option<i8> {
    match name.trim() {
        "Thumb" => Some(0),
        "Index" => Some(1),
        "Middle" => Some(2),
        "Ring" => Some(3),
        "Pinky" => Some(4),
        "None" => None,
        _ => Some(-1),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChordDiagram {
    pub id: String,
    pub name: String,
    pub base_fret: u8,
    /// Absolute fret per string, index 0 = lowest; `None` = not played
    pub frets: Vec<Option<u8>>,
    /// Finger per string, same indexing as `frets`
    pub fingers: Vec<Option<i8>>,
}

impl ChordDiagram {
    fn from_decl(id: &str, decl: &DiagramDecl, default_strings: usize) -> Self {
        let highest_declared = decl
            .frets
            .iter()
            .map(|f| usize::from(f.string) + 1)
            .max()
            .unwrap_or(0);
        let string_count = decl
            .string_count
            .map(usize::from)
            .unwrap_or(default_strings)
            .max(highest_declared);

        let mut frets = vec![None; string_count];
        for f in &decl.frets {
            let fret = if f.fret == 0 { 0 } else { f.fret.saturating_add(decl.base_fret) };
            frets[usize::from(f.string)] = Some(fret);
        }

        let mut fingers = vec![None; string_count];
        for (string, name) in &decl.fingering {
            if let Some(slot) = fingers.get_mut(usize::from(*string)) {
                *slot = finger_number(name);
            }
        }

        ChordDiagram {
            id: id.to_string(),
            name: decl.name.clone(),
            base_fret: decl.base_fret,
            frets,
            fingers,
        }
    }

    pub fn string_count(&self) -> usize {
        self.frets.len()
    }

    /// Whether any string is fretted or played open
    pub fn has_frets(&self) -> bool {
        self.frets.iter().any(Option::is_some)
    }

    /// One field per string joined with `.`, `x` for unplayed strings
    pub fn position_string(&self, order: StringOrder) -> String {
        let fields = self
            .frets
            .iter()
            .map(|f| f.map_or_else(|| "x".to_string(), |fret| fret.to_string()));
        let fields: Vec<String> = match order {
            StringOrder::LowToHigh => fields.collect(),
            StringOrder::HighToLow => fields.rev().collect(),
        };
        fields.join(".")
    }

    /// Sounding pitch of every played string, low to high
    pub fn pitches(&self, tuning: &[Pitch]) -> Vec<Pitch> {
        self.frets
            .iter()
            .zip(tuning)
            .filter_map(|(fret, open)| fret.map(|f| Pitch::new(open.midi.saturating_add(f))))
            .collect()
    }
}

/// Every chord diagram of one document, by id
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChordLibrary {
    pub diagrams: BTreeMap<String, ChordDiagram>,
}

impl ChordLibrary {
    pub fn from_index(index: &GpifIndex) -> Self {
        let default_strings = index
            .tracks
            .first()
            .map(|t| t.tuning.len())
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_STRING_COUNT);

        let diagrams = index
            .diagrams
            .iter()
            .map(|(handle, decl)| {
                let id = index.diagrams.id_of(handle);
                (id.to_string(), ChordDiagram::from_decl(id, decl, default_strings))
            })
            .collect::<BTreeMap<_, _>>();

        log::debug!("Chord library: {} diagrams", diagrams.len());
        ChordLibrary { diagrams }
    }

    pub fn get(&self, id: &str) -> Option<&ChordDiagram> {
        self.diagrams.get(id)
    }

    pub fn name(&self, id: &str) -> Option<&str> {
        self.get(id).map(|d| d.name.as_str())
    }

    /// id → name for every diagram
    pub fn names(&self) -> BTreeMap<String, String> {
        self.diagrams
            .iter()
            .map(|(id, d)| (id.clone(), d.name.clone()))
            .collect()
    }

    /// id → (name, position string); diagrams without frets are skipped
    pub fn shapes(&self, order: StringOrder) -> BTreeMap<String, (String, String)> {
        self.diagrams
            .iter()
            .filter(|(_, d)| d.has_frets())
            .map(|(id, d)| (id.clone(), (d.name.clone(), d.position_string(order))))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.diagrams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagrams.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gpif::DiagramFretDecl;

    fn c_major() -> DiagramDecl {
        // x32010, strings numbered from the lowest
        DiagramDecl {
            name: "C".to_string(),
            string_count: Some(6),
            base_fret: 0,
            frets: [(1, 3), (2, 2), (3, 0), (4, 1), (5, 0)]
                .iter()
                .map(|&(string, fret)| DiagramFretDecl { string, fret })
                .collect(),
            fingering: vec![
                (1, "Ring".to_string()),
                (2, "Middle".to_string()),
                (3, "None".to_string()),
                (4, "Index".to_string()),
                (5, "Unspecified".to_string()),
            ],
        }
    }

    #[test]
    fn test_position_string_both_orders() {
        let diagram = ChordDiagram::from_decl("3", &c_major(), 6);
        assert_eq!(diagram.position_string(StringOrder::LowToHigh), "x.3.2.0.1.0");
        assert_eq!(diagram.position_string(StringOrder::HighToLow), "0.1.0.2.3.x");
    }

    #[test]
    fn test_fingers() {
        let diagram = ChordDiagram::from_decl("3", &c_major(), 6);
        assert_eq!(diagram.fingers, vec![None, Some(3), Some(2), None, Some(1), Some(-1)]);
        assert_eq!(finger_number("Thumb"), Some(0));
        assert_eq!(finger_number("Pinky"), Some(4));
    }

    #[test]
    fn test_base_fret_skips_open_strings() {
        let decl = DiagramDecl {
            name: "A/5".to_string(),
            string_count: Some(6),
            base_fret: 4,
            frets: vec![
                DiagramFretDecl { string: 0, fret: 1 },
                DiagramFretDecl { string: 1, fret: 0 },
            ],
            fingering: Vec::new(),
        };
        let diagram = ChordDiagram::from_decl("1", &decl, 6);
        assert_eq!(diagram.frets[0], Some(5));
        assert_eq!(diagram.frets[1], Some(0));
    }

    #[test]
    fn test_pitches_follow_tuning() {
        let tuning: Vec<Pitch> = [40, 45, 50, 55, 59, 64].iter().map(|&m| Pitch::new(m)).collect();
        let diagram = ChordDiagram::from_decl("3", &c_major(), 6);
        let midi: Vec<u8> = diagram.pitches(&tuning).iter().map(|p| p.midi).collect();
        assert_eq!(midi, vec![48, 52, 55, 60, 64]);
    }

    #[test]
    fn test_string_count_falls_back_to_instrument() {
        let mut decl = c_major();
        decl.string_count = None;
        assert_eq!(ChordDiagram::from_decl("3", &decl, 7).string_count(), 7);
    }
}
