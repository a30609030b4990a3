//! Document Index: one pass over the GPIF DOM into per-section arenas
//!
//! Sections are loaded leaves first (rhythms, notes, beats, voices, bars,
//! master-bars) so every cross-reference can be resolved into a handle as
//! soon as its element is read. A dangling id is a `MissingReference`;
//! apart from that the index trusts the document. The one exception is a
//! beat's rhythm reference: a missing rhythm degrades to a zero-length
//! beat instead of failing.

use roxmltree::Node;

use super::arena::{Arena, Section};
use super::decls::*;
use super::xml::*;
use crate::error::{TabError, TabResult};
use crate::models::{BendPoints, KeySignature, Mode, NoteValue, Pitch, TimeSignature};

/// All sections of one GPIF document, immutable once built
#[derive(Debug)]
pub struct GpifIndex {
    pub info: ScoreInfo,
    pub rhythms: Arena<RhythmDecl>,
    pub notes: Arena<NoteDecl>,
    pub beats: Arena<BeatDecl>,
    pub voices: Arena<VoiceDecl>,
    pub bars: Arena<BarDecl>,
    /// Keyed by position ("0", "1", ...); master-bars carry no ids
    pub master_bars: Arena<MasterBarDecl>,
    /// In document order
    pub tracks: Vec<TrackDecl>,
    pub diagrams: Arena<DiagramDecl>,
}

impl GpifIndex {
    /// Parse GPIF XML text and index every section
    pub fn parse(xml: &str) -> TabResult<Self> {
        let source = clean_source(xml);
        let doc = parse_document(&source)?;
        let root = doc.root_element();

        if root.tag_name().name() != "GPIF" {
            return Err(TabError::MissingElement(format!(
                "GPIF root (found <{}>)",
                root.tag_name().name()
            )));
        }

        let rhythms = read_rhythms(root)?;
        let notes = read_notes(root)?;
        let beats = read_beats(root, &notes, &rhythms)?;
        let voices = read_voices(root, &beats)?;
        let bars = read_bars(root, &voices)?;
        let master_bars = read_master_bars(root, &bars)?;
        let tracks = read_tracks(root)?;
        let diagrams = read_diagrams(root)?;
        let info = read_score_info(root)?;

        log::debug!(
            "Indexed GPIF: {} tracks, {} master-bars, {} bars, {} voices, {} beats, {} notes, {} rhythms, {} diagrams",
            tracks.len(),
            master_bars.len(),
            bars.len(),
            voices.len(),
            beats.len(),
            notes.len(),
            rhythms.len(),
            diagrams.len(),
        );

        Ok(GpifIndex {
            info,
            rhythms,
            notes,
            beats,
            voices,
            bars,
            master_bars,
            tracks,
            diagrams,
        })
    }
}

/// Element children of a top-level section, e.g. `<Notes><Note/>...</Notes>`
fn section_items<'a, 'input>(
    root: Node<'a, 'input>,
    section: &str,
    item: &'static str,
) -> Vec<Node<'a, 'input>> {
    child(root, section)
        .map(|s| children(s, item).collect())
        .unwrap_or_default()
}

fn declared_id<'a>(node: Node<'a, '_>, section: Section) -> TabResult<&'a str> {
    node.attribute("id")
        .map(str::trim)
        .ok_or_else(|| TabError::MissingElement(format!("id attribute on {} entry", section)))
}

fn read_rhythms(root: Node) -> TabResult<Arena<RhythmDecl>> {
    let mut arena = Arena::new(Section::Rhythms);
    for node in section_items(root, "Rhythms", "Rhythm") {
        let id = declared_id(node, Section::Rhythms)?;
        let value_text = child_text(node, "NoteValue")
            .ok_or_else(|| TabError::MissingElement(format!("NoteValue of rhythm '{}'", id)))?;
        let note_value = NoteValue::from_gpif(value_text)
            .ok_or_else(|| TabError::invalid("NoteValue", value_text, "Unknown note value"))?;
        let dots = match child(node, "AugmentationDot").and_then(|d| d.attribute("count")) {
            Some(count) => parse_number("AugmentationDot", count)?,
            None => 0,
        };
        let tuplet = match child(node, "PrimaryTuplet") {
            Some(t) => {
                let num: u32 = parse_number("PrimaryTuplet", t.attribute("num").unwrap_or("1"))?;
                let den: u32 = parse_number("PrimaryTuplet", t.attribute("den").unwrap_or("1"))?;
                if num == 0 || den == 0 {
                    return Err(TabError::invalid("PrimaryTuplet", &format!("{}:{}", num, den), "Zero tuplet term"));
                }
                Some((num, den))
            }
            None => None,
        };
        arena.insert(id, RhythmDecl { note_value, dots, tuplet });
    }
    Ok(arena)
}

fn optional_number<T: std::str::FromStr>(element: &str, value: Option<&str>) -> TabResult<Option<T>> {
    value.map(|v| parse_number(element, v)).transpose()
}

fn read_bend(props: Node) -> TabResult<Option<BendPoints>> {
    let float = |name: &str| optional_number::<f64>(name, property_text(props, name, "Float"));
    let destination_value = match float("BendDestinationValue")? {
        Some(value) => value,
        None => return Ok(None),
    };
    let origin_value = float("BendOriginValue")?.unwrap_or(0.0);
    Ok(Some(BendPoints {
        origin_value,
        middle_value: float("BendMiddleValue")?.unwrap_or(origin_value),
        destination_value,
        origin_offset: float("BendOriginOffset")?.unwrap_or(0.0),
        middle_offset1: float("BendMiddleOffset1")?.unwrap_or(50.0),
        middle_offset2: float("BendMiddleOffset2")?.unwrap_or(50.0),
        destination_offset: float("BendDestinationOffset")?.unwrap_or(100.0),
    }))
}

fn read_note(node: Node) -> TabResult<NoteDecl> {
    let mut decl = NoteDecl::default();

    for tie in children(node, "Tie") {
        decl.tie_origin |= attribute_true(tie, "origin");
        decl.tie_destination |= attribute_true(tie, "destination");
    }
    decl.let_ring = child(node, "LetRing").is_some();
    decl.wide_vibrato = child(node, "Vibrato").is_some();

    if let Some(props) = child(node, "Properties") {
        decl.midi = optional_number("Midi", property_text(props, "Midi", "Number"))?;
        decl.string = optional_number("String", property_text(props, "String", "String"))?;
        decl.fret = optional_number("Fret", property_text(props, "Fret", "Fret"))?;
        decl.muted = property_enabled(props, "Muted");
        decl.bended = property_enabled(props, "Bended");
        decl.slide_flags = optional_number("Slide", property_text(props, "Slide", "Flags"))?;
        decl.hopo_origin = property(props, "HopoOrigin").is_some();
        decl.hopo_destination = property(props, "HopoDestination").is_some();
        decl.bend = read_bend(props)?;
    }

    Ok(decl)
}

fn read_notes(root: Node) -> TabResult<Arena<NoteDecl>> {
    let mut arena = Arena::new(Section::Notes);
    for node in section_items(root, "Notes", "Note") {
        let id = declared_id(node, Section::Notes)?;
        arena.insert(id, read_note(node)?);
    }
    Ok(arena)
}

fn read_beats(
    root: Node,
    notes: &Arena<NoteDecl>,
    rhythms: &Arena<RhythmDecl>,
) -> TabResult<Arena<BeatDecl>> {
    let mut arena = Arena::new(Section::Beats);
    for node in section_items(root, "Beats", "Beat") {
        let id = declared_id(node, Section::Beats)?;

        let note_handles = match child(node, "Notes") {
            Some(list) => id_list(list)
                .iter()
                .map(|note_id| notes.resolve(note_id))
                .collect::<TabResult<Vec<_>>>()?,
            None => Vec::new(),
        };

        let rhythm = child(node, "Rhythm")
            .and_then(|r| r.attribute("ref"))
            .and_then(|rhythm_id| {
                let found = rhythms.lookup(rhythm_id);
                if found.is_none() {
                    log::warn!("Beat '{}' references missing rhythm '{}'; using zero duration", id, rhythm_id);
                }
                found
            });

        let legato = child(node, "Legato").map(|l| LegatoDecl {
            origin: attribute_true(l, "origin"),
            destination: attribute_true(l, "destination"),
        });

        let tremolo_bar_vibrato = child(node, "Properties")
            .and_then(|p| property(p, "VibratoWTremBar"))
            .is_some();

        arena.insert(
            id,
            BeatDecl {
                notes: note_handles,
                rhythm,
                chord: child_text(node, "Chord").map(str::to_string),
                grace: child_text(node, "GraceNotes").map(str::to_string),
                free_text: child_text(node, "FreeText").map(str::to_string),
                legato,
                tremolo_bar_vibrato,
                whammy: child(node, "Whammy").is_some(),
            },
        );
    }
    Ok(arena)
}

fn read_voices(root: Node, beats: &Arena<BeatDecl>) -> TabResult<Arena<VoiceDecl>> {
    let mut arena = Arena::new(Section::Voices);
    for node in section_items(root, "Voices", "Voice") {
        let id = declared_id(node, Section::Voices)?;
        let beat_handles = match child(node, "Beats") {
            Some(list) => id_list(list)
                .iter()
                .map(|beat_id| beats.resolve(beat_id))
                .collect::<TabResult<Vec<_>>>()?,
            None => Vec::new(),
        };
        arena.insert(id, VoiceDecl { beats: beat_handles });
    }
    Ok(arena)
}

fn read_bars(root: Node, voices: &Arena<VoiceDecl>) -> TabResult<Arena<BarDecl>> {
    let mut arena = Arena::new(Section::Bars);
    for node in section_items(root, "Bars", "Bar") {
        let id = declared_id(node, Section::Bars)?;
        let slots = match child(node, "Voices") {
            Some(list) => id_list(list)
                .iter()
                .map(|voice_id| match voice_id.as_str() {
                    "-1" => Ok(None),
                    other => voices.resolve(other).map(Some),
                })
                .collect::<TabResult<Vec<_>>>()?,
            None => Vec::new(),
        };
        arena.insert(
            id,
            BarDecl {
                voices: slots,
                simile: child_text(node, "SimileMark").map(SimileMark::from_gpif),
            },
        );
    }
    Ok(arena)
}

fn read_key(node: Node) -> TabResult<KeySignature> {
    let key = match child(node, "Key") {
        Some(key) => key,
        None => return Ok(KeySignature::default()),
    };
    let accidental_count = optional_number("AccidentalCount", child_text(key, "AccidentalCount"))?.unwrap_or(0);
    let mode = match child_text(key, "Mode").map(str::to_ascii_lowercase).as_deref() {
        Some("minor") => Mode::Minor,
        _ => Mode::Major,
    };
    Ok(KeySignature::new(accidental_count, mode))
}

fn read_master_bars(root: Node, bars: &Arena<BarDecl>) -> TabResult<Arena<MasterBarDecl>> {
    let mut arena = Arena::new(Section::MasterBars);
    for (position, node) in section_items(root, "MasterBars", "MasterBar").into_iter().enumerate() {
        let time_text = child_text(node, "Time")
            .ok_or_else(|| TabError::MissingElement(format!("Time of master-bar {}", position)))?;
        let bar_handles = match child(node, "Bars") {
            Some(list) => id_list(list)
                .iter()
                .map(|bar_id| bars.resolve(bar_id))
                .collect::<TabResult<Vec<_>>>()?,
            None => Vec::new(),
        };
        arena.insert(
            position.to_string(),
            MasterBarDecl {
                time: TimeSignature::parse(time_text)?,
                key: read_key(node)?,
                bars: bar_handles,
            },
        );
    }
    Ok(arena)
}

fn read_tuning(track: Node) -> TabResult<Vec<Pitch>> {
    let pitches = track
        .descendants()
        .filter(|n| n.is_element() && n.tag_name().name() == "Property" && n.attribute("name") == Some("Tuning"))
        .find_map(|p| child_text(p, "Pitches"));
    match pitches {
        Some(text) => text
            .split_whitespace()
            .map(|p| parse_number::<u8>("Pitches", p).map(Pitch::new))
            .collect(),
        None => Ok(Vec::new()),
    }
}

fn read_tracks(root: Node) -> TabResult<Vec<TrackDecl>> {
    let mut tracks = Vec::new();
    for node in section_items(root, "Tracks", "Track") {
        let id = declared_id(node, Section::Tracks)?.to_string();
        let icon_text = child_text(node, "IconId")
            .ok_or_else(|| TabError::MissingElement(format!("IconId of track '{}'", id)))?;
        let short_name = child_text(node, "ShortName")
            .map(|s| s.chars().filter(|c| *c != ' ' && *c != '\n').collect::<String>())
            .filter(|s| !s.is_empty());
        tracks.push(TrackDecl {
            name: child_text(node, "Name")
                .ok_or_else(|| TabError::MissingElement(format!("Name of track '{}'", id)))?
                .to_string(),
            short_name,
            icon: parse_number("IconId", icon_text)?,
            instrument_name: path_text(node, "InstrumentSet/Name").map(str::to_string),
            instrument_type: path_text(node, "InstrumentSet/Type").map(str::to_string),
            tuning: read_tuning(node)?,
            let_ring_throughout: child(node, "LetRingThroughout").is_some(),
            id,
        });
    }
    Ok(tracks)
}

fn read_diagram(item: Node) -> TabResult<Option<DiagramDecl>> {
    let diagram = match child(item, "Diagram") {
        Some(d) => d,
        None => return Ok(None),
    };
    let base_fret = optional_number("baseFret", diagram.attribute("baseFret"))?.unwrap_or(0);
    let string_count = optional_number("stringCount", diagram.attribute("stringCount"))?;

    let mut frets = Vec::new();
    for fret in children(diagram, "Fret") {
        frets.push(DiagramFretDecl {
            string: parse_number("Fret@string", fret.attribute("string").unwrap_or(""))?,
            fret: parse_number("Fret@fret", fret.attribute("fret").unwrap_or(""))?,
        });
    }

    let mut fingering = Vec::new();
    if let Some(positions) = child(diagram, "Fingering") {
        for position in children(positions, "Position") {
            let string = parse_number("Position@string", position.attribute("string").unwrap_or(""))?;
            let finger = position.attribute("finger").unwrap_or("Unspecified").to_string();
            fingering.push((string, finger));
        }
    }

    Ok(Some(DiagramDecl {
        name: item.attribute("name").unwrap_or("").to_string(),
        string_count,
        base_fret,
        frets,
        fingering,
    }))
}

fn read_diagrams(root: Node) -> TabResult<Arena<DiagramDecl>> {
    let mut arena = Arena::new(Section::Diagrams);
    let tracks = match child(root, "Tracks") {
        Some(t) => t,
        None => return Ok(arena),
    };
    let collections = tracks.descendants().filter(|n| {
        n.is_element() && n.tag_name().name() == "Property" && n.attribute("name") == Some("DiagramCollection")
    });
    for collection in collections {
        let items = match child(collection, "Items") {
            Some(items) => items,
            None => continue,
        };
        for item in children(items, "Item") {
            let id = declared_id(item, Section::Diagrams)?;
            // first collection wins when several staves declare the same id
            if arena.lookup(id).is_some() {
                continue;
            }
            if let Some(diagram) = read_diagram(item)? {
                arena.insert(id, diagram);
            }
        }
    }
    Ok(arena)
}

fn read_score_info(root: Node) -> TabResult<ScoreInfo> {
    let score = child(root, "Score");
    let field = |tag: &str| score.and_then(|s| child_text(s, tag)).map(str::to_string);

    let master_track = child(root, "MasterTrack");
    let anacrusis = master_track.and_then(|m| child(m, "Anacrusis")).is_some();

    let mut tempo = None;
    if let Some(automations) = master_track.and_then(|m| child(m, "Automations")) {
        for automation in children(automations, "Automation") {
            if child_text(automation, "Type") != Some("Tempo") {
                continue;
            }
            if let Some(value) = child_text(automation, "Value") {
                let mut parts = value.split_whitespace();
                let bpm: f64 = parse_number("Automation/Value", parts.next().unwrap_or(""))?;
                let referent: u32 = optional_number("Automation/Value", parts.next())?.unwrap_or(2);
                tempo = Some((bpm.round() as u32, referent));
                break;
            }
        }
    }

    Ok(ScoreInfo {
        title: field("Title"),
        subtitle: field("SubTitle"),
        artist: field("Artist"),
        anacrusis,
        tempo,
    })
}
