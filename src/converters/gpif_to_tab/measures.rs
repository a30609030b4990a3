//! Measure/Part Builder
//!
//! One part per track, one measure per master-bar. Parts are built one
//! after another and measures strictly in document order, so a simile
//! mark can always read the voice slots of the measures before it.

use super::beats::{assemble_voice, VoiceLocation};
use super::note_builder::{HopoTracker, PartContext};
use crate::config::ParserSettings;
use crate::error::{TabError, TabResult};
use crate::gpif::{GpifIndex, Handle, Section, TrackDecl, VoiceDecl};
use crate::models::{Clef, Instrument, KeySignature, Measure, Part};

/// Voice slots of one bar after simile resolution
type Slots = Vec<Option<Handle<VoiceDecl>>>;

/// Reject the document if any track is not a fretted instrument with a tuning
pub fn check_tracks(index: &GpifIndex, settings: &ParserSettings) -> TabResult<()> {
    for track in &index.tracks {
        if !settings.allows_icon(track.icon) {
            return Err(TabError::UnsupportedTrack {
                track: track.name.clone(),
                icon: track.icon,
            });
        }
        if track.tuning.is_empty() {
            return Err(TabError::MissingElement(format!("Tuning of track '{}'", track.name)));
        }
    }
    Ok(())
}

/// Build every part of the document
pub fn build_parts(
    index: &GpifIndex,
    settings: &ParserSettings,
    hopos: &mut HopoTracker,
) -> TabResult<Vec<Part>> {
    check_tracks(index, settings)?;
    index
        .tracks
        .iter()
        .enumerate()
        .map(|(part_index, track)| build_part(index, settings, part_index, track, hopos))
        .collect()
}

fn build_part(
    index: &GpifIndex,
    settings: &ParserSettings,
    part_index: usize,
    track: &TrackDecl,
    hopos: &mut HopoTracker,
) -> TabResult<Part> {
    let context = PartContext {
        index: part_index,
        string_count: track.tuning.len(),
        let_ring_throughout: track.let_ring_throughout,
    };
    let first_number = if index.info.anacrusis { 0 } else { 1 };

    let mut measures = Vec::with_capacity(index.master_bars.len());
    let mut resolved_slots: Vec<Slots> = Vec::with_capacity(index.master_bars.len());
    let mut previous_key = KeySignature::default();

    for (position, (master_handle, master)) in index.master_bars.iter().enumerate() {
        let bar_handle = master.bars.get(part_index).copied().ok_or_else(|| {
            TabError::missing(
                Section::Bars,
                format!("part {} of master-bar {}", part_index, index.master_bars.id_of(master_handle)),
            )
        })?;
        let bar = index.bars.get(bar_handle);

        let slots = match bar.simile {
            None => bar.voices.clone(),
            Some(mark) => {
                let lookback = mark.lookback();
                let source = position.checked_sub(lookback).ok_or(TabError::MalformedSimile {
                    measure: position,
                    lookback,
                })?;
                log::debug!("Measure {} repeats measure {}", position, source);
                resolved_slots[source].clone()
            }
        };

        let key_signature = (master.key != previous_key).then_some(master.key);
        previous_key = master.key;

        let mut measure = Measure {
            number: first_number + position,
            bar_id: index.bars.id_of(bar_handle).to_string(),
            time_signature: master.time,
            key_signature,
            clef: (position == 0).then_some(Clef::Tab),
            voices: Vec::new(),
        };

        for (slot, voice_handle) in slots.iter().enumerate() {
            if let Some(voice_handle) = *voice_handle {
                let location = VoiceLocation {
                    measure: position,
                    position: measure.voices.len(),
                    slot: (slot + 1) as u8,
                };
                let voice = assemble_voice(index, settings, &context, location, voice_handle, hopos)?;
                measure.voices.push(voice);
            }
        }

        resolved_slots.push(slots);
        measures.push(measure);
    }

    log::info!(
        "Built part '{}': {} measures, {} strings",
        track.name,
        measures.len(),
        context.string_count
    );

    Ok(Part {
        name: track.name.clone(),
        abbreviation: track.short_name.clone(),
        icon: track.icon,
        instrument: Instrument {
            name: track.instrument_name.clone(),
            kind: track.instrument_type.clone(),
        },
        tuning: track.tuning.clone(),
        let_ring_throughout: track.let_ring_throughout,
        measures,
        hopos: Vec::new(),
        slides: Vec::new(),
    })
}
