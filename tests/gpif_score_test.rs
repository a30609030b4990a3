// Whole-document GPIF parsing: metadata, measures, voices and techniques

mod common;

use common::{song_with_icon, write_temp, SONG};
use gpif_tab::{
    parse_gpif, parse_gpif_file, parse_gpif_with, Annotation, Event, HopoDirection, KeySignature, Mode,
    ParserSettings, Rational, TabError,
};

#[test]
fn test_song_metadata() {
    let score = parse_gpif(SONG).expect("song should parse");

    assert_eq!(score.title.as_deref(), Some("Riff Study"));
    assert_eq!(score.subtitle.as_deref(), Some("Exercise"));
    assert_eq!(score.artist.as_deref(), Some("Nobody"));
    assert!(!score.anacrusis);

    let tempo = score.tempo.expect("tempo automation");
    assert_eq!(tempo.bpm, 100);
    assert_eq!(tempo.referent, Rational::from_integer(1));

    let part = &score.parts[0];
    assert_eq!(part.name, "Electric Guitar");
    assert_eq!(part.abbreviation.as_deref(), Some("E.Gt"));
    assert_eq!(part.instrument.kind.as_deref(), Some("electricGuitar"));
    assert_eq!(part.tuning.iter().map(|p| p.midi).collect::<Vec<_>>(), vec![40, 45, 50, 55, 59, 64]);
}

#[test]
fn test_measures_are_numbered_and_filled() {
    let score = parse_gpif(SONG).expect("song should parse");
    let measures = &score.parts[0].measures;

    assert_eq!(measures.iter().map(|m| m.number).collect::<Vec<_>>(), vec![1, 2, 3, 4]);
    assert_eq!(measures[0].key_signature, Some(KeySignature::new(1, Mode::Major)));
    assert!(measures[1..].iter().all(|m| m.key_signature.is_none()));

    // every voice ends exactly on its measure's declared length
    for measure in measures {
        for voice in &measure.voices {
            let offsets: Vec<Rational> = voice.events.iter().map(|e| e.offset).collect();
            assert!(offsets.windows(2).all(|w| w[0] <= w[1]), "offsets must not decrease");
            assert_eq!(voice.end_offset(), measure.declared_duration());
        }
    }
}

#[test]
fn test_simile_measure_reuses_voices() {
    let score = parse_gpif(SONG).expect("song should parse");
    let measures = &score.parts[0].measures;

    let ids = |m: usize| measures[m].voices.iter().map(|v| (v.index, v.voice_id.clone())).collect::<Vec<_>>();
    assert_eq!(ids(1), vec![(1, "1".to_string()), (2, "2".to_string())]);
    assert_eq!(ids(2), ids(1));
    assert_eq!(measures[2].voices, measures[1].voices);
}

#[test]
fn test_notes_stay_on_the_fretboard() {
    let score = parse_gpif(SONG).expect("song should parse");
    let part = &score.parts[0];
    for (_, note) in part.notes(0) {
        assert!(note.string >= 1 && usize::from(note.string) <= part.string_count());
    }
}

#[test]
fn test_techniques() {
    let score = parse_gpif(SONG).expect("song should parse");
    let part = &score.parts[0];

    assert_eq!(part.hopos.len(), 1);
    assert_eq!(part.hopos[0].direction(), HopoDirection::HammerOn);
    assert_eq!((part.hopos[0].first.fret, part.hopos[0].second.fret), (5, 7));

    // measure 2 and its simile copy each slide 2 → 4
    assert_eq!(part.slides.len(), 2);
    for span in &part.slides {
        let target = part.note(&span.to).expect("slide target");
        assert_eq!(target.fret, 4);
        assert!(target.has_annotation(&Annotation::SlideIn));
    }

    let voice = &part.measures[3].voices[0];
    match &voice.events[0].event {
        Event::Grace(grace) => assert!(grace.slash),
        other => panic!("Expected grace note, got {:?}", other),
    }
    match &voice.events[1].event {
        Event::Note(note) => {
            let bend = note.bend.expect("pre-bend");
            assert!(bend.pre_bend());
            assert_eq!(bend.alteration(), 1.0);
            assert_eq!(note.sounding_pitch(), 70.0);
        }
        other => panic!("Expected bent note, got {:?}", other),
    }
    assert_eq!(voice.events[2].event.chord_label(), Some(("N.C.", "2")));
}

#[test]
fn test_unsupported_track_rejects_document() {
    match parse_gpif(&song_with_icon(11)) {
        Err(TabError::UnsupportedTrack { track, icon }) => {
            assert_eq!(track, "Electric Guitar");
            assert_eq!(icon, 11);
        }
        other => panic!("Expected UnsupportedTrack, got {:?}", other.map(|s| s.parts.len())),
    }
}

#[test]
fn test_settings_can_allow_more_icons() {
    let settings = ParserSettings::from_yaml("allowed_icons: [11, 24]").expect("settings");
    let score = parse_gpif_with(&song_with_icon(11), &settings).expect("icon 11 allowed");
    assert_eq!(score.parts[0].icon, 11);
}

#[test]
fn test_parse_from_file() {
    let file = write_temp(SONG);
    let from_file = parse_gpif_file(file.path()).expect("file should parse");
    assert_eq!(from_file, parse_gpif(SONG).expect("song should parse"));
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let result = parse_gpif_file(dir.path().join("missing.gpif"));
    assert!(matches!(result, Err(TabError::Io(_))));
}

#[test]
fn test_malformed_xml() {
    assert!(matches!(parse_gpif("<GPIF><Tracks>"), Err(TabError::Xml(_))));
}

#[test]
fn test_score_serializes_to_json() {
    let score = parse_gpif(SONG).expect("song should parse");
    let json = serde_json::to_string(&score).expect("serialize");
    let back: gpif_tab::Score = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back, score);
}
