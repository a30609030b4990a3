//! Shared GPIF fixtures for integration tests
#![allow(dead_code)]

use std::io::Write;

use tempfile::NamedTempFile;

/// Four measures of one guitar part:
///
/// 1. Em chord (half), hammer-on 5 → 7 on the G string
/// 2. voice 1: slide 2 → 4 on the D string, the second note labelled C;
///    voice 2: whole rest
/// 3. simile of measure 2
/// 4. 3/4: grace note, pre-bent half note, quarter rest labelled N.C.
pub const SONG: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<!DOCTYPE GPIF>
<GPIF version="7">
  <Score>
    <Title><![CDATA[Riff Study]]></Title>
    <SubTitle><![CDATA[Exercise]]></SubTitle>
    <Artist><![CDATA[Nobody]]></Artist>
  </Score>
  <MasterTrack>
    <Tracks>0</Tracks>
    <Automations>
      <Automation>
        <Type>Tempo</Type>
        <Linear>false</Linear>
        <Bar>0</Bar>
        <Position>0</Position>
        <Visible>true</Visible>
        <Value>100 2</Value>
      </Automation>
    </Automations>
  </MasterTrack>
  <Tracks>
    <Track id="0">
      <Name><![CDATA[Electric Guitar]]></Name>
      <ShortName><![CDATA[E.Gt ]]></ShortName>
      <IconId>24</IconId>
      <InstrumentSet>
        <Name>Electric Guitar</Name>
        <Type>electricGuitar</Type>
      </InstrumentSet>
      <Staves>
        <Staff>
          <Properties>
            <Property name="Tuning">
              <Pitches>40 45 50 55 59 64</Pitches>
            </Property>
            <Property name="DiagramCollection">
              <Items>
                <Item id="0" name="Em">
                  <Diagram stringCount="6" fretCount="5" baseFret="0">
                    <Fret string="0" fret="0"/>
                    <Fret string="1" fret="2"/>
                    <Fret string="2" fret="2"/>
                    <Fret string="3" fret="0"/>
                    <Fret string="4" fret="0"/>
                    <Fret string="5" fret="0"/>
                    <Fingering>
                      <Position finger="Middle" fret="2" string="1"/>
                      <Position finger="Ring" fret="2" string="2"/>
                    </Fingering>
                  </Diagram>
                </Item>
                <Item id="1" name="C">
                  <Diagram stringCount="6" fretCount="5" baseFret="0">
                    <Fret string="1" fret="3"/>
                    <Fret string="2" fret="2"/>
                    <Fret string="3" fret="0"/>
                    <Fret string="4" fret="1"/>
                    <Fret string="5" fret="0"/>
                  </Diagram>
                </Item>
                <Item id="2" name="N.C.">
                  <Diagram stringCount="6" fretCount="5" baseFret="0"/>
                </Item>
              </Items>
            </Property>
          </Properties>
        </Staff>
      </Staves>
    </Track>
  </Tracks>
  <MasterBars>
    <MasterBar>
      <Key><AccidentalCount>1</AccidentalCount><Mode>Major</Mode></Key>
      <Time>4/4</Time>
      <Bars>0</Bars>
    </MasterBar>
    <MasterBar>
      <Key><AccidentalCount>1</AccidentalCount><Mode>Major</Mode></Key>
      <Time>4/4</Time>
      <Bars>1</Bars>
    </MasterBar>
    <MasterBar>
      <Key><AccidentalCount>1</AccidentalCount><Mode>Major</Mode></Key>
      <Time>4/4</Time>
      <Bars>2</Bars>
    </MasterBar>
    <MasterBar>
      <Key><AccidentalCount>1</AccidentalCount><Mode>Major</Mode></Key>
      <Time>3/4</Time>
      <Bars>3</Bars>
    </MasterBar>
  </MasterBars>
  <Bars>
    <Bar id="0"><Clef>G2</Clef><Voices>0 -1 -1 -1</Voices></Bar>
    <Bar id="1"><Clef>G2</Clef><Voices>1 2 -1 -1</Voices></Bar>
    <Bar id="2"><Clef>G2</Clef><Voices>-1 -1 -1 -1</Voices><SimileMark>Simple</SimileMark></Bar>
    <Bar id="3"><Clef>G2</Clef><Voices>3 -1 -1 -1</Voices></Bar>
  </Bars>
  <Voices>
    <Voice id="0"><Beats>0 1 2</Beats></Voice>
    <Voice id="1"><Beats>3 4</Beats></Voice>
    <Voice id="2"><Beats>5</Beats></Voice>
    <Voice id="3"><Beats>6 7 8</Beats></Voice>
  </Voices>
  <Beats>
    <Beat id="0"><Chord>0</Chord><Rhythm ref="1"/><Notes>0 1 2</Notes></Beat>
    <Beat id="1"><Rhythm ref="0"/><Notes>3</Notes></Beat>
    <Beat id="2"><Rhythm ref="0"/><Notes>4</Notes></Beat>
    <Beat id="3"><Rhythm ref="1"/><Notes>5</Notes></Beat>
    <Beat id="4"><Chord>1</Chord><Rhythm ref="1"/><Notes>6</Notes></Beat>
    <Beat id="5"><Rhythm ref="2"/></Beat>
    <Beat id="6"><GraceNotes>BeforeBeat</GraceNotes><Rhythm ref="3"/><Notes>7</Notes></Beat>
    <Beat id="7"><Rhythm ref="1"/><Notes>8</Notes></Beat>
    <Beat id="8"><Chord>2</Chord><Rhythm ref="0"/></Beat>
  </Beats>
  <Notes>
    <Note id="0"><Properties>
      <Property name="Midi"><Number>40</Number></Property>
      <Property name="String"><String>0</String></Property>
      <Property name="Fret"><Fret>0</Fret></Property>
    </Properties></Note>
    <Note id="1"><Properties>
      <Property name="Midi"><Number>47</Number></Property>
      <Property name="String"><String>1</String></Property>
      <Property name="Fret"><Fret>2</Fret></Property>
    </Properties></Note>
    <Note id="2"><Properties>
      <Property name="Midi"><Number>52</Number></Property>
      <Property name="String"><String>2</String></Property>
      <Property name="Fret"><Fret>2</Fret></Property>
    </Properties></Note>
    <Note id="3"><Properties>
      <Property name="Midi"><Number>60</Number></Property>
      <Property name="String"><String>3</String></Property>
      <Property name="Fret"><Fret>5</Fret></Property>
      <Property name="HopoOrigin"><Enable/></Property>
    </Properties></Note>
    <Note id="4"><Properties>
      <Property name="Midi"><Number>62</Number></Property>
      <Property name="String"><String>3</String></Property>
      <Property name="Fret"><Fret>7</Fret></Property>
      <Property name="HopoDestination"><Enable/></Property>
    </Properties></Note>
    <Note id="5"><Properties>
      <Property name="Midi"><Number>52</Number></Property>
      <Property name="String"><String>2</String></Property>
      <Property name="Fret"><Fret>2</Fret></Property>
      <Property name="Slide"><Flags>2</Flags></Property>
    </Properties></Note>
    <Note id="6"><Properties>
      <Property name="Midi"><Number>54</Number></Property>
      <Property name="String"><String>2</String></Property>
      <Property name="Fret"><Fret>4</Fret></Property>
    </Properties></Note>
    <Note id="7"><Properties>
      <Property name="Midi"><Number>67</Number></Property>
      <Property name="String"><String>4</String></Property>
      <Property name="Fret"><Fret>8</Fret></Property>
    </Properties></Note>
    <Note id="8"><Properties>
      <Property name="Midi"><Number>69</Number></Property>
      <Property name="String"><String>4</String></Property>
      <Property name="Fret"><Fret>10</Fret></Property>
      <Property name="Bended"><Enable/></Property>
      <Property name="BendOriginValue"><Float>50</Float></Property>
      <Property name="BendMiddleValue"><Float>50</Float></Property>
      <Property name="BendDestinationValue"><Float>50</Float></Property>
    </Properties></Note>
  </Notes>
  <Rhythms>
    <Rhythm id="0"><NoteValue>Quarter</NoteValue></Rhythm>
    <Rhythm id="1"><NoteValue>Half</NoteValue></Rhythm>
    <Rhythm id="2"><NoteValue>Whole</NoteValue></Rhythm>
    <Rhythm id="3"><NoteValue>Eighth</NoteValue></Rhythm>
  </Rhythms>
</GPIF>
"#;

/// The song with its guitar swapped for another instrument icon
pub fn song_with_icon(icon: u32) -> String {
    SONG.replace("<IconId>24</IconId>", &format!("<IconId>{}</IconId>", icon))
}

/// Write a document to a temporary `.gpif` file
pub fn write_temp(xml: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".gpif")
        .tempfile()
        .expect("create temp file");
    file.write_all(xml.as_bytes()).expect("write temp file");
    file
}
