use std::fmt;

use log::{debug, warn};

use crate::errors::ConversionError;
use crate::timecode::Timestamp;
use crate::transcript::{Annotation, NoiseEvent, SpeakerTable, Transcript, Turn};

// @module: WebVTT cue segmentation and rendering

/// First line of every WebVTT file
pub const WEBVTT_MARKER: &str = "WEBVTT";

// @struct: Conversion switches
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConversionOptions {
    // @field: Language tag for the header, empty for none
    pub language: String,

    // @field: Prefix cue text with a `<v NAME>` voice span
    pub add_speakers: bool,

    // @field: Keep non-speech events as inline markup
    pub preserve_noise: bool,
}

// @struct: Single WebVTT cue
#[derive(Debug, Clone, PartialEq)]
pub struct Cue {
    pub start: Timestamp,
    pub end: Timestamp,
    pub text: String,
}

impl Cue {
    /// Cue timing line
    pub fn timing(&self) -> String {
        self.start.range(&self.end)
    }
}

impl fmt::Display for Cue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.timing())?;
        write!(f, "{}", self.text)
    }
}

/// Line-oriented WebVTT output buffer
///
/// Each cue is serialized as soon as it is pushed; nothing keeps the cue
/// itself around.
#[derive(Debug, Default)]
pub struct VttWriter {
    lines: Vec<String>,
    cue_count: usize,
}

impl VttWriter {
    /// Start a document with the `WEBVTT` marker and optional language line
    pub fn new(language: &str) -> Self {
        let mut lines = vec![WEBVTT_MARKER.to_string()];
        if !language.is_empty() {
            lines.push(format!("Language: {}", language));
        }
        lines.push(String::new());

        VttWriter {
            lines,
            cue_count: 0,
        }
    }

    /// Append a cue block followed by its blank separator line
    pub fn push_cue(&mut self, cue: Cue) {
        self.lines.push(cue.timing());
        self.lines.push(cue.text);
        self.lines.push(String::new());
        self.cue_count += 1;
    }

    pub fn cue_count(&self) -> usize {
        self.cue_count
    }

    /// Join all lines with `\n`
    pub fn finish(self) -> String {
        self.lines.join("\n")
    }
}

/// Walks turns and groups their text into cues between sync points
pub struct CueBuilder<'a> {
    speakers: &'a SpeakerTable,
    options: &'a ConversionOptions,
}

impl<'a> CueBuilder<'a> {
    pub fn new(speakers: &'a SpeakerTable, options: &'a ConversionOptions) -> Self {
        CueBuilder { speakers, options }
    }

    /// Build the cues of one turn, in document order
    pub fn turn_cues(&self, turn: &Turn) -> Result<Vec<Cue>, ConversionError> {
        let mut cues = Vec::new();
        self.emit_turn(turn, |cue| cues.push(cue))?;
        Ok(cues)
    }

    /// Walk one turn, handing each cue to `emit` as soon as it is complete
    ///
    /// Returns the number of cues emitted.
    pub fn emit_turn<F>(&self, turn: &Turn, mut emit: F) -> Result<usize, ConversionError>
    where
        F: FnMut(Cue),
    {
        let speaker = self.speakers.name_of(turn.speaker.as_deref());
        if speaker.is_empty() {
            if let Some(id) = turn.speaker.as_deref() {
                warn!("Turn at {} references unknown speaker '{}'", turn.start_time, id);
            }
        }
        let prefix = if self.options.add_speakers {
            format!("<v {}>", speaker)
        } else {
            String::new()
        };

        let mut emitted = 0;
        let mut current_start = turn.start_time;
        let mut text = String::new();

        for annotation in &turn.annotations {
            match annotation {
                Annotation::Sync { time, text: tail } => {
                    if !text.is_empty() {
                        emit(Cue {
                            start: current_start,
                            end: *time,
                            text: format!("{}{}", prefix, text.trim()),
                        });
                        emitted += 1;
                        text.clear();
                    }
                    text.push_str(tail.trim());
                    current_start = *time;
                }
                Annotation::Event { desc, text: tail } => {
                    if self.options.preserve_noise {
                        let event: NoiseEvent = desc.parse()?;
                        text.push_str(event.markup());
                    }
                    text.push_str(tail.trim());
                }
            }
        }

        if !text.is_empty() {
            emit(Cue {
                start: current_start,
                end: turn.end_time,
                text: format!("{}{}", prefix, text.trim()),
            });
            emitted += 1;
        }

        Ok(emitted)
    }
}

/// Convert a parsed transcript into WebVTT text
pub fn convert(transcript: &Transcript, options: &ConversionOptions) -> Result<String, ConversionError> {
    let builder = CueBuilder::new(&transcript.speakers, options);
    let mut writer = VttWriter::new(&options.language);

    for turn in transcript.turns() {
        let count = builder.emit_turn(turn, |cue| writer.push_cue(cue))?;
        debug!("Turn {} --> {}: {} cue(s)", turn.start_time, turn.end_time, count);
    }

    debug!("Built {} cue(s)", writer.cue_count());
    Ok(writer.finish())
}

/// Parse TRS XML and convert it to WebVTT text
pub fn convert_str(xml: &str, options: &ConversionOptions) -> Result<String, ConversionError> {
    let transcript = Transcript::parse(xml)?;
    convert(&transcript, options)
}
