/*!
 * Typed model of a Transcriber (TRS) document.
 *
 * The XML tree is read once with `roxmltree` and flattened into speakers,
 * sections, turns and annotations. Everything downstream works on these
 * types, never on raw nodes.
 */

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use log::debug;
use roxmltree::{Document, Node, ParsingOptions};

use crate::errors::ConversionError;
use crate::timecode::Timestamp;

/// Non-speech events that have a caption rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoiseEvent {
    Cough,
    Hesitation,
    Laughter,
    LipSmack,
    LoudBreath,
    Noise,
    Silence,
    UhHuh,
    Unintelligible,
}

impl NoiseEvent {
    /// Every known event, in the order of the TRS codes
    pub const ALL: [NoiseEvent; 9] = [
        NoiseEvent::Cough,
        NoiseEvent::Hesitation,
        NoiseEvent::Laughter,
        NoiseEvent::LipSmack,
        NoiseEvent::LoudBreath,
        NoiseEvent::Noise,
        NoiseEvent::Silence,
        NoiseEvent::UhHuh,
        NoiseEvent::Unintelligible,
    ];

    /// The `desc` attribute value used by Transcriber
    pub fn code(&self) -> &'static str {
        match self {
            Self::Cough => "COUGH",
            Self::Hesitation => "EE-HESITATION",
            Self::Laughter => "LAUGHTER",
            Self::LipSmack => "LIP_SMACK",
            Self::LoudBreath => "LOUD_BREATH",
            Self::Noise => "NOISE",
            Self::Silence => "SILENCE",
            Self::UhHuh => "UH-HUH",
            Self::Unintelligible => "UNINTELLIGIBLE",
        }
    }

    /// Inline caption markup, padded with spaces so it can sit between words
    pub fn markup(&self) -> &'static str {
        match self {
            Self::Cough => " <i>(coughs)</i> ",
            Self::Hesitation => " <i>(hesitates)</i> ",
            Self::Laughter => " <i>(laughs)</i> ",
            Self::LipSmack => " <i>(smacks lips)</i> ",
            Self::LoudBreath => " <i>(breaths loudly)</i> ",
            Self::Noise => " <i>(noise)</i> ",
            Self::Silence => " <i>(silence)</i> ",
            Self::UhHuh => " <i>(uh-huh)</i> ",
            Self::Unintelligible => " <i>(unintelligible)</i> ",
        }
    }
}

impl fmt::Display for NoiseEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for NoiseEvent {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|event| event.code() == s)
            .ok_or_else(|| ConversionError::UnknownEventCode(s.to_string()))
    }
}

/// Speaker id to display name
#[derive(Debug, Clone, Default)]
pub struct SpeakerTable {
    names: HashMap<String, String>,
}

impl SpeakerTable {
    /// Build a table from `(id, name)` pairs; a repeated id keeps the last name
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        SpeakerTable {
            names: pairs
                .into_iter()
                .map(|(id, name)| (id.into(), name.into()))
                .collect(),
        }
    }

    /// Display name for a speaker id, empty when the id is unset or unknown
    pub fn name_of(&self, id: Option<&str>) -> &str {
        id.and_then(|id| self.names.get(id))
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// An inline marker inside a turn, with the text that follows it
#[derive(Debug, Clone, PartialEq)]
pub enum Annotation {
    /// Synchronization point
    Sync { time: Timestamp, text: String },
    /// Non-speech event; `desc` is kept verbatim and only resolved when noise is kept
    Event { desc: String, text: String },
}

impl Annotation {
    /// Text trailing the marker
    pub fn text(&self) -> &str {
        match self {
            Self::Sync { text, .. } | Self::Event { text, .. } => text,
        }
    }
}

/// A span of speech attributed to one speaker
#[derive(Debug, Clone, PartialEq)]
pub struct Turn {
    pub speaker: Option<String>,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    pub annotations: Vec<Annotation>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Section {
    pub turns: Vec<Turn>,
}

/// A parsed TRS document
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    pub speakers: SpeakerTable,
    pub sections: Vec<Section>,
}

impl Transcript {
    /// Parse a TRS document from its XML text
    pub fn parse(xml: &str) -> Result<Self, ConversionError> {
        // TRS files reference trans-14.dtd in their doctype
        let options = ParsingOptions {
            allow_dtd: true,
            ..ParsingOptions::default()
        };
        let document = Document::parse_with_options(xml, options)
            .map_err(|e| ConversionError::Parse(e.to_string()))?;
        let root = document.root_element();

        let speakers_node = child_element(root, "Speakers")
            .ok_or(ConversionError::MissingSection("Speakers"))?;
        let speakers = read_speakers(speakers_node)?;
        debug!("Loaded {} speaker(s)", speakers.len());

        let episode = child_element(root, "Episode")
            .ok_or(ConversionError::MissingSection("Episode"))?;

        let sections = episode
            .descendants()
            .filter(|n| n.has_tag_name("Section"))
            .map(read_section)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Transcript { speakers, sections })
    }

    /// Iterate all turns across sections, in document order
    pub fn turns(&self) -> impl Iterator<Item = &Turn> {
        self.sections.iter().flat_map(|section| section.turns.iter())
    }
}

fn child_element<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|n| n.has_tag_name(name))
}

fn required_attribute<'a>(
    node: Node<'a, '_>,
    element: &'static str,
    attribute: &'static str,
) -> Result<&'a str, ConversionError> {
    node.attribute(attribute)
        .ok_or(ConversionError::MissingAttribute { element, attribute })
}

fn read_speakers(node: Node) -> Result<SpeakerTable, ConversionError> {
    let mut pairs = Vec::new();
    for speaker in node.descendants().filter(|n| n.has_tag_name("Speaker")) {
        let id = required_attribute(speaker, "Speaker", "id")?;
        let name = required_attribute(speaker, "Speaker", "name")?;
        pairs.push((id, name));
    }

    Ok(SpeakerTable::from_pairs(pairs))
}

fn read_section(node: Node) -> Result<Section, ConversionError> {
    let turns = node
        .descendants()
        .filter(|n| n.has_tag_name("Turn"))
        .map(read_turn)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Section { turns })
}

/// Text between an element and the next element, across comments and PIs
fn trailing_text(node: Node) -> String {
    node.next_siblings()
        // next_siblings() starts with the node itself
        .skip(1)
        .take_while(|n| !n.is_element())
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect()
}

fn read_turn(node: Node) -> Result<Turn, ConversionError> {
    let start_time: Timestamp = required_attribute(node, "Turn", "startTime")?.parse()?;
    let end_time: Timestamp = required_attribute(node, "Turn", "endTime")?.parse()?;

    let mut annotations = Vec::new();
    // descendants() yields the turn itself first
    for child in node.descendants().skip(1).filter(|n| n.is_element()) {
        let text = trailing_text(child);
        match child.tag_name().name() {
            "Sync" => annotations.push(Annotation::Sync {
                time: required_attribute(child, "Sync", "time")?.parse()?,
                text,
            }),
            "Event" => annotations.push(Annotation::Event {
                desc: child.attribute("desc").unwrap_or("").to_string(),
                text,
            }),
            _ => {}
        }
    }

    Ok(Turn {
        speaker: node.attribute("speaker").map(str::to_string),
        start_time,
        end_time,
        annotations,
    })
}
