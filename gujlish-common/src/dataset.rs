//! Dataset model and JSON loading
//!
//! **Purpose:** Read the conversational dataset into typed records.
//!
//! The input is a JSON array of topics, each holding an ordered list of
//! speaker turns with a code-mixed (`gujlish`) and a reference (`english`)
//! utterance. Missing or `null` text fields load as empty strings and a
//! missing speaker loads as `None`; neither is an error.

use std::fs::File;
use std::io::{BufReader, ErrorKind, Read};
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, info};

use crate::{Error, Result};

/// Topic name used when a record carries no `topic` field
pub const UNKNOWN_TOPIC: &str = "Unknown Topic";

/// One topic with its ordered conversation turns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicRecord {
    /// Topic name
    #[serde(default = "unknown_topic", deserialize_with = "null_as_unknown_topic")]
    pub topic: String,

    /// Turns in conversation order
    #[serde(rename = "conversations", default, deserialize_with = "null_as_default")]
    pub turns: Vec<TurnRecord>,
}

/// One speaker turn
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRecord {
    /// Speaker label, if present
    #[serde(default)]
    pub speaker: Option<String>,

    /// Code-mixed utterance
    #[serde(rename = "gujlish", default, deserialize_with = "null_as_default")]
    pub mixed_text: String,

    /// Single-language reference gloss
    #[serde(rename = "english", default, deserialize_with = "null_as_default")]
    pub reference_text: String,
}

impl TopicRecord {
    /// Create a topic record from its parts
    pub fn new(topic: impl Into<String>, turns: Vec<TurnRecord>) -> Self {
        Self {
            topic: topic.into(),
            turns,
        }
    }
}

impl TurnRecord {
    /// Create a turn record from its parts
    pub fn new(
        speaker: Option<&str>,
        mixed_text: impl Into<String>,
        reference_text: impl Into<String>,
    ) -> Self {
        Self {
            speaker: speaker.map(str::to_string),
            mixed_text: mixed_text.into(),
            reference_text: reference_text.into(),
        }
    }
}

fn unknown_topic() -> String {
    UNKNOWN_TOPIC.to_string()
}

fn null_as_unknown_topic<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(unknown_topic))
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Load a dataset from a JSON file
///
/// # Errors
/// - [`Error::FileNotFound`] when `path` does not exist
/// - [`Error::MalformedInput`] when the file is not a JSON array of topics
/// - [`Error::Io`] for any other read failure
pub fn load_dataset<P: AsRef<Path>>(path: P) -> Result<Vec<TopicRecord>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => Error::FileNotFound(path.to_path_buf()),
        _ => Error::Io(e),
    })?;

    let topics = parse_dataset(BufReader::new(file), path)?;
    info!(
        "Loaded {} topics ({} turns) from {}",
        topics.len(),
        count_turns(&topics),
        path.display()
    );
    Ok(topics)
}

/// Parse a dataset from any reader
///
/// `origin` only labels errors.
pub fn parse_dataset<R: Read>(reader: R, origin: &Path) -> Result<Vec<TopicRecord>> {
    serde_json::from_reader(reader).map_err(|source| {
        debug!("JSON decode failed for {}: {}", origin.display(), source);
        if source.is_io() {
            Error::Io(source.into())
        } else {
            Error::MalformedInput {
                path: origin.to_path_buf(),
                source,
            }
        }
    })
}

/// Total number of turns across all topics
pub fn count_turns(topics: &[TopicRecord]) -> usize {
    topics.iter().map(|t| t.turns.len()).sum()
}
