//! Row-per-turn view of the dataset

use gujlish_common::TopicRecord;
use serde::{Deserialize, Serialize};

/// Column names, in output order
pub const CSV_HEADER: [&str; 5] = ["turn_id", "topic", "speaker", "gujlish", "english"];

/// One flattened turn
///
/// Field order and names define the CSV header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRow {
    /// 1-based position of the turn in the whole document
    pub turn_id: u64,
    pub topic: String,
    pub speaker: Option<String>,
    pub gujlish: String,
    pub english: String,
}

/// Flatten topics into rows, numbering turns across topics
pub fn flatten(topics: &[TopicRecord]) -> Vec<TurnRow> {
    topics
        .iter()
        .flat_map(|record| record.turns.iter().map(move |turn| (record, turn)))
        .zip(1u64..)
        .map(|((record, turn), turn_id)| TurnRow {
            turn_id,
            topic: record.topic.clone(),
            speaker: turn.speaker.clone(),
            gujlish: turn.mixed_text.clone(),
            english: turn.reference_text.clone(),
        })
        .collect()
}
