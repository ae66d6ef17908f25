//! Statistics engine
//!
//! **Purpose:** Reduce a dataset to a [`Statistics`] value in one pass.
//!
//! A turn whose utterance matches its reference after normalization counts as
//! a reference (English) sentence; every other turn counts as a mixed
//! (Gujlish) sentence.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::language_mix::{language_mix_ratio, LanguageMixRatio};
use super::normalize::{classify, SentenceClass};
use crate::dataset::TopicRecord;

/// Descriptive statistics for one dataset
///
/// Invariants:
/// - `reference_sentence_count + mixed_sentence_count == total_sentences`
/// - `identical_sentence_count == reference_sentence_count`
/// - `per_turn_ratios` only holds turns with at least one word
/// - averages are means over `per_turn_ratios`, 0.0 when it is empty
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    /// Number of topic records
    pub total_conversations: u64,

    /// Number of turns across all topics
    pub total_sentences: u64,

    /// Turns whose utterance matches the reference
    pub reference_sentence_count: u64,

    /// Turns whose utterance differs from the reference
    pub mixed_sentence_count: u64,

    /// Same as `reference_sentence_count`, kept for the identical/different view
    pub identical_sentence_count: u64,

    /// Topic records per topic name
    pub topic_frequency: BTreeMap<String, u64>,

    /// Language-mix ratio per non-empty turn, in turn order
    pub per_turn_ratios: Vec<LanguageMixRatio>,

    /// Mean English ratio over `per_turn_ratios` (0.0 when empty)
    pub avg_english_ratio: f64,
    /// Mean other-word ratio over `per_turn_ratios` (0.0 when empty)
    pub avg_other_ratio: f64,
}

impl Statistics {
    /// Reference sentences as a percentage of all sentences (0.0 when empty)
    pub fn reference_percentage(&self) -> f64 {
        percentage(self.reference_sentence_count, self.total_sentences)
    }

    /// Mixed sentences as a percentage of all sentences (0.0 when empty)
    pub fn mixed_percentage(&self) -> f64 {
        percentage(self.mixed_sentence_count, self.total_sentences)
    }

    /// Sentences whose utterance differs from the reference
    pub fn different_sentence_count(&self) -> u64 {
        self.total_sentences - self.identical_sentence_count
    }

    /// English ratio of every non-empty turn, in turn order
    pub fn english_ratios(&self) -> Vec<f64> {
        self.per_turn_ratios.iter().map(|r| r.english_ratio).collect()
    }

    /// Up to `n` most frequent topics, highest count first
    ///
    /// The relative order of topics with equal counts is unspecified.
    pub fn top_topics(&self, n: usize) -> Vec<(&str, u64)> {
        let mut topics: Vec<(&str, u64)> = self
            .topic_frequency
            .iter()
            .map(|(topic, &count)| (topic.as_str(), count))
            .collect();
        topics.sort_by(|a, b| b.1.cmp(&a.1));
        topics.truncate(n);
        topics
    }
}

fn percentage(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

fn mean(values: impl ExactSizeIterator<Item = f64>) -> f64 {
    let len = values.len();
    if len == 0 {
        return 0.0;
    }
    values.sum::<f64>() / len as f64
}

/// Compute statistics over the whole dataset
///
/// Total over any input: missing text fields were already defaulted to empty
/// strings at load time, which classify as identical and contribute no ratio.
pub fn analyze(topics: &[TopicRecord]) -> Statistics {
    let mut total_sentences = 0u64;
    let mut reference_sentence_count = 0u64;
    let mut mixed_sentence_count = 0u64;
    let mut identical_sentence_count = 0u64;
    let mut topic_frequency: BTreeMap<String, u64> = BTreeMap::new();
    let mut per_turn_ratios = Vec::new();

    for record in topics {
        *topic_frequency.entry(record.topic.clone()).or_insert(0) += 1;

        for turn in &record.turns {
            total_sentences += 1;

            match classify(&turn.mixed_text, &turn.reference_text) {
                SentenceClass::Identical => {
                    identical_sentence_count += 1;
                    reference_sentence_count += 1;
                }
                SentenceClass::Distinct => mixed_sentence_count += 1,
            }

            if let Some(ratio) = language_mix_ratio(&turn.mixed_text) {
                per_turn_ratios.push(ratio);
            }
        }
    }

    let avg_english_ratio = mean(per_turn_ratios.iter().map(|r| r.english_ratio));
    let avg_other_ratio = mean(per_turn_ratios.iter().map(|r| r.other_ratio));

    debug!(
        "Analyzed {} topics: {} sentences ({} reference, {} mixed), {} ratio samples",
        topics.len(),
        total_sentences,
        reference_sentence_count,
        mixed_sentence_count,
        per_turn_ratios.len()
    );

    Statistics {
        total_conversations: topics.len() as u64,
        total_sentences,
        reference_sentence_count,
        mixed_sentence_count,
        identical_sentence_count,
        topic_frequency,
        per_turn_ratios,
        avg_english_ratio,
        avg_other_ratio,
    }
}
