//! Language-mix ratio of a code-mixed utterance
//!
//! **Purpose:** Coarse proxy for code-mixing intensity. No language model is
//! involved: a token counts as English when it is a run of ASCII letters
//! bounded by word boundaries (`\b[a-zA-Z]+\b`), everything else is "other".
//!
//! Word totals come from splitting the raw text on whitespace, while English
//! words are regex matches over the same raw text, so one token may hold
//! several matches (`don't` holds `don` and `t`). English words are capped at
//! the token total so both ratios stay within [0, 1].

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static ENGLISH_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[a-zA-Z]+\b").expect("English word pattern is valid"));

/// Word tallies for one utterance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordCounts {
    /// Whitespace-delimited tokens
    pub total_words: usize,
    /// ASCII-alphabetic runs, capped at `total_words`
    pub english_words: usize,
    /// `total_words - english_words`
    pub other_words: usize,
}

/// Fractions of English and other words in one utterance
///
/// The two fields always sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LanguageMixRatio {
    pub english_ratio: f64,
    pub other_ratio: f64,
}

/// Count total, English and other words in raw (non-normalized) text
pub fn count_words(text: &str) -> WordCounts {
    let total_words = text.split_whitespace().count();
    let english_words = ENGLISH_WORD.find_iter(text).count().min(total_words);

    WordCounts {
        total_words,
        english_words,
        other_words: total_words - english_words,
    }
}

/// Language-mix ratio of raw text, or `None` when it has no words
pub fn language_mix_ratio(text: &str) -> Option<LanguageMixRatio> {
    let counts = count_words(text);
    if counts.total_words == 0 {
        return None;
    }

    let total = counts.total_words as f64;
    Some(LanguageMixRatio {
        english_ratio: counts.english_words as f64 / total,
        other_ratio: counts.other_words as f64 / total,
    })
}
