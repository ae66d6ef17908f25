//! Text normalization and sentence classification

use serde::{Deserialize, Serialize};

/// Canonical form of an utterance, used only for equality checks
///
/// Lowercases, trims surrounding whitespace, then drops every ASCII
/// punctuation character. Trimming runs before punctuation removal, so
/// `"hi ."` becomes `"hi "`.
pub fn normalize_text(text: &str) -> String {
    text.to_lowercase()
        .trim()
        .chars()
        .filter(|c| !c.is_ascii_punctuation())
        .collect()
}

/// Whether a code-mixed utterance matches its reference gloss
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SentenceClass {
    /// Normalized forms are equal
    Identical,
    /// Normalized forms differ
    Distinct,
}

/// Classify a mixed/reference pair by exact equality of normalized forms
pub fn classify(mixed_text: &str, reference_text: &str) -> SentenceClass {
    if normalize_text(mixed_text) == normalize_text(reference_text) {
        SentenceClass::Identical
    } else {
        SentenceClass::Distinct
    }
}
