//! # Dataset Statistics Core
//!
//! Computes descriptive statistics over a loaded dataset in one linear pass.
//!
//! **Pipeline per turn:**
//! - Normalize both utterances and classify the pair as identical or distinct
//! - Measure how much of the code-mixed utterance is ASCII-alphabetic words
//!
//! Everything here is pure: no I/O, no shared state. Loading and rendering
//! live with the callers.

pub mod engine;
pub mod language_mix;
pub mod normalize;

pub use engine::{analyze, Statistics};
pub use language_mix::{count_words, language_mix_ratio, LanguageMixRatio, WordCounts};
pub use normalize::{classify, normalize_text, SentenceClass};
