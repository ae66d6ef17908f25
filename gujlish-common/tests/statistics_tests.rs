//! End-to-end tests for dataset loading and statistics
//!
//! Tests cover:
//! - Loader error kinds (missing file, malformed JSON)
//! - Count invariants over a realistic fixture
//! - Ratio pairs summing to one
//! - Repeated runs producing equal results

use gujlish_common::dataset::{load_dataset, TopicRecord, TurnRecord};
use gujlish_common::metrics::{analyze, classify, SentenceClass};
use gujlish_common::Error;
use std::io::Write;
use tempfile::NamedTempFile;

const FIXTURE: &str = r#"[
  {
    "topic": "Greetings",
    "conversations": [
      {"speaker": "A", "gujlish": "Hello, kem chho?", "english": "Hello, kem chho?"},
      {"speaker": "B", "gujlish": "Hu majama chhu", "english": "I am fine"}
    ]
  },
  {
    "topic": "Food",
    "conversations": [
      {"speaker": "A", "gujlish": "Mane ek coffee joie", "english": "I want a coffee"},
      {"speaker": "B", "gujlish": "મને ek coffee જોઈએ", "english": "I want a coffee"},
      {"speaker": "A", "gujlish": "", "english": ""}
    ]
  },
  {
    "topic": "Greetings",
    "conversations": [
      {"gujlish": "Good morning!", "english": "good morning"}
    ]
  },
  {
    "topic": "Travel"
  }
]"#;

fn write_fixture(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create fixture");
    file.write_all(content.as_bytes()).expect("write fixture");
    file
}

fn load_fixture() -> Vec<TopicRecord> {
    let file = write_fixture(FIXTURE);
    load_dataset(file.path()).expect("fixture loads")
}

#[test]
fn test_missing_file_reports_file_not_found() {
    let err = load_dataset("/nonexistent/gujlish/dataset.json").unwrap_err();
    assert!(matches!(err, Error::FileNotFound(_)));
}

#[test]
fn test_malformed_file_reports_malformed_input() {
    let file = write_fixture("not json at all");
    let err = load_dataset(file.path()).unwrap_err();
    assert!(matches!(err, Error::MalformedInput { .. }));
}

#[test]
fn test_fixture_counts() {
    let stats = analyze(&load_fixture());

    assert_eq!(stats.total_conversations, 4);
    assert_eq!(stats.total_sentences, 6);
    // "Hello, kem chho?", the empty pair, and "Good morning!" match their references
    assert_eq!(stats.reference_sentence_count, 3);
    assert_eq!(stats.mixed_sentence_count, 3);
    assert_eq!(stats.identical_sentence_count, stats.reference_sentence_count);
    assert_eq!(
        stats.total_sentences,
        stats.reference_sentence_count + stats.mixed_sentence_count
    );
    assert_eq!(stats.topic_frequency["Greetings"], 2);
    assert_eq!(stats.topic_frequency["Food"], 1);
    assert_eq!(stats.topic_frequency["Travel"], 1);
    assert_eq!(stats.top_topics(1), vec![("Greetings", 2)]);
}

#[test]
fn test_reference_count_matches_identical_turns() {
    let topics = load_fixture();
    let identical = topics
        .iter()
        .flat_map(|t| &t.turns)
        .filter(|turn| classify(&turn.mixed_text, &turn.reference_text) == SentenceClass::Identical)
        .count() as u64;

    assert_eq!(analyze(&topics).reference_sentence_count, identical);
}

#[test]
fn test_empty_turn_excluded_from_ratios() {
    let stats = analyze(&load_fixture());

    // Six turns, one with empty gujlish text
    assert_eq!(stats.per_turn_ratios.len(), 5);
}

#[test]
fn test_ratio_pairs_sum_to_one() {
    let stats = analyze(&load_fixture());

    for ratio in &stats.per_turn_ratios {
        assert!((ratio.english_ratio + ratio.other_ratio - 1.0).abs() < 1e-9);
        assert!((0.0..=1.0).contains(&ratio.english_ratio));
        assert!((0.0..=1.0).contains(&ratio.other_ratio));
    }
    assert!((stats.avg_english_ratio + stats.avg_other_ratio - 1.0).abs() < 1e-9);
}

#[test]
fn test_repeated_runs_are_equal() {
    let topics = load_fixture();
    let first = analyze(&topics);
    let second = analyze(&topics);

    assert_eq!(first, second);
    assert_eq!(
        first.avg_english_ratio.to_bits(),
        second.avg_english_ratio.to_bits()
    );
}

#[test]
fn test_empty_document() {
    let file = write_fixture("[]");
    let stats = analyze(&load_dataset(file.path()).unwrap());

    assert_eq!(stats.total_sentences, 0);
    assert_eq!(stats.reference_sentence_count + stats.mixed_sentence_count, 0);
    assert!(stats.topic_frequency.is_empty());
    assert_eq!(stats.avg_english_ratio, 0.0);
    assert_eq!(stats.avg_other_ratio, 0.0);
}

#[test]
fn test_turn_without_text_fields() {
    let topics = vec![TopicRecord::new(
        "Sparse",
        vec![TurnRecord {
            speaker: None,
            ..TurnRecord::default()
        }],
    )];
    let stats = analyze(&topics);

    assert_eq!(stats.identical_sentence_count, 1);
    assert!(stats.per_turn_ratios.is_empty());
}
