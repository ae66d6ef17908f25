//! Report generation and formatting
//!
//! **Purpose:** Console summary and JSON export of dataset statistics.

use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;

use gujlish_common::Statistics;
use serde::{Deserialize, Serialize};

use crate::Result;

/// Statistics plus the run that produced them
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Run metadata
    pub session: SessionInfo,

    /// Computed statistics
    pub statistics: Statistics,
}

/// Analysis run metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionInfo {
    /// Run timestamp (RFC 3339)
    pub timestamp: String,

    /// Dataset the statistics describe
    pub dataset: String,

    /// Version of the tool that wrote the report
    pub version: String,
}

impl AnalysisReport {
    /// Wrap statistics with metadata for the current run
    pub fn new(dataset: &Path, statistics: Statistics) -> Self {
        Self {
            session: SessionInfo {
                timestamp: chrono::Utc::now().to_rfc3339(),
                dataset: dataset.display().to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            statistics,
        }
    }

    /// Export report to a pretty-printed JSON file
    pub fn export_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        let mut file = File::create(path)?;
        file.write_all(json.as_bytes())?;
        file.write_all(b"\n")?;
        Ok(())
    }

    /// Import report from a JSON file
    pub fn import_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        let report = serde_json::from_reader(BufReader::new(file))?;
        Ok(report)
    }
}

/// CLI formatter for analysis results
pub struct CliFormatter;

impl CliFormatter {
    /// Format the full console summary
    ///
    /// `top_n` limits the topic list.
    pub fn format_summary(stats: &Statistics, top_n: usize) -> String {
        let mut output = String::new();

        output.push_str("\n=== Dataset Analysis Results ===\n");
        output.push_str(&format!("Total Conversations: {}\n", stats.total_conversations));
        output.push_str(&format!("Total Sentences: {}\n", stats.total_sentences));

        output.push_str(&Self::format_sentence_distribution(stats));
        output.push_str(&Self::format_language_mix(stats));
        output.push_str(&Self::format_top_topics(stats, top_n));

        output.push_str(&format!(
            "\nIdentical Gujlish-English Sentences: {}\n",
            stats.identical_sentence_count
        ));

        output
    }

    /// Reference vs mixed sentence counts with percentages
    pub fn format_sentence_distribution(stats: &Statistics) -> String {
        let mut output = String::new();

        output.push_str("\nSentence Type Distribution (Based on Key Comparison):\n");
        output.push_str(&format!(
            "English Sentences (gujlish == english): {} ({:.2}%)\n",
            stats.reference_sentence_count,
            stats.reference_percentage()
        ));
        output.push_str(&format!(
            "Gujlish Sentences (gujlish != english): {} ({:.2}%)\n",
            stats.mixed_sentence_count,
            stats.mixed_percentage()
        ));

        output
    }

    /// Average word ratios as percentages
    pub fn format_language_mix(stats: &Statistics) -> String {
        let mut output = String::new();

        output.push_str("\nLanguage Mix Statistics (from Gujlish text only):\n");
        output.push_str(&format!(
            "Average English Word Ratio: {:.2}%\n",
            stats.avg_english_ratio * 100.0
        ));
        output.push_str(&format!(
            "Average Gujlish Word Ratio: {:.2}%\n",
            stats.avg_other_ratio * 100.0
        ));

        output
    }

    /// Most frequent topics, one per line
    pub fn format_top_topics(stats: &Statistics, top_n: usize) -> String {
        let mut output = String::new();

        output.push_str(&format!("\nTop {} Conversation Topics:\n", top_n));
        for (topic, count) in stats.top_topics(top_n) {
            output.push_str(&format!("- {}: {} conversations\n", topic, count));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gujlish_common::{analyze, TopicRecord, TurnRecord};

    fn sample_stats() -> Statistics {
        let topics = vec![
            TopicRecord::new(
                "Food",
                vec![
                    TurnRecord::new(Some("A"), "Hello, kem chho?", "Hello, kem chho?"),
                    TurnRecord::new(Some("B"), "મને ek coffee જોઈએ", "I want a coffee"),
                ],
            ),
            TopicRecord::new("Food", vec![]),
            TopicRecord::new("Travel", vec![]),
        ];
        analyze(&topics)
    }

    #[test]
    fn test_summary_contains_counts() {
        let text = CliFormatter::format_summary(&sample_stats(), 5);

        assert!(text.contains("Total Conversations: 3"));
        assert!(text.contains("Total Sentences: 2"));
        assert!(text.contains("English Sentences (gujlish == english): 1 (50.00%)"));
        assert!(text.contains("Gujlish Sentences (gujlish != english): 1 (50.00%)"));
        assert!(text.contains("Identical Gujlish-English Sentences: 1"));
    }

    #[test]
    fn test_language_mix_percentages() {
        let text = CliFormatter::format_language_mix(&sample_stats());

        // (1.0 + 0.5) / 2 English, (0.0 + 0.5) / 2 other
        assert!(text.contains("Average English Word Ratio: 75.00%"));
        assert!(text.contains("Average Gujlish Word Ratio: 25.00%"));
    }

    #[test]
    fn test_top_topics_listing() {
        let text = CliFormatter::format_top_topics(&sample_stats(), 1);

        assert!(text.contains("Top 1 Conversation Topics:"));
        assert!(text.contains("- Food: 2 conversations"));
        assert!(!text.contains("Travel"));
    }

    #[test]
    fn test_empty_dataset_summary_has_zero_percentages() {
        let text = CliFormatter::format_summary(&analyze(&[]), 5);

        assert!(text.contains("English Sentences (gujlish == english): 0 (0.00%)"));
        assert!(text.contains("Average English Word Ratio: 0.00%"));
        assert!(!text.contains("NaN"));
    }

    #[test]
    fn test_json_export_import() {
        let report = AnalysisReport::new(Path::new("dataset.json"), sample_stats());
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stats.json");

        report.export_json(&path).unwrap();
        let imported = AnalysisReport::import_json(&path).unwrap();

        assert_eq!(imported.statistics, report.statistics);
        assert_eq!(imported.session.dataset, "dataset.json");
        assert!(!imported.session.timestamp.is_empty());
    }

    #[test]
    fn test_json_field_names() {
        let report = AnalysisReport::new(Path::new("d.json"), sample_stats());
        let value = serde_json::to_value(&report).unwrap();

        assert_eq!(value["statistics"]["total_sentences"], 2);
        assert_eq!(value["statistics"]["topic_frequency"]["Food"], 2);
        assert_eq!(
            value["statistics"]["per_turn_ratios"][0]["english_ratio"],
            1.0
        );
    }
}
