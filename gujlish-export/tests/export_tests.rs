//! Integration tests for gujlish-export
//!
//! Tests cover:
//! - Header and row layout of the exported CSV
//! - turn_id numbering across topics
//! - Defaults for missing speaker / text fields
//! - Turn-less datasets write nothing
//! - Missing and malformed input files
//! - Failed writes leave no partial output
//! - Output file mode (unix)

use gujlish_export::{export_dataset, read_preview, Error, ExportOutcome};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const DATASET: &str = r#"[
  {
    "topic": "Greetings",
    "conversations": [
      {"speaker": "A", "gujlish": "Hello, kem chho?", "english": "Hello, how are you?"},
      {"speaker": "B", "gujlish": "Majama", "english": "I am fine"}
    ]
  },
  {
    "topic": "Food",
    "conversations": [
      {"gujlish": "Mane ek coffee joie"}
    ]
  },
  {
    "conversations": [
      {"speaker": "C", "gujlish": "Avjo", "english": "Bye"}
    ]
  }
]"#;

fn write_input(dir: &TempDir, content: &str) -> std::path::PathBuf {
    let path = dir.path().join("dataset.json");
    fs::write(&path, content).expect("write dataset");
    path
}

fn csv_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .expect("read csv")
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn test_export_writes_row_per_turn() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, DATASET);
    let output = dir.path().join("corpus.csv");

    let outcome = export_dataset(&input, &output).unwrap();
    assert_eq!(
        outcome,
        ExportOutcome::Written {
            path: output.clone(),
            rows: 4
        }
    );

    let lines = csv_lines(&output);
    assert_eq!(
        lines,
        vec![
            "turn_id,topic,speaker,gujlish,english",
            "1,Greetings,A,\"Hello, kem chho?\",\"Hello, how are you?\"",
            "2,Greetings,B,Majama,I am fine",
            "3,Food,,Mane ek coffee joie,",
            "4,Unknown Topic,C,Avjo,Bye",
        ]
    );
}

#[test]
fn test_exported_rows_read_back() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, DATASET);
    let output = dir.path().join("corpus.csv");
    export_dataset(&input, &output).unwrap();

    let rows = read_preview(&output, 10).unwrap();
    let ids: Vec<u64> = rows.iter().map(|r| r.turn_id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4]);
    assert_eq!(rows[2].speaker, None);
    assert_eq!(rows[2].english, "");
}

#[test]
fn test_turnless_dataset_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, r#"[{"topic": "Quiet", "conversations": []}]"#);
    let output = dir.path().join("corpus.csv");

    assert_eq!(export_dataset(&input, &output).unwrap(), ExportOutcome::NoData);
    assert!(!output.exists());
}

#[test]
fn test_empty_document_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "[]");
    let output = dir.path().join("corpus.csv");

    assert_eq!(export_dataset(&input, &output).unwrap(), ExportOutcome::NoData);
    assert!(!output.exists());
}

#[test]
fn test_missing_input_reports_file_not_found() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("corpus.csv");

    let err = export_dataset(dir.path().join("absent.json"), &output).unwrap_err();
    assert!(matches!(
        err,
        Error::Dataset(gujlish_common::Error::FileNotFound(_))
    ));
    assert!(!output.exists());
}

#[test]
fn test_malformed_input_reports_decode_error() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, r#"[{"topic": "Food", "conversations": ["#);
    let output = dir.path().join("corpus.csv");

    let err = export_dataset(&input, &output).unwrap_err();
    assert!(matches!(
        err,
        Error::Dataset(gujlish_common::Error::MalformedInput { .. })
    ));
    assert!(err.to_string().contains("Could not decode JSON"));
    assert!(!output.exists());
}

#[test]
fn test_failed_write_leaves_no_partial_file() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, DATASET);
    let out_dir = dir.path().join("out");
    fs::create_dir(&out_dir).unwrap();
    // Destination is an existing directory, so the final rename fails
    let blocked = out_dir.join("corpus.csv");
    fs::create_dir(&blocked).unwrap();

    let result = export_dataset(&input, &blocked);
    assert!(matches!(result, Err(Error::Io(_))));

    let leftovers: Vec<_> = fs::read_dir(&out_dir).unwrap().collect();
    assert_eq!(leftovers.len(), 1, "only the blocking directory remains");
    assert!(blocked.is_dir());
}

#[test]
fn test_reexport_replaces_previous_output() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("corpus.csv");
    fs::write(&output, "stale contents\n").unwrap();

    let input = write_input(&dir, DATASET);
    export_dataset(&input, &output).unwrap();

    let lines = csv_lines(&output);
    assert_eq!(lines.len(), 5);
    assert_eq!(lines[0], "turn_id,topic,speaker,gujlish,english");
}

#[cfg(unix)]
#[test]
fn test_new_output_gets_ordinary_file_mode() {
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, DATASET);
    let output = dir.path().join("corpus.csv");
    let ordinary = dir.path().join("ordinary.txt");
    fs::write(&ordinary, "x").unwrap();

    export_dataset(&input, &output).unwrap();

    let exported_mode = fs::metadata(&output).unwrap().permissions().mode() & 0o777;
    let ordinary_mode = fs::metadata(&ordinary).unwrap().permissions().mode() & 0o777;
    assert_eq!(exported_mode, ordinary_mode);
}

#[cfg(unix)]
#[test]
fn test_reexport_keeps_existing_mode() {
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, DATASET);
    let output = dir.path().join("corpus.csv");
    fs::write(&output, "stale contents\n").unwrap();
    let umasked = fs::metadata(&output).unwrap().permissions().mode() & 0o777;
    fs::set_permissions(&output, fs::Permissions::from_mode(0o640)).unwrap();

    export_dataset(&input, &output).unwrap();

    let mode = fs::metadata(&output).unwrap().permissions().mode() & 0o777;
    assert_eq!(mode, 0o640 & umasked);
}
