//! CSV output and read-back preview
//!
//! The CSV is staged in a temporary file beside the destination and renamed
//! over it only after every row has been flushed. A failed export leaves any
//! previous output untouched and no partial file behind.

use std::path::{Path, PathBuf};

use gujlish_common::dataset::{count_turns, load_dataset};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::rows::{flatten, TurnRow, CSV_HEADER};
use crate::Result;

/// Result of one export run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// Rows were written to `path`
    Written { path: PathBuf, rows: usize },
    /// The dataset had no turns; nothing was written
    NoData,
}

/// Write rows (with header) to `output`
pub fn write_csv<P: AsRef<Path>>(rows: &[TurnRow], output: P) -> Result<()> {
    let output = output.as_ref();
    let dir = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    std::fs::create_dir_all(&dir)?;

    let staged = staging_file(&dir, output)?;
    debug!("Staging CSV at {}", staged.path().display());

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(staged);
    writer.write_record(CSV_HEADER)?;
    for row in rows {
        writer.serialize(row)?;
    }

    let staged = writer.into_inner().map_err(|e| e.into_error())?;
    staged.persist(output).map_err(|e| e.error)?;
    Ok(())
}

/// Temporary file in `dir` that will be renamed over `output`
///
/// On unix the staged file takes the mode of the file it replaces, or the
/// ordinary `0o666` minus umask for a new file, instead of tempfile's `0o600`.
fn staging_file(dir: &Path, output: &Path) -> std::io::Result<NamedTempFile> {
    let mut builder = tempfile::Builder::new();
    builder.prefix(".gujlish-export");

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let permissions = match std::fs::metadata(output) {
            Ok(meta) if meta.is_file() => meta.permissions(),
            _ => std::fs::Permissions::from_mode(0o666),
        };
        builder.permissions(permissions);
    }
    #[cfg(not(unix))]
    let _ = output;

    builder.tempfile_in(dir)
}

/// Convert a dataset file to CSV
///
/// A dataset without any turns produces [`ExportOutcome::NoData`] and leaves
/// `output` untouched.
pub fn export_dataset<P: AsRef<Path>, Q: AsRef<Path>>(input: P, output: Q) -> Result<ExportOutcome> {
    let input = input.as_ref();
    let output = output.as_ref();

    let topics = load_dataset(input)?;
    if count_turns(&topics) == 0 {
        warn!("No conversation data found in {}", input.display());
        return Ok(ExportOutcome::NoData);
    }

    let rows = flatten(&topics);
    write_csv(&rows, output)?;
    info!(
        "Converted '{}' to '{}' ({} rows)",
        input.display(),
        output.display(),
        rows.len()
    );

    Ok(ExportOutcome::Written {
        path: output.to_path_buf(),
        rows: rows.len(),
    })
}

/// Read back the first `limit` rows of an exported CSV
pub fn read_preview<P: AsRef<Path>>(path: P, limit: usize) -> Result<Vec<TurnRow>> {
    let mut reader = csv::Reader::from_path(path)?;
    let rows = reader
        .deserialize()
        .take(limit)
        .collect::<std::result::Result<Vec<TurnRow>, csv::Error>>()?;
    Ok(rows)
}

/// Render preview rows as an aligned text table
pub fn format_preview(rows: &[TurnRow]) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "{:>7}  {:<20}  {:<8}  {:<32}  {}\n",
        CSV_HEADER[0], CSV_HEADER[1], CSV_HEADER[2], CSV_HEADER[3], CSV_HEADER[4]
    ));

    for row in rows {
        output.push_str(&format!(
            "{:>7}  {:<20}  {:<8}  {:<32}  {}\n",
            row.turn_id,
            truncate(&row.topic, 20),
            truncate(row.speaker.as_deref().unwrap_or(""), 8),
            truncate(&row.gujlish, 32),
            row.english
        ));
    }

    output
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(3)).collect();
    cut.push_str("...");
    cut
}
