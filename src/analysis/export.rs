//! Persisting summaries as JSON.
//!
//! The summary is written to a temporary file in the destination directory
//! and then renamed over the target, so a failed export never leaves a
//! partial file behind. Concurrent exports to the same path are not
//! coordinated; callers must serialize them.

use crate::analysis::error::ExportError;
use crate::types::summary::SummaryStatistics;
use log::info;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Writes `summary` as pretty-printed JSON to `path`, replacing any existing file.
///
/// # Errors
///
/// Returns an [`ExportError`] if the destination directory is missing or not
/// writable, or the final rename fails.
pub fn export_summary(
    summary: &SummaryStatistics,
    path: impl AsRef<Path>,
) -> Result<(), ExportError> {
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut bytes = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut bytes, PrettyFormatter::with_indent(b"    "));
    summary
        .serialize(&mut serializer)
        .map_err(|e| ExportError::Encode(path.to_path_buf(), e))?;
    bytes.push(b'\n');

    let mut temp_file = NamedTempFile::new_in(dir)
        .map_err(|e| ExportError::TempFileCreation(path.to_path_buf(), e))?;
    temp_file
        .write_all(&bytes)
        .map_err(|e| ExportError::Write(path.to_path_buf(), e))?;
    temp_file
        .flush()
        .map_err(|e| ExportError::Write(path.to_path_buf(), e))?;
    temp_file
        .persist(path)
        .map_err(|e| ExportError::Persist(path.to_path_buf(), e.error))?;

    info!("Wrote summary statistics to {:?}", path);
    Ok(())
}

/// Reads a summary previously written by [`export_summary`].
pub fn load_summary(path: impl AsRef<Path>) -> Result<SummaryStatistics, ExportError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| ExportError::Read(path.to_path_buf(), e))?;
    serde_json::from_slice(&bytes).map_err(|e| ExportError::Decode(path.to_path_buf(), e))
}
