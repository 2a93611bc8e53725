//! Report store: a JSON array of reports on disk.

use std::fs;
use std::path::Path;

use patho_model::Report;
use tracing::info;

use crate::error::{IngestError, Result};
use crate::format::read_json;

/// Loads every report from a JSON file.
pub fn load_reports(path: &Path) -> Result<Vec<Report>> {
    let reports: Vec<Report> = read_json(path)?;
    info!(path = %path.display(), reports = reports.len(), "loaded reports");
    Ok(reports)
}

/// Writes reports as pretty-printed JSON, creating parent directories.
///
/// The file is written to a sibling temporary path first and then renamed
/// over the target.
pub fn save_reports(path: &Path, reports: &[Report]) -> Result<()> {
    let io_error = |source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_error)?;
    }
    let json = serde_json::to_string_pretty(reports).map_err(|source| IngestError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    let staging = path.with_extension("json.tmp");
    fs::write(&staging, json).map_err(io_error)?;
    fs::rename(&staging, path).map_err(io_error)?;
    info!(path = %path.display(), reports = reports.len(), "saved reports");
    Ok(())
}
