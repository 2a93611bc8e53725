//! Shared CSV reading: header normalization and per-row field access.

use std::collections::BTreeMap;
use std::path::Path;

use csv::ReaderBuilder;

use crate::error::{IngestError, Result};

/// One CSV record keyed by normalized header.
#[derive(Debug, Clone, PartialEq)]
pub struct CsvRow {
    /// 1-based line number in the source file.
    pub line: u64,
    fields: BTreeMap<String, String>,
}

impl CsvRow {
    /// Field value, or an empty string when the column is absent.
    pub fn get(&self, key: &str) -> &str {
        self.fields.get(key).map_or("", String::as_str)
    }

    /// Field value, `None` when absent or empty.
    pub fn optional(&self, key: &str) -> Option<String> {
        self.fields.get(key).filter(|v| !v.is_empty()).cloned()
    }
}

/// Reads a CSV file into rows keyed by header.
///
/// Headers are lower-cased with any BOM stripped; values are trimmed.
pub fn read_csv_rows(path: &Path) -> Result<Vec<CsvRow>> {
    let csv_error = |source| IngestError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(csv_error)?;

    let headers: Vec<String> = reader
        .headers()
        .map_err(csv_error)?
        .iter()
        .map(normalize_header)
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(csv_error)?;
        let line = record.position().map_or(0, csv::Position::line);
        let fields = headers
            .iter()
            .zip(record.iter())
            .map(|(key, value)| (key.clone(), value.trim().to_string()))
            .collect();
        rows.push(CsvRow { line, fields });
    }
    Ok(rows)
}

fn normalize_header(header: &str) -> String {
    header.trim_matches('\u{feff}').trim().to_ascii_lowercase()
}
