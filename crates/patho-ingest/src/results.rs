//! Lab-result and QC-sample batch loading.

use std::path::Path;

use patho_model::{LabResult, QcSample, Range, RawValue, ReferenceRanges, Subject, parse_f64};
use serde::Serialize;
use tracing::{info, warn};

use crate::csv_rows::{CsvRow, read_csv_rows};
use crate::error::Result;
use crate::format::{InputFormat, read_json};

/// A CSV row that could not be turned into a record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RejectedRow {
    pub line: u64,
    pub reason: String,
}

/// Records loaded from one file plus the rows that were skipped.
#[derive(Debug, Clone, PartialEq)]
pub struct Batch<T> {
    pub records: Vec<T>,
    pub rejected: Vec<RejectedRow>,
}

impl<T> Batch<T> {
    fn from_records(records: Vec<T>) -> Self {
        Self {
            records,
            rejected: Vec::new(),
        }
    }
}

/// Loads lab results from a `.json` array or a `.csv` file.
///
/// A CSV row whose age is missing or not a number is still loaded, with a
/// NaN age, so it is classified as an invalid-age error and counted.
pub fn load_lab_results(path: &Path) -> Result<Batch<LabResult>> {
    let batch = match InputFormat::from_path(path)? {
        InputFormat::Json => Batch::from_records(read_json(path)?),
        InputFormat::Csv => Batch::from_records(
            read_csv_rows(path)?
                .iter()
                .map(|row| lab_result_from_row(path, row))
                .collect(),
        ),
    };
    log_batch("lab results", path, &batch);
    Ok(batch)
}

/// Loads QC control samples from a `.json` array or a `.csv` file.
pub fn load_qc_samples(path: &Path) -> Result<Batch<QcSample>> {
    let batch = match InputFormat::from_path(path)? {
        InputFormat::Json => Batch::from_records(read_json(path)?),
        InputFormat::Csv => {
            let mut batch = Batch::from_records(Vec::new());
            for row in read_csv_rows(path)? {
                match qc_sample_from_row(&row) {
                    Ok(sample) => batch.records.push(sample),
                    Err(reason) => batch.rejected.push(RejectedRow {
                        line: row.line,
                        reason,
                    }),
                }
            }
            batch
        }
    };
    log_batch("QC samples", path, &batch);
    Ok(batch)
}

fn log_batch<T>(kind: &str, path: &Path, batch: &Batch<T>) {
    info!(
        path = %path.display(),
        loaded = batch.records.len(),
        rejected = batch.rejected.len(),
        "loaded {kind}"
    );
    for row in &batch.rejected {
        warn!(path = %path.display(), line = row.line, reason = %row.reason, "row rejected");
    }
}

fn lab_result_from_row(path: &Path, row: &CsvRow) -> LabResult {
    let age = required_number(row, "age").unwrap_or_else(|reason| {
        warn!(path = %path.display(), line = row.line, %reason, "result cannot be evaluated");
        f64::NAN
    });
    let gender = row.optional("gender").map(|g| g.to_lowercase());
    let subject = Subject { gender, age };
    let ranges = ReferenceRanges {
        child: range_from_row(row, "child"),
        male: range_from_row(row, "male"),
        female: range_from_row(row, "female"),
    };
    LabResult {
        id: row.optional("id"),
        test_name: row.optional("test_name"),
        value: row.optional("value").map(RawValue::Text),
        unit: row.optional("unit"),
        subject,
        ranges,
    }
}

fn qc_sample_from_row(row: &CsvRow) -> std::result::Result<QcSample, String> {
    Ok(QcSample {
        id: row.optional("id"),
        test_name: row.optional("test_name"),
        expected: required_number(row, "expected")?,
        observed: required_number(row, "observed")?,
        unit: row.optional("unit"),
    })
}

/// Bounds are kept as text so the classifier can tell a missing bound
/// from an unparseable one. Both cells empty means not configured.
fn range_from_row(row: &CsvRow, bucket: &str) -> Option<Range> {
    let lower = row.optional(&format!("{bucket}_lower"));
    let upper = row.optional(&format!("{bucket}_upper"));
    if lower.is_none() && upper.is_none() {
        return None;
    }
    Some(Range {
        lower: lower.map(RawValue::Text),
        upper: upper.map(RawValue::Text),
    })
}

fn required_number(row: &CsvRow, column: &str) -> std::result::Result<f64, String> {
    let raw = row.get(column);
    if raw.is_empty() {
        return Err(format!("missing {column}"));
    }
    parse_f64(raw).ok_or_else(|| format!("invalid {column} '{raw}'"))
}
