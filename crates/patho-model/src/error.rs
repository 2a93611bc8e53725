use serde::Serialize;
use thiserror::Error;

use crate::enums::{RangeBucket, ReportStatus};

/// Failure to classify a single result or compute a QC deviation.
///
/// These are per-item errors. Batch operations tally them and continue.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClassifyError {
    #[error("reference range not configured for {bucket} bucket")]
    RangeNotConfigured { bucket: RangeBucket },
    #[error("invalid subject age: {age}")]
    InvalidAge { age: f64 },
    #[error("expected value is zero; cannot compute deviation for observed {observed}")]
    DivisionByZero { observed: f64 },
    #[error("QC values must be finite (expected {expected}, observed {observed})")]
    NonFiniteQcValue { expected: f64, observed: f64 },
}

impl ClassifyError {
    /// Short label used where a verdict would otherwise be displayed.
    pub fn label(&self) -> &'static str {
        match self {
            ClassifyError::RangeNotConfigured { .. } => "Range not configured",
            ClassifyError::InvalidAge { .. } => "Invalid age",
            ClassifyError::DivisionByZero { .. } => "Division by zero",
            ClassifyError::NonFiniteQcValue { .. } => "Invalid QC value",
        }
    }
}

/// Failure to apply a review action to a report.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReviewError {
    #[error("invalid status {status}; must be approved or rejected")]
    InvalidTargetStatus { status: ReportStatus },
    #[error("report ids are required")]
    EmptySelection,
    #[error("report not found: {id}")]
    ReportNotFound { id: String },
    #[error("test result {test_result_id} not found in report {report_id}")]
    TestResultNotFound {
        report_id: String,
        test_result_id: String,
    },
    #[error("comment cannot be empty")]
    EmptyComment,
    #[error("comment too long ({length} characters, max {max})")]
    CommentTooLong { length: usize, max: usize },
}

pub type Result<T> = std::result::Result<T, ClassifyError>;
