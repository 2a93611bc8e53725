pub mod classification;
pub mod enums;
pub mod error;
pub mod lab;
pub mod options;
pub mod qc;
pub mod report;
pub mod value;

pub use classification::{Classification, ClassificationFailure, ClassificationSummary};
pub use enums::{IndeterminateReason, RangeBucket, ReportStatus, Verdict};
pub use error::{ClassifyError, Result, ReviewError};
pub use lab::{LabResult, Range, ReferenceRanges, Subject, TestResult};
pub use options::{ClassifierOptions, DEFAULT_CHILD_AGE_CUTOFF, QcPolicy};
pub use qc::{DeviationBand, QcDeviation, QcOutcome, QcSample, QcStatus};
pub use report::{AuditEntry, Report, ReportStatusCounts, StatusChange};
pub use value::{RawValue, format_numeric, parse_f64};
