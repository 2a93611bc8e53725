//! Reference-range classification of lab results.
//!
//! Everything here is a pure function of its arguments: no I/O, no shared
//! state, safe to call from any thread in any order.

pub mod aggregate;
pub mod annotate;
pub mod classify;
pub mod qc;
pub mod review;
pub mod select;

pub use aggregate::{DashboardStats, aggregate, dashboard_stats};
pub use annotate::{AnnotatedRow, ReportView, annotate, annotate_report};
pub use classify::{classify, classify_value};
pub use qc::{
    QcReport, QcRow, compute_deviation, evaluate_deviation, evaluate_samples, format_deviation,
    round1,
};
pub use review::{
    BulkFailure, BulkOutcome, MAX_COMMENT_LENGTH, add_test_comment, apply_status_change,
    bulk_status_change,
};
pub use select::{select_bucket, select_range};
