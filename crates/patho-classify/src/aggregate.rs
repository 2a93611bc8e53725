//! Batch classification for dashboard statistics.

use std::time::Instant;

use patho_model::{
    ClassificationFailure, ClassificationSummary, ClassifierOptions, LabResult, Report,
    ReportStatusCounts,
};
use serde::Serialize;
use tracing::{info, warn};

use crate::classify::classify;

/// Classifies every result and tallies the verdicts.
///
/// A result that cannot be classified is recorded as a failure and the
/// batch continues. Counts do not depend on input order.
pub fn aggregate<'a, I>(results: I, options: &ClassifierOptions) -> ClassificationSummary
where
    I: IntoIterator<Item = &'a LabResult>,
{
    let start = Instant::now();
    let mut summary = ClassificationSummary::default();
    for (index, result) in results.into_iter().enumerate() {
        match classify(result, options) {
            Ok(classification) => summary.record(classification.verdict),
            Err(error) => {
                warn!(
                    index,
                    result_id = result.id.as_deref().unwrap_or("-"),
                    %error,
                    "result could not be classified"
                );
                summary.record_failure(ClassificationFailure {
                    index,
                    id: result.id.clone(),
                    error,
                });
            }
        }
    }
    info!(
        total = summary.total,
        normal = summary.normal,
        abnormal = summary.abnormal,
        indeterminate = summary.indeterminate,
        errors = summary.errors,
        duration_ms = start.elapsed().as_millis(),
        "classification complete"
    );
    if summary.has_unevaluated() {
        warn!(
            unevaluated = summary.unevaluated(),
            "{} results could not be evaluated",
            summary.unevaluated()
        );
    }
    summary
}

/// Everything the dashboard shows about results and reports.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardStats {
    pub tests: ClassificationSummary,
    pub reports: ReportStatusCounts,
}

/// Builds dashboard statistics from standalone results plus the test
/// results contained in `reports`.
pub fn dashboard_stats(
    results: &[LabResult],
    reports: &[Report],
    options: &ClassifierOptions,
) -> DashboardStats {
    let report_results: Vec<LabResult> = reports.iter().flat_map(Report::lab_results).collect();
    let tests = aggregate(results.iter().chain(report_results.iter()), options);
    DashboardStats {
        tests,
        reports: ReportStatusCounts::from_reports(reports),
    }
}
