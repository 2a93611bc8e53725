//! Load, compute and persist steps behind each `patho` subcommand.
//!
//! Nothing here prints; the binary renders the returned values.

use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Utc};
use patho_classify::{
    AnnotatedRow, BulkOutcome, DashboardStats, QcReport, ReportView, add_test_comment, aggregate,
    annotate, annotate_report, bulk_status_change, dashboard_stats, evaluate_samples,
};
use patho_ingest::{RejectedRow, load_lab_results, load_qc_samples, load_reports, save_reports};
use patho_model::{
    AuditEntry, ClassificationSummary, ClassifierOptions, QcPolicy, QcSample, Report, StatusChange,
};
use serde::Serialize;
use tracing::{debug, info_span};

use crate::logging::redact_value;

pub fn compute_stats(
    results_path: Option<&Path>,
    reports_path: Option<&Path>,
    options: &ClassifierOptions,
) -> Result<DashboardStats> {
    if results_path.is_none() && reports_path.is_none() {
        bail!("nothing to summarize: pass --results and/or --reports");
    }
    let _span = info_span!("stats").entered();
    let results = match results_path {
        Some(path) => {
            load_lab_results(path)
                .with_context(|| format!("load results: {}", path.display()))?
                .records
        }
        None => Vec::new(),
    };
    let reports = match reports_path {
        Some(path) => load_reports_from(path)?,
        None => Vec::new(),
    };
    Ok(dashboard_stats(&results, &reports, options))
}

/// Annotated rows for a standalone results file.
#[derive(Debug, Clone, Serialize)]
pub struct ClassifyOutcome {
    pub rows: Vec<AnnotatedRow>,
    pub summary: ClassificationSummary,
}

pub fn classify_file(path: &Path, options: &ClassifierOptions) -> Result<ClassifyOutcome> {
    let _span = info_span!("classify", path = %path.display()).entered();
    let batch =
        load_lab_results(path).with_context(|| format!("load results: {}", path.display()))?;
    let rows = batch
        .records
        .iter()
        .map(|result| annotate(result, options))
        .collect();
    Ok(ClassifyOutcome {
        rows,
        summary: aggregate(&batch.records, options),
    })
}

/// Views of the selected reports, or of every report when `ids` is empty.
pub fn view_reports(
    path: &Path,
    ids: &[String],
    options: &ClassifierOptions,
) -> Result<Vec<ReportView>> {
    let _span = info_span!("report", path = %path.display()).entered();
    let reports = load_reports_from(path)?;
    let selected: Vec<&Report> = if ids.is_empty() {
        reports.iter().collect()
    } else {
        ids.iter()
            .map(|id| {
                reports
                    .iter()
                    .find(|report| &report.id == id)
                    .with_context(|| format!("report not found: {id}"))
            })
            .collect::<Result<_>>()?
    };
    Ok(selected
        .into_iter()
        .map(|report| {
            debug!(
                report_id = %report.id,
                patient = redact_value(report.patient_name.as_deref().unwrap_or("-")),
                tests = report.test_results.len(),
                "annotating report"
            );
            annotate_report(report, options)
        })
        .collect())
}

/// QC results for a file of control samples.
#[derive(Debug, Clone, Serialize)]
pub struct QcRun {
    #[serde(flatten)]
    pub report: QcReport,
    pub rejected: Vec<RejectedRow>,
}

impl QcRun {
    /// True when any sample failed, errored, or was rejected on load.
    pub fn has_failures(&self) -> bool {
        self.report.has_failures() || !self.rejected.is_empty()
    }
}

pub fn run_qc_file(path: &Path, policy: &QcPolicy) -> Result<QcRun> {
    let _span = info_span!("qc", path = %path.display()).entered();
    let batch =
        load_qc_samples(path).with_context(|| format!("load QC samples: {}", path.display()))?;
    Ok(QcRun {
        report: evaluate_samples(&batch.records, policy),
        rejected: batch.rejected,
    })
}

pub fn run_qc_single(expected: f64, observed: f64, policy: &QcPolicy) -> QcRun {
    QcRun {
        report: evaluate_samples(&[QcSample::new(expected, observed)], policy),
        rejected: Vec::new(),
    }
}

/// Applies a status change to the listed reports and saves the store.
///
/// The store is written to `output` when given, otherwise back to `path`.
/// Nothing is written when no report was updated.
pub fn review_reports(
    path: &Path,
    output: Option<&Path>,
    ids: &[String],
    change: &StatusChange,
    user: &str,
    now: DateTime<Utc>,
) -> Result<BulkOutcome> {
    let _span = info_span!("review", path = %path.display()).entered();
    let mut reports = load_reports_from(path)?;
    let outcome = bulk_status_change(&mut reports, ids, change, user, now)
        .context("apply status change")?;
    if !outcome.updated.is_empty() {
        save_reports_to(output.unwrap_or(path), &reports)?;
    }
    Ok(outcome)
}

/// Records a pathologist comment on one test result and saves the store.
pub fn comment_on_test(
    path: &Path,
    output: Option<&Path>,
    report_id: &str,
    test_result_id: &str,
    comment: &str,
    user: &str,
    now: DateTime<Utc>,
) -> Result<AuditEntry> {
    let _span = info_span!("comment", path = %path.display()).entered();
    let mut reports = load_reports_from(path)?;
    let report = reports
        .iter_mut()
        .find(|report| report.id == report_id)
        .with_context(|| format!("report not found: {report_id}"))?;
    debug!(
        report_id,
        test_result_id,
        comment = redact_value(comment),
        "adding test comment"
    );
    let entry = add_test_comment(report, test_result_id, comment, user, now)
        .with_context(|| format!("comment on {report_id}/{test_result_id}"))?;
    save_reports_to(output.unwrap_or(path), &reports)?;
    Ok(entry)
}

fn load_reports_from(path: &Path) -> Result<Vec<Report>> {
    load_reports(path).with_context(|| format!("load reports: {}", path.display()))
}

fn save_reports_to(path: &Path, reports: &[Report]) -> Result<()> {
    save_reports(path, reports).with_context(|| format!("save reports: {}", path.display()))
}
