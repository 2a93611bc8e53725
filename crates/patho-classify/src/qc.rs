//! QC deviation and acceptance.
//!
//! [`compute_deviation`] is a pure numeric primitive. Pass/fail is decided
//! separately by a [`QcPolicy`] supplied by the caller.

use patho_model::{
    ClassifyError, DeviationBand, QcDeviation, QcOutcome, QcPolicy, QcSample, QcStatus, Result,
};
use serde::Serialize;
use tracing::{info, warn};

/// Percent deviation of `observed` from `expected`, rounded to one decimal.
///
/// Rounding is half away from zero (`0.25` becomes `0.3`, `-0.25` becomes
/// `-0.3`). Negative zero is reported as `+0.0%`.
///
/// # Errors
///
/// [`ClassifyError::DivisionByZero`] when `expected` is zero and
/// [`ClassifyError::NonFiniteQcValue`] when either input is NaN or infinite
/// or the deviation itself overflows.
pub fn compute_deviation(observed: f64, expected: f64) -> Result<QcDeviation> {
    if !observed.is_finite() || !expected.is_finite() {
        return Err(ClassifyError::NonFiniteQcValue { expected, observed });
    }
    if expected == 0.0 {
        return Err(ClassifyError::DivisionByZero { observed });
    }
    let percent = round1((observed - expected) / expected * 100.0);
    if !percent.is_finite() {
        return Err(ClassifyError::NonFiniteQcValue { expected, observed });
    }
    Ok(QcDeviation {
        percent,
        formatted: format_deviation(percent),
    })
}

/// Rounds to one decimal place, half away from zero.
pub fn round1(value: f64) -> f64 {
    let rounded = (value * 10.0).round() / 10.0;
    // Collapse -0.0 so it formats with a plus sign.
    if rounded == 0.0 { 0.0 } else { rounded }
}

/// Formats a percentage with an explicit sign: `+5.0%`, `-1.7%`.
pub fn format_deviation(percent: f64) -> String {
    if percent >= 0.0 {
        format!("+{percent:.1}%")
    } else {
        format!("{percent:.1}%")
    }
}

/// Applies the acceptance policy to a computed deviation.
pub fn evaluate_deviation(policy: &QcPolicy, deviation: &QcDeviation) -> QcOutcome {
    let magnitude = deviation.percent.abs();
    let status = if magnitude <= policy.acceptance_limit_percent {
        QcStatus::Passed
    } else {
        QcStatus::Failed
    };
    let band = if magnitude <= policy.acceptance_limit_percent {
        DeviationBand::Acceptable
    } else if magnitude <= policy.warning_limit_percent {
        DeviationBand::Warning
    } else {
        DeviationBand::Critical
    };
    QcOutcome { status, band }
}

/// One evaluated QC sample.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QcRow {
    pub sample: QcSample,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deviation: Option<QcDeviation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<QcOutcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ClassifyError>,
}

/// QC results for a batch of control samples.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QcReport {
    pub rows: Vec<QcRow>,
    pub passed: usize,
    pub failed: usize,
    pub errors: usize,
}

impl QcReport {
    /// True if any sample failed acceptance or could not be evaluated.
    pub fn has_failures(&self) -> bool {
        self.failed > 0 || self.errors > 0
    }
}

/// Computes and evaluates every sample; a sample that cannot be computed
/// is counted under `errors` and the batch continues.
pub fn evaluate_samples(samples: &[QcSample], policy: &QcPolicy) -> QcReport {
    let mut report = QcReport::default();
    for sample in samples {
        let row = match compute_deviation(sample.observed, sample.expected) {
            Ok(deviation) => {
                let outcome = evaluate_deviation(policy, &deviation);
                match outcome.status {
                    QcStatus::Passed => report.passed += 1,
                    QcStatus::Failed => report.failed += 1,
                }
                QcRow {
                    sample: sample.clone(),
                    deviation: Some(deviation),
                    outcome: Some(outcome),
                    error: None,
                }
            }
            Err(error) => {
                warn!(
                    sample_id = sample.id.as_deref().unwrap_or("-"),
                    %error,
                    "QC sample could not be evaluated"
                );
                report.errors += 1;
                QcRow {
                    sample: sample.clone(),
                    deviation: None,
                    outcome: None,
                    error: Some(error),
                }
            }
        };
        report.rows.push(row);
    }
    info!(
        samples = samples.len(),
        passed = report.passed,
        failed = report.failed,
        errors = report.errors,
        "QC evaluation complete"
    );
    report
}
