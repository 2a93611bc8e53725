//! Report review: status transitions and audit-trail bookkeeping.

use chrono::{DateTime, Utc};
use patho_model::{AuditEntry, Report, ReportStatus, ReviewError, StatusChange};
use serde::Serialize;
use tracing::{info, warn};

/// Longest pathologist comment accepted on a test result.
pub const MAX_COMMENT_LENGTH: usize = 1000;

const DEFAULT_STATUS_DETAILS: &str = "Status changed";
const DEFAULT_REJECTION_REASON: &str = "No reason provided";
const TEST_COMMENT_ACTION: &str = "Test Comment Added";

/// Moves a report to `Approved` or `Rejected` and records the change.
///
/// The returned entry has already been appended to the report's audit
/// trail.
///
/// # Errors
///
/// [`ReviewError::InvalidTargetStatus`] if the requested status is not a
/// review outcome; the report is left untouched.
pub fn apply_status_change(
    report: &mut Report,
    change: &StatusChange,
    user: &str,
    now: DateTime<Utc>,
) -> Result<AuditEntry, ReviewError> {
    ensure_review_outcome(change)?;
    let previous = report.status;
    let comments = non_empty(change.comments.as_deref());
    let reason = non_empty(change.rejection_reason.as_deref());

    report.status = change.status;
    report.comments = Some(comments.unwrap_or_default().to_string());
    report.updated_at = Some(now);
    let details = match change.status {
        ReportStatus::Rejected => {
            report.rejected_at = Some(now);
            report.approved_at = None;
            report.rejection_reason = Some(reason.unwrap_or(DEFAULT_REJECTION_REASON).to_string());
            format!(
                "{} - {}",
                comments.unwrap_or(DEFAULT_STATUS_DETAILS),
                reason.unwrap_or_default()
            )
        }
        _ => {
            report.approved_at = Some(now);
            report.rejected_at = None;
            report.rejection_reason = None;
            comments.unwrap_or(DEFAULT_STATUS_DETAILS).to_string()
        }
    };

    let entry = AuditEntry {
        action: format!(
            "Status Changed from {} to {}",
            previous.as_str(),
            change.status.as_str()
        ),
        user: user.to_string(),
        details: details.trim().to_string(),
        timestamp: now,
    };
    report.audit_trail.push(entry.clone());
    info!(
        report_id = %report.id,
        from = previous.as_str(),
        to = change.status.as_str(),
        "report status changed"
    );
    Ok(entry)
}

/// Outcome of a bulk status change.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BulkOutcome {
    pub updated: Vec<String>,
    pub failures: Vec<BulkFailure>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BulkFailure {
    pub report_id: String,
    pub error: ReviewError,
}

/// Applies the same status change to every listed report.
///
/// Reports that cannot be found are reported per id; the rest proceed.
///
/// # Errors
///
/// [`ReviewError::EmptySelection`] for an empty id list and
/// [`ReviewError::InvalidTargetStatus`] for a non-review status. Both are
/// checked before any report is touched.
pub fn bulk_status_change(
    reports: &mut [Report],
    ids: &[String],
    change: &StatusChange,
    user: &str,
    now: DateTime<Utc>,
) -> Result<BulkOutcome, ReviewError> {
    if ids.is_empty() {
        return Err(ReviewError::EmptySelection);
    }
    ensure_review_outcome(change)?;

    let mut outcome = BulkOutcome::default();
    for id in ids {
        let Some(report) = reports.iter_mut().find(|report| &report.id == id) else {
            warn!(report_id = %id, "report not found for status change");
            outcome.failures.push(BulkFailure {
                report_id: id.clone(),
                error: ReviewError::ReportNotFound { id: id.clone() },
            });
            continue;
        };
        match apply_status_change(report, change, user, now) {
            Ok(_) => outcome.updated.push(id.clone()),
            Err(error) => outcome.failures.push(BulkFailure {
                report_id: id.clone(),
                error,
            }),
        }
    }
    info!(
        updated = outcome.updated.len(),
        failed = outcome.failures.len(),
        status = change.status.as_str(),
        "bulk status change complete"
    );
    Ok(outcome)
}

/// Stores a pathologist comment on one test result and audits it.
///
/// # Errors
///
/// [`ReviewError::EmptyComment`], [`ReviewError::CommentTooLong`] (after
/// trimming, measured in characters) or [`ReviewError::TestResultNotFound`].
pub fn add_test_comment(
    report: &mut Report,
    test_result_id: &str,
    comment: &str,
    user: &str,
    now: DateTime<Utc>,
) -> Result<AuditEntry, ReviewError> {
    let comment = comment.trim();
    if comment.is_empty() {
        return Err(ReviewError::EmptyComment);
    }
    let length = comment.chars().count();
    if length > MAX_COMMENT_LENGTH {
        return Err(ReviewError::CommentTooLong {
            length,
            max: MAX_COMMENT_LENGTH,
        });
    }
    let report_id = report.id.clone();
    let Some(test_result) = report.test_result_mut(test_result_id) else {
        return Err(ReviewError::TestResultNotFound {
            report_id,
            test_result_id: test_result_id.to_string(),
        });
    };
    test_result.pathologist_comment = Some(comment.to_string());
    let test_name = test_result
        .test_name
        .clone()
        .unwrap_or_else(|| format!("Test ID {test_result_id}"));

    let entry = AuditEntry {
        action: TEST_COMMENT_ACTION.to_string(),
        user: user.to_string(),
        details: format!("Comment added for test: {test_name}\nComment: \"{comment}\""),
        timestamp: now,
    };
    report.audit_trail.push(entry.clone());
    info!(report_id = %report_id, test_result_id, "test comment added");
    Ok(entry)
}

fn ensure_review_outcome(change: &StatusChange) -> Result<(), ReviewError> {
    if change.status.is_review_outcome() {
        Ok(())
    } else {
        Err(ReviewError::InvalidTargetStatus {
            status: change.status,
        })
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
