//! Pathology reports, their review status and audit trail.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::ReportStatus;
use crate::lab::{LabResult, Subject, TestResult};

/// One entry of a report's audit trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub action: String,
    pub user: String,
    #[serde(default)]
    pub details: String,
    pub timestamp: DateTime<Utc>,
}

/// A report for one patient visit, with its test results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub id: String,
    #[serde(default)]
    pub patient_name: Option<String>,
    pub subject: Subject,
    #[serde(default)]
    pub status: ReportStatus,
    #[serde(default)]
    pub comments: Option<String>,
    #[serde(default)]
    pub rejection_reason: Option<String>,
    #[serde(default)]
    pub approved_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub rejected_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub test_results: Vec<TestResult>,
    #[serde(default)]
    pub audit_trail: Vec<AuditEntry>,
}

impl Report {
    pub fn new(id: impl Into<String>, subject: Subject) -> Self {
        Self {
            id: id.into(),
            patient_name: None,
            subject,
            status: ReportStatus::Pending,
            comments: None,
            rejection_reason: None,
            approved_at: None,
            rejected_at: None,
            updated_at: None,
            test_results: Vec::new(),
            audit_trail: Vec::new(),
        }
    }

    /// Test results joined with the report's subject, ready to classify.
    pub fn lab_results(&self) -> Vec<LabResult> {
        self.test_results
            .iter()
            .map(|result| result.to_lab_result(&self.subject))
            .collect()
    }

    pub fn test_result_mut(&mut self, id: &str) -> Option<&mut TestResult> {
        self.test_results.iter_mut().find(|result| result.id == id)
    }

    /// Audit entries newest first. Entries sharing a timestamp keep
    /// reverse insertion order.
    pub fn audit_trail_desc(&self) -> Vec<&AuditEntry> {
        let mut entries: Vec<&AuditEntry> = self.audit_trail.iter().rev().collect();
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        entries
    }
}

/// A reviewer's request to move a report to a new status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusChange {
    pub status: ReportStatus,
    #[serde(default)]
    pub comments: Option<String>,
    #[serde(default)]
    pub rejection_reason: Option<String>,
}

impl StatusChange {
    pub fn approve(comments: Option<String>) -> Self {
        Self {
            status: ReportStatus::Approved,
            comments,
            rejection_reason: None,
        }
    }

    pub fn reject(comments: Option<String>, reason: Option<String>) -> Self {
        Self {
            status: ReportStatus::Rejected,
            comments,
            rejection_reason: reason,
        }
    }
}

/// Report counts by status, as shown on the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportStatusCounts {
    pub total: usize,
    pub approved: usize,
    pub pending: usize,
    pub rejected: usize,
}

impl ReportStatusCounts {
    pub fn from_reports(reports: &[Report]) -> Self {
        let mut counts = Self::default();
        for report in reports {
            counts.total += 1;
            match report.status {
                ReportStatus::Approved => counts.approved += 1,
                ReportStatus::Pending => counts.pending += 1,
                ReportStatus::Rejected => counts.rejected += 1,
            }
        }
        counts
    }
}
