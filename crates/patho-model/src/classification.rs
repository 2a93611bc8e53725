use serde::{Deserialize, Serialize};

use crate::enums::{IndeterminateReason, RangeBucket, Verdict};
use crate::error::ClassifyError;

/// Result of classifying one lab value against its selected range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub verdict: Verdict,
    /// Set only when `verdict` is [`Verdict::Indeterminate`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<IndeterminateReason>,
    pub bucket: RangeBucket,
    /// Parsed inputs, where parsing succeeded.
    pub value: Option<f64>,
    pub lower: Option<f64>,
    pub upper: Option<f64>,
}

impl Classification {
    pub fn is_abnormal(&self) -> bool {
        self.verdict == Verdict::Abnormal
    }
}

/// A result that could not be classified at all.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationFailure {
    /// Position in the input batch.
    pub index: usize,
    pub id: Option<String>,
    pub error: ClassifyError,
}

/// Verdict counts over a batch of results.
///
/// `normal + abnormal + indeterminate + errors == total` always holds.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ClassificationSummary {
    pub total: usize,
    pub normal: usize,
    pub abnormal: usize,
    pub indeterminate: usize,
    pub errors: usize,
    pub failures: Vec<ClassificationFailure>,
}

impl ClassificationSummary {
    pub fn record(&mut self, verdict: Verdict) {
        self.total += 1;
        match verdict {
            Verdict::Normal => self.normal += 1,
            Verdict::Abnormal => self.abnormal += 1,
            Verdict::Indeterminate => self.indeterminate += 1,
        }
    }

    pub fn record_failure(&mut self, failure: ClassificationFailure) {
        self.total += 1;
        self.errors += 1;
        self.failures.push(failure);
    }

    /// Results that received neither a normal nor an abnormal verdict.
    pub fn unevaluated(&self) -> usize {
        self.indeterminate + self.errors
    }

    pub fn has_unevaluated(&self) -> bool {
        self.unevaluated() > 0
    }
}
