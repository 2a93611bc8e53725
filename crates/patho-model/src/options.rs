//! Configuration options for classification and QC evaluation.

use serde::{Deserialize, Serialize};

use crate::enums::RangeBucket;

/// Age below which the child range applies.
pub const DEFAULT_CHILD_AGE_CUTOFF: f64 = 18.0;

/// Options controlling reference-range selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierOptions {
    /// Subjects younger than this (in years) use the child range.
    pub child_age_cutoff: f64,

    /// Bucket used for adults whose gender is missing or is neither
    /// `"male"` nor `"female"`. Defaults to `male`.
    pub fallback_bucket: RangeBucket,
}

impl Default for ClassifierOptions {
    fn default() -> Self {
        Self {
            child_age_cutoff: DEFAULT_CHILD_AGE_CUTOFF,
            fallback_bucket: RangeBucket::Male,
        }
    }
}

impl ClassifierOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_child_age_cutoff(mut self, cutoff: f64) -> Self {
        self.child_age_cutoff = cutoff;
        self
    }

    #[must_use]
    pub fn with_fallback_bucket(mut self, bucket: RangeBucket) -> Self {
        self.fallback_bucket = bucket;
        self
    }
}

/// Acceptance rule for QC control runs.
///
/// The deviation calculator never decides pass/fail; this policy does.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QcPolicy {
    /// A run passes when `|deviation| <= acceptance_limit_percent`.
    pub acceptance_limit_percent: f64,
    /// Deviations above the acceptance limit but within this one are
    /// flagged as warnings rather than critical.
    pub warning_limit_percent: f64,
}

impl Default for QcPolicy {
    fn default() -> Self {
        Self {
            acceptance_limit_percent: 2.0,
            warning_limit_percent: 5.0,
        }
    }
}

impl QcPolicy {
    #[must_use]
    pub fn with_acceptance_limit(mut self, percent: f64) -> Self {
        self.acceptance_limit_percent = percent;
        self
    }

    #[must_use]
    pub fn with_warning_limit(mut self, percent: f64) -> Self {
        self.warning_limit_percent = percent;
        self
    }
}
