//! Quality-control samples and their evaluation outcomes.

use serde::{Deserialize, Serialize};

/// A control sample run with a known expected value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QcSample {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub test_name: Option<String>,
    pub expected: f64,
    pub observed: f64,
    #[serde(default)]
    pub unit: Option<String>,
}

impl QcSample {
    pub fn new(expected: f64, observed: f64) -> Self {
        Self {
            id: None,
            test_name: None,
            expected,
            observed,
            unit: None,
        }
    }
}

/// Percent deviation of an observed value from its expected value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QcDeviation {
    /// Rounded to one decimal place.
    pub percent: f64,
    /// Signed display form, e.g. `"+5.0%"` or `"-1.7%"`.
    pub formatted: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QcStatus {
    Passed,
    Failed,
}

impl QcStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            QcStatus::Passed => "Passed",
            QcStatus::Failed => "Failed",
        }
    }
}

/// Severity band of a deviation, used for highlighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviationBand {
    Acceptable,
    Warning,
    Critical,
}

/// Outcome of applying a [`crate::QcPolicy`] to a deviation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QcOutcome {
    pub status: QcStatus,
    pub band: DeviationBand,
}
