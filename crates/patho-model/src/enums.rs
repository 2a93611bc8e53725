//! Type-safe enumerations for lab-result classification.
//!
//! These enums replace the string literals used by the portal's database
//! rows (`"male"`, `"approved"`, ...) with closed sets that the compiler
//! can check.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Demographic bucket a reference range is keyed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RangeBucket {
    /// Subjects below the child age cutoff, regardless of gender.
    Child,
    /// Adult male subjects, and the default for unrecognised genders.
    Male,
    /// Adult female subjects.
    Female,
}

impl RangeBucket {
    /// Returns the canonical lower-case name used in storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            RangeBucket::Child => "child",
            RangeBucket::Male => "male",
            RangeBucket::Female => "female",
        }
    }
}

impl fmt::Display for RangeBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RangeBucket {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "child" => Ok(RangeBucket::Child),
            "male" => Ok(RangeBucket::Male),
            "female" => Ok(RangeBucket::Female),
            _ => Err(format!("Unknown range bucket: {s}")),
        }
    }
}

/// Outcome of classifying a single lab value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Normal,
    Abnormal,
    /// The value or one of the selected bounds could not be interpreted.
    Indeterminate,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Normal => "normal",
            Verdict::Abnormal => "abnormal",
            Verdict::Indeterminate => "indeterminate",
        }
    }

    /// Human-facing label shown next to a result.
    pub fn label(&self) -> &'static str {
        match self {
            Verdict::Normal => "Normal",
            Verdict::Abnormal => "Abnormal",
            Verdict::Indeterminate => "Unable to evaluate",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Why a result was classified as [`Verdict::Indeterminate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndeterminateReason {
    MissingValue,
    InvalidValue,
    MissingLower,
    InvalidLower,
    MissingUpper,
    InvalidUpper,
}

impl IndeterminateReason {
    pub fn description(&self) -> &'static str {
        match self {
            IndeterminateReason::MissingValue => "result value is missing",
            IndeterminateReason::InvalidValue => "result value is not numeric",
            IndeterminateReason::MissingLower => "lower bound is missing",
            IndeterminateReason::InvalidLower => "lower bound is not numeric",
            IndeterminateReason::MissingUpper => "upper bound is missing",
            IndeterminateReason::InvalidUpper => "upper bound is not numeric",
        }
    }
}

impl fmt::Display for IndeterminateReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Review status of a pathology report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl ReportStatus {
    /// Lower-case name as stored and as written into audit actions.
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportStatus::Pending => "pending",
            ReportStatus::Approved => "approved",
            ReportStatus::Rejected => "rejected",
        }
    }

    /// Capitalized name for display.
    pub fn label(&self) -> &'static str {
        match self {
            ReportStatus::Pending => "Pending",
            ReportStatus::Approved => "Approved",
            ReportStatus::Rejected => "Rejected",
        }
    }

    /// Returns true if a report may be moved into this status by a reviewer.
    pub fn is_review_outcome(&self) -> bool {
        matches!(self, ReportStatus::Approved | ReportStatus::Rejected)
    }
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for ReportStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(ReportStatus::Pending),
            "approved" => Ok(ReportStatus::Approved),
            "rejected" => Ok(ReportStatus::Rejected),
            _ => Err(format!("Unknown report status: {s}")),
        }
    }
}
