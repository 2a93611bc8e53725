//! Lab results, subjects and reference ranges.

use serde::{Deserialize, Serialize};

use crate::enums::RangeBucket;
use crate::value::RawValue;

/// Demographics that decide which reference range applies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    /// Gender as stored. Compared case-sensitively against `"male"` and
    /// `"female"`; normalize before classifying.
    #[serde(default)]
    pub gender: Option<String>,
    /// Age in years.
    pub age: f64,
}

impl Subject {
    pub fn new(gender: Option<&str>, age: f64) -> Self {
        Self {
            gender: gender.map(str::to_string),
            age,
        }
    }
}

/// Lower and upper bound of a reference range, as stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Range {
    #[serde(default)]
    pub lower: Option<RawValue>,
    #[serde(default)]
    pub upper: Option<RawValue>,
}

impl Range {
    pub fn new(lower: impl Into<RawValue>, upper: impl Into<RawValue>) -> Self {
        Self {
            lower: Some(lower.into()),
            upper: Some(upper.into()),
        }
    }
}

/// Reference ranges for one test, keyed by demographic bucket.
///
/// A `None` bucket means the range was never configured for that bucket,
/// which is distinct from a configured range with unparseable bounds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReferenceRanges {
    #[serde(default)]
    pub child: Option<Range>,
    #[serde(default)]
    pub male: Option<Range>,
    #[serde(default)]
    pub female: Option<Range>,
}

impl ReferenceRanges {
    pub fn get(&self, bucket: RangeBucket) -> Option<&Range> {
        match bucket {
            RangeBucket::Child => self.child.as_ref(),
            RangeBucket::Male => self.male.as_ref(),
            RangeBucket::Female => self.female.as_ref(),
        }
    }

    #[must_use]
    pub fn with(mut self, bucket: RangeBucket, range: Range) -> Self {
        let slot = match bucket {
            RangeBucket::Child => &mut self.child,
            RangeBucket::Male => &mut self.male,
            RangeBucket::Female => &mut self.female,
        };
        *slot = Some(range);
        self
    }
}

/// A single lab result together with everything needed to classify it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabResult {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub test_name: Option<String>,
    #[serde(default)]
    pub value: Option<RawValue>,
    #[serde(default)]
    pub unit: Option<String>,
    pub subject: Subject,
    #[serde(default)]
    pub ranges: ReferenceRanges,
}

impl LabResult {
    pub fn new(value: Option<RawValue>, subject: Subject, ranges: ReferenceRanges) -> Self {
        Self {
            id: None,
            test_name: None,
            value,
            unit: None,
            subject,
            ranges,
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn with_test_name(mut self, name: impl Into<String>) -> Self {
        self.test_name = Some(name.into());
        self
    }
}

/// A test result row inside a report; the subject lives on the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestResult {
    pub id: String,
    #[serde(default)]
    pub test_name: Option<String>,
    #[serde(default)]
    pub value: Option<RawValue>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub ranges: ReferenceRanges,
    #[serde(default)]
    pub pathologist_comment: Option<String>,
}

impl TestResult {
    /// Joins this row with the report's subject.
    pub fn to_lab_result(&self, subject: &Subject) -> LabResult {
        LabResult {
            id: Some(self.id.clone()),
            test_name: self.test_name.clone(),
            value: self.value.clone(),
            unit: self.unit.clone(),
            subject: subject.clone(),
            ranges: self.ranges.clone(),
        }
    }
}
