//! Report-viewer annotation: one display row per test result.

use patho_model::{
    AuditEntry, ClassificationSummary, ClassifierOptions, ClassifyError, IndeterminateReason,
    LabResult, Report, Verdict, format_numeric,
};
use serde::Serialize;

use crate::aggregate::aggregate;
use crate::classify::classify;

const MISSING: &str = "-";

/// A test result shaped for display, with its abnormal flag.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnotatedRow {
    pub id: Option<String>,
    pub parameter: String,
    pub value: String,
    pub unit: String,
    /// Selected range as `"lower - upper"`, or `"-"` when it cannot be shown.
    pub reference_range: String,
    pub verdict: Option<Verdict>,
    pub label: String,
    /// True only for an abnormal verdict; indeterminate rows are never flagged.
    pub is_abnormal: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<IndeterminateReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ClassifyError>,
}

/// Annotates a single result. Classification errors are carried on the
/// row rather than returned.
pub fn annotate(result: &LabResult, options: &ClassifierOptions) -> AnnotatedRow {
    let parameter = result
        .test_name
        .clone()
        .unwrap_or_else(|| MISSING.to_string());
    let value = result
        .value
        .as_ref()
        .map_or_else(|| MISSING.to_string(), ToString::to_string);
    let unit = result.unit.clone().unwrap_or_default();
    match classify(result, options) {
        Ok(classification) => {
            let reference_range = match (classification.lower, classification.upper) {
                (Some(lower), Some(upper)) => {
                    format!("{} - {}", format_numeric(lower), format_numeric(upper))
                }
                _ => MISSING.to_string(),
            };
            AnnotatedRow {
                id: result.id.clone(),
                parameter,
                value,
                unit,
                reference_range,
                verdict: Some(classification.verdict),
                label: classification.verdict.label().to_string(),
                is_abnormal: classification.is_abnormal(),
                reason: classification.reason,
                error: None,
            }
        }
        Err(error) => AnnotatedRow {
            id: result.id.clone(),
            parameter,
            value,
            unit,
            reference_range: MISSING.to_string(),
            verdict: None,
            label: error.label().to_string(),
            is_abnormal: false,
            reason: None,
            error: Some(error),
        },
    }
}

/// A report prepared for the viewer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportView {
    pub id: String,
    pub patient_name: Option<String>,
    pub status: String,
    pub rows: Vec<AnnotatedRow>,
    pub summary: ClassificationSummary,
    /// Newest first.
    pub audit_trail: Vec<AuditEntry>,
}

pub fn annotate_report(report: &Report, options: &ClassifierOptions) -> ReportView {
    let results = report.lab_results();
    let rows = results
        .iter()
        .map(|result| annotate(result, options))
        .collect();
    ReportView {
        id: report.id.clone(),
        patient_name: report.patient_name.clone(),
        status: report.status.label().to_string(),
        rows,
        summary: aggregate(&results, options),
        audit_trail: report.audit_trail_desc().into_iter().cloned().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use patho_model::{Range, RangeBucket, ReferenceRanges, Subject};

    fn options() -> ClassifierOptions {
        ClassifierOptions::default()
    }

    #[test]
    fn test_annotate_abnormal_row() {
        let result = LabResult::new(
            Some("145".into()),
            Subject::new(Some("female"), 25.0),
            ReferenceRanges::default().with(RangeBucket::Female, Range::new(70.0, 99.0)),
        )
        .with_id("TR-1")
        .with_test_name("Fasting Glucose");
        let row = annotate(&result, &options());
        assert_eq!(row.parameter, "Fasting Glucose");
        assert_eq!(row.value, "145");
        assert_eq!(row.reference_range, "70 - 99");
        assert_eq!(row.verdict, Some(Verdict::Abnormal));
        assert_eq!(row.label, "Abnormal");
        assert!(row.is_abnormal);
    }

    #[test]
    fn test_annotate_indeterminate_is_not_flagged() {
        let result = LabResult::new(
            Some("2+".into()),
            Subject::new(Some("male"), 40.0),
            ReferenceRanges::default().with(RangeBucket::Male, Range::new("0.4", "4.0")),
        );
        let row = annotate(&result, &options());
        assert_eq!(row.verdict, Some(Verdict::Indeterminate));
        assert_eq!(row.label, "Unable to evaluate");
        assert_eq!(row.reason, Some(IndeterminateReason::InvalidValue));
        assert_eq!(row.reference_range, "0.4 - 4");
        assert!(!row.is_abnormal);
    }

    #[test]
    fn test_annotate_error_row() {
        let result = LabResult::new(
            Some(3.0.into()),
            Subject::new(None, 5.0),
            ReferenceRanges::default(),
        );
        let row = annotate(&result, &options());
        assert_eq!(row.verdict, None);
        assert_eq!(row.label, "Range not configured");
        assert_eq!(row.reference_range, "-");
        assert_eq!(row.parameter, "-");
        assert!(row.error.is_some());
        assert!(!row.is_abnormal);
    }
}
