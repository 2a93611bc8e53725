//! Tests for patho-model types.

use chrono::{TimeZone, Utc};
use patho_model::{
    AuditEntry, ClassifierOptions, ClassifyError, LabResult, QcPolicy, RangeBucket, Report,
    ReportStatus, ReportStatusCounts, Subject, TestResult,
};

fn entry(action: &str, hour: u32) -> AuditEntry {
    AuditEntry {
        action: action.to_string(),
        user: "Dr. Rao".to_string(),
        details: String::new(),
        timestamp: Utc.with_ymd_and_hms(2025, 3, 14, hour, 0, 0).unwrap(),
    }
}

#[test]
fn lab_result_accepts_missing_optional_fields() {
    let json = r#"{
        "subject": { "age": 40 },
        "ranges": { "male": { "lower": "13.5", "upper": 17.5 } }
    }"#;
    let result: LabResult = serde_json::from_str(json).expect("deserialize result");
    assert!(result.value.is_none());
    assert!(result.subject.gender.is_none());
    assert!(result.ranges.child.is_none());
    assert!(result.ranges.female.is_none());
    let male = result.ranges.get(RangeBucket::Male).expect("male range");
    assert_eq!(male.lower.as_ref().and_then(|v| v.as_f64()), Some(13.5));
    assert_eq!(male.upper.as_ref().and_then(|v| v.as_f64()), Some(17.5));
}

#[test]
fn report_status_counts() {
    let subject = Subject::new(Some("male"), 30.0);
    let mut reports = vec![
        Report::new("RPT-001", subject.clone()),
        Report::new("RPT-002", subject.clone()),
        Report::new("RPT-003", subject),
    ];
    reports[0].status = ReportStatus::Approved;
    reports[1].status = ReportStatus::Rejected;

    let counts = ReportStatusCounts::from_reports(&reports);
    assert_eq!(counts.total, 3);
    assert_eq!(counts.approved, 1);
    assert_eq!(counts.rejected, 1);
    assert_eq!(counts.pending, 1);
}

#[test]
fn report_lab_results_carry_report_subject() {
    let mut report = Report::new("RPT-010", Subject::new(Some("female"), 52.0));
    report.test_results.push(TestResult {
        id: "TR-1".to_string(),
        test_name: Some("TSH".to_string()),
        value: Some("8.2".into()),
        unit: Some("mIU/L".to_string()),
        ranges: Default::default(),
        pathologist_comment: None,
    });
    let results = report.lab_results();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id.as_deref(), Some("TR-1"));
    assert_eq!(results[0].subject, report.subject);
}

#[test]
fn audit_trail_is_listed_newest_first() {
    let mut report = Report::new("RPT-011", Subject::new(None, 61.0));
    report.audit_trail.push(entry("Report Created", 8));
    report.audit_trail.push(entry("Test Comment Added", 10));
    report.audit_trail.push(entry("Status Changed from pending to approved", 10));
    report.audit_trail.push(entry("Viewed", 9));

    let actions: Vec<&str> = report
        .audit_trail_desc()
        .into_iter()
        .map(|e| e.action.as_str())
        .collect();
    assert_eq!(
        actions,
        vec![
            "Status Changed from pending to approved",
            "Test Comment Added",
            "Viewed",
            "Report Created",
        ]
    );
}

#[test]
fn options_defaults_and_partial_deserialize() {
    let options = ClassifierOptions::default();
    assert_eq!(options.child_age_cutoff, 18.0);
    assert_eq!(options.fallback_bucket, RangeBucket::Male);

    let partial: ClassifierOptions =
        serde_json::from_str(r#"{ "fallback_bucket": "female" }"#).expect("deserialize options");
    assert_eq!(partial.child_age_cutoff, 18.0);
    assert_eq!(partial.fallback_bucket, RangeBucket::Female);

    let policy = QcPolicy::default();
    assert_eq!(policy.acceptance_limit_percent, 2.0);
    assert_eq!(policy.warning_limit_percent, 5.0);
}

#[test]
fn classify_error_serializes_with_kind_tag() {
    let error = ClassifyError::RangeNotConfigured {
        bucket: RangeBucket::Female,
    };
    let json = serde_json::to_value(&error).expect("serialize error");
    assert_eq!(json["kind"], "range_not_configured");
    assert_eq!(json["bucket"], "female");
    assert_eq!(
        error.to_string(),
        "reference range not configured for female bucket"
    );
}
