//! Integration tests for loading files from disk.

use std::fs;

use chrono::{TimeZone, Utc};
use patho_ingest::{
    IngestError, load_config, load_lab_results, load_qc_samples, load_reports, save_reports,
};
use patho_model::{
    AuditEntry, Range, RangeBucket, RawValue, Report, ReportStatus, Subject, TestResult,
};
use tempfile::TempDir;

const RESULTS_CSV: &str = "\
ID,Test_Name,Value,Unit,Gender,Age,Child_Lower,Child_Upper,Male_Lower,Male_Upper,Female_Lower,Female_Upper
TR-1,Fasting Glucose,145,mg/dL, Female ,25,60,100,70,110,70,99
TR-2,Hemoglobin,,g/dL,male,40,,,13.5,17.5,12,15.5
TR-3,Protein,2+,,,9,0,0.15,,,,
TR-4,TSH,2.1,mIU/L,female,unknown,,,0.4,4.0,0.4,4.0
TR-5,ALT,30,U/L,male,,,,7,56,7,45
";

#[test]
fn test_load_lab_results_csv() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("results.csv");
    fs::write(&path, RESULTS_CSV).unwrap();

    let batch = load_lab_results(&path).unwrap();
    assert_eq!(batch.records.len(), 5);
    assert!(batch.rejected.is_empty());
    assert_eq!(batch.records[3].id.as_deref(), Some("TR-4"));
    assert!(batch.records[3].subject.age.is_nan());
    assert_eq!(batch.records[4].id.as_deref(), Some("TR-5"));
    assert!(batch.records[4].subject.age.is_nan());
    assert_eq!(batch.records[4].ranges.male, Some(Range::new("7", "56")));

    let glucose = &batch.records[0];
    assert_eq!(glucose.id.as_deref(), Some("TR-1"));
    assert_eq!(glucose.subject.gender.as_deref(), Some("female"));
    assert_eq!(glucose.subject.age, 25.0);
    assert_eq!(glucose.value, Some(RawValue::Text("145".to_string())));
    assert_eq!(
        glucose.ranges.female,
        Some(Range::new("70", "99"))
    );

    let hemoglobin = &batch.records[1];
    assert_eq!(hemoglobin.value, None);
    assert_eq!(hemoglobin.ranges.child, None);

    let protein = &batch.records[2];
    assert_eq!(protein.subject.gender, None);
    assert_eq!(protein.unit, None);
    assert!(protein.ranges.get(RangeBucket::Male).is_none());
    assert_eq!(protein.ranges.child, Some(Range::new("0", "0.15")));
}

#[test]
fn test_load_lab_results_json() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("results.json");
    fs::write(
        &path,
        r#"[
            {
                "id": "TR-1",
                "value": 145,
                "subject": { "gender": "female", "age": 25 },
                "ranges": { "female": { "lower": 70, "upper": "99" } }
            }
        ]"#,
    )
    .unwrap();

    let batch = load_lab_results(&path).unwrap();
    assert!(batch.rejected.is_empty());
    assert_eq!(batch.records.len(), 1);
    assert_eq!(batch.records[0].value, Some(RawValue::Number(145.0)));
    assert_eq!(
        batch.records[0].ranges.female,
        Some(Range::new(70.0, "99"))
    );
}

#[test]
fn test_load_qc_samples_csv() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("qc.csv");
    fs::write(
        &path,
        "id,test_name,expected,observed,unit\n\
         QC-1,Hemoglobin,12.5,12.4,g/dL\n\
         QC-2,Glucose,abc,98,mg/dL\n\
         QC-3,Cholesterol,250,265,mg/dL\n",
    )
    .unwrap();

    let batch = load_qc_samples(&path).unwrap();
    assert_eq!(batch.records.len(), 2);
    assert_eq!(batch.records[1].id.as_deref(), Some("QC-3"));
    assert_eq!(batch.records[1].observed, 265.0);
    assert_eq!(batch.rejected.len(), 1);
    assert_eq!(batch.rejected[0].reason, "invalid expected 'abc'");
}

#[test]
fn test_unsupported_extension() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("results.xlsx");
    fs::write(&path, "").unwrap();
    assert!(matches!(
        load_lab_results(&path),
        Err(IngestError::UnsupportedFormat { .. })
    ));
}

#[test]
fn test_malformed_json_is_typed() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("reports.json");
    fs::write(&path, "{ not json").unwrap();
    assert!(matches!(load_reports(&path), Err(IngestError::Json { .. })));
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let err = load_reports(&dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, IngestError::Io { .. }));
}

#[test]
fn test_reports_save_and_reload() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("store").join("reports.json");
    let mut report = Report::new("RPT-001", Subject::new(Some("male"), 52.0));
    report.status = ReportStatus::Rejected;
    report.rejection_reason = Some("Recollect".to_string());
    report.test_results.push(TestResult {
        id: "TR-1".to_string(),
        test_name: Some("Hemoglobin".to_string()),
        value: Some(RawValue::Text("8.5".to_string())),
        unit: Some("g/dL".to_string()),
        ranges: Default::default(),
        pathologist_comment: Some("Repeat".to_string()),
    });
    report.audit_trail.push(AuditEntry {
        action: "Status Changed from pending to rejected".to_string(),
        user: "Dr. Mehta".to_string(),
        details: "Status changed - Recollect".to_string(),
        timestamp: Utc.with_ymd_and_hms(2025, 6, 2, 9, 30, 0).unwrap(),
    });

    save_reports(&path, std::slice::from_ref(&report)).unwrap();
    let loaded = load_reports(&path).unwrap();
    assert_eq!(loaded, vec![report]);
    assert!(!path.with_extension("json.tmp").exists());
}

#[test]
fn test_load_config_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("patho.toml");
    fs::write(
        &path,
        "[classifier]\nchild_age_cutoff = 16\n\n[qc]\nwarning_limit_percent = 10.0\n",
    )
    .unwrap();
    let config = load_config(&path).unwrap();
    assert_eq!(config.classifier.child_age_cutoff, 16.0);
    assert_eq!(config.qc.acceptance_limit_percent, 2.0);
    assert_eq!(config.qc.warning_limit_percent, 10.0);
}

#[test]
fn test_load_config_rejects_unknown_keys() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("patho.toml");
    fs::write(&path, "[classifer]\nchild_age_cutoff = 16\n").unwrap();
    assert!(matches!(load_config(&path), Err(IngestError::Toml { .. })));
}
