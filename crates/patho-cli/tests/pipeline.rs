//! Integration tests for the per-command pipelines.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{TimeZone, Utc};
use patho_cli::pipeline::{
    classify_file, comment_on_test, compute_stats, review_reports, run_qc_file, run_qc_single,
    view_reports,
};
use patho_ingest::load_reports;
use patho_model::{ClassifierOptions, ClassifyError, QcPolicy, ReportStatus, StatusChange, Verdict};
use tempfile::TempDir;

const REPORTS_JSON: &str = r#"[
  {
    "id": "RPT-001",
    "patient_name": "Asha Verma",
    "subject": { "gender": "female", "age": 25 },
    "test_results": [
      {
        "id": "TR-1",
        "test_name": "Fasting Glucose",
        "value": "145",
        "unit": "mg/dL",
        "ranges": {
          "child": { "lower": 60, "upper": 100 },
          "male": { "lower": 70, "upper": 110 },
          "female": { "lower": 70, "upper": 99 }
        }
      },
      {
        "id": "TR-2",
        "test_name": "Hemoglobin",
        "value": 13.1,
        "unit": "g/dL",
        "ranges": { "female": { "lower": 12, "upper": 15.5 } }
      }
    ]
  },
  {
    "id": "RPT-002",
    "subject": { "gender": "male", "age": 9 },
    "status": "approved",
    "test_results": [
      {
        "id": "TR-3",
        "test_name": "Protein",
        "value": "trace",
        "ranges": { "child": { "lower": 0, "upper": 0.15 } }
      }
    ]
  }
]"#;

fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn reports_file(dir: &TempDir) -> PathBuf {
    write(dir, "reports.json", REPORTS_JSON)
}

fn now() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 2, 9, 30, 0).unwrap()
}

#[test]
fn test_stats_over_results_and_reports() {
    let dir = TempDir::new().unwrap();
    let results = write(
        &dir,
        "results.csv",
        "id,test_name,value,unit,gender,age,child_lower,child_upper,male_lower,male_upper,female_lower,female_upper\n\
         TR-10,ALT,30,U/L,male,44,,,7,56,7,45\n\
         TR-11,ALT,30,U/L,male,abc,,,7,56,7,45\n",
    );
    let reports = reports_file(&dir);

    let stats = compute_stats(
        Some(results.as_path()),
        Some(reports.as_path()),
        &ClassifierOptions::default(),
    )
    .unwrap();
    let tests = &stats.tests;
    assert_eq!(tests.total, 5);
    assert_eq!(tests.normal, 2);
    assert_eq!(tests.abnormal, 1);
    assert_eq!(tests.indeterminate, 1);
    assert_eq!(tests.errors, 1);
    assert_eq!(tests.unevaluated(), 2);
    assert_eq!(stats.reports.pending, 1);
    assert_eq!(stats.reports.approved, 1);
}

#[test]
fn test_stats_counts_rows_with_unreadable_age() {
    let dir = TempDir::new().unwrap();
    let results = write(
        &dir,
        "results.csv",
        "id,test_name,value,gender,age,male_lower,male_upper\n\
         TR-20,ALT,30,male,44,7,56\n\
         TR-21,ALT,30,male,unknown,7,56\n",
    );

    let stats = compute_stats(Some(results.as_path()), None, &ClassifierOptions::default())
        .unwrap();
    let tests = &stats.tests;
    assert_eq!(tests.total, 2);
    assert_eq!(tests.normal, 1);
    assert_eq!(tests.errors, 1);
    assert!(tests.has_unevaluated());
    assert_eq!(tests.failures.len(), 1);
    assert_eq!(tests.failures[0].id.as_deref(), Some("TR-21"));
    assert!(matches!(tests.failures[0].error, ClassifyError::InvalidAge { .. }));

    let outcome = classify_file(&results, &ClassifierOptions::default()).unwrap();
    assert_eq!(outcome.rows.len(), 2);
    assert_eq!(outcome.rows[1].verdict, None);
    assert_eq!(outcome.rows[1].label, "Invalid age");
    assert_eq!(outcome.summary.errors, 1);
}

#[test]
fn test_stats_needs_an_input() {
    assert!(compute_stats(None, None, &ClassifierOptions::default()).is_err());
}

#[test]
fn test_classify_file_rows() {
    let dir = TempDir::new().unwrap();
    let results = write(
        &dir,
        "results.json",
        r#"[{"id": "TR-1", "value": 145, "subject": {"gender": "female", "age": 25},
             "ranges": {"female": {"lower": 70, "upper": 99}}}]"#,
    );
    let outcome = classify_file(&results, &ClassifierOptions::default()).unwrap();
    assert_eq!(outcome.rows.len(), 1);
    assert_eq!(outcome.rows[0].verdict, Some(Verdict::Abnormal));
    assert_eq!(outcome.rows[0].reference_range, "70 - 99");
    assert_eq!(outcome.summary.abnormal, 1);
}

#[test]
fn test_view_selected_report() {
    let dir = TempDir::new().unwrap();
    let reports = reports_file(&dir);
    let views = view_reports(
        &reports,
        &["RPT-001".to_string()],
        &ClassifierOptions::default(),
    )
    .unwrap();
    assert_eq!(views.len(), 1);
    let view = &views[0];
    assert_eq!(view.status, "Pending");
    assert!(view.rows[0].is_abnormal);
    assert_eq!(view.rows[0].label, "Abnormal");
    assert!(!view.rows[1].is_abnormal);
    assert_eq!(view.rows[1].label, "Normal");

    let all = view_reports(&reports, &[], &ClassifierOptions::default()).unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[1].rows[0].label, "Unable to evaluate");
}

#[test]
fn test_view_unknown_report_fails() {
    let dir = TempDir::new().unwrap();
    let reports = reports_file(&dir);
    let err = view_reports(&reports, &["RPT-404".to_string()], &ClassifierOptions::default())
        .unwrap_err();
    assert_eq!(err.to_string(), "report not found: RPT-404");
}

#[test]
fn test_qc_file_run() {
    let dir = TempDir::new().unwrap();
    let samples = write(
        &dir,
        "qc.csv",
        "id,test_name,expected,observed,unit\n\
         QC-1,Hemoglobin,12.5,12.4,g/dL\n\
         QC-2,Cholesterol,250,265,mg/dL\n",
    );
    let run = run_qc_file(&samples, &QcPolicy::default()).unwrap();
    assert_eq!(run.report.passed, 1);
    assert_eq!(run.report.failed, 1);
    assert!(run.has_failures());
    let formatted: Vec<&str> = run
        .report
        .rows
        .iter()
        .filter_map(|row| row.deviation.as_ref())
        .map(|deviation| deviation.formatted.as_str())
        .collect();
    assert_eq!(formatted, vec!["-0.8%", "+6.0%"]);
}

#[test]
fn test_qc_single_division_by_zero_is_a_failure() {
    let run = run_qc_single(0.0, 4.0, &QcPolicy::default());
    assert_eq!(run.report.errors, 1);
    assert!(run.has_failures());
    assert!(!run_qc_single(100.0, 101.0, &QcPolicy::default()).has_failures());
}

#[test]
fn test_review_writes_output_and_reports_missing_ids() {
    let dir = TempDir::new().unwrap();
    let reports = reports_file(&dir);
    let output = dir.path().join("reviewed.json");
    let outcome = review_reports(
        &reports,
        Some(output.as_path()),
        &["RPT-001".to_string(), "RPT-404".to_string()],
        &StatusChange::reject(None, Some("Haemolysed sample".to_string())),
        "Dr. Mehta",
        now(),
    )
    .unwrap();
    insta::assert_json_snapshot!(outcome, @r#"
    {
      "updated": [
        "RPT-001"
      ],
      "failures": [
        {
          "report_id": "RPT-404",
          "error": {
            "kind": "report_not_found",
            "id": "RPT-404"
          }
        }
      ]
    }
    "#);

    let saved = load_reports(&output).unwrap();
    assert_eq!(saved[0].status, ReportStatus::Rejected);
    assert_eq!(saved[0].rejection_reason.as_deref(), Some("Haemolysed sample"));
    assert_eq!(saved[0].audit_trail.len(), 1);
    assert_eq!(
        saved[0].audit_trail[0].action,
        "Status Changed from pending to rejected"
    );
    assert_eq!(load_reports(&reports).unwrap()[0].status, ReportStatus::Pending);
}

#[test]
fn test_review_with_no_matches_leaves_store_untouched() {
    let dir = TempDir::new().unwrap();
    let reports = reports_file(&dir);
    let outcome = review_reports(
        &reports,
        None,
        &["RPT-404".to_string()],
        &StatusChange::approve(None),
        "Dr. Mehta",
        now(),
    )
    .unwrap();
    assert!(outcome.updated.is_empty());
    assert_eq!(fs::read_to_string(&reports).unwrap(), REPORTS_JSON);
}

#[test]
fn test_comment_saved_in_place() {
    let dir = TempDir::new().unwrap();
    let reports = reports_file(&dir);
    let entry = comment_on_test(
        &reports,
        None,
        "RPT-001",
        "TR-1",
        "Repeat fasting sample",
        "Dr. Mehta",
        now(),
    )
    .unwrap();
    assert_eq!(entry.action, "Test Comment Added");

    let saved = load_reports(Path::new(&reports)).unwrap();
    assert_eq!(
        saved[0].test_results[0].pathologist_comment.as_deref(),
        Some("Repeat fasting sample")
    );
    assert_eq!(saved[0].audit_trail, vec![entry]);
}

#[test]
fn test_comment_on_unknown_test_fails() {
    let dir = TempDir::new().unwrap();
    let reports = reports_file(&dir);
    let err = comment_on_test(&reports, None, "RPT-001", "TR-9", "ok", "Dr. Mehta", now())
        .unwrap_err();
    assert!(format!("{err:#}").contains("TR-9"));
}
