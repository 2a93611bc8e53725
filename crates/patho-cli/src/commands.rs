use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;
use tracing::warn;

use patho_cli::pipeline::{
    classify_file, comment_on_test, compute_stats, review_reports, run_qc_file, run_qc_single,
    view_reports,
};
use patho_ingest::PathoConfig;
use patho_model::StatusChange;

use crate::cli::{
    ClassifyArgs, CommentArgs, QcArgs, ReportArgs, ReviewArgs, ReviewStatusArg, StatsArgs,
};
use crate::summary::{
    print_audit_entry, print_bulk_outcome, print_classified, print_qc, print_report_views,
    print_stats,
};

/// Exit code when the command ran but the data did not pass.
const EXIT_FAILED: i32 = 1;

/// Unevaluated results are reported but do not fail the command.
pub fn run_stats(args: &StatsArgs, config: &PathoConfig) -> Result<i32> {
    let stats = compute_stats(
        args.results.as_deref(),
        args.reports.as_deref(),
        &config.classifier,
    )?;
    if args.output.json {
        print_json(&stats)?;
    } else {
        print_stats(&stats);
    }
    Ok(0)
}

pub fn run_report(args: &ReportArgs, config: &PathoConfig) -> Result<i32> {
    let views = view_reports(&args.reports, &args.ids, &config.classifier)?;
    if args.output.json {
        print_json(&views)?;
    } else {
        print_report_views(&views);
    }
    Ok(0)
}

pub fn run_classify(args: &ClassifyArgs, config: &PathoConfig) -> Result<i32> {
    let outcome = classify_file(&args.results, &config.classifier)?;
    if args.output.json {
        print_json(&outcome)?;
    } else {
        print_classified(&outcome);
    }
    Ok(0)
}

pub fn run_qc(args: &QcArgs, config: &PathoConfig) -> Result<i32> {
    let run = match (&args.samples, args.expected, args.observed) {
        (Some(path), _, _) => run_qc_file(path, &config.qc)?,
        (None, Some(expected), Some(observed)) => run_qc_single(expected, observed, &config.qc),
        _ => anyhow::bail!("pass a samples file or both --expected and --observed"),
    };
    if args.output.json {
        print_json(&run)?;
    } else {
        print_qc(&run);
    }
    if run.has_failures() {
        warn!(
            failed = run.report.failed,
            errors = run.report.errors,
            rejected = run.rejected.len(),
            "QC did not pass"
        );
        return Ok(EXIT_FAILED);
    }
    Ok(0)
}

/// Fails when any listed report could not be updated.
pub fn run_review(args: &ReviewArgs) -> Result<i32> {
    let change = match args.status {
        ReviewStatusArg::Approved => StatusChange::approve(args.comments.clone()),
        ReviewStatusArg::Rejected => {
            StatusChange::reject(args.comments.clone(), args.reason.clone())
        }
    };
    let outcome = review_reports(
        &args.reports,
        args.output.as_deref(),
        &args.ids,
        &change,
        &args.user,
        Utc::now(),
    )?;
    if args.format.json {
        print_json(&outcome)?;
    } else {
        print_bulk_outcome(&outcome);
    }
    Ok(if outcome.failures.is_empty() {
        0
    } else {
        EXIT_FAILED
    })
}

pub fn run_comment(args: &CommentArgs) -> Result<i32> {
    let entry = comment_on_test(
        &args.reports,
        args.output.as_deref(),
        &args.id,
        &args.test,
        &args.text,
        &args.user,
        Utc::now(),
    )?;
    print_audit_entry(&entry);
    Ok(0)
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("serialize output")?;
    println!("{json}");
    Ok(())
}
