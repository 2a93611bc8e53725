use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use patho_classify::{AnnotatedRow, BulkOutcome, DashboardStats, QcRow, ReportView};
use patho_cli::pipeline::{ClassifyOutcome, QcRun};
use patho_ingest::RejectedRow;
use patho_model::{AuditEntry, ClassificationSummary, DeviationBand, QcStatus, Verdict};

pub fn print_stats(stats: &DashboardStats) {
    println!("{}", stats_table(stats));
    print_unevaluated(&stats.tests);
}

fn stats_table(stats: &DashboardStats) -> Table {
    let tests = &stats.tests;
    let reports = &stats.reports;
    let mut table = Table::new();
    table.set_header(vec![header_cell("Metric"), header_cell("Count")]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![Cell::new("Tests"), Cell::new(tests.total)]);
    table.add_row(vec![
        Cell::new("  Normal"),
        count_cell(tests.normal, Color::Green),
    ]);
    table.add_row(vec![
        Cell::new("  Abnormal"),
        count_cell(tests.abnormal, Color::Red),
    ]);
    table.add_row(vec![
        Cell::new("  Unable to evaluate"),
        count_cell(tests.indeterminate, Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("  Could not classify"),
        count_cell(tests.errors, Color::Yellow),
    ]);
    table.add_row(vec![Cell::new("Reports"), Cell::new(reports.total)]);
    table.add_row(vec![Cell::new("  Pending"), dim_cell(reports.pending)]);
    table.add_row(vec![
        Cell::new("  Approved"),
        count_cell(reports.approved, Color::Green),
    ]);
    table.add_row(vec![
        Cell::new("  Rejected"),
        count_cell(reports.rejected, Color::Red),
    ]);
    table
}

pub fn print_classified(outcome: &ClassifyOutcome) {
    println!("{}", result_table(&outcome.rows));
    print_unevaluated(&outcome.summary);
}

pub fn print_report_views(views: &[ReportView]) {
    for (position, view) in views.iter().enumerate() {
        if position > 0 {
            println!();
        }
        println!(
            "Report {} ({}){}",
            view.id,
            view.status,
            view.patient_name
                .as_deref()
                .map(|name| format!(" - {name}"))
                .unwrap_or_default()
        );
        println!("{}", result_table(&view.rows));
        print_unevaluated(&view.summary);
        print_audit_trail(&view.audit_trail);
    }
}

pub fn print_qc(run: &QcRun) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Sample"),
        header_cell("Test"),
        header_cell("Expected"),
        header_cell("Observed"),
        header_cell("Deviation"),
        header_cell("Status"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);
    align_column(&mut table, 5, CellAlignment::Center);
    for row in &run.report.rows {
        let sample = &row.sample;
        let unit = sample.unit.as_deref().unwrap_or("");
        table.add_row(vec![
            text_or_dash(sample.id.as_deref()),
            text_or_dash(sample.test_name.as_deref()),
            Cell::new(format!("{} {unit}", sample.expected).trim_end()),
            Cell::new(format!("{} {unit}", sample.observed).trim_end()),
            deviation_cell(row),
            qc_status_cell(row),
        ]);
    }
    println!("{table}");
    println!(
        "Passed: {}  Failed: {}  Errors: {}",
        run.report.passed, run.report.failed, run.report.errors
    );
    print_rejected(&run.rejected);
}

pub fn print_bulk_outcome(outcome: &BulkOutcome) {
    for id in &outcome.updated {
        println!("updated {id}");
    }
    for failure in &outcome.failures {
        eprintln!("- {}: {}", failure.report_id, failure.error);
    }
}

pub fn print_audit_entry(entry: &AuditEntry) {
    println!("{} by {} at {}", entry.action, entry.user, entry.timestamp.to_rfc3339());
    println!("{}", entry.details);
}

fn result_table(rows: &[AnnotatedRow]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Parameter"),
        header_cell("Result"),
        header_cell("Unit"),
        header_cell("Reference Range"),
        header_cell("Status"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Center);
    for row in rows {
        let value = if row.is_abnormal {
            Cell::new(&row.value)
                .fg(Color::Red)
                .add_attribute(Attribute::Bold)
        } else {
            Cell::new(&row.value)
        };
        table.add_row(vec![
            Cell::new(&row.parameter),
            value,
            Cell::new(&row.unit),
            Cell::new(&row.reference_range),
            verdict_cell(row),
        ]);
    }
    table
}

fn print_audit_trail(entries: &[AuditEntry]) {
    if entries.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Time"),
        header_cell("Action"),
        header_cell("User"),
        header_cell("Details"),
    ]);
    apply_table_style(&mut table);
    for entry in entries {
        table.add_row(vec![
            dim_cell(entry.timestamp.format("%Y-%m-%d %H:%M")),
            Cell::new(&entry.action),
            Cell::new(&entry.user),
            Cell::new(&entry.details),
        ]);
    }
    println!("Audit trail:");
    println!("{table}");
}

fn print_unevaluated(summary: &ClassificationSummary) {
    if summary.has_unevaluated() {
        println!("{} results could not be evaluated", summary.unevaluated());
    }
}

fn print_rejected(rejected: &[RejectedRow]) {
    if rejected.is_empty() {
        return;
    }
    eprintln!("Skipped rows:");
    for row in rejected {
        eprintln!("- line {}: {}", row.line, row.reason);
    }
}

fn verdict_cell(row: &AnnotatedRow) -> Cell {
    match row.verdict {
        Some(Verdict::Normal) => Cell::new(&row.label).fg(Color::Green),
        Some(Verdict::Abnormal) => Cell::new(&row.label)
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
        Some(Verdict::Indeterminate) | None => Cell::new(&row.label).fg(Color::Yellow),
    }
}

fn deviation_cell(row: &QcRow) -> Cell {
    let (Some(deviation), Some(outcome)) = (&row.deviation, &row.outcome) else {
        return dim_cell("-");
    };
    let cell = Cell::new(&deviation.formatted);
    match outcome.band {
        DeviationBand::Acceptable => cell.fg(Color::Green),
        DeviationBand::Warning => cell.fg(Color::Yellow),
        DeviationBand::Critical => cell.fg(Color::Red).add_attribute(Attribute::Bold),
    }
}

fn qc_status_cell(row: &QcRow) -> Cell {
    match (&row.outcome, &row.error) {
        (Some(outcome), _) => match outcome.status {
            QcStatus::Passed => Cell::new(outcome.status.as_str()).fg(Color::Green),
            QcStatus::Failed => Cell::new(outcome.status.as_str())
                .fg(Color::Red)
                .add_attribute(Attribute::Bold),
        },
        (None, Some(error)) => Cell::new(error.label()).fg(Color::Yellow),
        (None, None) => dim_cell("-"),
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn text_or_dash(value: Option<&str>) -> Cell {
    match value {
        Some(text) => Cell::new(text),
        None => dim_cell("-"),
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
