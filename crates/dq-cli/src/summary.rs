use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use dq_cli::pipeline::PipelineResult;
use dq_model::{ValidationReport, Verdict};

pub fn print_summary(result: &PipelineResult) {
    let report = &result.outcome.report;
    println!("Dataset: {}", result.dataset);
    match &result.paths {
        Some(paths) => {
            println!("Valid rows: {}", paths.valid_rows.display());
            println!("Invalid rows: {}", paths.invalid_rows.display());
            if let Some(path) = &paths.report {
                println!("Report: {}", path.display());
            }
        }
        None => println!("Output: (dry run, nothing written)"),
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Total"),
        header_cell("Valid"),
        header_cell("Invalid"),
        header_cell("Field violations"),
        header_cell("Failed checks"),
        header_cell("Verdict"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 0..5 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    align_column(&mut table, 5, CellAlignment::Center);
    table.add_row(vec![
        Cell::new(report.total).add_attribute(Attribute::Bold),
        count_cell(report.valid_count, Color::Green),
        count_cell(report.invalid_count, Color::Red),
        count_cell(report.field_violations.len(), Color::Red),
        count_cell(failed_check_count(report), Color::Red),
        verdict_cell(report.verdict),
    ]);
    println!("{table}");
    print_check_table(report);
    print_row_table(report);
    if result.notified {
        println!("Failure notification sent.");
    }
}

/// Distinct failed checks at either level, as counted in notifications.
fn failed_check_count(report: &ValidationReport) -> usize {
    report.failed_checks().len()
}

fn print_check_table(report: &ValidationReport) {
    if report.dataset_violations.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Check"),
        header_cell("Rows"),
        header_cell("Reason"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for violation in &report.dataset_violations {
        table.add_row(vec![
            Cell::new(violation.name()).fg(Color::Blue),
            count_cell(violation.rows.len(), Color::Red),
            Cell::new(&violation.reason),
        ]);
    }
    println!();
    println!("Dataset checks:");
    println!("{table}");
}

fn print_row_table(report: &ValidationReport) {
    if report.field_violations.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Row"),
        header_cell("Field"),
        header_cell("Rule"),
        header_cell("Reason"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for violation in &report.field_violations {
        table.add_row(vec![
            Cell::new(violation.row),
            Cell::new(violation.field.name()).fg(Color::Blue),
            dim_cell(violation.constraint.code()),
            Cell::new(&violation.reason),
        ]);
    }
    println!();
    println!("Row violations:");
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
    if table.column_count() >= 4 {
        table.set_constraints(vec![
            ColumnConstraint::LowerBoundary(Width::Fixed(5)),
            ColumnConstraint::UpperBoundary(Width::Fixed(14)),
            ColumnConstraint::UpperBoundary(Width::Fixed(16)),
            ColumnConstraint::UpperBoundary(Width::Percentage(60)),
        ]);
    }
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn verdict_cell(verdict: Verdict) -> Cell {
    let color = if verdict.is_pass() {
        Color::Green
    } else {
        Color::Red
    };
    Cell::new(verdict.label())
        .fg(color)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

pub fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
