use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use cdq_core::PipelineRun;
use cdq_model::{ActionCategory, Field};
use cdq_validate::Severity;

use crate::types::{ProfileResult, RunResult};

pub fn print_run_summary(result: &RunResult) {
    let run = &result.run;
    let total = run.total_rows();
    println!("Input: {}", result.input.display());
    match &result.outputs {
        Some(outputs) => println!("Output: {}", outputs.output_dir.display()),
        None => println!("Output: none (dry run)"),
    }
    println!("As of: {}", run.options.as_of);
    println!("{}", column_table(run));
    println!();
    println!("Stages:");
    println!("{}", stage_table(run));
    if let Some(pre) = &run.pre_validation {
        println!("Before cleaning: {}/{total} rows passed", pre.passed_count());
    }
    println!(
        "After cleaning:  {}/{total} rows passed",
        run.post_validation.passed_count()
    );
    if result.has_warnings() {
        eprintln!("Critical validation failures:");
        for (field, rows) in &run.critical_failures {
            let rows: Vec<String> = rows.iter().map(usize::to_string).collect();
            eprintln!("- {field}: rows {}", rows.join(", "));
        }
    }
}

pub fn print_profile_summary(result: &ProfileResult) {
    println!("Input: {}", result.input.display());
    println!("Output: {}", result.output_dir.display());
    println!("{}", issue_table(result));
    println!(
        "Fully exposed rows: {}/{}",
        result.pii.fully_exposed_count(),
        result.pii.total_rows
    );
}

/// Per-column action and failure counts, with a total row.
pub fn column_table(run: &PipelineRun) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Normalized"),
        header_cell("Flagged"),
        header_cell("Filled"),
        header_cell("Masked"),
        header_cell("Pre fails"),
        header_cell("Post fails"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 1..7 {
        align_column(&mut table, index, CellAlignment::Right);
    }

    let actions = |field: Field, category: ActionCategory| {
        run.log
            .entries()
            .iter()
            .filter(|entry| entry.field == field && entry.category == category)
            .count()
    };
    let mut totals = [0usize; 6];
    for field in Field::ALL {
        let counts = [
            Some(actions(field, ActionCategory::Normalized)),
            Some(actions(field, ActionCategory::Flagged)),
            Some(actions(field, ActionCategory::Filled)),
            Some(actions(field, ActionCategory::Masked)),
            run.pre_validation
                .as_ref()
                .map(|report| report.rows_failing(field).len()),
            Some(run.post_validation.rows_failing(field).len()),
        ];
        let mut row = vec![Cell::new(field.column_name())];
        for (idx, count) in counts.into_iter().enumerate() {
            totals[idx] += count.unwrap_or(0);
            let color = if idx >= 4 { Color::Red } else { Color::Green };
            row.push(count_cell(count, color));
        }
        table.add_row(row);
    }
    let mut total_row = vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
    ];
    for (idx, total) in totals.into_iter().enumerate() {
        let count = if idx == 4 && run.pre_validation.is_none() {
            None
        } else {
            Some(total)
        };
        let color = if idx >= 4 { Color::Red } else { Color::Green };
        total_row.push(count_cell(count, color).add_attribute(Attribute::Bold));
    }
    table.add_row(total_row);
    table
}

/// One row per recorded stage.
pub fn stage_table(run: &PipelineRun) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Stage"),
        header_cell("Status"),
        header_cell("Events"),
        header_cell("ms"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Center);
    align_column(&mut table, 4, CellAlignment::Right);
    for (idx, record) in run.timeline.stages().iter().enumerate() {
        let status = if record.ok() {
            Cell::new("OK").fg(Color::Green)
        } else {
            Cell::new("WARN")
                .fg(Color::Yellow)
                .add_attribute(Attribute::Bold)
        };
        let failed = record.events.iter().find(|event| !event.ok);
        let detail = match (failed, record.events.last()) {
            (Some(event), _) | (None, Some(event)) => Cell::new(&event.message),
            (None, None) => dim_cell("-"),
        };
        table.add_row(vec![
            dim_cell(idx + 1),
            Cell::new(record.stage.label()),
            status,
            detail,
            dim_cell(record.duration.as_millis()),
        ]);
    }
    table
}

/// Quality issues grouped by severity.
pub fn issue_table(result: &ProfileResult) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Severity"),
        header_cell("Issue"),
        header_cell("Rows"),
        header_cell("Detail"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for severity in Severity::ALL {
        for issue in result
            .profile
            .issues
            .iter()
            .filter(|issue| issue.severity() == severity)
        {
            table.add_row(vec![
                severity_cell(severity),
                Cell::new(issue.description()),
                Cell::new(issue.rows().len()),
                Cell::new(issue.detail()),
            ]);
        }
    }
    if result.profile.issues.is_empty() {
        table.add_row(vec![dim_cell("-"), dim_cell("No issues found"), dim_cell(0), dim_cell("-")]);
    }
    table
}

pub fn apply_table_style(table: &mut Table) {
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
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn severity_cell(severity: Severity) -> Cell {
    match severity {
        Severity::Critical => Cell::new("CRITICAL")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
        Severity::High => Cell::new("HIGH").fg(Color::Red),
        Severity::Medium => Cell::new("MEDIUM").fg(Color::Yellow),
    }
}

fn count_cell(count: Option<usize>, color: Color) -> Cell {
    match count {
        Some(value) if value > 0 => Cell::new(value).fg(color).add_attribute(Attribute::Bold),
        Some(value) => dim_cell(value),
        None => dim_cell("-"),
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
