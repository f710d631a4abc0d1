use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use schemadump_cli::types::{DumpOutcome, ScopeCounts};

pub fn print_dump_summary(outcome: &DumpOutcome) {
    let summary = &outcome.summary;
    println!("Schemas: {}", outcome.schemas_dir.display());
    match outcome.identifiers_written {
        Some(count) => println!(
            "Identifiers: {} ({count} lines)",
            outcome.identifiers_file.display()
        ),
        None => println!(
            "Identifiers: {} (incomplete)",
            outcome.identifiers_file.display()
        ),
    }

    let mut table = Table::new();
    table.set_header(vec![header_cell("Item"), header_cell("Count")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![Cell::new("Scopes"), Cell::new(summary.scopes)]);
    table.add_row(vec![Cell::new("Classes"), Cell::new(summary.classes)]);
    table.add_row(vec![Cell::new("Enums"), Cell::new(summary.enums)]);
    table.add_row(vec![Cell::new("Projects"), Cell::new(summary.projects)]);
    table.add_row(vec![
        Cell::new("Artifacts written"),
        Cell::new(summary.artifacts_written),
    ]);
    table.add_row(vec![
        Cell::new("Write failures"),
        count_cell(summary.artifact_write_failures, Color::Red),
    ]);
    table.add_row(vec![
        Cell::new("Stale projects"),
        count_cell(summary.plan.stale_projects.len(), Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("Stale artifacts"),
        count_cell(summary.plan.stale_artifacts.len(), Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("Removed"),
        Cell::new(summary.sync.removed_projects + summary.sync.removed_artifacts),
    ]);
    table.add_row(vec![
        Cell::new("Failed removals"),
        count_cell(summary.sync.failed_removals, Color::Red),
    ]);
    println!("{table}");
}

pub fn print_scope_table(counts: &[ScopeCounts]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Scope"),
        header_cell("Classes"),
        header_cell("Enums"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    let mut total_classes = 0usize;
    let mut total_enums = 0usize;
    for scope in counts {
        total_classes += scope.classes;
        total_enums += scope.enums;
        let name = if scope.global {
            dim_cell(&scope.name)
        } else {
            Cell::new(&scope.name)
        };
        table.add_row(vec![name, Cell::new(scope.classes), Cell::new(scope.enums)]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(total_classes).add_attribute(Attribute::Bold),
        Cell::new(total_enums).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(80);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
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
