use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Table};

use redirgen_cli::run::RunResult;

pub fn print_summary(result: &RunResult) {
    println!("Batch: {}", result.base);
    println!(
        "Rules: {} ({} specific, {} fallback)",
        result.rule_count, result.specific_rules, result.fallback_rules
    );
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Output"),
        header_cell("Lines"),
        header_cell("Path"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    let per_rule = [
        ("redirects", 4usize, &result.paths.redirects),
        ("unbind", 2, &result.paths.unbind),
        ("rollback", 4, &result.paths.rollback),
    ];
    for (label, lines_per_rule, path) in per_rule {
        table.add_row(vec![
            Cell::new(label),
            Cell::new(result.rule_count * lines_per_rule),
            Cell::new(path.display()),
        ]);
    }
    table.add_row(vec![
        Cell::new("input copy"),
        Cell::new("-"),
        Cell::new(result.paths.input_copy.display()),
    ]);
    println!("{table}");
}

fn header_cell(text: &str) -> Cell {
    Cell::new(text).add_attribute(Attribute::Bold)
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}
