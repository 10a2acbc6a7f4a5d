use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Table};

use romdat_cli::types::ConvertResult;

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

pub fn print_summary(result: &ConvertResult) {
    println!("Catalogue: {}", result.catalogue.display());
    if result.written.is_empty() {
        println!("Output: (dry run)");
    } else {
        println!("Output: {}", result.out_dir.display());
        for path in &result.written {
            println!("  {}", path.display());
        }
    }

    let stats = &result.stats;
    let mut table = Table::new();
    table.set_header(vec![header_cell("Stage"), header_cell("Count")]);
    apply_table_style(&mut table);
    if let Some(column) = table.column_mut(1) {
        column.set_cell_alignment(CellAlignment::Right);
    }
    table.add_row(vec![Cell::new("Sections parsed"), Cell::new(stats.parsed)]);
    table.add_row(vec![
        Cell::new("Duplicates collapsed"),
        Cell::new(stats.duplicates_collapsed),
    ]);
    table.add_row(vec![
        Cell::new("Defaults elided"),
        Cell::new(stats.default_elided),
    ]);
    table.add_row(vec![
        Cell::new("Unresolved dropped"),
        Cell::new(stats.dropped_unresolved),
    ]);
    table.add_row(vec![
        Cell::new("Records emitted"),
        Cell::new(stats.final_entries),
    ]);
    table.add_row(vec![
        Cell::new("String slots used"),
        Cell::new(format!("{}/31", stats.string_slots)),
    ]);
    println!("{table}");
}

fn header_cell(text: &str) -> Cell {
    Cell::new(text).add_attribute(Attribute::Bold)
}
