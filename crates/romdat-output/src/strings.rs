//! String table emission.

use std::fmt::Write;

use romdat_model::StringTable;

/// The table contents in index order, index 0 implicitly empty.
pub fn string_table_values(table: &StringTable) -> Vec<&str> {
    table.iter().map(|(_, slot)| slot.value.as_str()).collect()
}

/// Renders the table as text: one value per line, preceded by `;`-prefixed
/// provenance comments naming the entries that use each slot. The comments
/// are decoration only; stripping them leaves exactly the payload values.
pub fn render_string_table(table: &StringTable) -> String {
    let mut out = String::new();
    for (index, slot) in table.iter() {
        let _ = writeln!(out, "; {index} used by:");
        for name in &slot.used_by {
            let _ = writeln!(out, ";   {name}");
        }
        let _ = writeln!(out, "{}", slot.value);
    }
    out
}
