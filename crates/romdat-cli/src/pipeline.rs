//! Catalogue conversion pipeline with explicit stages.
//!
//! The pipeline runs in order, whole-batch and single-threaded:
//! 1. **Parse**: scan and parse the catalogue, interning cheat strings
//! 2. **Resolve**: correlate `RefMD5` declarations with sections
//! 3. **Sort**: crc ascending, direct-shape first on ties
//! 4. **Dedupe**: collapse same-crc reference duplicates
//! 5. **Link**: elide default configs into reference records
//! 6. **Emit**: pack the record stream and string table
//!
//! The driver exclusively owns the entry sequence and string table for the
//! duration of a run.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, info_span};

use romdat_ingest::{ParseOptions, parse_catalogue};
use romdat_model::{Entry, StringTable};
use romdat_output::{emit_records, render_filtered_catalogue, render_string_table};
use romdat_transform::{dedupe_entries, link_references, resolve_references, sort_entries};

use crate::types::RunStats;

/// Conversion switches owned by the CLI layer.
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Fail on unknown catalogue keys.
    pub strict: bool,
}

/// Final state of a conversion: the entry sequence, the string table, and
/// per-stage counts.
#[derive(Debug)]
pub struct ConvertOutcome {
    pub entries: Vec<Entry>,
    pub table: StringTable,
    pub stats: RunStats,
}

/// Runs stages 1-5 over catalogue text.
pub fn convert_catalogue(text: &str, options: &ConvertOptions) -> Result<ConvertOutcome> {
    let span = info_span!("convert");
    let _guard = span.enter();

    let mut table = StringTable::new();
    let parse_options = ParseOptions {
        strict: options.strict,
    };
    let mut entries =
        parse_catalogue(text, &mut table, &parse_options).context("parse catalogue")?;
    let parsed = entries.len();
    info!(entries = parsed, "parsed catalogue");

    resolve_references(&mut entries).context("resolve references")?;
    sort_entries(&mut entries);

    let (entries, dedupe_stats) = dedupe_entries(entries);
    let (entries, link_stats) = link_references(entries);
    info!(
        entries = entries.len(),
        collapsed = dedupe_stats.duplicates_collapsed,
        elided = link_stats.default_elided,
        dropped = link_stats.dropped_unresolved,
        "deduplicated entries"
    );

    let stats = RunStats {
        parsed,
        duplicates_collapsed: dedupe_stats.duplicates_collapsed,
        default_elided: link_stats.default_elided,
        dropped_unresolved: link_stats.dropped_unresolved,
        final_entries: entries.len(),
        string_slots: table.len(),
    };
    Ok(ConvertOutcome {
        entries,
        table,
        stats,
    })
}

/// Output files written by [`write_outputs`].
#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub out_dir: PathBuf,
    /// Also write the filtered catalogue for round-trip checks.
    pub filtered_catalogue: bool,
}

/// Stage 6: writes the record stream, string table, and optionally the
/// filtered catalogue under `out_dir`.
pub fn write_outputs(outcome: &ConvertOutcome, config: &OutputConfig) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(&config.out_dir)
        .with_context(|| format!("create output directory {}", config.out_dir.display()))?;
    let mut written = Vec::new();

    let records = emit_records(&outcome.entries).context("emit records")?;
    let records_path = config.out_dir.join("rom_records.dat");
    fs::write(&records_path, &records)
        .with_context(|| format!("write {}", records_path.display()))?;
    info!(path = %records_path.display(), bytes = records.len(), "wrote record stream");
    written.push(records_path);

    let strings_path = config.out_dir.join("cheat_strings.txt");
    fs::write(&strings_path, render_string_table(&outcome.table))
        .with_context(|| format!("write {}", strings_path.display()))?;
    written.push(strings_path);

    if config.filtered_catalogue {
        let filtered_path = config.out_dir.join("filtered.ini");
        fs::write(
            &filtered_path,
            render_filtered_catalogue(&outcome.entries, &outcome.table),
        )
        .with_context(|| format!("write {}", filtered_path.display()))?;
        written.push(filtered_path);
    }
    Ok(written)
}

/// Reads a catalogue file into memory for conversion.
pub fn read_catalogue(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("read catalogue {}", path.display()))
}
