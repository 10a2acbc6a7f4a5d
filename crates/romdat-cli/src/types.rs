use std::path::PathBuf;

use serde::Serialize;

/// Per-stage counts from one conversion run.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct RunStats {
    /// Sections parsed from the catalogue.
    pub parsed: usize,
    /// Reference-shape duplicates collapsed from same-crc runs.
    pub duplicates_collapsed: usize,
    /// Default-config entries rewritten as reference records.
    pub default_elided: usize,
    /// Reference entries dropped for want of a direct-shape target.
    pub dropped_unresolved: usize,
    /// Records in the emitted stream.
    pub final_entries: usize,
    /// Allocated cheat string slots (of 31).
    pub string_slots: usize,
}

/// Result of a `convert` command run.
#[derive(Debug, Serialize)]
pub struct ConvertResult {
    pub catalogue: PathBuf,
    pub out_dir: PathBuf,
    /// Files written, empty on a dry run.
    pub written: Vec<PathBuf>,
    pub stats: RunStats,
}
