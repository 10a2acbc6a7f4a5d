//! Total order over entries for deterministic downstream passes.

use std::cmp::Ordering;

use romdat_model::Entry;

/// Sorts entries by crc ascending, direct-shape before reference-shape on
/// ties. Within any run of equal crcs the "real" entry therefore comes
/// first, which the deduplicator relies on.
pub fn sort_entries(entries: &mut [Entry]) {
    entries.sort_by(compare_entries);
}

fn compare_entries(a: &Entry, b: &Entry) -> Ordering {
    a.crc
        .cmp(&b.crc)
        .then_with(|| a.is_reference().cmp(&b.is_reference()))
}
