//! Deduplication over the sorted entry sequence.

use tracing::debug;

use romdat_model::Entry;

/// Counts of entries removed by [`dedupe_entries`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DedupeStats {
    /// Reference-shape duplicates dropped from same-crc runs.
    pub duplicates_collapsed: usize,
}

/// Collapses same-crc runs of a sorted sequence.
///
/// Within each maximal run of entries sharing a crc, the first entry is kept
/// (direct-shape by sort order when one exists) along with any subsequent
/// non-reference entry; reference-shape followers add no information and are
/// dropped. Builds a new vector rather than compacting in place.
pub fn dedupe_entries(entries: Vec<Entry>) -> (Vec<Entry>, DedupeStats) {
    let before = entries.len();
    let mut kept: Vec<Entry> = Vec::with_capacity(entries.len());
    for entry in entries {
        let same_run = kept.last().is_some_and(|prev| prev.crc == entry.crc);
        if same_run && entry.is_reference() {
            continue;
        }
        kept.push(entry);
    }
    let stats = DedupeStats {
        duplicates_collapsed: before - kept.len(),
    };
    debug!(
        kept = kept.len(),
        collapsed = stats.duplicates_collapsed,
        "collapsed duplicate entries"
    );
    (kept, stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use romdat_model::IdentityKey;

    fn entry(md5: char, crc: u64, reference: bool) -> Entry {
        let mut entry = Entry::new(IdentityKey::new(md5.to_string().repeat(32)).unwrap());
        entry.crc = crc;
        if reference {
            entry.ref_md5 = Some(IdentityKey::new("f".repeat(32)).unwrap());
            entry.ref_crc = Some(crc);
        }
        entry
    }

    #[test]
    fn drops_reference_duplicates_in_a_run() {
        let entries = vec![
            entry('a', 0x10, false),
            entry('b', 0x10, true),
            entry('c', 0x10, true),
            entry('d', 0x20, false),
        ];
        let (kept, stats) = dedupe_entries(entries);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].md5.as_str(), "a".repeat(32));
        assert_eq!(kept[1].md5.as_str(), "d".repeat(32));
        assert_eq!(stats.duplicates_collapsed, 2);
    }

    #[test]
    fn keeps_distinct_direct_entries_sharing_a_crc() {
        let entries = vec![
            entry('a', 0x10, false),
            entry('b', 0x10, false),
            entry('c', 0x10, true),
        ];
        let (kept, stats) = dedupe_entries(entries);
        assert_eq!(kept.len(), 2);
        assert!(!kept[1].is_reference());
        assert_eq!(stats.duplicates_collapsed, 1);
    }

    #[test]
    fn is_idempotent() {
        let entries = vec![
            entry('a', 0x10, false),
            entry('b', 0x10, true),
            entry('d', 0x20, false),
        ];
        let (once, _) = dedupe_entries(entries);
        let (twice, stats) = dedupe_entries(once.clone());
        assert_eq!(once, twice);
        assert_eq!(stats.duplicates_collapsed, 0);
    }
}
