//! Default-elision and final reference linking.
//!
//! Runs after duplicate collapse. Entries that still carry only default
//! config and declared a resolved reference are rewritten as minimal
//! reference-shape records pointing at their target's final position.
//! References whose target never materialized are dropped, preserving the
//! original converter's behavior, but logged and counted instead of lost
//! silently.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use romdat_model::{Config, Entry};

/// Counts from [`link_references`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinkStats {
    /// Default-config entries rewritten into reference-shape records.
    pub default_elided: usize,
    /// Reference entries dropped because no direct-shape target exists.
    pub dropped_unresolved: usize,
}

fn is_elision_candidate(entry: &Entry) -> bool {
    entry.ref_md5.is_some()
        && entry
            .config
            .as_direct()
            .is_some_and(|direct| direct.is_default())
}

/// Rewrites elidable entries as reference-shape records with final target
/// indices, dropping references that cannot resolve to a direct-shape entry.
pub fn link_references(entries: Vec<Entry>) -> (Vec<Entry>, LinkStats) {
    let mut stats = LinkStats::default();

    // Unresolved references are dropped regardless of config shape; an entry
    // whose declared target never materialized has nothing to point at. The
    // survivors emit direct-shape iff they are not elidable; elidability is
    // intrinsic, so the final shape of every target is known up front.
    let kept: Vec<(Entry, bool)> = entries
        .into_iter()
        .filter_map(|entry| {
            if entry.ref_md5.is_some() && entry.ref_crc.is_none() {
                warn!(section = %entry.md5, name = %entry.good_name, "dropping unresolved reference");
                stats.dropped_unresolved += 1;
                return None;
            }
            let elide = is_elision_candidate(&entry);
            Some((entry, elide))
        })
        .collect();

    // First direct-shape position for each crc in the final sequence.
    let mut direct_index: BTreeMap<u64, u16> = BTreeMap::new();
    for (index, (entry, elide)) in kept.iter().enumerate() {
        if !*elide && !entry.config.is_reference() {
            direct_index.entry(entry.crc).or_insert(index as u16);
        }
    }

    let mut out: Vec<Entry> = Vec::with_capacity(kept.len());
    let mut chained = 0usize;
    for (mut entry, elide) in kept {
        if elide {
            let target = entry.ref_crc.and_then(|crc| direct_index.get(&crc).copied());
            match target {
                Some(target) => {
                    entry.config = Config::Reference { target };
                    stats.default_elided += 1;
                    out.push(entry);
                }
                None => {
                    // Target exists only as another reference; a chain would
                    // dangle, so the entry is dropped like an unresolved one.
                    warn!(section = %entry.md5, name = %entry.good_name, "dropping reference to a non-direct target");
                    stats.dropped_unresolved += 1;
                    chained += 1;
                }
            }
        } else {
            out.push(entry);
        }
    }

    // Dropping chained references shifts positions, so indices must be
    // assigned against the actual final sequence.
    if chained > 0 {
        relink_targets(&mut out);
    }

    debug!(
        entries = out.len(),
        elided = stats.default_elided,
        dropped = stats.dropped_unresolved,
        "linked references"
    );
    (out, stats)
}

fn relink_targets(entries: &mut [Entry]) {
    let mut direct_index: BTreeMap<u64, u16> = BTreeMap::new();
    for (index, entry) in entries.iter().enumerate() {
        if !entry.config.is_reference() {
            direct_index.entry(entry.crc).or_insert(index as u16);
        }
    }
    for entry in entries.iter_mut() {
        if let (Config::Reference { target }, Some(crc)) = (&mut entry.config, entry.ref_crc)
            && let Some(index) = direct_index.get(&crc)
        {
            *target = *index;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use romdat_model::{DirectConfig, IdentityKey};

    fn entry(md5: char, crc: u64) -> Entry {
        let mut entry = Entry::new(IdentityKey::new(md5.to_string().repeat(32)).unwrap());
        entry.crc = crc;
        entry
    }

    fn reference(md5: char, crc: u64, target: char, ref_crc: Option<u64>) -> Entry {
        let mut entry = entry(md5, crc);
        entry.ref_md5 = Some(IdentityKey::new(target.to_string().repeat(32)).unwrap());
        entry.ref_crc = ref_crc;
        entry
    }

    #[test]
    fn default_entry_with_resolved_reference_is_elided() {
        let entries = vec![entry('a', 0x10), reference('b', 0x20, 'a', Some(0x10))];
        let (linked, stats) = link_references(entries);
        assert_eq!(linked.len(), 2);
        assert_eq!(linked[1].config, Config::Reference { target: 0 });
        assert_eq!(stats.default_elided, 1);
        assert_eq!(stats.dropped_unresolved, 0);
    }

    #[test]
    fn non_default_entry_keeps_its_own_config() {
        let mut custom = reference('b', 0x20, 'a', Some(0x10));
        let mut config = DirectConfig::default();
        config.set_status(3).unwrap();
        custom.config = Config::Direct(config);
        let entries = vec![entry('a', 0x10), custom];
        let (linked, stats) = link_references(entries);
        assert_eq!(linked.len(), 2);
        assert!(!linked[1].config.is_reference());
        assert_eq!(stats.default_elided, 0);
    }

    #[test]
    fn unresolved_reference_is_dropped() {
        let entries = vec![entry('a', 0x10), reference('b', 0x20, 'z', None)];
        let (linked, stats) = link_references(entries);
        assert_eq!(linked.len(), 1);
        assert_eq!(stats.dropped_unresolved, 1);
    }

    #[test]
    fn unresolved_reference_with_custom_config_is_dropped() {
        // The orphan carries non-default config; it still has nothing to
        // point at and must not survive as a direct-shape record.
        let mut orphan = reference('b', 0x20, 'z', None);
        let mut config = DirectConfig::default();
        config.set_status(3).unwrap();
        orphan.config = Config::Direct(config);
        let entries = vec![entry('a', 0x10), orphan];
        let (linked, stats) = link_references(entries);
        assert_eq!(linked.len(), 1);
        assert_eq!(linked[0].crc, 0x10);
        assert_eq!(stats.dropped_unresolved, 1);
        assert_eq!(stats.default_elided, 0);
    }

    #[test]
    fn reference_chain_is_dropped_and_targets_reassigned() {
        // b points at c, which itself elides into a reference to a; the
        // chain is dropped and d's target index shifts down.
        let entries = vec![
            entry('a', 0x10),
            reference('c', 0x20, 'a', Some(0x10)),
            reference('b', 0x30, 'c', Some(0x20)),
            reference('d', 0x40, 'a', Some(0x10)),
        ];
        let (linked, stats) = link_references(entries);
        assert_eq!(linked.len(), 3);
        assert_eq!(stats.dropped_unresolved, 1);
        assert_eq!(linked[1].config, Config::Reference { target: 0 });
        assert_eq!(linked[2].config, Config::Reference { target: 0 });
    }

    #[test]
    fn final_invariants_hold() {
        let entries = vec![
            entry('a', 0x10),
            reference('b', 0x20, 'a', Some(0x10)),
            reference('e', 0x50, 'z', None),
        ];
        let (linked, _) = link_references(entries);
        for entry in &linked {
            if let Config::Reference { target } = entry.config {
                let target = usize::from(target);
                assert!(target < linked.len());
                assert!(!linked[target].config.is_reference());
            }
        }
    }
}
