//! Reference resolution: correlates `RefMD5` declarations with sections.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use romdat_model::Entry;

use crate::error::TransformError;

/// Resolves every `RefMD5` declaration against the parsed sections.
///
/// Each entry's identity key must be unique; on a match the target's crc is
/// copied into the referring entry's `ref_crc` so later sorting and linking
/// can group by true hash equality. A missing target leaves `ref_crc` unset;
/// the deduplicator drops such orphans later.
pub fn resolve_references(entries: &mut [Entry]) -> Result<(), TransformError> {
    let mut by_md5: BTreeMap<&str, (u64, &str)> = BTreeMap::new();
    for entry in entries.iter() {
        if let Some((_, first)) =
            by_md5.insert(entry.md5.as_str(), (entry.crc, entry.good_name.as_str()))
        {
            return Err(TransformError::DuplicateIdentityKey {
                key: entry.md5.to_string(),
                first: first.to_string(),
                second: entry.good_name.clone(),
            });
        }
    }

    let resolved: Vec<Option<u64>> = entries
        .iter()
        .map(|entry| {
            let ref_md5 = entry.ref_md5.as_ref()?;
            match by_md5.get(ref_md5.as_str()) {
                Some((crc, _)) => Some(*crc),
                None => {
                    warn!(
                        section = %entry.md5,
                        target = %ref_md5,
                        "reference target not found; entry will be dropped"
                    );
                    None
                }
            }
        })
        .collect();
    for (entry, ref_crc) in entries.iter_mut().zip(resolved) {
        entry.ref_crc = ref_crc;
    }
    debug!(entries = entries.len(), "resolved references");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use romdat_model::IdentityKey;

    fn entry(md5: char, crc: u64) -> Entry {
        Entry {
            crc,
            ..Entry::new(IdentityKey::new(md5.to_string().repeat(32)).unwrap())
        }
    }

    fn reference(md5: char, crc: u64, target: char) -> Entry {
        let mut entry = entry(md5, crc);
        entry.ref_md5 = Some(IdentityKey::new(target.to_string().repeat(32)).unwrap());
        entry
    }

    #[test]
    fn copies_target_crc_into_cache() {
        let mut entries = vec![entry('a', 0x10), reference('b', 0x20, 'a')];
        resolve_references(&mut entries).unwrap();
        assert_eq!(entries[0].ref_crc, None);
        assert_eq!(entries[1].ref_crc, Some(0x10));
    }

    #[test]
    fn missing_target_leaves_cache_unset() {
        let mut entries = vec![reference('b', 0x20, 'c')];
        resolve_references(&mut entries).unwrap();
        assert_eq!(entries[0].ref_crc, None);
    }

    #[test]
    fn duplicate_identity_keys_are_rejected() {
        let mut entries = vec![entry('a', 0x10), entry('a', 0x20)];
        let err = resolve_references(&mut entries).unwrap_err();
        assert!(matches!(err, TransformError::DuplicateIdentityKey { .. }));
    }
}
