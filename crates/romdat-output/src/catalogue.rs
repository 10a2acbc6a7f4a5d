//! Filtered catalogue writer.
//!
//! Re-serializes the surviving entries as catalogue text for round-trip
//! verification. Only non-default fields are written, so re-parsing and
//! re-transforming the output reproduces the same final entry sequence.

use std::fmt::Write;

use romdat_model::{Config, DirectConfig, Entry, StringTable};

/// Renders the deduplicated entry sequence back into catalogue text.
///
/// Reference-shape entries are written with a `RefMD5` pointing at their
/// *surviving* target section (the originally referenced section may have
/// been collapsed away).
pub fn render_filtered_catalogue(entries: &[Entry], table: &StringTable) -> String {
    let mut out = String::new();
    for entry in entries {
        let _ = writeln!(out, "[{}]", entry.md5);
        if !entry.good_name.is_empty() {
            let _ = writeln!(out, "GoodName={}", entry.good_name);
        }
        let _ = writeln!(
            out,
            "CRC={:08X} {:08X}",
            entry.crc >> 32,
            entry.crc & 0xFFFF_FFFF
        );
        match &entry.config {
            Config::Reference { target } => {
                if let Some(found) = entries.get(usize::from(*target)) {
                    let _ = writeln!(out, "RefMD5={}", found.md5);
                }
            }
            Config::Direct(direct) => {
                if let Some(ref_md5) = &entry.ref_md5 {
                    let _ = writeln!(out, "RefMD5={ref_md5}");
                }
                write_direct_fields(&mut out, direct, table);
            }
        }
        out.push('\n');
    }
    out
}

fn write_direct_fields(out: &mut String, direct: &DirectConfig, table: &StringTable) {
    let defaults = DirectConfig::default();
    if direct.save_kind != defaults.save_kind {
        let _ = writeln!(out, "SaveType={}", direct.save_kind.catalogue_token());
    }
    if direct.status != defaults.status {
        let _ = writeln!(out, "Status={}", direct.status);
    }
    if direct.players != defaults.players {
        let _ = writeln!(out, "Players={}", direct.players);
    }
    if direct.rumble != defaults.rumble {
        let _ = writeln!(out, "Rumble=No");
    }
    if direct.transfer_pak != defaults.transfer_pak {
        let _ = writeln!(out, "Transferpak=Yes");
    }
    if direct.memory_pak != defaults.memory_pak {
        let _ = writeln!(out, "Mempak=No");
    }
    if direct.bio_pak != defaults.bio_pak {
        let _ = writeln!(out, "Biopak=Yes");
    }
    if direct.count_per_op != defaults.count_per_op {
        let _ = writeln!(out, "CountPerOp={}", direct.count_per_op);
    }
    if direct.disable_extra_mem != defaults.disable_extra_mem {
        let _ = writeln!(out, "DisableExtraMem=1");
    }
    if direct.si_dma_duration != defaults.si_dma_duration {
        let _ = writeln!(out, "SiDmaDuration=1");
    }
    if direct.cheat_ref != 0
        && let Some(slot) = table.get(direct.cheat_ref)
    {
        let _ = writeln!(out, "Cheat0={}", slot.value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use romdat_model::IdentityKey;

    fn entry(md5: char, crc: u64, config: Config) -> Entry {
        let mut entry = Entry::new(IdentityKey::new(md5.to_string().repeat(32)).unwrap());
        entry.crc = crc;
        entry.config = config;
        entry
    }

    #[test]
    fn renders_only_non_default_fields() {
        let mut config = DirectConfig::default();
        config.set_players(2).unwrap();
        let mut direct = entry('a', 0x0000_0001_0000_0002, Config::Direct(config));
        direct.set_good_name("Game A");
        let table = StringTable::new();

        insta::assert_snapshot!(render_filtered_catalogue(&[direct], &table), @r"
        [aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa]
        GoodName=Game A
        CRC=00000001 00000002
        Players=2
        ");
    }

    #[test]
    fn reference_entries_point_at_surviving_sections() {
        let target = entry('a', 0x10, Config::Direct(DirectConfig::default()));
        let mut reference = entry('b', 0x20, Config::Reference { target: 0 });
        // Originally declared against a section that was collapsed away.
        reference.ref_md5 = Some(IdentityKey::new("c".repeat(32)).unwrap());
        let table = StringTable::new();

        let text = render_filtered_catalogue(&[target, reference], &table);
        assert!(text.contains(&format!("RefMD5={}", "a".repeat(32))));
        assert!(!text.contains(&"c".repeat(32)));
    }

    #[test]
    fn cheat_strings_are_materialized_from_the_table() {
        let mut table = StringTable::new();
        let index = table.intern("D109911A 0000", "Game A").unwrap();
        let mut config = DirectConfig::default();
        config.cheat_ref = index;
        let text =
            render_filtered_catalogue(&[entry('a', 0x10, Config::Direct(config))], &table);
        assert!(text.contains("Cheat0=D109911A 0000"));
    }
}
