//! Packed binary record emission.
//!
//! Each entry becomes one fixed-width 12-byte record: the 64-bit crc in
//! big-endian order followed by a 4-byte config word, little-endian. The
//! config word keeps the original packed layout:
//!
//! ```text
//! direct:    bit 0      discriminant (0)
//!            bits 1-3   save_kind
//!            bits 4-6   players
//!            bit 7      rumble
//!            bit 8      transfer_pak
//!            bits 9-11  status
//!            bits 12-14 count_per_op
//!            bit 15     disable_extra_mem
//!            bits 16-20 cheat_ref
//!            bit 21     memory_pak
//!            bit 22     bio_pak
//!            bit 23     si_dma_duration
//!            bits 24-31 zero
//! reference: bit 0      discriminant (1)
//!            bits 8-23  target index
//! ```

use romdat_model::{Config, DirectConfig, Entry};

use crate::error::EmitError;

/// Fixed width of one emitted record, in bytes.
pub const RECORD_LEN: usize = 12;

/// Packs one config into its 4-byte word. Fields are masked to their
/// documented widths; range validation happens in [`emit_records`].
pub fn pack_config(config: &Config) -> u32 {
    match config {
        Config::Direct(direct) => pack_direct(direct),
        Config::Reference { target } => 0x1 | (u32::from(*target) << 8),
    }
}

fn pack_direct(direct: &DirectConfig) -> u32 {
    let mut word = 0u32;
    word |= u32::from(direct.save_kind.bits() & 0x7) << 1;
    word |= u32::from(direct.players & 0x7) << 4;
    word |= u32::from(direct.rumble) << 7;
    word |= u32::from(direct.transfer_pak) << 8;
    word |= u32::from(direct.status & 0x7) << 9;
    word |= u32::from(direct.count_per_op & 0x7) << 12;
    word |= u32::from(direct.disable_extra_mem) << 15;
    word |= u32::from(direct.cheat_ref & 0x1f) << 16;
    word |= u32::from(direct.memory_pak) << 21;
    word |= u32::from(direct.bio_pak) << 22;
    word |= u32::from(direct.si_dma_duration) << 23;
    word
}

/// Emits the final record stream, validating the sequence invariants first.
///
/// Identical input always produces byte-identical output.
pub fn emit_records(entries: &[Entry]) -> Result<Vec<u8>, EmitError> {
    validate_entries(entries)?;
    let mut out = Vec::with_capacity(entries.len() * RECORD_LEN);
    for entry in entries {
        out.extend_from_slice(&entry.crc.to_be_bytes());
        out.extend_from_slice(&pack_config(&entry.config).to_le_bytes());
    }
    Ok(out)
}

fn validate_entries(entries: &[Entry]) -> Result<(), EmitError> {
    for entry in entries {
        match &entry.config {
            Config::Reference { target } => {
                let index = usize::from(*target);
                let Some(found) = entries.get(index) else {
                    return Err(EmitError::UnresolvedReference {
                        section: entry.md5.to_string(),
                        target: *target,
                        len: entries.len(),
                    });
                };
                if found.config.is_reference() {
                    return Err(EmitError::ReferenceChain {
                        section: entry.md5.to_string(),
                        target: *target,
                    });
                }
            }
            Config::Direct(direct) => {
                let checks: [(&'static str, u8, u8); 4] = [
                    ("players", direct.players, 7),
                    ("status", direct.status, 5),
                    ("count_per_op", direct.count_per_op, 4),
                    ("cheat_ref", direct.cheat_ref, 31),
                ];
                for (field, value, max) in checks {
                    if value > max {
                        return Err(EmitError::FieldOverflow {
                            section: entry.md5.to_string(),
                            field,
                            value,
                        });
                    }
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::{Strategy, any, prop};
    use proptest::proptest;
    use romdat_model::{IdentityKey, SaveKind};

    fn entry(md5: char, crc: u64, config: Config) -> Entry {
        let mut entry = Entry::new(IdentityKey::new(md5.to_string().repeat(32)).unwrap());
        entry.crc = crc;
        entry.config = config;
        entry
    }

    #[test]
    fn default_config_packs_to_documented_word() {
        // save_kind=5, players=4, rumble=1, count_per_op=2, mempak=1.
        let word = pack_config(&Config::Direct(DirectConfig::default()));
        let expected = (5 << 1) | (4 << 4) | (1 << 7) | (2 << 12) | (1 << 21);
        assert_eq!(word, expected);
    }

    #[test]
    fn reference_word_carries_discriminant_and_target() {
        let word = pack_config(&Config::Reference { target: 0x0203 });
        assert_eq!(word, 0x1 | (0x0203 << 8));
    }

    #[test]
    fn records_are_fixed_width_with_big_endian_crc() {
        let entries = vec![entry('a', 0x1234_5678_9ABC_DEF0, Config::Direct(DirectConfig::default()))];
        let bytes = emit_records(&entries).unwrap();
        assert_eq!(bytes.len(), RECORD_LEN);
        assert_eq!(&bytes[..8], &[0x12, 0x34, 0x56, 0x78, 0x9A, 0xBC, 0xDE, 0xF0]);
    }

    #[test]
    fn emission_is_deterministic() {
        let entries = vec![
            entry('a', 0x10, Config::Direct(DirectConfig::default())),
            entry('b', 0x20, Config::Reference { target: 0 }),
        ];
        assert_eq!(emit_records(&entries).unwrap(), emit_records(&entries).unwrap());
    }

    #[test]
    fn dangling_target_is_rejected() {
        let entries = vec![entry('a', 0x10, Config::Reference { target: 7 })];
        assert!(matches!(
            emit_records(&entries).unwrap_err(),
            EmitError::UnresolvedReference { target: 7, .. }
        ));
    }

    #[test]
    fn reference_chain_is_rejected() {
        let entries = vec![
            entry('a', 0x10, Config::Reference { target: 1 }),
            entry('b', 0x20, Config::Reference { target: 0 }),
        ];
        assert!(matches!(
            emit_records(&entries).unwrap_err(),
            EmitError::ReferenceChain { .. }
        ));
    }

    fn arb_direct() -> impl Strategy<Value = DirectConfig> {
        let kinds = prop::sample::select(vec![
            SaveKind::Eeprom4Kb,
            SaveKind::Eeprom16Kb,
            SaveKind::Sram,
            SaveKind::FlashRam,
            SaveKind::ControllerPack,
            SaveKind::None,
        ]);
        (
            (kinds, 0u8..=7, any::<bool>(), any::<bool>(), 0u8..=5, 1u8..=4),
            (
                any::<bool>(),
                0u8..=31,
                any::<bool>(),
                any::<bool>(),
                any::<bool>(),
            ),
        )
            .prop_map(
                |(
                    (save_kind, players, rumble, transfer_pak, status, count_per_op),
                    (disable_extra_mem, cheat_ref, memory_pak, bio_pak, si_dma_duration),
                )| DirectConfig {
                    save_kind,
                    players,
                    rumble,
                    transfer_pak,
                    status,
                    count_per_op,
                    disable_extra_mem,
                    cheat_ref,
                    memory_pak,
                    bio_pak,
                    si_dma_duration,
                },
            )
    }

    proptest! {
        #[test]
        fn direct_words_stay_in_24_bits_with_zero_discriminant(direct in arb_direct()) {
            let word = pack_config(&Config::Direct(direct));
            assert_eq!(word & 0x1, 0);
            assert_eq!(word >> 24, 0);
        }

        #[test]
        fn packing_is_injective_over_fields(a in arb_direct(), b in arb_direct()) {
            let wa = pack_config(&Config::Direct(a));
            let wb = pack_config(&Config::Direct(b));
            assert_eq!(wa == wb, a == b);
        }
    }
}
