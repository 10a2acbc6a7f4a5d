//! Catalogue entry model: the packed config shapes and their defaults.

use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::ids::IdentityKey;
use crate::savekind::SaveKind;

/// Maximum stored length of a display name, in bytes.
pub const GOOD_NAME_MAX: usize = 63;

/// Truncates a display name to [`GOOD_NAME_MAX`] bytes on a character
/// boundary.
pub fn truncate_display_name(name: &str) -> &str {
    let mut end = name.len().min(GOOD_NAME_MAX);
    while !name.is_char_boundary(end) {
        end -= 1;
    }
    &name[..end]
}

/// Full configuration fields of a direct-shape entry.
///
/// `Default` yields the documented reset values applied whenever a `CRC`
/// key is read for a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectConfig {
    pub save_kind: SaveKind,
    /// Supported player count, 0..=7.
    pub players: u8,
    pub rumble: bool,
    pub transfer_pak: bool,
    /// Emulation status, 0..=5.
    pub status: u8,
    /// Count per operation, 1..=4.
    pub count_per_op: u8,
    pub disable_extra_mem: bool,
    /// Index into the cheat string table; 0 means no cheat.
    pub cheat_ref: u8,
    pub memory_pak: bool,
    pub bio_pak: bool,
    /// SI DMA duration override; false is the default 0x900 timing.
    pub si_dma_duration: bool,
}

impl Default for DirectConfig {
    fn default() -> Self {
        Self {
            save_kind: SaveKind::None,
            players: 4,
            rumble: true,
            transfer_pak: false,
            status: 0,
            count_per_op: 2,
            disable_extra_mem: false,
            cheat_ref: 0,
            memory_pak: true,
            bio_pak: false,
            si_dma_duration: false,
        }
    }
}

impl DirectConfig {
    /// True when every field still carries its reset value.
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    pub fn set_players(&mut self, value: i64) -> Result<(), ModelError> {
        if !(0..=7).contains(&value) {
            return Err(ModelError::OutOfRangeValue {
                field: "Players",
                value,
                min: 0,
                max: 7,
            });
        }
        self.players = value as u8;
        Ok(())
    }

    pub fn set_status(&mut self, value: i64) -> Result<(), ModelError> {
        if !(0..=5).contains(&value) {
            return Err(ModelError::OutOfRangeValue {
                field: "Status",
                value,
                min: 0,
                max: 5,
            });
        }
        self.status = value as u8;
        Ok(())
    }

    pub fn set_count_per_op(&mut self, value: i64) -> Result<(), ModelError> {
        if !(1..=4).contains(&value) {
            return Err(ModelError::OutOfRangeValue {
                field: "CountPerOp",
                value,
                min: 1,
                max: 4,
            });
        }
        self.count_per_op = value as u8;
        Ok(())
    }
}

/// Final shape of an entry's configuration.
///
/// The original packed union's 1-bit discriminant becomes the variant tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Config {
    /// Entry carries its own configuration fields.
    Direct(DirectConfig),
    /// Entry borrows the configuration of the entry at `target`.
    Reference { target: u16 },
}

impl Config {
    pub fn is_reference(&self) -> bool {
        matches!(self, Config::Reference { .. })
    }

    pub fn as_direct(&self) -> Option<&DirectConfig> {
        match self {
            Config::Direct(direct) => Some(direct),
            Config::Reference { .. } => None,
        }
    }
}

/// One catalogue item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// 64-bit content checksum; not unique in raw input.
    pub crc: u64,
    pub config: Config,
    /// Section identity key, used for reference correlation.
    pub md5: IdentityKey,
    /// Set when this section declared `RefMD5=...`.
    pub ref_md5: Option<IdentityKey>,
    /// Resolution cache: the referenced entry's crc, filled by the resolver.
    pub ref_crc: Option<u64>,
    /// Display name, truncated to [`GOOD_NAME_MAX`] bytes.
    pub good_name: String,
}

impl Entry {
    pub fn new(md5: IdentityKey) -> Self {
        Self {
            crc: 0,
            config: Config::Direct(DirectConfig::default()),
            md5,
            ref_md5: None,
            ref_crc: None,
            good_name: String::new(),
        }
    }

    /// True when this entry declared itself a reference to another section.
    pub fn is_reference(&self) -> bool {
        self.ref_md5.is_some() || self.config.is_reference()
    }

    /// Sets the display name, silently truncating to [`GOOD_NAME_MAX`] bytes
    /// on a character boundary.
    pub fn set_good_name(&mut self, name: &str) {
        self.good_name = truncate_display_name(name).to_string();
    }
}
