//! Save hardware kinds recognized by the catalogue.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Cartridge save hardware, a closed set of six variants.
///
/// The numeric values are part of the packed record layout and must not
/// change: they occupy the 3-bit `save_kind` field of a direct config word.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SaveKind {
    Eeprom4Kb = 0,
    Eeprom16Kb = 1,
    Sram = 2,
    FlashRam = 3,
    ControllerPack = 4,
    #[default]
    None = 5,
}

impl SaveKind {
    /// Parses a catalogue `SaveType` token.
    ///
    /// The catalogue disambiguates on the first letter, with the EEPROM
    /// variants distinguished by the capacity digit after `"Eeprom "`.
    /// Anything else is a hard error.
    pub fn parse_token(token: &str) -> Result<Self, ModelError> {
        let invalid = || ModelError::InvalidEnumValue {
            token: token.to_string(),
        };
        match token.as_bytes().first() {
            Some(b'E') => match token.as_bytes().get("Eeprom ".len()) {
                Some(b'4') => Ok(SaveKind::Eeprom4Kb),
                Some(b'1') => Ok(SaveKind::Eeprom16Kb),
                _ => Err(invalid()),
            },
            Some(b'S') => Ok(SaveKind::Sram),
            Some(b'F') => Ok(SaveKind::FlashRam),
            Some(b'C') => Ok(SaveKind::ControllerPack),
            Some(b'N') => Ok(SaveKind::None),
            _ => Err(invalid()),
        }
    }

    /// Canonical name used in diagnostics and provenance comments.
    pub fn as_str(&self) -> &'static str {
        match self {
            SaveKind::Eeprom4Kb => "SAVE_EEPROM_4KB",
            SaveKind::Eeprom16Kb => "SAVE_EEPROM_16KB",
            SaveKind::Sram => "SAVE_SRAM",
            SaveKind::FlashRam => "SAVE_FLASH_RAM",
            SaveKind::ControllerPack => "SAVE_CONTROLLER_PACK",
            SaveKind::None => "SAVE_NONE",
        }
    }

    /// The token spelling accepted by [`SaveKind::parse_token`], used when
    /// re-serializing a catalogue.
    pub fn catalogue_token(&self) -> &'static str {
        match self {
            SaveKind::Eeprom4Kb => "Eeprom 4kb",
            SaveKind::Eeprom16Kb => "Eeprom 16kb",
            SaveKind::Sram => "Sram",
            SaveKind::FlashRam => "Flash ram",
            SaveKind::ControllerPack => "Controller pack",
            SaveKind::None => "None",
        }
    }

    /// The 3-bit field value for the packed record.
    pub fn bits(&self) -> u8 {
        *self as u8
    }
}

impl fmt::Display for SaveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
