//! Section identity keys used for reference lookups.

use std::fmt;

use crate::error::ModelError;

/// The 32-character textual key attached to a catalogue section header.
///
/// Used purely for `RefMD5` reference lookups; distinct from the numeric
/// content hash carried by the `CRC` key.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct IdentityKey(String);

impl IdentityKey {
    pub fn new(value: impl Into<String>) -> Result<Self, ModelError> {
        let value = value.into();
        if value.chars().count() != 32 {
            let len = value.chars().count();
            return Err(ModelError::InvalidIdentityKey { key: value, len });
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IdentityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
