//! Error types for the catalogue data model.

use thiserror::Error;

/// Errors raised when constructing or mutating model values.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Unrecognized `SaveType` token.
    #[error("unrecognized save type: {token:?}")]
    InvalidEnumValue { token: String },

    /// Numeric field outside its valid range.
    #[error("{field} value {value} out of range {min}..={max}")]
    OutOfRangeValue {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },

    /// Section identity key is not exactly 32 characters.
    #[error("identity key must be exactly 32 characters, got {len}: {key:?}")]
    InvalidIdentityKey { key: String, len: usize },

    /// Cheat string table exceeded its 31-slot capacity.
    #[error("string table full: capacity {capacity} exceeded by {value:?}")]
    StringTableFull { capacity: usize, value: String },
}

pub type Result<T> = std::result::Result<T, ModelError>;
