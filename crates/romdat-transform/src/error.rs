//! Error types for the transform stages.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransformError {
    /// Two sections share an identity key; reference resolution would be
    /// ambiguous.
    #[error("duplicate identity key {key} (sections {first:?} and {second:?})")]
    DuplicateIdentityKey {
        key: String,
        first: String,
        second: String,
    },
}
