//! Error types for catalogue ingestion.

use romdat_model::ModelError;
use thiserror::Error;

/// Errors raised while scanning or parsing a catalogue.
///
/// All variants carry the 1-based line number of the offending input so
/// failures point back at the catalogue text.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Structurally malformed line (bad section header, missing `=`).
    #[error("line {line}: malformed line: {message}")]
    MalformedLine { line: usize, message: String },

    /// A key appeared before any section header.
    #[error("line {line}: key {key:?} outside any section")]
    KeyOutsideSection { line: usize, key: String },

    /// A recognized key carried an unparseable or invalid value.
    #[error("line {line}: key {key:?} in section {section}: {message}")]
    InvalidValue {
        line: usize,
        section: String,
        key: String,
        message: String,
    },

    /// Model-level rejection (enum token, range, string table capacity).
    #[error("line {line}: key {key:?} in section {section}: {source}")]
    Model {
        line: usize,
        section: String,
        key: String,
        source: ModelError,
    },

    /// Unknown key encountered in strict mode.
    #[error("line {line}: unknown key {key:?} in section {section}")]
    UnknownKey {
        line: usize,
        section: String,
        key: String,
    },
}
