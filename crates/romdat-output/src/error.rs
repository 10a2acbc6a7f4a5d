//! Error types for record emission.

use thiserror::Error;

/// Errors raised while packing the final record stream.
///
/// The transform stages uphold these invariants, so any of these indicates
/// an inconsistent entry sequence rather than bad catalogue input.
#[derive(Debug, Error)]
pub enum EmitError {
    /// A reference record points outside the entry sequence.
    #[error("section {section}: reference target {target} out of bounds (have {len} entries)")]
    UnresolvedReference {
        section: String,
        target: u16,
        len: usize,
    },

    /// A reference record points at another reference record.
    #[error("section {section}: reference target {target} is not direct-shape")]
    ReferenceChain { section: String, target: u16 },

    /// A direct config field exceeds its packed bit width.
    #[error("section {section}: {field} value {value} exceeds its packed width")]
    FieldOverflow {
        section: String,
        field: &'static str,
        value: u8,
    },
}
