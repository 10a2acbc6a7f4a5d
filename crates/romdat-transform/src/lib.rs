#![deny(unsafe_code)]

pub mod dedupe;
pub mod error;
pub mod link;
pub mod resolve;
pub mod sort;

pub use dedupe::{DedupeStats, dedupe_entries};
pub use error::TransformError;
pub use link::{LinkStats, link_references};
pub use resolve::resolve_references;
pub use sort::sort_entries;
