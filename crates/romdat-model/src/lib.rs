#![deny(unsafe_code)]

pub mod entry;
pub mod error;
pub mod ids;
pub mod savekind;
pub mod strings;

pub use entry::{Config, DirectConfig, Entry, GOOD_NAME_MAX, truncate_display_name};
pub use error::{ModelError, Result};
pub use ids::IdentityKey;
pub use savekind::SaveKind;
pub use strings::{STRING_TABLE_CAPACITY, StringSlot, StringTable};
