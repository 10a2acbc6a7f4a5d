#![deny(unsafe_code)]

pub mod catalogue;
pub mod error;
pub mod records;
pub mod strings;

pub use catalogue::render_filtered_catalogue;
pub use error::EmitError;
pub use records::{RECORD_LEN, emit_records, pack_config};
pub use strings::{render_string_table, string_table_values};
