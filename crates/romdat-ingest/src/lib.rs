#![deny(unsafe_code)]

pub mod error;
pub mod parser;
pub mod scanner;

pub use error::IngestError;
pub use parser::{ParseOptions, parse_catalogue};
pub use scanner::{Line, LineKind, scan_lines};
