#![deny(unsafe_code)]

pub mod logging;
pub mod pipeline;
pub mod types;
