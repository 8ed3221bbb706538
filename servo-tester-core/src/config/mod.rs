//! Configuration types
//!
//! Board-agnostic configuration, parsed from the firmware's embedded TOML.

pub mod parse;
pub mod types;

pub use parse::{parse_config, ParseError};
pub use types::*;
