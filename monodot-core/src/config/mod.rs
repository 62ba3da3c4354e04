//! Configuration types
//!
//! Board-agnostic configuration structures plus a parser for the small
//! TOML subset used by device config files.

pub mod parse;
pub mod types;

pub use parse::{parse_config, ParseError};
pub use types::*;
