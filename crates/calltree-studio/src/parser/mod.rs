//! Parsers for sample input.
//!
//! Currently supports collapsed stack text, the format produced by most
//! stack-sampling profilers and flame graph tooling.

pub mod collapsed;

pub use collapsed::{
    parse_collapsed, parse_collapsed_reader, parse_line, read_collapsed_file, CollapsedStack,
};
