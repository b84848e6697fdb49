//! Calltree Studio library
//!
//! Weighted call-tree aggregation, hierarchical grouping, differential
//! comparison and heat styling. The CLI in `bin/calltree` drives it from
//! collapsed stack files.

pub mod aggregator;
pub mod commands;
pub mod diff;
pub mod group;
pub mod output;
pub mod palette;
pub mod parser;
pub mod tree;
pub mod utils;
