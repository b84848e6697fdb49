//! Weighted call trees.
//!
//! This module holds the data model shared by every other component:
//! - `WeightedTree`: one call site with its weight and callees
//! - `Forest`: an ordered, symbol-keyed set of trees
//! - `ForestSet`: forests addressable by element or bucket key
//! - `SymbolResolver`: display labels for symbols

pub mod set;
pub mod symbol;
pub mod weighted;

// Re-export main types
pub use set::ForestSet;
pub use symbol::{DisplayResolver, MapResolver, SymbolResolver};
pub use weighted::{Forest, WeightedTree};
