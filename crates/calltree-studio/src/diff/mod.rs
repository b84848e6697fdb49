//! Differential comparison of call-tree forests.
//!
//! This module compares a baseline forest with a target forest and produces
//! a forest shaped like the target, where every node carries its relative
//! change. Whole aggregations can be compared with `diff_forest_sets`, and
//! the result turned into a serializable report.
//!
//! # Example
//! ```ignore
//! use calltree_studio::diff::{diff_forest_sets, generate_report};
//!
//! let set = diff_forest_sets(&baseline, &target, None, Some(10.0))?;
//! for (element, forest) in set.iter() {
//!     for node in forest {
//!         println!("{} {}", set.label_for(node, &DisplayResolver), set.style_for(node));
//!     }
//! }
//! ```

mod engine;
mod label;
mod output;
mod report;
mod schema;
mod set;

// Public API exports
pub use engine::{diff_forests, relative_difference, DifferentialForest, DifferentialWeightedTree};
pub use label::{format_difference, format_label};
pub use output::render_terminal_diff;
pub use report::generate_report;
pub use schema::{
    DiffNodeReport, DiffReport, DiffSummary, ElementDiffReport, InputMetadata, PaletteSummary,
};
pub use set::{diff_forest_sets, pair_keys, DifferentialTreeSet};
