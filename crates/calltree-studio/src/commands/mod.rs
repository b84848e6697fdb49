//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the various library components to perform user tasks.

pub mod diff;
pub mod models;
pub mod tree;
pub mod utils;

// Re-export main command functions
pub use diff::execute_diff;
pub use models::{DiffArgs, TreeArgs};
pub use tree::execute_tree;
pub use utils::{
    build_aggregator, display_styles, display_version, element_hierarchy, resolve_palette,
};
