//! Aggregation of stack samples into call-tree forests and metrics.
//!
//! This module transforms raw samples into:
//! - Per-element forests of weighted trees
//! - Hot path analysis (heaviest self-weight paths)
//! - Weight distribution statistics

pub mod call_tree;
pub mod metrics;

// Re-export main types and functions
pub use call_tree::{fold_recursion, CallTreeAggregator, RecursionPolicy};
pub use metrics::{
    calculate_hot_paths, calculate_weight_distribution, create_hot_path, HotPath,
    WeightDistribution,
};
