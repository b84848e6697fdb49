//! Calculate hot paths and weight statistics from a forest.
//!
//! Hot paths are the call paths with the largest self weight, i.e. the
//! places where cost is actually spent rather than passed on to callees.
//! These are the primary targets for optimization.

use log::debug;
use serde::Serialize;

use crate::tree::Forest;

/// One call path and the weight spent in its last frame
///
/// **Public** - returned from calculate_hot_paths
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HotPath<S> {
    /// Symbols from root to the hot frame
    pub path: Vec<S>,

    /// Weight spent in the last frame itself
    pub self_weight: u64,

    /// Percentage of the forest's total weight
    pub percentage: f64,
}

/// Calculate hot paths from a forest
///
/// **Public** - main entry point for metrics calculation
///
/// # Arguments
/// * `forest` - Forest built by the aggregator or the group merger
/// * `top_n` - Number of top paths to return (e.g., 10)
///
/// # Returns
/// Paths with a non-zero self weight, heaviest first. Ties keep depth-first order.
pub fn calculate_hot_paths<S: Clone>(forest: &Forest<S>, top_n: usize) -> Vec<HotPath<S>> {
    let total = forest.total_weight();
    let mut paths = Vec::new();
    collect_paths(forest, &mut Vec::new(), &mut paths);

    debug!(
        "Calculating top {} hot paths from {} weighted paths",
        top_n,
        paths.len()
    );

    // Stable sort keeps depth-first order between equal weights
    paths.sort_by(|a, b| b.1.cmp(&a.1));

    paths
        .into_iter()
        .take(top_n)
        .map(|(path, self_weight)| create_hot_path(path, self_weight, total))
        .collect()
}

fn collect_paths<S: Clone>(forest: &Forest<S>, prefix: &mut Vec<S>, out: &mut Vec<(Vec<S>, u64)>) {
    for tree in forest {
        prefix.push(tree.symbol().clone());
        let self_weight = tree.self_weight();
        if self_weight > 0 {
            out.push((prefix.clone(), self_weight));
        }
        collect_paths(tree.children(), prefix, out);
        prefix.pop();
    }
}

/// Create a HotPath, computing its share of the total
pub fn create_hot_path<S>(path: Vec<S>, self_weight: u64, total_weight: u64) -> HotPath<S> {
    let percentage = if total_weight > 0 {
        (self_weight as f64 / total_weight as f64) * 100.0
    } else {
        0.0
    };

    HotPath {
        path,
        self_weight,
        percentage,
    }
}

/// Calculate weight distribution statistics
///
/// **Public** - provides summary statistics
pub fn calculate_weight_distribution<S>(forest: &Forest<S>) -> WeightDistribution {
    if forest.is_empty() {
        return WeightDistribution::default();
    }

    let total_weight = forest.total_weight();
    let top_root_weight = forest.iter().map(|tree| tree.weight()).max().unwrap_or(0);

    WeightDistribution {
        total_weight,
        root_count: forest.len(),
        node_count: forest.node_count(),
        leaf_count: count_leaves(forest),
        max_depth: forest.max_depth(),
        top_root_weight,
        top_root_percentage: if total_weight > 0 {
            (top_root_weight as f64 / total_weight as f64) * 100.0
        } else {
            0.0
        },
    }
}

fn count_leaves<S>(forest: &Forest<S>) -> usize {
    forest
        .iter()
        .map(|tree| {
            if tree.children().is_empty() {
                1
            } else {
                count_leaves(tree.children())
            }
        })
        .sum()
}

/// Weight distribution statistics
///
/// **Public** - returned from calculate_weight_distribution
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WeightDistribution {
    /// Sum of the root weights
    pub total_weight: u64,

    pub root_count: usize,

    pub node_count: usize,

    pub leaf_count: usize,

    /// Depth of the deepest path
    pub max_depth: usize,

    /// Weight of the heaviest root
    pub top_root_weight: u64,

    /// Percentage of total weight under the heaviest root
    pub top_root_percentage: f64,
}

impl WeightDistribution {
    /// Returns true if a single root holds more than 80% of the weight
    pub fn is_highly_concentrated(&self) -> bool {
        self.top_root_percentage > 80.0
    }

    /// Get human-readable summary
    ///
    /// **Public** - for logging and debugging
    pub fn summary(&self) -> String {
        format!(
            "Total: {} | Roots: {} | Nodes: {} | Leaves: {} | Depth: {} | Top root: {:.1}%",
            self.total_weight,
            self.root_count,
            self.node_count,
            self.leaf_count,
            self.max_depth,
            self.top_root_percentage
        )
    }
}
