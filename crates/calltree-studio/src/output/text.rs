//! Text rendering of forests and their metrics for the terminal.

use colored::*;

use crate::aggregator::{HotPath, WeightDistribution};
use crate::tree::{Forest, SymbolResolver};

/// Render a forest as an indented tree
///
/// Each line shows the label, the weight, and the share of the forest's
/// total weight. Children are listed heaviest first.
///
/// # Arguments
/// * `forest` - Forest to render
/// * `resolver` - Labels for the symbols
/// * `max_depth` - Deepest level to print, `None` for everything
pub fn render_forest<S, R>(forest: &Forest<S>, resolver: &R, max_depth: Option<usize>) -> String
where
    R: SymbolResolver<S> + ?Sized,
{
    let mut out = String::new();
    let total = forest.total_weight();
    render_level(forest, resolver, total, 0, max_depth, &mut out);
    out
}

fn render_level<S, R>(
    forest: &Forest<S>,
    resolver: &R,
    total: u64,
    depth: usize,
    max_depth: Option<usize>,
    out: &mut String,
) where
    R: SymbolResolver<S> + ?Sized,
{
    if max_depth.is_some_and(|max| depth >= max) {
        return;
    }

    let mut trees: Vec<_> = forest.iter().collect();
    trees.sort_by(|a, b| b.weight().cmp(&a.weight()));

    for tree in trees {
        out.push_str(&format!(
            "{}{} {} ({:.2}%)\n",
            "  ".repeat(depth + 1),
            resolver.resolve(tree.symbol()),
            tree.weight(),
            percentage(tree.weight(), total)
        ));
        render_level(tree.children(), resolver, total, depth + 1, max_depth, out);
    }
}

/// Render hot paths as a numbered list
pub fn render_hot_paths<S, R>(hot_paths: &[HotPath<S>], resolver: &R) -> String
where
    R: SymbolResolver<S> + ?Sized,
{
    let mut out = String::new();
    out.push_str(&"Top Hot Paths:".bold().to_string());
    out.push('\n');

    if hot_paths.is_empty() {
        out.push_str("  (none)\n");
        return out;
    }

    for (i, path) in hot_paths.iter().enumerate() {
        let stack: Vec<String> = path.path.iter().map(|s| resolver.resolve(s)).collect();
        out.push_str(&format!(
            "  {}. {} {} ({:.2}%)\n",
            i + 1,
            stack.join(";"),
            path.self_weight,
            path.percentage
        ));
    }
    out
}

/// Render weight distribution statistics
pub fn render_distribution(distribution: &WeightDistribution) -> String {
    let mut out = format!("{}\n", distribution.summary());
    if distribution.is_highly_concentrated() {
        out.push_str(&format!(
            "{}\n",
            "Note: a single root holds most of the weight".yellow()
        ));
    }
    out
}

fn percentage(weight: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        weight as f64 / total as f64 * 100.0
    }
}
