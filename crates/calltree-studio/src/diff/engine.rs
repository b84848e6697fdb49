//! Core differential engine.
//!
//! Compares a baseline forest with a target forest. The output mirrors the
//! target exactly: same symbols, same structure, same weights. The baseline
//! only supplies the weights each target node is compared against.

use std::hash::Hash;

use crate::tree::{Forest, WeightedTree};

/// A target node annotated with its relative change against the baseline
///
/// **Public** - borrows the target tree it mirrors
#[derive(Debug, Clone)]
pub struct DifferentialWeightedTree<'a, S> {
    /// Target node this one mirrors, kept for display
    original: &'a WeightedTree<S>,

    /// Weight of the matching baseline node, if any
    baseline_weight: Option<u64>,

    /// `(target - baseline) / baseline`, NaN without a baseline node
    difference: f64,

    children: DifferentialForest<'a, S>,
}

impl<'a, S> DifferentialWeightedTree<'a, S> {
    pub fn symbol(&self) -> &'a S {
        self.original.symbol()
    }

    /// Weight of the mirrored target node
    pub fn weight(&self) -> u64 {
        self.original.weight()
    }

    /// Relative change. NaN when the node is new, infinite when the baseline
    /// node had weight 0.
    pub fn difference(&self) -> f64 {
        self.difference
    }

    pub fn baseline_weight(&self) -> Option<u64> {
        self.baseline_weight
    }

    /// Whether a baseline node with the same symbol existed at this position
    pub fn has_baseline(&self) -> bool {
        self.baseline_weight.is_some()
    }

    /// Target node this one mirrors
    pub fn original(&self) -> &'a WeightedTree<S> {
        self.original
    }

    pub fn children(&self) -> &DifferentialForest<'a, S> {
        &self.children
    }

    /// Depth of the deepest path, a leaf has depth 1
    pub fn max_depth(&self) -> usize {
        self.children.max_depth() + 1
    }
}

/// Ordered differential trees, in the target forest's order
#[derive(Debug, Clone)]
pub struct DifferentialForest<'a, S> {
    trees: Vec<DifferentialWeightedTree<'a, S>>,
}

impl<S> Default for DifferentialForest<'_, S> {
    fn default() -> Self {
        Self { trees: Vec::new() }
    }
}

impl<'a, S> DifferentialForest<'a, S> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.trees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DifferentialWeightedTree<'a, S>> {
        self.trees.iter()
    }

    /// Sum of the root weights (target weights)
    pub fn total_weight(&self) -> u64 {
        self.trees
            .iter()
            .fold(0u64, |total, tree| total.saturating_add(tree.weight()))
    }

    pub fn max_depth(&self) -> usize {
        self.trees
            .iter()
            .map(DifferentialWeightedTree::max_depth)
            .max()
            .unwrap_or(0)
    }

    pub fn node_count(&self) -> usize {
        self.trees
            .iter()
            .map(|tree| 1 + tree.children.node_count())
            .sum()
    }
}

impl<'a, S: PartialEq> DifferentialForest<'a, S> {
    /// Find the root for a symbol
    pub fn get(&self, symbol: &S) -> Option<&DifferentialWeightedTree<'a, S>> {
        self.trees.iter().find(|tree| tree.symbol() == symbol)
    }

    /// Follow a path of symbols from the roots
    pub fn find_path(&self, path: &[S]) -> Option<&DifferentialWeightedTree<'a, S>> {
        let (first, rest) = path.split_first()?;
        let mut node = self.get(first)?;
        for symbol in rest {
            node = node.children.get(symbol)?;
        }
        Some(node)
    }
}

impl<'s, 'a, S> IntoIterator for &'s DifferentialForest<'a, S> {
    type Item = &'s DifferentialWeightedTree<'a, S>;
    type IntoIter = std::slice::Iter<'s, DifferentialWeightedTree<'a, S>>;

    fn into_iter(self) -> Self::IntoIter {
        self.trees.iter()
    }
}

/// Compare two forests
///
/// **Public** - main entry point of the differential engine
///
/// # Arguments
/// * `baseline` - Forest supplying the reference weights
/// * `target` - Forest whose shape the result mirrors
///
/// # Returns
/// A differential forest with exactly the symbols and structure of `target`
///
/// # Algorithm
/// For each target node, depth first:
/// 1. Look for a node with the same symbol among the baseline siblings at
///    the same position (never elsewhere in the baseline)
/// 2. Difference is NaN without a match, else `(target - baseline) / baseline`
/// 3. Recurse with the match's children as siblings, or with no siblings at all
///
/// Baseline nodes without a target counterpart do not appear in the result.
/// `diff_forests(a, b)` and `diff_forests(b, a)` are not inverses.
pub fn diff_forests<'a, S: Eq + Hash>(
    baseline: &Forest<S>,
    target: &'a Forest<S>,
) -> DifferentialForest<'a, S> {
    diff_siblings(Some(baseline), target)
}

fn diff_siblings<'a, S: Eq + Hash>(
    baseline: Option<&Forest<S>>,
    target: &'a Forest<S>,
) -> DifferentialForest<'a, S> {
    DifferentialForest {
        trees: target
            .iter()
            .map(|tree| diff_tree(baseline.and_then(|siblings| siblings.get(tree.symbol())), tree))
            .collect(),
    }
}

fn diff_tree<'a, S: Eq + Hash>(
    baseline: Option<&WeightedTree<S>>,
    target: &'a WeightedTree<S>,
) -> DifferentialWeightedTree<'a, S> {
    let difference = match baseline {
        Some(node) => relative_difference(node.weight(), target.weight()),
        None => f64::NAN,
    };

    DifferentialWeightedTree {
        original: target,
        baseline_weight: baseline.map(WeightedTree::weight),
        difference,
        children: diff_siblings(baseline.map(WeightedTree::children), target.children()),
    }
}

/// Relative change from `baseline` to `target`, with IEEE division
///
/// A zero baseline gives `+inf` for a positive target and NaN for zero.
pub fn relative_difference(baseline: u64, target: u64) -> f64 {
    (target as f64 - baseline as f64) / baseline as f64
}
