//! Prefix-merged weighted trees and the forests that hold them.
//!
//! A `WeightedTree` is one call site: a symbol, the weight accumulated at
//! and below it, and its callees. A `Forest` is an ordered set of trees with
//! pairwise distinct symbols; it is used both for the roots of an element
//! and for the children of a node.
//!
//! Trees only grow through `Forest::insert_path` and the merge operations.
//! There are no parent pointers; derived views are rebuilt from the forest.

use serde::ser::{Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use crate::utils::error::TreeError;

/// A single node of a weighted call tree
///
/// **Public** - the data entity everything else is built on
#[derive(Debug, Clone, serde::Serialize)]
pub struct WeightedTree<S> {
    /// Identity of this call site
    symbol: S,

    /// Accumulated weight (sample count or duration) at and below this node
    weight: u64,

    /// Callees, keyed by symbol
    children: Forest<S>,
}

/// Ordered collection of weighted trees keyed by symbol
///
/// Iteration follows insertion order. Lookups by symbol go through an index
/// so an insert costs one hash lookup per level.
#[derive(Debug, Clone)]
pub struct Forest<S> {
    trees: Vec<WeightedTree<S>>,
    index: HashMap<S, usize>,
}

impl<S> WeightedTree<S> {
    /// Symbol of this call site
    pub fn symbol(&self) -> &S {
        &self.symbol
    }

    /// Weight at and below this call site
    pub fn weight(&self) -> u64 {
        self.weight
    }

    /// Callees of this call site
    pub fn children(&self) -> &Forest<S> {
        &self.children
    }

    /// Maximum depth under and including this node. A leaf has depth 1.
    pub fn max_depth(&self) -> usize {
        self.children.max_depth() + 1
    }

    /// Weight spent in this node itself, not accounted for by any callee
    pub fn self_weight(&self) -> u64 {
        self.weight.saturating_sub(self.children.total_weight())
    }
}

impl<S: Eq + Hash + Clone> WeightedTree<S> {
    /// Create a childless node
    pub fn new(symbol: S, weight: u64) -> Self {
        Self {
            symbol,
            weight,
            children: Forest::new(),
        }
    }

    /// Builder helper: add several children and return the node
    ///
    /// Children with the same symbol are merged, as with `add_child`.
    pub fn with_children(mut self, children: impl IntoIterator<Item = WeightedTree<S>>) -> Self {
        for child in children {
            self.add_child(child);
        }
        self
    }

    /// Add a callee. If a callee with the same symbol already exists, both
    /// are merged. The weight of this node is left untouched.
    pub fn add_child(&mut self, child: WeightedTree<S>) {
        self.children.insert_tree(child);
    }

    /// Fold `other` into this node without checking the symbol.
    fn absorb(&mut self, other: &WeightedTree<S>) {
        self.weight = self.weight.saturating_add(other.weight);
        self.children.merge_forest(&other.children);
    }
}

impl<S: Eq + Hash + Clone + fmt::Debug> WeightedTree<S> {
    /// Merge another tree of the same symbol into this one
    ///
    /// Weights are added and children are merged recursively.
    ///
    /// # Errors
    /// * `TreeError::SymbolMismatch` - if the two roots have different symbols
    pub fn merge(&mut self, other: &WeightedTree<S>) -> Result<(), TreeError> {
        if self.symbol != other.symbol {
            return Err(TreeError::SymbolMismatch {
                left: format!("{:?}", self.symbol),
                right: format!("{:?}", other.symbol),
            });
        }
        self.absorb(other);
        Ok(())
    }
}

impl<S: Eq + Hash> PartialEq for WeightedTree<S> {
    fn eq(&self, other: &Self) -> bool {
        self.symbol == other.symbol && self.weight == other.weight && self.children == other.children
    }
}

impl<S: Eq + Hash> Eq for WeightedTree<S> {}

impl<S> Default for Forest<S> {
    fn default() -> Self {
        Self {
            trees: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<S> Forest<S> {
    /// Create an empty forest
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of root trees
    pub fn len(&self) -> usize {
        self.trees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }

    /// Iterate over the root trees in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, WeightedTree<S>> {
        self.trees.iter()
    }

    /// Sum of the root weights, saturating at `u64::MAX`
    pub fn total_weight(&self) -> u64 {
        self.trees
            .iter()
            .fold(0u64, |total, tree| total.saturating_add(tree.weight))
    }

    /// Depth of the deepest tree, 0 for an empty forest
    pub fn max_depth(&self) -> usize {
        self.trees.iter().map(WeightedTree::max_depth).max().unwrap_or(0)
    }

    /// Number of nodes in every tree of the forest
    pub fn node_count(&self) -> usize {
        self.trees
            .iter()
            .map(|tree| 1 + tree.children.node_count())
            .sum()
    }
}

impl<S: Eq + Hash> Forest<S> {
    /// Find the root tree for a symbol
    pub fn get(&self, symbol: &S) -> Option<&WeightedTree<S>> {
        self.index.get(symbol).map(|&idx| &self.trees[idx])
    }

    pub fn contains(&self, symbol: &S) -> bool {
        self.index.contains_key(symbol)
    }

    /// Follow a path of symbols from the roots
    ///
    /// Returns `None` as soon as one level has no matching node.
    pub fn find_path(&self, path: &[S]) -> Option<&WeightedTree<S>> {
        let (first, rest) = path.split_first()?;
        let mut node = self.get(first)?;
        for symbol in rest {
            node = node.children.get(symbol)?;
        }
        Some(node)
    }
}

impl<S: Eq + Hash + Clone> Forest<S> {
    /// Get the tree for `symbol`, creating an empty one at the end if absent
    fn entry(&mut self, symbol: &S) -> &mut WeightedTree<S> {
        let idx = match self.index.get(symbol) {
            Some(&idx) => idx,
            None => {
                let idx = self.trees.len();
                self.trees.push(WeightedTree::new(symbol.clone(), 0));
                self.index.insert(symbol.clone(), idx);
                idx
            }
        };
        &mut self.trees[idx]
    }

    /// Insert one call path, root first, adding `weight` to every node on it
    ///
    /// Existing nodes along the path get their weight increased (saturating);
    /// missing ones are created. An empty path leaves the forest untouched.
    pub fn insert_path(&mut self, symbols: &[S], weight: u64) {
        let mut level = self;
        for symbol in symbols {
            let node = level.entry(symbol);
            node.weight = node.weight.saturating_add(weight);
            level = &mut node.children;
        }
    }

    /// Insert an owned tree, merging it into an existing root of the same symbol
    pub fn insert_tree(&mut self, tree: WeightedTree<S>) {
        match self.index.get(&tree.symbol) {
            Some(&idx) => self.trees[idx].absorb(&tree),
            None => {
                self.index.insert(tree.symbol.clone(), self.trees.len());
                self.trees.push(tree);
            }
        }
    }

    /// Merge a tree into this forest
    ///
    /// A missing root counts as weight 0 with no children, so merging into
    /// an empty forest yields a copy of `other`.
    pub fn merge_tree(&mut self, other: &WeightedTree<S>) {
        self.entry(&other.symbol).absorb(other);
    }

    /// Merge every tree of `other` into this forest
    pub fn merge_forest(&mut self, other: &Forest<S>) {
        for tree in &other.trees {
            self.merge_tree(tree);
        }
    }
}

/// Equality ignores sibling order: both forests must hold the same symbols
/// with equal trees under each of them.
impl<S: Eq + Hash> PartialEq for Forest<S> {
    fn eq(&self, other: &Self) -> bool {
        self.trees.len() == other.trees.len()
            && self
                .trees
                .iter()
                .all(|tree| other.get(&tree.symbol).is_some_and(|o| tree == o))
    }
}

impl<S: Eq + Hash> Eq for Forest<S> {}

impl<S: Eq + Hash + Clone> FromIterator<WeightedTree<S>> for Forest<S> {
    fn from_iter<I: IntoIterator<Item = WeightedTree<S>>>(iter: I) -> Self {
        let mut forest = Forest::new();
        for tree in iter {
            forest.insert_tree(tree);
        }
        forest
    }
}

impl<'a, S> IntoIterator for &'a Forest<S> {
    type Item = &'a WeightedTree<S>;
    type IntoIter = std::slice::Iter<'a, WeightedTree<S>>;

    fn into_iter(self) -> Self::IntoIter {
        self.trees.iter()
    }
}

impl<S: Serialize> Serialize for Forest<S> {
    fn serialize<Ser: Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
        serializer.collect_seq(&self.trees)
    }
}
