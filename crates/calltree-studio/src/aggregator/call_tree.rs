//! Build per-element call-tree forests from stack samples.
//!
//! A sample is one observed call path, root first, with a weight:
//! `["main", "execute", "read"]` weighted 1000 means main called execute
//! which called read, and 1000 units were spent there.
//!
//! Every element (typically a thread) owns its own forest. Samples with the
//! same prefix share nodes; a node's weight is the total of every sample
//! passing through it.

use log::debug;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::hash::Hash;

use crate::tree::{Forest, ForestSet};

/// How adjacent repeated symbols in a sample are handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecursionPolicy {
    /// Every occurrence is its own depth level
    #[default]
    Keep,

    /// Runs of the same symbol collapse into a single level
    Fold,
}

/// Aggregates samples into one forest per element
///
/// **Public** - main entry point for tree building
#[derive(Debug, Clone)]
pub struct CallTreeAggregator<E, S> {
    /// Elements in the order their first sample arrived
    elements: Vec<E>,

    forests: HashMap<E, Forest<S>>,

    recursion: RecursionPolicy,

    /// Number of non-empty samples accepted so far
    sample_count: u64,

    /// Returned for unknown elements
    empty: Forest<S>,
}

impl<E: Eq + Hash + Clone, S: Eq + Hash + Clone> CallTreeAggregator<E, S> {
    /// Create an aggregator that keeps recursive frames as separate levels
    pub fn new() -> Self {
        Self::with_recursion(RecursionPolicy::Keep)
    }

    /// Create an aggregator with an explicit recursion policy
    pub fn with_recursion(recursion: RecursionPolicy) -> Self {
        Self {
            elements: Vec::new(),
            forests: HashMap::new(),
            recursion,
            sample_count: 0,
            empty: Forest::new(),
        }
    }

    pub fn recursion(&self) -> RecursionPolicy {
        self.recursion
    }

    /// Insert one sample into the forest of `element`
    ///
    /// # Arguments
    /// * `element` - Owner of the sample (e.g. a thread)
    /// * `symbols` - Call path, root first
    /// * `weight` - Sample count or duration to add along the path
    ///
    /// # Algorithm
    /// 1. Start at the element's root set
    /// 2. At each depth, find the child with `symbols[depth]`
    /// 3. Add the weight to it, or create it with that weight
    /// 4. Descend into its children for the next depth
    ///
    /// An empty `symbols` slice is ignored and does not register the element.
    pub fn add_sample(&mut self, element: E, symbols: &[S], weight: u64) {
        if symbols.is_empty() {
            debug!("Ignoring empty sample");
            return;
        }

        let forest = match self.forests.entry(element) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                self.elements.push(entry.key().clone());
                entry.insert(Forest::new())
            }
        };

        match self.recursion {
            RecursionPolicy::Keep => forest.insert_path(symbols, weight),
            RecursionPolicy::Fold => forest.insert_path(&fold_recursion(symbols), weight),
        }

        self.sample_count += 1;
    }

    /// Insert one sample with weight 1
    pub fn add_sample_once(&mut self, element: E, symbols: &[S]) {
        self.add_sample(element, symbols, 1);
    }

    /// Current forest of an element; empty if the element is unknown
    pub fn forest(&self, element: &E) -> &Forest<S> {
        self.forests.get(element).unwrap_or(&self.empty)
    }

    /// Elements in first-seen order
    pub fn elements(&self) -> &[E] {
        &self.elements
    }

    pub fn sample_count(&self) -> u64 {
        self.sample_count
    }

    /// Iterate over `(element, forest)` pairs in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&E, &Forest<S>)> + '_ {
        self.elements
            .iter()
            .map(move |element| (element, self.forest(element)))
    }

    /// Consume the aggregator, returning forests in first-seen order
    pub fn into_forests(mut self) -> Vec<(E, Forest<S>)> {
        let mut forests = Vec::with_capacity(self.elements.len());
        for element in self.elements {
            if let Some(forest) = self.forests.remove(&element) {
                forests.push((element, forest));
            }
        }
        forests
    }
}

impl<E: Eq + Hash + Clone, S: Eq + Hash + Clone> Default for CallTreeAggregator<E, S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Eq + Hash + Clone, S: Eq + Hash + Clone> ForestSet<S> for CallTreeAggregator<E, S> {
    type Key = E;

    fn keys(&self) -> Vec<&E> {
        self.elements.iter().collect()
    }

    fn forest(&self, key: &E) -> &Forest<S> {
        CallTreeAggregator::forest(self, key)
    }
}

/// Collapse runs of the same adjacent symbol: `a b b b c b` -> `a b c b`
///
/// **Public** - also useful to callers preparing their own samples
pub fn fold_recursion<S: PartialEq + Clone>(symbols: &[S]) -> Vec<S> {
    let mut folded = symbols.to_vec();
    folded.dedup();
    folded
}
