//! Differential comparison of two keyed forest sets.
//!
//! Keys of both sets are paired, each pair is diffed with `diff_forests`,
//! and the result carries the heat palette used to style its nodes.

use log::{debug, warn};
use std::collections::HashMap;
use std::hash::Hash;

use super::engine::{diff_forests, DifferentialForest, DifferentialWeightedTree};
use super::label::format_label;
use crate::palette::{HeatPalette, HeatStyle, PaletteConfig, PaletteError};
use crate::tree::{ForestSet, SymbolResolver};

/// Differential forests keyed by the first set's keys
///
/// **Public** - returned by diff_forest_sets
#[derive(Debug, Clone)]
pub struct DifferentialTreeSet<'a, K, S> {
    /// Paired keys of the first set, in its order
    keys: Vec<K>,

    forests: HashMap<K, DifferentialForest<'a, S>>,

    palette: HeatPalette,

    empty: DifferentialForest<'a, S>,
}

impl<'a, K: Eq + Hash, S> DifferentialTreeSet<'a, K, S> {
    pub fn keys(&self) -> &[K] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Differential forest of a key; empty if the key was not paired
    pub fn get(&self, key: &K) -> &DifferentialForest<'a, S> {
        self.forests.get(key).unwrap_or(&self.empty)
    }

    /// Iterate over `(key, forest)` pairs in key order
    pub fn iter(&self) -> impl Iterator<Item = (&K, &DifferentialForest<'a, S>)> + '_ {
        self.keys.iter().map(move |key| (key, self.get(key)))
    }

    pub fn palette(&self) -> &HeatPalette {
        &self.palette
    }

    /// Heat style of a node with this set's palette
    ///
    /// A node that weighs zero on both sides has no change (`0/0`) and is
    /// `Equal`. Only nodes missing from the baseline get the NaN style.
    pub fn style_for(&self, node: &DifferentialWeightedTree<'_, S>) -> HeatStyle {
        if node.has_baseline() && node.difference().is_nan() {
            return HeatStyle::Equal;
        }
        self.palette.style_for(node.difference())
    }

    /// Display label of a node
    pub fn label_for<R>(&self, node: &DifferentialWeightedTree<'_, S>, resolver: &R) -> String
    where
        R: SymbolResolver<S> + ?Sized,
    {
        format_label(node, resolver)
    }
}

/// Pair keys of two sets
///
/// # Algorithm
/// 1. If each side has exactly one key, the two keys are paired
/// 2. Otherwise keys present on both sides are paired with themselves
///
/// Unmatched keys are ignored. Pairs follow the order of `first`.
pub fn pair_keys<'k, K: Eq>(first: &[&'k K], second: &[&'k K]) -> Vec<(&'k K, &'k K)> {
    if let ([one], [other]) = (first, second) {
        return vec![(*one, *other)];
    }

    first
        .iter()
        .filter_map(|key| {
            second
                .iter()
                .find(|candidate| **candidate == *key)
                .map(|other| (*key, *other))
        })
        .collect()
}

/// Diff every paired forest of two sets
///
/// **Public** - convenience over `diff_forests` for whole aggregations
///
/// # Arguments
/// * `first` - Baseline set
/// * `second` - Target set; the result borrows its forests
/// * `min_threshold` / `max_threshold` - Palette thresholds in percent,
///   missing ones take the default palette's value
///
/// # Errors
/// * `PaletteError` - if the thresholds do not form a valid palette
pub fn diff_forest_sets<'a, S, K, A, B>(
    first: &A,
    second: &'a B,
    min_threshold: Option<f64>,
    max_threshold: Option<f64>,
) -> Result<DifferentialTreeSet<'a, K, S>, PaletteError>
where
    S: Eq + Hash,
    K: Eq + Hash + Clone,
    A: ForestSet<S, Key = K> + ?Sized,
    B: ForestSet<S, Key = K> + ?Sized,
{
    let palette = PaletteConfig {
        min_threshold,
        max_threshold,
    }
    .build()?;

    let first_keys = first.keys();
    let second_keys = second.keys();
    let pairs = pair_keys(&first_keys, &second_keys);

    if pairs.is_empty() && !(first_keys.is_empty() && second_keys.is_empty()) {
        warn!("No keys in common between the two sets, nothing to compare");
    }

    let mut keys = Vec::with_capacity(pairs.len());
    let mut forests = HashMap::with_capacity(pairs.len());
    for (key, other) in pairs {
        let forest = diff_forests(first.forest(key), second.forest(other));
        keys.push(key.clone());
        forests.insert(key.clone(), forest);
    }

    debug!("Compared {} pairs of forests", keys.len());

    Ok(DifferentialTreeSet {
        keys,
        forests,
        palette,
        empty: DifferentialForest::new(),
    })
}
