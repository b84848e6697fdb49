//! Keyed collections of forests.

use std::hash::Hash;

use super::weighted::Forest;

/// A set of forests addressable by key (an element, a group bucket, ...)
///
/// Implemented by the aggregator and by grouped forests so the
/// differential engine can compare either of them.
pub trait ForestSet<S> {
    type Key: Eq + Hash + Clone;

    /// Keys in their natural (first-seen) order
    fn keys(&self) -> Vec<&Self::Key>;

    /// Forest for a key; unknown keys yield an empty forest
    fn forest(&self, key: &Self::Key) -> &Forest<S>;
}
