//! Merge element forests into one forest per group bucket.
//!
//! Merging two trees adds their weights and takes the union of their
//! children, merging children with the same symbol recursively. A side
//! without a given symbol counts as weight 0 with no children. The result
//! does not depend on the order in which forests are merged; only sibling
//! iteration order can differ.

use log::debug;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Mutex, PoisonError};

use super::descriptor::{BucketKey, GroupHierarchy};
use crate::tree::{Forest, ForestSet};
use crate::utils::error::GroupError;

/// Merged forests, one per bucket of a grouping level
///
/// **Public** - returned by group_forests
#[derive(Debug, Clone)]
pub struct GroupedForests<S> {
    level: usize,

    /// Buckets in the order their first member was seen
    buckets: Vec<BucketKey>,

    forests: HashMap<BucketKey, Forest<S>>,

    members: HashMap<BucketKey, usize>,

    empty: Forest<S>,
}

impl<S> GroupedForests<S> {
    /// Level these buckets were computed at
    pub fn level(&self) -> usize {
        self.level
    }

    pub fn buckets(&self) -> &[BucketKey] {
        &self.buckets
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Merged forest of a bucket; empty if the bucket is unknown
    pub fn forest(&self, key: &BucketKey) -> &Forest<S> {
        self.forests.get(key).unwrap_or(&self.empty)
    }

    /// Number of elements merged into a bucket
    pub fn member_count(&self, key: &BucketKey) -> usize {
        self.members.get(key).copied().unwrap_or(0)
    }

    /// Iterate over `(bucket, forest)` pairs in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&BucketKey, &Forest<S>)> + '_ {
        self.buckets.iter().map(move |key| (key, self.forest(key)))
    }
}

impl<S: Eq + Hash + Clone> ForestSet<S> for GroupedForests<S> {
    type Key = BucketKey;

    fn keys(&self) -> Vec<&BucketKey> {
        self.buckets.iter().collect()
    }

    fn forest(&self, key: &BucketKey) -> &Forest<S> {
        GroupedForests::forest(self, key)
    }
}

/// Merge several forests into a new one
///
/// **Public** - the generalized tree merge on its own
pub fn merge_forests<'a, S, I>(forests: I) -> Forest<S>
where
    S: Eq + Hash + Clone + 'a,
    I: IntoIterator<Item = &'a Forest<S>>,
{
    let mut merged = Forest::new();
    for forest in forests {
        merged.merge_forest(forest);
    }
    merged
}

/// Group element forests at a level of the hierarchy
///
/// **Public** - main entry point for grouping
///
/// # Arguments
/// * `elements` - `(element, forest)` pairs, e.g. from `CallTreeAggregator::iter`
/// * `hierarchy` - Grouping levels, coarsest first
/// * `level` - Target level, 0 merges everything into one bucket
///
/// # Errors
/// * `GroupError::UnknownLevel` - if `level` is deeper than the hierarchy
pub fn group_forests<'a, E, S, I>(
    elements: I,
    hierarchy: &GroupHierarchy<E>,
    level: usize,
) -> Result<GroupedForests<S>, GroupError>
where
    E: 'a,
    S: Eq + Hash + Clone + 'a,
    I: IntoIterator<Item = (&'a E, &'a Forest<S>)>,
{
    hierarchy.check_level(level)?;

    let mut grouped = GroupedForests {
        level,
        buckets: Vec::new(),
        forests: HashMap::new(),
        members: HashMap::new(),
        empty: Forest::new(),
    };

    for (element, forest) in elements {
        let key = hierarchy.bucket_key(element, level)?;
        if !grouped.forests.contains_key(&key) {
            grouped.buckets.push(key.clone());
        }
        *grouped.members.entry(key.clone()).or_insert(0) += 1;
        grouped.forests.entry(key).or_default().merge_forest(forest);
    }

    debug!(
        "Grouped forests into {} buckets at level {}",
        grouped.buckets.len(),
        level
    );

    Ok(grouped)
}

/// Group element forests using several worker threads
///
/// Produces the same weights and shapes as `group_forests`. Classification
/// runs on the calling thread; merging is spread over `workers` scoped
/// threads. Each bucket forest is guarded by its own mutex, so there is a
/// single writer per bucket at any time.
///
/// # Errors
/// * `GroupError::UnknownLevel` - if `level` is deeper than the hierarchy
/// * `GroupError::NoWorkers` - if `workers` is 0
pub fn group_forests_parallel<E, S>(
    elements: &[(&E, &Forest<S>)],
    hierarchy: &GroupHierarchy<E>,
    level: usize,
    workers: usize,
) -> Result<GroupedForests<S>, GroupError>
where
    S: Eq + Hash + Clone + Send + Sync,
{
    hierarchy.check_level(level)?;
    if workers == 0 {
        return Err(GroupError::NoWorkers);
    }

    let mut buckets: Vec<BucketKey> = Vec::new();
    let mut slots: HashMap<BucketKey, usize> = HashMap::new();
    let mut members: HashMap<BucketKey, usize> = HashMap::new();
    let mut assignments: Vec<(usize, &Forest<S>)> = Vec::with_capacity(elements.len());

    for (element, forest) in elements {
        let key = hierarchy.bucket_key(element, level)?;
        let slot = *slots.entry(key.clone()).or_insert_with(|| {
            buckets.push(key.clone());
            buckets.len() - 1
        });
        *members.entry(key).or_insert(0) += 1;
        assignments.push((slot, *forest));
    }

    let targets: Vec<Mutex<Forest<S>>> = buckets.iter().map(|_| Mutex::new(Forest::new())).collect();
    let chunk_size = assignments.len().div_ceil(workers).max(1);

    debug!(
        "Merging {} forests into {} buckets with {} workers",
        assignments.len(),
        buckets.len(),
        workers
    );

    std::thread::scope(|scope| {
        for chunk in assignments.chunks(chunk_size) {
            let targets = &targets;
            scope.spawn(move || {
                for (slot, forest) in chunk {
                    let mut target = targets[*slot].lock().unwrap_or_else(PoisonError::into_inner);
                    target.merge_forest(forest);
                }
            });
        }
    });

    let forests = buckets
        .iter()
        .cloned()
        .zip(targets)
        .map(|(key, target)| (key, target.into_inner().unwrap_or_else(PoisonError::into_inner)))
        .collect();

    Ok(GroupedForests {
        level,
        buckets,
        forests,
        members,
        empty: Forest::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::descriptor::GroupLevel;

    fn forest(paths: &[(&[&'static str], u64)]) -> Forest<&'static str> {
        let mut forest = Forest::new();
        for (path, weight) in paths {
            forest.insert_path(path, *weight);
        }
        forest
    }

    #[test]
    fn test_merge_forests_adds_weights_and_unions_children() {
        let a = forest(&[(&["main", "a"], 2), (&["main", "b"], 1)]);
        let b = forest(&[(&["main", "b"], 3), (&["other"], 4)]);
        let merged = merge_forests([&a, &b]);

        assert_eq!(merged.get(&"main").unwrap().weight(), 6);
        assert_eq!(merged.find_path(&["main", "a"]).unwrap().weight(), 2);
        assert_eq!(merged.find_path(&["main", "b"]).unwrap().weight(), 4);
        assert_eq!(merged.get(&"other").unwrap().weight(), 4);
    }

    #[test]
    fn test_merge_is_commutative() {
        let a = forest(&[(&["x", "y"], 2), (&["z"], 1)]);
        let b = forest(&[(&["z", "w"], 5), (&["x"], 1)]);
        assert_eq!(merge_forests([&a, &b]), merge_forests([&b, &a]));
    }

    #[test]
    fn test_group_level_zero_merges_everything() {
        let t1 = forest(&[(&["main"], 1)]);
        let t2 = forest(&[(&["main"], 2)]);
        let elements = [(&"p1/t1", &t1), (&"p2/t2", &t2)];
        let hierarchy: GroupHierarchy<&str> = GroupHierarchy::new();

        let grouped = group_forests(elements, &hierarchy, 0).unwrap();
        assert_eq!(grouped.len(), 1);
        assert_eq!(grouped.forest(&BucketKey::all()).total_weight(), 3);
        assert_eq!(grouped.member_count(&BucketKey::all()), 2);
    }

    #[test]
    fn test_group_unknown_bucket_is_empty() {
        let hierarchy: GroupHierarchy<&str> = GroupHierarchy::new();
        let grouped: GroupedForests<&str> =
            group_forests(std::iter::empty(), &hierarchy, 0).unwrap();
        assert!(grouped.is_empty());
        assert!(grouped.forest(&BucketKey::new(["nope"])).is_empty());
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let forests: Vec<Forest<&str>> = (0..12)
            .map(|i| forest(&[(&["main", if i % 2 == 0 { "even" } else { "odd" }], i + 1)]))
            .collect();
        let names: Vec<String> = (0..12).map(|i| format!("p{}/t{}", i % 3, i)).collect();
        let elements: Vec<(&String, &Forest<&str>)> = names.iter().zip(forests.iter()).collect();

        let hierarchy = GroupHierarchy::new().with_level(GroupLevel::new("process", |e: &String| {
            e.split('/').next().unwrap_or_default().to_string()
        }));

        let sequential = group_forests(elements.iter().copied(), &hierarchy, 1).unwrap();
        let parallel = group_forests_parallel(&elements, &hierarchy, 1, 4).unwrap();

        assert_eq!(sequential.buckets(), parallel.buckets());
        for key in sequential.buckets() {
            assert_eq!(sequential.forest(key), parallel.forest(key));
            assert_eq!(sequential.member_count(key), parallel.member_count(key));
        }
    }

    #[test]
    fn test_parallel_rejects_zero_workers() {
        let hierarchy: GroupHierarchy<&str> = GroupHierarchy::new();
        let elements: Vec<(&&str, &Forest<&str>)> = Vec::new();
        assert_eq!(
            group_forests_parallel(&elements, &hierarchy, 0, 0).unwrap_err(),
            GroupError::NoWorkers
        );
    }
}
