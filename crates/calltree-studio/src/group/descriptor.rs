//! Grouping hierarchy: ordered levels that classify elements into buckets.
//!
//! Level 0 is implicit and puts every element in the same bucket. Level `n`
//! classifies elements with the first `n` levels of the hierarchy, coarsest
//! first, so a bucket key at level 2 could be `["firefox", "1234"]`.

use serde::Serialize;
use std::fmt;

use crate::utils::error::GroupError;

type Classifier<E> = Box<dyn Fn(&E) -> String + Send + Sync>;

/// One level of a grouping hierarchy
pub struct GroupLevel<E> {
    name: String,
    classify: Classifier<E>,
}

impl<E> GroupLevel<E> {
    /// Create a level from a name and a classification function
    pub fn new(name: impl Into<String>, classify: impl Fn(&E) -> String + Send + Sync + 'static) -> Self {
        Self {
            name: name.into(),
            classify: Box::new(classify),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Bucket key of an element at this level
    pub fn classify(&self, element: &E) -> String {
        (self.classify)(element)
    }
}

impl<E> fmt::Debug for GroupLevel<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GroupLevel").field("name", &self.name).finish()
    }
}

/// Ordered list of grouping levels, coarsest first
///
/// **Public** - supplied by the caller, never global
#[derive(Debug)]
pub struct GroupHierarchy<E> {
    levels: Vec<GroupLevel<E>>,
}

impl<E> GroupHierarchy<E> {
    /// Hierarchy with only the implicit "all" level
    pub fn new() -> Self {
        Self { levels: Vec::new() }
    }

    /// Builder helper: append a finer level
    pub fn with_level(mut self, level: GroupLevel<E>) -> Self {
        self.levels.push(level);
        self
    }

    pub fn push(&mut self, level: GroupLevel<E>) {
        self.levels.push(level);
    }

    /// Number of levels below "all". Valid target levels are `0..=depth()`.
    pub fn depth(&self) -> usize {
        self.levels.len()
    }

    /// Level names, starting with the implicit "all" level
    pub fn level_names(&self) -> Vec<&str> {
        std::iter::once("all")
            .chain(self.levels.iter().map(GroupLevel::name))
            .collect()
    }

    /// Check that `level` exists in this hierarchy
    ///
    /// # Errors
    /// * `GroupError::UnknownLevel` - if `level > depth()`
    pub fn check_level(&self, level: usize) -> Result<(), GroupError> {
        if level > self.depth() {
            return Err(GroupError::UnknownLevel {
                requested: level,
                available: self.depth(),
            });
        }
        Ok(())
    }

    /// Classify an element with levels 1 through `level`
    ///
    /// # Errors
    /// * `GroupError::UnknownLevel` - if `level > depth()`
    pub fn bucket_key(&self, element: &E, level: usize) -> Result<BucketKey, GroupError> {
        self.check_level(level)?;
        Ok(BucketKey(
            self.levels[..level]
                .iter()
                .map(|descriptor| descriptor.classify(element))
                .collect(),
        ))
    }
}

impl<E> Default for GroupHierarchy<E> {
    fn default() -> Self {
        Self::new()
    }
}

/// Key of a bucket: one part per level from 1 to the target level
///
/// The empty key is the single bucket of level 0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct BucketKey(Vec<String>);

impl BucketKey {
    /// The level-0 bucket holding every element
    pub fn all() -> Self {
        Self(Vec::new())
    }

    pub fn new<I, P>(parts: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        Self(parts.into_iter().map(Into::into).collect())
    }

    pub fn parts(&self) -> &[String] {
        &self.0
    }

    pub fn is_all(&self) -> bool {
        self.0.is_empty()
    }

    /// Level this key belongs to
    pub fn level(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for BucketKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            write!(f, "all")
        } else {
            write!(f, "{}", self.0.join("/"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hierarchy() -> GroupHierarchy<(&'static str, u32)> {
        GroupHierarchy::new()
            .with_level(GroupLevel::new("process", |e: &(&'static str, u32)| e.0.to_string()))
            .with_level(GroupLevel::new("thread", |e: &(&'static str, u32)| e.1.to_string()))
    }

    #[test]
    fn test_bucket_key_per_level() {
        let hierarchy = hierarchy();
        let element = ("firefox", 12);

        assert_eq!(hierarchy.bucket_key(&element, 0).unwrap(), BucketKey::all());
        assert_eq!(
            hierarchy.bucket_key(&element, 1).unwrap(),
            BucketKey::new(["firefox"])
        );
        assert_eq!(
            hierarchy.bucket_key(&element, 2).unwrap(),
            BucketKey::new(["firefox", "12"])
        );
    }

    #[test]
    fn test_unknown_level() {
        let err = hierarchy().bucket_key(&("a", 1), 3).unwrap_err();
        assert_eq!(
            err,
            GroupError::UnknownLevel {
                requested: 3,
                available: 2
            }
        );
    }

    #[test]
    fn test_level_names_and_display() {
        assert_eq!(hierarchy().level_names(), vec!["all", "process", "thread"]);
        assert_eq!(BucketKey::all().to_string(), "all");
        assert_eq!(BucketKey::new(["a", "b"]).to_string(), "a/b");
        assert_eq!(BucketKey::new(["a", "b"]).level(), 2);
    }
}
