//! Group element forests by a caller-supplied hierarchy and merge them.

pub mod descriptor;
pub mod merger;

pub use descriptor::{BucketKey, GroupHierarchy, GroupLevel};
pub use merger::{group_forests, group_forests_parallel, merge_forests, GroupedForests};
