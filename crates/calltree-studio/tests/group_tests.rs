use calltree_studio::aggregator::CallTreeAggregator;
use calltree_studio::commands::element_hierarchy;
use calltree_studio::group::{
    group_forests, group_forests_parallel, merge_forests, BucketKey, GroupHierarchy, GroupLevel,
};
use calltree_studio::tree::Forest;
use calltree_studio::utils::GroupError;
use pretty_assertions::assert_eq;

fn threads() -> CallTreeAggregator<String, String> {
    let samples = [
        ("firefox/1", "main;layout", 4),
        ("firefox/1", "main;paint", 2),
        ("firefox/2", "main;layout", 1),
        ("firefox/2", "net;recv", 3),
        ("rustc/7", "main;typeck", 9),
        ("rustc/8", "main;codegen", 5),
    ];

    let mut aggregator = CallTreeAggregator::new();
    for (element, stack, weight) in samples {
        let frames: Vec<String> = stack.split(';').map(str::to_string).collect();
        aggregator.add_sample(element.to_string(), &frames, weight);
    }
    aggregator
}

fn path(frames: &[&str]) -> Vec<String> {
    frames.iter().map(|f| f.to_string()).collect()
}

#[test]
fn test_group_by_process() {
    let aggregator = threads();
    let grouped = group_forests(aggregator.iter(), &element_hierarchy(), 1).unwrap();

    assert_eq!(
        grouped.buckets(),
        &[BucketKey::new(["firefox"]), BucketKey::new(["rustc"])]
    );

    let firefox = grouped.forest(&BucketKey::new(["firefox"]));
    assert_eq!(firefox.total_weight(), 10);
    assert_eq!(firefox.find_path(&path(&["main", "layout"])).unwrap().weight(), 5);
    assert_eq!(firefox.find_path(&path(&["net", "recv"])).unwrap().weight(), 3);
    assert_eq!(grouped.member_count(&BucketKey::new(["firefox"])), 2);

    let rustc = grouped.forest(&BucketKey::new(["rustc"]));
    assert_eq!(rustc.find_path(&path(&["main"])).unwrap().weight(), 14);
}

#[test]
fn test_group_level_zero_and_thread_level() {
    let aggregator = threads();
    let hierarchy = element_hierarchy();

    let all = group_forests(aggregator.iter(), &hierarchy, 0).unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all.forest(&BucketKey::all()).total_weight(), 24);

    let per_thread = group_forests(aggregator.iter(), &hierarchy, 2).unwrap();
    assert_eq!(per_thread.len(), 4);
    assert_eq!(
        per_thread.forest(&BucketKey::new(["firefox", "2"])).total_weight(),
        4
    );
}

#[test]
fn test_unknown_level_is_an_error() {
    let aggregator = threads();
    let err = group_forests(aggregator.iter(), &element_hierarchy(), 3).unwrap_err();
    assert_eq!(
        err,
        GroupError::UnknownLevel {
            requested: 3,
            available: 2
        }
    );
}

#[test]
fn test_merge_order_does_not_matter() {
    let aggregator = threads();
    let forests: Vec<&Forest<String>> = aggregator.iter().map(|(_, forest)| forest).collect();

    let forward = merge_forests(forests.iter().copied());
    let backward = merge_forests(forests.iter().rev().copied());
    let shuffled = merge_forests([forests[3], forests[0], forests[2], forests[1]]);

    assert_eq!(forward, backward);
    assert_eq!(forward, shuffled);
    assert_eq!(forward.total_weight(), 24);
}

#[test]
fn test_parallel_grouping_matches_sequential() {
    let aggregator = threads();
    let hierarchy = element_hierarchy();
    let elements: Vec<_> = aggregator.iter().collect();

    for level in 0..=2 {
        let sequential = group_forests(aggregator.iter(), &hierarchy, level).unwrap();
        for workers in [1, 2, 3, 8] {
            let parallel = group_forests_parallel(&elements, &hierarchy, level, workers).unwrap();
            assert_eq!(sequential.buckets(), parallel.buckets());
            for bucket in sequential.buckets() {
                assert_eq!(sequential.forest(bucket), parallel.forest(bucket));
            }
        }
    }
}

#[test]
fn test_custom_hierarchy_on_tuples() {
    let mut aggregator = CallTreeAggregator::new();
    aggregator.add_sample(("web", 1u32), &["handle"], 2);
    aggregator.add_sample(("web", 2u32), &["handle"], 3);
    aggregator.add_sample(("db", 1u32), &["query"], 1);

    let hierarchy = GroupHierarchy::new()
        .with_level(GroupLevel::new("service", |e: &(&'static str, u32)| e.0.to_string()));
    assert_eq!(hierarchy.level_names(), vec!["all", "service"]);

    let grouped = group_forests(aggregator.iter(), &hierarchy, 1).unwrap();
    assert_eq!(grouped.forest(&BucketKey::new(["web"])).total_weight(), 5);
    assert!(grouped.forest(&BucketKey::new(["cache"])).is_empty());
}
