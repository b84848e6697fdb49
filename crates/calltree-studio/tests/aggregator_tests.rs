use calltree_studio::aggregator::{
    calculate_hot_paths, calculate_weight_distribution, CallTreeAggregator, RecursionPolicy,
};
use calltree_studio::tree::{Forest, ForestSet, WeightedTree};
use pretty_assertions::assert_eq;

fn sample_aggregator() -> CallTreeAggregator<String, &'static str> {
    let mut aggregator = CallTreeAggregator::new();
    aggregator.add_sample("t1".to_string(), &["main", "parse", "lex"], 4);
    aggregator.add_sample("t1".to_string(), &["main", "parse"], 1);
    aggregator.add_sample("t1".to_string(), &["main", "eval"], 5);
    aggregator.add_sample("t2".to_string(), &["worker", "io"], 7);
    aggregator
}

#[test]
fn test_forest_per_element() {
    let aggregator = sample_aggregator();

    let expected: Forest<&str> = vec![WeightedTree::new("main", 10).with_children([
        WeightedTree::new("parse", 5).with_children([WeightedTree::new("lex", 4)]),
        WeightedTree::new("eval", 5),
    ])]
    .into_iter()
    .collect();

    assert_eq!(aggregator.forest(&"t1".to_string()), &expected);
    assert_eq!(aggregator.forest(&"t2".to_string()).total_weight(), 7);
    assert_eq!(aggregator.sample_count(), 4);
}

#[test]
fn test_repeated_sampling_doubles_every_node() {
    let mut once = CallTreeAggregator::new();
    once.add_sample_once("t", &["a", "b", "c"]);

    let mut twice = CallTreeAggregator::new();
    twice.add_sample_once("t", &["a", "b", "c"]);
    twice.add_sample_once("t", &["a", "b", "c"]);

    let forest = twice.forest(&"t");
    assert_eq!(forest.node_count(), once.forest(&"t").node_count());
    for path in [&["a"][..], &["a", "b"][..], &["a", "b", "c"][..]] {
        assert_eq!(forest.find_path(path).unwrap().weight(), 2);
    }
}

#[test]
fn test_live_forest_reflects_new_samples() {
    let mut aggregator = CallTreeAggregator::new();
    aggregator.add_sample("t", &["main"], 1);
    assert_eq!(aggregator.forest(&"t").total_weight(), 1);
    aggregator.add_sample("t", &["main", "late"], 2);
    assert_eq!(aggregator.forest(&"t").total_weight(), 3);
}

#[test]
fn test_fold_recursion_policy() {
    let mut aggregator = CallTreeAggregator::with_recursion(RecursionPolicy::Fold);
    assert_eq!(aggregator.recursion(), RecursionPolicy::Fold);

    aggregator.add_sample("t", &["fib", "fib", "fib", "add"], 3);
    let forest = aggregator.forest(&"t");
    assert_eq!(forest.max_depth(), 2);
    assert_eq!(forest.find_path(&["fib", "add"]).unwrap().weight(), 3);
}

#[test]
fn test_forest_set_view() {
    let aggregator = sample_aggregator();
    let keys = ForestSet::keys(&aggregator);
    assert_eq!(keys, vec![&"t1".to_string(), &"t2".to_string()]);
    assert!(ForestSet::forest(&aggregator, &"t3".to_string()).is_empty());
}

#[test]
fn test_aggregator_is_send() {
    fn assert_send<T: Send>(_: &T) {}
    let aggregator = sample_aggregator();
    assert_send(&aggregator);

    let handle = std::thread::spawn(move || aggregator.sample_count());
    assert_eq!(handle.join().unwrap(), 4);
}

#[test]
fn test_metrics_on_aggregated_forest() {
    let aggregator = sample_aggregator();
    let forest = aggregator.forest(&"t1".to_string());

    let hot_paths = calculate_hot_paths(forest, 3);
    let paths: Vec<Vec<&str>> = hot_paths.iter().map(|p| p.path.clone()).collect();
    assert_eq!(
        paths,
        vec![vec!["main", "eval"], vec!["main", "parse", "lex"], vec!["main", "parse"]]
    );
    assert_eq!(hot_paths[0].percentage, 50.0);

    let distribution = calculate_weight_distribution(forest);
    assert_eq!(distribution.total_weight, 10);
    assert_eq!(distribution.node_count, 4);
    assert_eq!(distribution.leaf_count, 2);
    assert_eq!(distribution.max_depth, 3);
    assert!(distribution.summary().contains("Total: 10"));
}

#[test]
fn test_weights_saturate_instead_of_overflowing() {
    let mut aggregator = CallTreeAggregator::new();
    aggregator.add_sample("t", &["main", "a"], u64::MAX);
    aggregator.add_sample("t", &["main", "b"], 1);
    aggregator.add_sample("t", &["other"], 1);

    let forest = aggregator.forest(&"t");
    assert_eq!(forest.get(&"main").unwrap().weight(), u64::MAX);
    assert_eq!(forest.find_path(&["main", "b"]).unwrap().weight(), 1);
    assert_eq!(forest.total_weight(), u64::MAX);

    let mut merged = forest.clone();
    merged.merge_forest(forest);
    assert_eq!(merged.find_path(&["main", "a"]).unwrap().weight(), u64::MAX);
    assert_eq!(merged.get(&"other").unwrap().weight(), 2);
}
