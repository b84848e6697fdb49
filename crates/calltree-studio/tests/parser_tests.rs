use calltree_studio::commands::build_aggregator;
use calltree_studio::aggregator::RecursionPolicy;
use calltree_studio::parser::{parse_collapsed, parse_collapsed_reader, read_collapsed_file};
use calltree_studio::utils::ParseError;
use std::io::{Cursor, Write};
use tempfile::NamedTempFile;

const INPUT: &str = "\
# produced by a stack sampler
firefox/1;main;layout 40
firefox/1;main;paint 20

firefox/2;main;layout 10
rustc/7;main;typeck 90
";

#[test]
fn test_parse_collapsed_input() {
    let stacks = parse_collapsed(INPUT).unwrap();
    assert_eq!(stacks.len(), 4);
    assert_eq!(stacks[0].frames, vec!["firefox/1", "main", "layout"]);
    assert_eq!(stacks[3].weight, 90);
}

#[test]
fn test_reader_and_string_agree() {
    let from_str = parse_collapsed(INPUT).unwrap();
    let from_reader = parse_collapsed_reader(Cursor::new(INPUT)).unwrap();
    assert_eq!(from_str, from_reader);
}

#[test]
fn test_read_file() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", INPUT).unwrap();

    let stacks = read_collapsed_file(file.path()).unwrap();
    assert_eq!(stacks.len(), 4);
}

#[test]
fn test_read_missing_file() {
    let result = read_collapsed_file("/nonexistent/stacks.folded");
    assert!(matches!(result, Err(ParseError::IoError(_))));
}

#[test]
fn test_invalid_weight_reports_line() {
    let err = parse_collapsed("a;b 1\na;b -3\n").unwrap_err();
    assert!(matches!(err, ParseError::InvalidLine { line: 2, .. }));
    assert!(err.to_string().starts_with("Line 2:"));
}

#[test]
fn test_build_aggregator_by_element() {
    let stacks = parse_collapsed(INPUT).unwrap();

    let per_element = build_aggregator(&stacks, true, RecursionPolicy::Keep);
    assert_eq!(per_element.elements(), &["firefox/1", "firefox/2", "rustc/7"]);
    assert_eq!(per_element.forest(&"firefox/1".to_string()).total_weight(), 60);

    let single = build_aggregator(&stacks, false, RecursionPolicy::Keep);
    assert_eq!(single.elements(), &["all"]);
    let forest = single.forest(&"all".to_string());
    assert_eq!(forest.len(), 3);
    assert_eq!(forest.total_weight(), 160);
}

#[test]
fn test_max_weight_lines_aggregate() {
    let stacks = parse_collapsed("main;a 18446744073709551615\nmain;b 1\n").unwrap();
    assert_eq!(stacks[0].weight, u64::MAX);

    let aggregator = build_aggregator(&stacks, false, RecursionPolicy::Keep);
    let forest = aggregator.forest(&"all".to_string());
    assert_eq!(forest.get(&"main".to_string()).unwrap().weight(), u64::MAX);
    assert_eq!(forest.total_weight(), u64::MAX);
}
