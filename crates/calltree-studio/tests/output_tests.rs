use calltree_studio::aggregator::CallTreeAggregator;
use calltree_studio::diff::{diff_forest_sets, generate_report, InputMetadata};
use calltree_studio::output::{report_to_string, validate_path, write_report};
use calltree_studio::tree::DisplayResolver;
use std::path::Path;
use tempfile::NamedTempFile;

fn sample_report() -> calltree_studio::diff::DiffReport {
    let mut baseline = CallTreeAggregator::new();
    baseline.add_sample("all", &["main", "work"], 10);
    let mut target = CallTreeAggregator::new();
    target.add_sample("all", &["main", "work"], 12);
    target.add_sample("all", &["main", "extra"], 1);

    let set = diff_forest_sets(&baseline, &target, None, None).unwrap();
    generate_report(&set, &DisplayResolver, InputMetadata::default(), InputMetadata::default())
}

#[test]
fn test_write_report() {
    let report = sample_report();
    let temp_file = NamedTempFile::new().unwrap();
    let path = temp_file.path();

    write_report(&report, path).unwrap();

    let contents = std::fs::read_to_string(path).unwrap();
    let json: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(json["report_version"], "1.0.0");
    assert_eq!(json["elements"][0]["key"], "all");
    assert_eq!(json["elements"][0]["nodes"][0]["weight"], 13);
    assert_eq!(json["elements"][0]["nodes"][0]["children"][1]["style"], "more5");
    assert_eq!(json["summary"]["new_nodes"], 1);
}

#[test]
fn test_report_to_string_is_pretty() {
    let text = report_to_string(&sample_report()).unwrap();
    assert!(text.contains("\n  \"report_version\": \"1.0.0\""));
}

#[test]
fn test_validate_output_path_empty() {
    let result = validate_path(Path::new(""));
    assert!(result.is_err());
}

#[test]
fn test_validate_output_path_directory() {
    let temp_dir = tempfile::tempdir().unwrap();
    let result = validate_path(temp_dir.path());
    assert!(result.is_err());
}

#[test]
fn test_write_creates_parent_dirs() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("nested").join("dir").join("report.json");

    write_report(&sample_report(), &path).unwrap();
    assert!(path.exists());
}
