//! Tree command implementation.
//! Aggregates collapsed stacks, optionally groups them, and prints the
//! resulting forests with their hot paths.

use anyhow::{Context, Result};
use chrono::Utc;
use colored::*;
use log::info;
use serde::Serialize;
use std::fmt;
use std::time::Instant;

use super::models::TreeArgs;
use super::utils::{group_input, load_input, validate_common_args};
use crate::aggregator::{
    calculate_hot_paths, calculate_weight_distribution, HotPath, RecursionPolicy,
    WeightDistribution,
};
use crate::output::{render_distribution, render_forest, render_hot_paths, write_report};
use crate::tree::{DisplayResolver, Forest};
use crate::utils::config::REPORT_VERSION;

/// JSON export of the tree command
#[derive(Debug, Serialize)]
pub struct TreeReport<'a> {
    pub report_version: String,
    pub generated_at: String,
    pub source: String,
    pub sample_count: u64,

    /// Grouping level, absent when forests are per element
    pub group_level: Option<usize>,

    pub forests: Vec<ForestReport<'a>>,
}

/// One forest of a tree report
#[derive(Debug, Serialize)]
pub struct ForestReport<'a> {
    pub key: String,
    pub distribution: WeightDistribution,
    pub hot_paths: Vec<HotPath<String>>,
    pub roots: &'a Forest<String>,
}

/// Execute the tree command
pub fn execute_tree(args: TreeArgs) -> Result<()> {
    let start_time = Instant::now();
    validate_common_args(args.top_paths, args.jobs)?;

    let recursion = if args.fold_recursion {
        RecursionPolicy::Fold
    } else {
        RecursionPolicy::Keep
    };
    let input = load_input(&args.input, args.by_element, recursion)?;

    let grouped = match args.group_level {
        Some(level) => Some(group_input(&input.aggregator, level, args.jobs)?),
        None => None,
    };

    let forests: Vec<(String, &Forest<String>)> = match &grouped {
        Some(grouped) => collect_keyed(grouped.iter()),
        None => collect_keyed(input.aggregator.iter()),
    };

    let mut reports = Vec::with_capacity(forests.len());
    for (key, forest) in forests {
        let distribution = calculate_weight_distribution(forest);
        let hot_paths = calculate_hot_paths(forest, args.top_paths);

        println!("\n{} ({})", key.bold(), forest.total_weight());
        print!("{}", render_forest(forest, &DisplayResolver, args.max_depth));
        print!("{}", render_distribution(&distribution));
        print!("{}", render_hot_paths(&hot_paths, &DisplayResolver));

        reports.push(ForestReport {
            key,
            distribution,
            hot_paths,
            roots: forest,
        });
    }

    if let Some(path) = &args.output {
        let report = TreeReport {
            report_version: REPORT_VERSION.to_string(),
            generated_at: Utc::now().to_rfc3339(),
            source: args.input.display().to_string(),
            sample_count: input.aggregator.sample_count(),
            group_level: args.group_level,
            forests: reports,
        };
        write_report(&report, path).context("Failed to write tree report")?;
        println!("\nTree report written to {}", path.display().to_string().cyan());
    }

    info!(
        "Tree completed in {:.2}s (total weight {})",
        start_time.elapsed().as_secs_f64(),
        input.total_weight
    );
    Ok(())
}

fn collect_keyed<'a, K, I>(iter: I) -> Vec<(String, &'a Forest<String>)>
where
    K: fmt::Display + 'a,
    I: Iterator<Item = (&'a K, &'a Forest<String>)>,
{
    iter.map(|(key, forest)| (key.to_string(), forest)).collect()
}
