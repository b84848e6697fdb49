//! Diff command implementation.
//! Orchestrates the comparison of two collapsed stack inputs and reports
//! the relative change of every call site.

use anyhow::{Context, Result};
use colored::*;
use log::info;
use std::fmt;

use super::models::DiffArgs;
use super::utils::{group_input, load_input, resolve_palette, validate_common_args, LoadedInput};
use crate::aggregator::RecursionPolicy;
use crate::diff::{diff_forest_sets, generate_report, render_terminal_diff, DiffReport, InputMetadata};
use crate::output::write_report;
use crate::palette::PaletteConfig;
use crate::tree::{DisplayResolver, ForestSet};

/// Execute the diff command
pub fn execute_diff(args: DiffArgs) -> Result<()> {
    validate_common_args(0, args.jobs)?;

    // Step 1: Resolve the palette before doing any work
    let palette = resolve_palette(
        args.palette_file.as_deref(),
        args.min_threshold,
        args.max_threshold,
    )?;

    // Step 2: Load both inputs
    let recursion = if args.fold_recursion {
        RecursionPolicy::Fold
    } else {
        RecursionPolicy::Keep
    };
    let baseline = load_input(&args.baseline, args.by_element, recursion)
        .context("Failed to load baseline")?;
    let target =
        load_input(&args.target, args.by_element, recursion).context("Failed to load target")?;

    let baseline_meta = metadata(&args.baseline, &baseline);
    let target_meta = metadata(&args.target, &target);

    // Step 3: Compare per element or per group bucket
    let report = match args.group_level {
        Some(level) => {
            let baseline_groups = group_input(&baseline.aggregator, level, args.jobs)?;
            let target_groups = group_input(&target.aggregator, level, args.jobs)?;
            compare(&baseline_groups, &target_groups, palette, baseline_meta, target_meta)?
        }
        None => compare(
            &baseline.aggregator,
            &target.aggregator,
            palette,
            baseline_meta,
            target_meta,
        )?,
    };

    // Step 4: Write output if requested
    if let Some(path) = &args.output {
        write_report(&report, path).context("Failed to write diff report JSON")?;
        println!("Diff report written to {}", path.display().to_string().cyan());
    }

    // Step 5: Terminal view
    println!("{}", render_terminal_diff(&report, args.max_depth, args.summary));

    info!(
        "Compared {} elements: {} new call sites, {} increased, {} decreased",
        report.elements.len(),
        report.summary.new_nodes,
        report.summary.increased,
        report.summary.decreased
    );

    Ok(())
}

fn compare<K, A, B>(
    baseline: &A,
    target: &B,
    palette: PaletteConfig,
    baseline_meta: InputMetadata,
    target_meta: InputMetadata,
) -> Result<DiffReport>
where
    K: Eq + std::hash::Hash + Clone + fmt::Display,
    A: ForestSet<String, Key = K>,
    B: ForestSet<String, Key = K>,
{
    let set = diff_forest_sets(baseline, target, palette.min_threshold, palette.max_threshold)
        .context("Failed to compare forests")?;
    Ok(generate_report(&set, &DisplayResolver, baseline_meta, target_meta))
}

fn metadata(path: &std::path::Path, input: &LoadedInput) -> InputMetadata {
    InputMetadata {
        source: path.display().to_string(),
        total_weight: input.total_weight,
        sample_count: input.aggregator.sample_count(),
    }
}
