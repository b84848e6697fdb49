//! Helpers shared by the commands.

use anyhow::{bail, Context, Result};
use colored::Colorize;
use log::{debug, info};
use std::path::Path;

use crate::aggregator::{CallTreeAggregator, RecursionPolicy};
use crate::group::{group_forests, group_forests_parallel, GroupHierarchy, GroupLevel, GroupedForests};
use crate::palette::{HeatPalette, HeatStyle, PaletteConfig};
use crate::parser::{read_collapsed_file, CollapsedStack};
use crate::utils::config::{ELEMENT_SEPARATOR, MAX_TOP_PATHS, REPORT_VERSION};

/// Samples of one input file, aggregated per element
pub struct LoadedInput {
    pub aggregator: CallTreeAggregator<String, String>,
    pub total_weight: u64,
}

/// Aggregate parsed stacks into per-element forests
pub fn build_aggregator(
    stacks: &[CollapsedStack],
    by_element: bool,
    recursion: RecursionPolicy,
) -> CallTreeAggregator<String, String> {
    let mut aggregator = CallTreeAggregator::with_recursion(recursion);
    for stack in stacks {
        let (element, frames) = stack.split_element(by_element);
        aggregator.add_sample(element.to_string(), frames, stack.weight);
    }
    aggregator
}

/// Read and aggregate a collapsed stack file
pub fn load_input(path: &Path, by_element: bool, recursion: RecursionPolicy) -> Result<LoadedInput> {
    let stacks = read_collapsed_file(path)
        .with_context(|| format!("Failed to read collapsed stacks from {}", path.display()))?;

    let aggregator = build_aggregator(&stacks, by_element, recursion);
    let total_weight = aggregator
        .iter()
        .fold(0u64, |total, (_, forest)| total.saturating_add(forest.total_weight()));

    info!(
        "Loaded {}: {} samples, {} elements",
        path.display(),
        aggregator.sample_count(),
        aggregator.elements().len()
    );

    Ok(LoadedInput {
        aggregator,
        total_weight,
    })
}

/// Grouping hierarchy for `process/thread` element names
///
/// Level 1 is the process (text before the separator), level 2 the thread.
pub fn element_hierarchy() -> GroupHierarchy<String> {
    GroupHierarchy::new()
        .with_level(GroupLevel::new("process", |element: &String| {
            element
                .split_once(ELEMENT_SEPARATOR)
                .map_or(element.as_str(), |(process, _)| process)
                .to_string()
        }))
        .with_level(GroupLevel::new("thread", |element: &String| {
            element
                .split_once(ELEMENT_SEPARATOR)
                .map_or(element.as_str(), |(_, thread)| thread)
                .to_string()
        }))
}

/// Group an aggregation, in parallel when more than one job is requested
pub fn group_input(
    aggregator: &CallTreeAggregator<String, String>,
    level: usize,
    jobs: usize,
) -> Result<GroupedForests<String>> {
    let hierarchy = element_hierarchy();
    let grouped = if jobs > 1 {
        let elements: Vec<_> = aggregator.iter().collect();
        group_forests_parallel(&elements, &hierarchy, level, jobs)
    } else {
        group_forests(aggregator.iter(), &hierarchy, level)
    }
    .context("Failed to group forests")?;

    debug!(
        "Grouped at level {} ({}): {} buckets",
        level,
        hierarchy.level_names().get(level).copied().unwrap_or("?"),
        grouped.len()
    );
    Ok(grouped)
}

/// Build the palette from an optional TOML file and flag overrides
pub fn resolve_palette(
    palette_file: Option<&Path>,
    min_threshold: Option<f64>,
    max_threshold: Option<f64>,
) -> Result<PaletteConfig> {
    let from_file = match palette_file {
        Some(path) => crate::palette::load_palette_config(path)
            .with_context(|| format!("Failed to load palette file {}", path.display()))?,
        None => PaletteConfig::default(),
    };

    let config = from_file.overridden_by(PaletteConfig {
        min_threshold,
        max_threshold,
    });

    // Fail early with a clear message
    config.build().context("Invalid palette thresholds")?;
    Ok(config)
}

/// Validate the numeric arguments shared by the commands
pub fn validate_common_args(top_paths: usize, jobs: usize) -> Result<()> {
    if top_paths > MAX_TOP_PATHS {
        bail!("top paths must be at most {}", MAX_TOP_PATHS);
    }
    if jobs == 0 {
        bail!("jobs must be at least 1");
    }
    Ok(())
}

/// Display the palette styles and the range of change each one covers
pub fn display_styles(palette: &HeatPalette) {
    println!("Heat palette styles");
    println!(
        "Thresholds: {}% - {}%",
        palette.min_threshold() * 100.0,
        palette.max_threshold() * 100.0
    );
    println!();

    for style in HeatPalette::all_styles() {
        let (low, high) = palette.range_for(style);
        let range = match style {
            HeatStyle::Equal => format!("|change| <= {:.2}%", high),
            _ if high.is_infinite() => format!("|change| >= {:.2}%", low),
            _ => format!("{:.2}% < |change| < {:.2}%", low, high),
        };
        let direction = match style {
            HeatStyle::Equal => "",
            HeatStyle::Less(_) => " decrease",
            HeatStyle::More(_) => " increase",
        };
        println!(
            "  {:<6} {}{}",
            style.name().as_str().color(style.color()),
            range,
            direction
        );
    }
    println!();
    println!("New call sites (no baseline) use {}", HeatStyle::More(5));
}

/// Display version information
pub fn display_version() {
    println!("Calltree Studio v{}", env!("CARGO_PKG_VERSION"));
    println!("Report Schema: v{}", REPORT_VERSION);
    println!();
    println!("Weighted call-tree aggregation, grouping and differential comparison.");
}
