//! Build serializable diff reports from differential tree sets.

use chrono::Utc;
use log::debug;
use std::fmt;
use std::hash::Hash;

use super::engine::DifferentialWeightedTree;
use super::label::format_label;
use super::schema::{
    DiffNodeReport, DiffReport, DiffSummary, ElementDiffReport, InputMetadata, PaletteSummary,
};
use super::set::DifferentialTreeSet;
use crate::palette::HeatStyle;
use crate::tree::SymbolResolver;
use crate::utils::config::REPORT_VERSION;

/// Generate a complete diff report
///
/// # Arguments
/// * `set` - Result of `diff_forest_sets`
/// * `resolver` - Labels for the node symbols
/// * `baseline` / `target` - Descriptions of both inputs
///
/// # Returns
/// DiffReport with every node, its style, and the summary counts
pub fn generate_report<K, S, R>(
    set: &DifferentialTreeSet<'_, K, S>,
    resolver: &R,
    baseline: InputMetadata,
    target: InputMetadata,
) -> DiffReport
where
    K: Eq + Hash + fmt::Display,
    R: SymbolResolver<S> + ?Sized,
{
    let mut summary = DiffSummary::default();

    let elements = set
        .iter()
        .map(|(key, forest)| ElementDiffReport {
            key: key.to_string(),
            total_weight: forest.total_weight(),
            nodes: forest
                .iter()
                .map(|node| node_report(set, node, resolver, &mut summary))
                .collect(),
        })
        .collect();

    debug!(
        "Diff report: {} nodes, {} new, {} increased, {} decreased",
        summary.node_count, summary.new_nodes, summary.increased, summary.decreased
    );

    let palette = set.palette();
    DiffReport {
        report_version: REPORT_VERSION.to_string(),
        generated_at: Utc::now().to_rfc3339(),
        baseline,
        target,
        palette: PaletteSummary {
            min_threshold: palette.min_threshold() * 100.0,
            max_threshold: palette.max_threshold() * 100.0,
        },
        elements,
        summary,
    }
}

fn node_report<K, S, R>(
    set: &DifferentialTreeSet<'_, K, S>,
    node: &DifferentialWeightedTree<'_, S>,
    resolver: &R,
    summary: &mut DiffSummary,
) -> DiffNodeReport
where
    K: Eq + Hash,
    R: SymbolResolver<S> + ?Sized,
{
    let style = set.style_for(node);

    summary.node_count += 1;
    if !node.has_baseline() {
        summary.new_nodes += 1;
    } else {
        match style {
            HeatStyle::Equal => summary.unchanged += 1,
            HeatStyle::Less(_) => summary.decreased += 1,
            HeatStyle::More(_) => summary.increased += 1,
        }
    }

    let difference = node.difference();
    DiffNodeReport {
        label: format_label(node, resolver),
        weight: node.weight(),
        baseline_weight: node.baseline_weight(),
        difference: difference.is_finite().then_some(difference),
        style,
        children: node
            .children()
            .iter()
            .map(|child| node_report(set, child, resolver, summary))
            .collect(),
    }
}
