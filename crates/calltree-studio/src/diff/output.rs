//! Terminal output rendering for diff reports.
//!
//! Provides a human-readable, colored view of a differential comparison.
//! Node colors follow the heat style of each node.

use super::label::format_difference;
use super::schema::{DiffNodeReport, DiffReport};
use crate::palette::HeatStyle;
use colored::*;

/// Render a human-readable diff report for the terminal
///
/// # Arguments
/// * `report` - Report built by `generate_report`
/// * `max_depth` - Deepest level to print, `None` for the full trees
/// * `with_summary` - Append the node counts at the end
pub fn render_terminal_diff(report: &DiffReport, max_depth: Option<usize>, with_summary: bool) -> String {
    let mut out = String::new();

    out.push_str(&render_header(report));
    for element in &report.elements {
        out.push_str(&format!(
            "\n{} (total {})\n",
            element.key.bold(),
            element.total_weight
        ));
        for node in &element.nodes {
            render_node(node, 0, max_depth, &mut out);
        }
    }
    if report.elements.is_empty() {
        out.push_str("\nNo elements in common between baseline and target\n");
    }
    if with_summary {
        out.push_str(&render_summary(report));
    }

    out
}

fn render_header(report: &DiffReport) -> String {
    let mut out = String::new();
    out.push('\n');
    out.push_str(&"Call Tree Comparison".bold().to_string());
    out.push_str("\n---------------------------------------------------\n");
    out.push_str(&format!(
        "Baseline: {} ({} samples, weight {})\n",
        report.baseline.source, report.baseline.sample_count, report.baseline.total_weight
    ));
    out.push_str(&format!(
        "Target:   {} ({} samples, weight {})\n",
        report.target.source, report.target.sample_count, report.target.total_weight
    ));
    out.push_str(&format!(
        "Palette:  {}% - {}%\n",
        report.palette.min_threshold, report.palette.max_threshold
    ));
    out.push_str("---------------------------------------------------\n");
    out
}

fn render_node(node: &DiffNodeReport, depth: usize, max_depth: Option<usize>, out: &mut String) {
    if max_depth.is_some_and(|max| depth >= max) {
        return;
    }

    let difference = match (node.difference, node.baseline_weight) {
        (Some(difference), _) => format_difference(difference),
        (None, None) => format_difference(f64::NAN),
        // 0/0 against an empty baseline node
        (None, Some(_)) if node.weight == 0 => "n/a".to_string(),
        (None, Some(_)) => format_difference(f64::INFINITY),
    };

    out.push_str(&format!(
        "{}{} {} [{}]\n",
        "  ".repeat(depth + 1),
        node.label.color(node.style.color()),
        node.weight,
        style_tag(node.style, &difference)
    ));

    for child in &node.children {
        render_node(child, depth + 1, max_depth, out);
    }
}

fn style_tag(style: HeatStyle, difference: &str) -> ColoredString {
    let tag = format!("{} {}", style, difference);
    match style {
        HeatStyle::Equal => tag.dimmed(),
        _ => tag.color(style.color()),
    }
}

fn render_summary(report: &DiffReport) -> String {
    let summary = &report.summary;
    let mut out = String::new();
    out.push_str("\n---------------------------------------------------\n");
    out.push_str(&format!(
        "Nodes: {} | New: {} | Increased: {} | Decreased: {} | Unchanged: {}\n",
        summary.node_count, summary.new_nodes, summary.increased, summary.decreased, summary.unchanged
    ));
    let status = if summary.is_unchanged() {
        "STATUS: NO SIGNIFICANT CHANGE".green().bold()
    } else if summary.increased + summary.new_nodes > 0 {
        format!(
            "STATUS: {} NODES GREW OR APPEARED",
            summary.increased + summary.new_nodes
        )
        .red()
        .bold()
    } else {
        format!("STATUS: {} NODES SHRANK", summary.decreased).green().bold()
    };
    out.push_str(&status.to_string());
    out.push('\n');
    out
}
