//! Schema definitions for diff reports.
//!
//! A diff report is a plain, serializable snapshot of a differential tree
//! set, used for terminal summaries and JSON export.

use serde::Serialize;

use crate::palette::HeatStyle;

/// Complete report comparing a baseline with a target
#[derive(Debug, Clone, Serialize)]
pub struct DiffReport {
    /// Schema version for the report format
    pub report_version: String,

    /// Timestamp when the report was generated
    pub generated_at: String,

    pub baseline: InputMetadata,

    pub target: InputMetadata,

    /// Thresholds of the palette used for the styles, in percent
    pub palette: PaletteSummary,

    /// One entry per paired element or group bucket
    pub elements: Vec<ElementDiffReport>,

    pub summary: DiffSummary,
}

/// Description of one side of the comparison
#[derive(Debug, Clone, Default, Serialize)]
pub struct InputMetadata {
    /// Where the samples came from (usually a file path)
    pub source: String,

    /// Total weight of every sample
    pub total_weight: u64,

    /// Number of samples read
    pub sample_count: u64,
}

/// Palette thresholds, in percent
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PaletteSummary {
    pub min_threshold: f64,
    pub max_threshold: f64,
}

/// Differential forest of one element or bucket
#[derive(Debug, Clone, Serialize)]
pub struct ElementDiffReport {
    pub key: String,

    /// Total target weight
    pub total_weight: u64,

    pub nodes: Vec<DiffNodeReport>,
}

/// One node of a differential tree
#[derive(Debug, Clone, Serialize)]
pub struct DiffNodeReport {
    pub label: String,

    /// Target weight
    pub weight: u64,

    /// Weight of the matching baseline node, absent for new nodes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub baseline_weight: Option<u64>,

    /// Relative change, absent when it is not a finite number
    pub difference: Option<f64>,

    pub style: HeatStyle,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<DiffNodeReport>,
}

/// Node counts by kind of change
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DiffSummary {
    pub node_count: usize,

    /// Nodes without a baseline counterpart
    pub new_nodes: usize,

    /// Nodes styled `more1` and above, new nodes excluded
    pub increased: usize,

    /// Nodes styled `less1` and above
    pub decreased: usize,

    /// Nodes styled `equal`
    pub unchanged: usize,
}

impl DiffSummary {
    /// Returns true if no node changed significantly
    pub fn is_unchanged(&self) -> bool {
        self.node_count == self.unchanged
    }
}
