use std::path::PathBuf;

/// Arguments for the tree command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct TreeArgs {
    /// Collapsed stack file to aggregate
    pub input: PathBuf,

    /// First frame of each sample names its element (`process/thread`)
    pub by_element: bool,

    /// Merge elements at this grouping level (0 = everything)
    pub group_level: Option<usize>,

    /// Number of hot paths to print per forest
    pub top_paths: usize,

    /// Deepest tree level to print
    pub max_depth: Option<usize>,

    /// Collapse adjacent recursive frames
    pub fold_recursion: bool,

    /// Worker threads used for grouping
    pub jobs: usize,

    /// Optional JSON export of the forests
    pub output: Option<PathBuf>,
}

impl Default for TreeArgs {
    fn default() -> Self {
        Self {
            input: PathBuf::new(),
            by_element: false,
            group_level: None,
            top_paths: 10,
            max_depth: None,
            fold_recursion: false,
            jobs: 1,
            output: None,
        }
    }
}

/// Arguments for the diff command
#[derive(Debug, Clone)]
pub struct DiffArgs {
    /// Collapsed stacks supplying the reference weights
    pub baseline: PathBuf,

    /// Collapsed stacks whose shape the comparison mirrors
    pub target: PathBuf,

    pub by_element: bool,

    pub group_level: Option<usize>,

    /// Minimal significant change, in percent
    pub min_threshold: Option<f64>,

    /// Change with maximum heat, in percent
    pub max_threshold: Option<f64>,

    /// TOML file with palette thresholds; flags take precedence
    pub palette_file: Option<PathBuf>,

    /// Optional JSON export of the diff report
    pub output: Option<PathBuf>,

    /// Print the node counts after the tree
    pub summary: bool,

    pub max_depth: Option<usize>,

    pub fold_recursion: bool,

    pub jobs: usize,
}

impl Default for DiffArgs {
    fn default() -> Self {
        Self {
            baseline: PathBuf::new(),
            target: PathBuf::new(),
            by_element: false,
            group_level: None,
            min_threshold: None,
            max_threshold: None,
            palette_file: None,
            output: None,
            summary: true,
            max_depth: None,
            fold_recursion: false,
            jobs: 1,
        }
    }
}
