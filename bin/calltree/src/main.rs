//! Calltree CLI
//!
//! Aggregates collapsed stack samples into weighted call trees, groups them
//! by process or thread, and compares two runs with a heat palette.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use log::debug;
use std::path::PathBuf;

use calltree_studio::commands::{
    display_styles, display_version, execute_diff, execute_tree, resolve_palette, DiffArgs,
    TreeArgs,
};

/// Calltree - weighted call-tree profiling from collapsed stacks
#[derive(Parser, Debug)]
#[command(name = "calltree")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Aggregate a collapsed stack file and print its call trees
    Tree {
        /// Collapsed stack file (`frame;frame;frame weight` per line)
        file: PathBuf,

        /// First frame of each line names the element (`process/thread`)
        #[arg(long)]
        by_element: bool,

        /// Merge elements at this level: 0 = all, 1 = process, 2 = thread
        #[arg(short, long)]
        group_level: Option<usize>,

        /// Number of hot paths to print per tree
        #[arg(long, default_value = "10")]
        top: usize,

        /// Deepest tree level to print
        #[arg(long)]
        max_depth: Option<usize>,

        /// Collapse adjacent recursive frames into one level
        #[arg(long)]
        fold_recursion: bool,

        /// Worker threads used to merge groups
        #[arg(short, long, default_value = "1", env = "CALLTREE_JOBS")]
        jobs: usize,

        /// Write the trees as JSON
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Compare a baseline with a target
    Diff {
        /// Baseline collapsed stack file
        baseline: PathBuf,

        /// Target collapsed stack file; the comparison follows its shape
        target: PathBuf,

        /// First frame of each line names the element (`process/thread`)
        #[arg(long)]
        by_element: bool,

        /// Compare merged groups at this level: 0 = all, 1 = process, 2 = thread
        #[arg(short, long)]
        group_level: Option<usize>,

        /// Changes at or below this percentage are shown as equal
        #[arg(long)]
        min_threshold: Option<f64>,

        /// Changes at or above this percentage get the maximum heat
        #[arg(long)]
        max_threshold: Option<f64>,

        /// TOML file with `min_threshold` / `max_threshold`
        #[arg(long)]
        palette: Option<PathBuf>,

        /// Write the diff report as JSON
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Skip the node counts after the tree
        #[arg(long)]
        no_summary: bool,

        /// Deepest tree level to print
        #[arg(long)]
        max_depth: Option<usize>,

        /// Collapse adjacent recursive frames into one level
        #[arg(long)]
        fold_recursion: bool,

        /// Worker threads used to merge groups
        #[arg(short, long, default_value = "1", env = "CALLTREE_JOBS")]
        jobs: usize,
    },

    /// List the heat palette styles
    Styles {
        /// Minimal significant change, in percent
        #[arg(long)]
        min_threshold: Option<f64>,

        /// Change with maximum heat, in percent
        #[arg(long)]
        max_threshold: Option<f64>,

        /// TOML file with `min_threshold` / `max_threshold`
        #[arg(long)]
        palette: Option<PathBuf>,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    debug!("{:?}", cli.command);

    // Execute command
    match cli.command {
        Commands::Tree {
            file,
            by_element,
            group_level,
            top,
            max_depth,
            fold_recursion,
            jobs,
            output,
        } => {
            execute_tree(TreeArgs {
                input: file,
                by_element,
                group_level,
                top_paths: top,
                max_depth,
                fold_recursion,
                jobs,
                output,
            })?;
        }

        Commands::Diff {
            baseline,
            target,
            by_element,
            group_level,
            min_threshold,
            max_threshold,
            palette,
            output,
            no_summary,
            max_depth,
            fold_recursion,
            jobs,
        } => {
            execute_diff(DiffArgs {
                baseline,
                target,
                by_element,
                group_level,
                min_threshold,
                max_threshold,
                palette_file: palette,
                output,
                summary: !no_summary,
                max_depth,
                fold_recursion,
                jobs,
            })?;
        }

        Commands::Styles {
            min_threshold,
            max_threshold,
            palette,
        } => {
            let config = resolve_palette(palette.as_deref(), min_threshold, max_threshold)?;
            display_styles(&config.build()?);
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
