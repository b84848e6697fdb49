//! Output writers and renderers.
//!
//! This module handles:
//! - JSON export of reports
//! - Text rendering of forests, hot paths and statistics

pub mod json;
pub mod text;

// Re-export main functions
pub use json::{report_to_string, write_report};
pub use text::{render_distribution, render_forest, render_hot_paths};

use crate::utils::error::OutputError;
use std::path::Path;

/// Common path validation for output files
pub fn validate_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    if path.exists() && path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}
