//! Error types for the library.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in the commands and CLI.

use thiserror::Error;

/// Errors raised by explicit tree merges
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("Cannot merge trees of different symbols: {left} and {right}")]
    SymbolMismatch { left: String, right: String },
}

/// Errors raised while grouping forests
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GroupError {
    #[error("Unknown group level {requested} (hierarchy has {available} levels)")]
    UnknownLevel { requested: usize, available: usize },

    #[error("Worker count must be at least 1")]
    NoWorkers,
}

/// Errors that can occur while parsing collapsed stack input
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Line {line}: {reason}")]
    InvalidLine { line: usize, reason: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
