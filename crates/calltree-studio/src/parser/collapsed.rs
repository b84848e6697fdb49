//! Parse collapsed stack text into samples.
//!
//! Collapsed stacks are one sample per line, frames root first:
//! `main;execute_tx;storage_read 1000` means main called execute_tx which
//! called storage_read, and 1000 units were spent on that path.
//!
//! Blank lines and lines starting with `#` are skipped.

use log::debug;
use serde::Serialize;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::utils::config::{DEFAULT_ELEMENT, FRAME_SEPARATOR};
use crate::utils::error::ParseError;

/// A single collapsed stack entry
///
/// **Public** - one sample for the aggregator
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollapsedStack {
    /// Frames, root first
    pub frames: Vec<String>,

    /// Weight of the sample
    pub weight: u64,
}

impl CollapsedStack {
    pub fn new(frames: Vec<String>, weight: u64) -> Self {
        Self { frames, weight }
    }

    /// Split the sample into its element and call path
    ///
    /// With `by_element`, the first frame names the element and the rest is
    /// the call path. Otherwise every sample belongs to the default element.
    pub fn split_element(&self, by_element: bool) -> (&str, &[String]) {
        if by_element {
            if let Some((element, frames)) = self.frames.split_first() {
                return (element.as_str(), frames);
            }
        }
        (DEFAULT_ELEMENT, &self.frames)
    }
}

/// Parse one line, `None` for blank and comment lines
///
/// # Errors
/// * `ParseError::InvalidLine` - missing or invalid weight, or no frames
pub fn parse_line(line: &str, line_number: usize) -> Result<Option<CollapsedStack>, ParseError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let invalid = |reason: String| ParseError::InvalidLine {
        line: line_number,
        reason,
    };

    let (stack, weight) = line
        .rsplit_once(char::is_whitespace)
        .ok_or_else(|| invalid("missing weight".to_string()))?;

    let weight = weight
        .parse::<u64>()
        .map_err(|e| invalid(format!("invalid weight '{}': {}", weight, e)))?;

    let frames: Vec<String> = stack
        .split(FRAME_SEPARATOR)
        .map(str::trim)
        .filter(|frame| !frame.is_empty())
        .map(str::to_string)
        .collect();

    if frames.is_empty() {
        return Err(invalid("no frames".to_string()));
    }

    Ok(Some(CollapsedStack::new(frames, weight)))
}

/// Parse collapsed stacks from a string
///
/// **Public** - main entry point for in-memory input
///
/// # Errors
/// * `ParseError::InvalidLine` - first malformed line, numbered from 1
pub fn parse_collapsed(input: &str) -> Result<Vec<CollapsedStack>, ParseError> {
    let mut stacks = Vec::new();
    for (idx, line) in input.lines().enumerate() {
        if let Some(stack) = parse_line(line, idx + 1)? {
            stacks.push(stack);
        }
    }
    debug!("Parsed {} collapsed stacks", stacks.len());
    Ok(stacks)
}

/// Parse collapsed stacks from a buffered reader
///
/// # Errors
/// * `ParseError::IoError` - read failure
/// * `ParseError::InvalidLine` - first malformed line
pub fn parse_collapsed_reader<R: BufRead>(reader: R) -> Result<Vec<CollapsedStack>, ParseError> {
    let mut stacks = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        if let Some(stack) = parse_line(&line?, idx + 1)? {
            stacks.push(stack);
        }
    }
    debug!("Parsed {} collapsed stacks", stacks.len());
    Ok(stacks)
}

/// Read collapsed stacks from a file
///
/// **Public** - used by the tree and diff commands
pub fn read_collapsed_file(path: impl AsRef<Path>) -> Result<Vec<CollapsedStack>, ParseError> {
    let path = path.as_ref();
    debug!("Reading collapsed stacks from: {}", path.display());
    let file = File::open(path)?;
    parse_collapsed_reader(BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_line() {
        let stack = parse_line("main;execute;read 1000", 1).unwrap().unwrap();
        assert_eq!(stack.frames, vec!["main", "execute", "read"]);
        assert_eq!(stack.weight, 1000);
    }

    #[test]
    fn test_frames_may_contain_spaces() {
        let stack = parse_line("main;operator new(unsigned long) 7", 1)
            .unwrap()
            .unwrap();
        assert_eq!(stack.frames[1], "operator new(unsigned long)");
        assert_eq!(stack.weight, 7);
    }

    #[test]
    fn test_skip_blank_and_comments() {
        assert!(parse_line("   ", 1).unwrap().is_none());
        assert!(parse_line("# comment 12", 1).unwrap().is_none());
    }

    #[test]
    fn test_invalid_lines() {
        assert!(matches!(
            parse_line("main;work", 3),
            Err(ParseError::InvalidLine { line: 3, .. })
        ));
        assert!(matches!(
            parse_line("main;work ten", 4),
            Err(ParseError::InvalidLine { line: 4, .. })
        ));
        assert!(matches!(
            parse_line(";; 5", 5),
            Err(ParseError::InvalidLine { line: 5, .. })
        ));
    }

    #[test]
    fn test_split_element() {
        let stack = CollapsedStack::new(vec!["firefox/12".into(), "main".into()], 1);
        let (element, frames) = stack.split_element(true);
        assert_eq!(element, "firefox/12");
        assert_eq!(frames, &["main".to_string()]);

        let (element, frames) = stack.split_element(false);
        assert_eq!(element, DEFAULT_ELEMENT);
        assert_eq!(frames.len(), 2);
    }

    #[test]
    fn test_parse_collapsed_reports_line_number() {
        let err = parse_collapsed("a;b 1\n\nbroken\n").unwrap_err();
        assert!(matches!(err, ParseError::InvalidLine { line: 3, .. }));
    }
}
