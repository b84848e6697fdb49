//! Configuration and constants shared across the crate.

/// Current diff report schema version
pub const REPORT_VERSION: &str = "1.0.0";

/// Number of interior heat buckets on each side of a palette.
/// The saturated bucket is `HEAT_BUCKET_COUNT + 1`.
pub const HEAT_BUCKET_COUNT: u8 = 4;

/// Default minimal significance threshold, in percent
pub const DEFAULT_MIN_THRESHOLD_PERCENT: f64 = 0.0;

/// Default maximal significance threshold, in percent
pub const DEFAULT_MAX_THRESHOLD_PERCENT: f64 = 4.0;

/// Separator between frames of a collapsed stack line
pub const FRAME_SEPARATOR: char = ';';

/// Separator between the process and thread parts of an element name
pub const ELEMENT_SEPARATOR: char = '/';

/// Element used when samples are not split per element
pub const DEFAULT_ELEMENT: &str = "all";

/// Upper bound for `--top` style arguments
pub const MAX_TOP_PATHS: usize = 1000;
