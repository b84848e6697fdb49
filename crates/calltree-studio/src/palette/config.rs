//! Palette thresholds loaded from TOML.
//!
//! ```toml
//! min_threshold = 1.0
//! max_threshold = 20.0
//! ```
//!
//! Both keys are optional and fall back to the default palette.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use super::{HeatPalette, PaletteError};
use crate::utils::config::{DEFAULT_MAX_THRESHOLD_PERCENT, DEFAULT_MIN_THRESHOLD_PERCENT};

/// Thresholds of a heat palette, in percent
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize, Serialize)]
pub struct PaletteConfig {
    /// Changes at or below this percentage are not significant
    #[serde(default)]
    pub min_threshold: Option<f64>,

    /// Changes at or above this percentage get the maximum heat
    #[serde(default)]
    pub max_threshold: Option<f64>,
}

impl PaletteConfig {
    /// Override thresholds with the ones set in `other`
    pub fn overridden_by(self, other: PaletteConfig) -> Self {
        Self {
            min_threshold: other.min_threshold.or(self.min_threshold),
            max_threshold: other.max_threshold.or(self.max_threshold),
        }
    }

    /// Build the palette, filling missing bounds with the defaults
    ///
    /// # Errors
    /// Same as `HeatPalette::new`
    pub fn build(&self) -> Result<HeatPalette, PaletteError> {
        HeatPalette::new(
            self.min_threshold.unwrap_or(DEFAULT_MIN_THRESHOLD_PERCENT),
            self.max_threshold.unwrap_or(DEFAULT_MAX_THRESHOLD_PERCENT),
        )
    }
}

/// Load palette thresholds from a TOML file
///
/// # Errors
/// * `PaletteError::ConfigRead` - If file cannot be read
/// * `PaletteError::ConfigParse` - If TOML is invalid
pub fn load_palette_config(path: impl AsRef<Path>) -> Result<PaletteConfig, PaletteError> {
    let contents = fs::read_to_string(path)?;
    let config: PaletteConfig = toml::from_str(&contents)?;
    Ok(config)
}
