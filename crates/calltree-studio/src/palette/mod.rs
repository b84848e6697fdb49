//! Heat palette for differential call trees.
//!
//! # Example
//! ```ignore
//! use calltree_studio::palette::{HeatPalette, HeatStyle};
//!
//! let palette = HeatPalette::new(0.0, 4.0)?;
//! assert_eq!(palette.style_for(0.03), HeatStyle::More(4));
//! assert_eq!(palette.style_for(f64::NAN), HeatStyle::More(5));
//! ```

mod config;
mod heat;

// Public API exports
pub use config::{load_palette_config, PaletteConfig};
pub use heat::{HeatPalette, HeatStyle};

// Error type
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PaletteError {
    #[error("Invalid {name}: {value} (expected a percentage between 0 and 100)")]
    InvalidThreshold { name: &'static str, value: f64 },

    #[error("Minimal threshold {min} is greater than maximal threshold {max}")]
    InvertedThresholds { min: f64, max: f64 },

    #[error("Failed to read palette configuration: {0}")]
    ConfigRead(#[from] std::io::Error),

    #[error("Palette TOML parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),
}
