//! Discretize relative change into named heat styles.
//!
//! A palette has two significance thresholds, in percent. Changes at or
//! below the minimum are `equal`, changes at or above the maximum saturate
//! at `less5`/`more5`, and the range in between is split into
//! `HEAT_BUCKET_COUNT` equal buckets.

use colored::Color;
use serde::Serialize;
use std::fmt;

use super::PaletteError;
use crate::utils::config::{
    DEFAULT_MAX_THRESHOLD_PERCENT, DEFAULT_MIN_THRESHOLD_PERCENT, HEAT_BUCKET_COUNT,
};

/// Highest heat of either side
const MAX_HEAT: u8 = HEAT_BUCKET_COUNT + 1;

/// Named style for one differential value
///
/// **Public** - returned by HeatPalette::style_for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeatStyle {
    /// Change below the minimal threshold
    Equal,

    /// Decrease, heat 1 (slight) to 5 (saturated)
    Less(u8),

    /// Increase or new code, heat 1 (slight) to 5 (saturated)
    More(u8),
}

impl HeatStyle {
    /// Style name as used in legends: `equal`, `less1`..`less5`, `more1`..`more5`
    pub fn name(&self) -> String {
        self.to_string()
    }

    /// Heat level, 0 for `Equal`
    pub fn heat(&self) -> u8 {
        match self {
            HeatStyle::Equal => 0,
            HeatStyle::Less(heat) | HeatStyle::More(heat) => *heat,
        }
    }

    /// Terminal color hint: grey for equal, greens for less, reds for more
    pub fn color(&self) -> Color {
        // Darker shades for stronger heat
        match self {
            HeatStyle::Equal => Color::TrueColor {
                r: 200,
                g: 200,
                b: 200,
            },
            HeatStyle::Less(heat) => Color::TrueColor {
                r: 0,
                g: 240u8.saturating_sub(heat * 30),
                b: 60,
            },
            HeatStyle::More(heat) => Color::TrueColor {
                r: 255u8.saturating_sub(heat * 15),
                g: 180u8.saturating_sub(heat * 36),
                b: 60u8.saturating_sub(heat * 12),
            },
        }
    }
}

impl fmt::Display for HeatStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeatStyle::Equal => write!(f, "equal"),
            HeatStyle::Less(heat) => write!(f, "less{}", heat),
            HeatStyle::More(heat) => write!(f, "more{}", heat),
        }
    }
}

impl Serialize for HeatStyle {
    fn serialize<Ser: serde::Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
        serializer.collect_str(self)
    }
}

/// Heat palette for differential values
///
/// **Public** - a plain value owned by the caller
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeatPalette {
    /// Minimal significance, in percent
    min_percent: f64,

    /// Maximal significance, in percent
    max_percent: f64,
}

impl HeatPalette {
    /// Create a palette from thresholds given in percent
    ///
    /// # Arguments
    /// * `min_threshold` - Changes at or below this percentage are `equal`
    /// * `max_threshold` - Changes at or above this percentage get the maximum heat
    ///
    /// # Errors
    /// * `PaletteError::InvalidThreshold` - if a value is NaN or outside `[0, 100]`
    /// * `PaletteError::InvertedThresholds` - if `min_threshold > max_threshold`
    pub fn new(min_threshold: f64, max_threshold: f64) -> Result<Self, PaletteError> {
        check_threshold("min_threshold", min_threshold)?;
        check_threshold("max_threshold", max_threshold)?;

        if min_threshold > max_threshold {
            return Err(PaletteError::InvertedThresholds {
                min: min_threshold,
                max: max_threshold,
            });
        }

        Ok(Self {
            min_percent: min_threshold,
            max_percent: max_threshold,
        })
    }

    /// Minimal threshold as a fraction
    pub fn min_threshold(&self) -> f64 {
        self.min_percent / 100.0
    }

    /// Maximal threshold as a fraction
    pub fn max_threshold(&self) -> f64 {
        self.max_percent / 100.0
    }

    /// Width of one interior bucket, in percent
    pub fn heat_step(&self) -> f64 {
        (self.max_percent - self.min_percent) / f64::from(HEAT_BUCKET_COUNT)
    }

    /// Style of a relative difference
    ///
    /// # Algorithm
    /// 1. NaN (no baseline, i.e. new code) gets the maximum `more` heat
    /// 2. `|difference|` at or below the minimum is `equal`
    /// 3. At or above the maximum gets heat `HEAT_BUCKET_COUNT + 1`
    /// 4. Otherwise the heat is the index of the interior bucket, from 1
    ///
    /// The comparison is done in percent so that boundaries such as 3% with
    /// a 1% step land in the bucket they name.
    pub fn style_for(&self, difference: f64) -> HeatStyle {
        if difference.is_nan() {
            return HeatStyle::More(MAX_HEAT);
        }

        let percent = difference.abs() * 100.0;
        if percent <= self.min_percent {
            return HeatStyle::Equal;
        }

        let heat = if percent >= self.max_percent {
            MAX_HEAT
        } else {
            let bucket = ((percent - self.min_percent) / self.heat_step()).floor() as u8;
            bucket.saturating_add(1).clamp(1, HEAT_BUCKET_COUNT)
        };

        if difference < 0.0 {
            HeatStyle::Less(heat)
        } else {
            HeatStyle::More(heat)
        }
    }

    /// Every style a palette can return, for legends
    ///
    /// `equal`, then `less1..less5`, then `more1..more5`.
    pub fn all_styles() -> Vec<HeatStyle> {
        std::iter::once(HeatStyle::Equal)
            .chain((1..=MAX_HEAT).map(HeatStyle::Less))
            .chain((1..=MAX_HEAT).map(HeatStyle::More))
            .collect()
    }

    /// Range of absolute change covered by a style, in percent
    ///
    /// Returns `(low, high)`; `high` is infinite for the saturated heat.
    pub fn range_for(&self, style: HeatStyle) -> (f64, f64) {
        match style.heat() {
            0 => (0.0, self.min_percent),
            heat if heat >= MAX_HEAT => (self.max_percent, f64::INFINITY),
            heat => {
                let step = self.heat_step();
                let low = self.min_percent + step * f64::from(heat - 1);
                (low, low + step)
            }
        }
    }
}

impl Default for HeatPalette {
    fn default() -> Self {
        Self {
            min_percent: DEFAULT_MIN_THRESHOLD_PERCENT,
            max_percent: DEFAULT_MAX_THRESHOLD_PERCENT,
        }
    }
}

fn check_threshold(name: &'static str, value: f64) -> Result<(), PaletteError> {
    if value.is_nan() || !(0.0..=100.0).contains(&value) {
        return Err(PaletteError::InvalidThreshold { name, value });
    }
    Ok(())
}
