//! # Preview Configuration
//!
//! Host-supplied settings for a preview pass: print density, physical label
//! size and the on-screen preview bounds.
//!
//! ## Supported Densities
//!
//! | Density | dpi | dots/mm |
//! |---------|-----|---------|
//! | `Dpi152` | 152 | 6  |
//! | `Dpi203` | 203 | 8  |
//! | `Dpi300` | 300 | 12 |
//! | `Dpi600` | 600 | 24 |
//!
//! ## Usage
//!
//! ```
//! use zpl_preview::printer::{Density, PreviewConfig, Unit};
//!
//! let config = PreviewConfig::from_json(
//!     r#"{"density": 300, "unit": "mm", "label_width": 76, "label_height": 130}"#,
//! ).unwrap();
//! assert_eq!(config.density, Density::Dpi300);
//! assert_eq!(config.unit, Unit::Millimeter);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::units::{Unit, to_dots, to_unit};
use crate::document::resolve_dimensions;
use crate::error::PreviewError;

/// Default maximum on-screen preview width, in pixels.
pub const DEFAULT_MAX_PREVIEW_WIDTH: u32 = 600;
/// Default maximum on-screen preview height, in pixels.
pub const DEFAULT_MAX_PREVIEW_HEIGHT: u32 = 900;

// ============================================================================
// DENSITY
// ============================================================================

/// Print density.
///
/// Serialized as the plain dpi number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum Density {
    /// 6 dots/mm
    Dpi152,
    /// 8 dots/mm
    #[default]
    Dpi203,
    /// 12 dots/mm
    Dpi300,
    /// 24 dots/mm
    Dpi600,
}

impl Density {
    /// All supported densities, ascending.
    pub const ALL: [Density; 4] = [Self::Dpi152, Self::Dpi203, Self::Dpi300, Self::Dpi600];

    /// Resolution in dots per inch
    #[inline]
    pub fn dpi(self) -> u32 {
        match self {
            Self::Dpi152 => 152,
            Self::Dpi203 => 203,
            Self::Dpi300 => 300,
            Self::Dpi600 => 600,
        }
    }

    /// Nominal dots per millimeter
    #[inline]
    pub fn dots_per_mm(self) -> u32 {
        match self {
            Self::Dpi152 => 6,
            Self::Dpi203 => 8,
            Self::Dpi300 => 12,
            Self::Dpi600 => 24,
        }
    }
}

impl TryFrom<u32> for Density {
    type Error = PreviewError;

    fn try_from(dpi: u32) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|d| d.dpi() == dpi)
            .ok_or_else(|| PreviewError::Config(format!("Unsupported density: {} dpi", dpi)))
    }
}

impl From<Density> for u32 {
    fn from(density: Density) -> Self {
        density.dpi()
    }
}

impl fmt::Display for Density {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} dpi ({} dpmm)", self.dpi(), self.dots_per_mm())
    }
}

impl FromStr for Density {
    type Err = PreviewError;

    /// Parse `"203"`, `"203dpi"` or `"8dpmm"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        let invalid = || PreviewError::Config(format!("Invalid density: {}", s));

        if let Some(dpmm) = s.strip_suffix("dpmm") {
            let dpmm: u32 = dpmm.trim().parse().map_err(|_| invalid())?;
            return Self::ALL
                .into_iter()
                .find(|d| d.dots_per_mm() == dpmm)
                .ok_or_else(invalid);
        }

        let dpi: u32 = s
            .strip_suffix("dpi")
            .unwrap_or(&s)
            .trim()
            .parse()
            .map_err(|_| invalid())?;
        Self::try_from(dpi)
    }
}

// ============================================================================
// PREVIEW CONFIG
// ============================================================================

/// Settings for one preview pass.
///
/// Every field has a default, so a host only supplies what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    /// Print density.
    pub density: Density,
    /// Unit of `label_width`/`label_height`.
    pub unit: Unit,
    /// Physical label width. `None` derives it from the command text.
    pub label_width: Option<f64>,
    /// Physical label height. `None` derives it from the command text.
    pub label_height: Option<f64>,
    /// Largest on-screen preview width, in pixels.
    pub max_preview_width: u32,
    /// Largest on-screen preview height, in pixels.
    pub max_preview_height: u32,
    /// Horizontally center content narrower than the label.
    pub center_content: bool,
    /// Background RGBA.
    pub background: [u8; 4],
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            density: Density::default(),
            unit: Unit::default(),
            label_width: None,
            label_height: None,
            max_preview_width: DEFAULT_MAX_PREVIEW_WIDTH,
            max_preview_height: DEFAULT_MAX_PREVIEW_HEIGHT,
            center_content: true,
            background: [255, 255, 255, 255],
        }
    }
}

impl PreviewConfig {
    /// Parse a host-supplied JSON configuration.
    pub fn from_json(json: &str) -> Result<Self, PreviewError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values no preview can be produced for.
    pub fn validate(&self) -> Result<(), PreviewError> {
        if self.max_preview_width == 0 || self.max_preview_height == 0 {
            return Err(PreviewError::Config(format!(
                "Preview bounds must be positive, got {}x{}",
                self.max_preview_width, self.max_preview_height
            )));
        }
        for (name, value) in [("label_width", self.label_width), ("label_height", self.label_height)] {
            if let Some(v) = value {
                if !v.is_finite() || v < 0.0 {
                    return Err(PreviewError::Config(format!("Invalid {}: {}", name, v)));
                }
            }
        }
        Ok(())
    }

    fn dpi(&self) -> f64 {
        f64::from(self.density.dpi())
    }

    /// Logical canvas size in dots for `text`.
    ///
    /// Each axis uses the configured physical size when present and the
    /// resolver's value otherwise. Not rounded; the compositor rejects
    /// non-finite or non-positive sizes.
    pub fn logical_size(&self, text: &str) -> (f64, f64) {
        let configured = |value: Option<f64>| value.map(|v| to_dots(v, self.unit, self.dpi()));
        match (configured(self.label_width), configured(self.label_height)) {
            (Some(w), Some(h)) => (w, h),
            (w, h) => {
                let dims = resolve_dimensions(text);
                (
                    w.unwrap_or(f64::from(dims.width)),
                    h.unwrap_or(f64::from(dims.height)),
                )
            }
        }
    }

    /// Re-derive the label size from `text`, expressed in the current unit.
    ///
    /// Leaves the size alone unless both resolved dimensions are positive.
    pub fn sync_label_size(&mut self, text: &str) {
        let dims = resolve_dimensions(text);
        if dims.width > 0 && dims.height > 0 {
            self.label_width = Some(to_unit(f64::from(dims.width), self.unit, self.dpi()));
            self.label_height = Some(to_unit(f64::from(dims.height), self.unit, self.dpi()));
        }
    }

    /// Switch units, converting the stored size so the physical label is
    /// unchanged.
    pub fn change_unit(&mut self, unit: Unit) {
        let dpi = self.dpi();
        let from = self.unit;
        let convert = |v: f64| to_unit(to_dots(v, from, dpi), unit, dpi);
        self.label_width = self.label_width.map(convert);
        self.label_height = self.label_height.map(convert);
        self.unit = unit;
    }

    /// Switch density, keeping the physical label size.
    ///
    /// The logical dot size scales with dpi, so a denser label previews
    /// smaller once fitted to the preview bounds.
    pub fn change_density(&mut self, density: Density) {
        self.density = density;
    }
}

// ============================================================================
// TESTS
// ============================================================================
