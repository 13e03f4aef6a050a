//! Unit conversion utilities
//!
//! Converts physical label lengths to device dots and back at a given print
//! density. No rounding happens here; callers that need whole dots round
//! themselves.
//!
//! ```text
//! dots_per_mm   = dpi / 25.4
//! dots_per_cm   = dpi / 2.54
//! dots_per_inch = dpi
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PreviewError;

/// Length unit for label dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    /// Millimeters
    #[default]
    #[serde(alias = "mm")]
    Millimeter,
    /// Centimeters
    #[serde(alias = "cm")]
    Centimeter,
    /// Inches
    #[serde(alias = "in", alias = "inches")]
    Inch,
    /// Device dots (identity)
    Dots,
}

impl Unit {
    /// Dots per one of this unit at `dpi`.
    pub fn dots_per_unit(self, dpi: f64) -> f64 {
        match self {
            Self::Millimeter => dpi / 25.4,
            Self::Centimeter => dpi / 2.54,
            Self::Inch => dpi,
            Self::Dots => 1.0,
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Millimeter => write!(f, "mm"),
            Self::Centimeter => write!(f, "cm"),
            Self::Inch => write!(f, "in"),
            Self::Dots => write!(f, "dots"),
        }
    }
}

impl FromStr for Unit {
    type Err = PreviewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mm" | "millimeter" | "millimeters" => Ok(Self::Millimeter),
            "cm" | "centimeter" | "centimeters" => Ok(Self::Centimeter),
            "in" | "inch" | "inches" => Ok(Self::Inch),
            "dots" | "dot" => Ok(Self::Dots),
            _ => Err(PreviewError::Config(format!("Unknown unit: {}", s))),
        }
    }
}

/// Convert a length in `unit` to dots.
pub fn to_dots(value: f64, unit: Unit, dpi: f64) -> f64 {
    match unit {
        Unit::Dots => value,
        _ => value * unit.dots_per_unit(dpi),
    }
}

/// Convert a length in dots to `unit`.
pub fn to_unit(dots: f64, unit: Unit, dpi: f64) -> f64 {
    match unit {
        Unit::Dots => dots,
        _ => dots / unit.dots_per_unit(dpi),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const UNITS: [Unit; 4] = [Unit::Millimeter, Unit::Centimeter, Unit::Inch, Unit::Dots];

    #[test]
    fn test_known_conversions() {
        assert!((to_dots(1.0, Unit::Inch, 203.0) - 203.0).abs() < 1e-9);
        assert!((to_dots(25.4, Unit::Millimeter, 300.0) - 300.0).abs() < 1e-9);
        assert!((to_dots(2.54, Unit::Centimeter, 203.0) - 203.0).abs() < 1e-9);
        assert_eq!(to_dots(123.0, Unit::Dots, 600.0), 123.0);
    }

    #[test]
    fn test_shipping_label_size() {
        // 76mm x 130mm at 203dpi ≈ 607 x 1039 dots
        let w = to_dots(76.0, Unit::Millimeter, 203.0);
        let h = to_dots(130.0, Unit::Millimeter, 203.0);
        assert_eq!(w.round() as u32, 607);
        assert_eq!(h.round() as u32, 1039);
    }

    #[test]
    fn test_round_trip() {
        for unit in UNITS {
            for dpi in [152.0, 203.0, 300.0, 600.0] {
                for value in [0.1, 1.0, 76.0, 130.5, 1234.567] {
                    let back = to_unit(to_dots(value, unit, dpi), unit, dpi);
                    assert!(
                        (back - value).abs() < 1e-9 * value.max(1.0),
                        "{value} {unit} @ {dpi}dpi came back as {back}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_unit_parsing() {
        assert_eq!("mm".parse::<Unit>().unwrap(), Unit::Millimeter);
        assert_eq!("Inches".parse::<Unit>().unwrap(), Unit::Inch);
        assert_eq!(" cm ".parse::<Unit>().unwrap(), Unit::Centimeter);
        assert_eq!("dots".parse::<Unit>().unwrap(), Unit::Dots);
    }

    #[test]
    fn test_unknown_unit_is_config_error() {
        let err = "furlong".parse::<Unit>().unwrap_err();
        assert!(matches!(err, PreviewError::Config(ref msg) if msg.contains("furlong")));
    }

    #[test]
    fn test_unit_serde() {
        assert_eq!(serde_json::to_string(&Unit::Inch).unwrap(), "\"inch\"");
        let unit: Unit = serde_json::from_str("\"mm\"").unwrap();
        assert_eq!(unit, Unit::Millimeter);
        let unit: Unit = serde_json::from_str("\"inches\"").unwrap();
        assert_eq!(unit, Unit::Inch);
    }
}
