//! Label dimension resolution.
//!
//! Derives the logical canvas size from the command text alone:
//!
//! - **width**: `^PW` if present and positive, else the rightmost element
//!   extent, else [`FALLBACK_WIDTH`]
//! - **height**: the lowest element extent, else [`FALLBACK_HEIGHT`]
//!
//! `^PW` never stands in for the height.

use serde::Serialize;

use super::bounds::content_bounds;
use super::interpret::parse;
use super::Document;
use crate::symbol::{MatrixSymbolGenerator, QrSymbolGenerator};

/// Width used when the text declares none and has no elements.
pub const FALLBACK_WIDTH: u32 = 596;
/// Height used when the text has no elements.
pub const FALLBACK_HEIGHT: u32 = 900;

/// Logical label size in device dots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LabelDimensions {
    pub width: u32,
    pub height: u32,
}

/// Resolve the label size of `text` using the default QR generator.
pub fn resolve_dimensions(text: &str) -> LabelDimensions {
    resolve_dimensions_with(text, &QrSymbolGenerator::default())
}

/// Resolve the label size of `text`, sizing QR codes with `generator`.
pub fn resolve_dimensions_with(text: &str, generator: &dyn MatrixSymbolGenerator) -> LabelDimensions {
    document_dimensions(&parse(text), generator)
}

/// Resolve the label size of an already parsed document.
pub fn document_dimensions(doc: &Document, generator: &dyn MatrixSymbolGenerator) -> LabelDimensions {
    let bounds = content_bounds(&doc.elements, generator);
    let extent_x = bounds.map(|b| b.max_x).filter(|&x| x > 0).map(|x| x as u32);
    let extent_y = bounds.map(|b| b.max_y).filter(|&y| y > 0).map(|y| y as u32);

    LabelDimensions {
        width: doc.label_width.or(extent_x).unwrap_or(FALLBACK_WIDTH),
        height: extent_y.unwrap_or(FALLBACK_HEIGHT),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_falls_back() {
        assert_eq!(
            resolve_dimensions(""),
            LabelDimensions {
                width: FALLBACK_WIDTH,
                height: FALLBACK_HEIGHT,
            }
        );
    }

    #[test]
    fn test_declared_width_wins_but_not_height() {
        let dims = resolve_dimensions("^XA^PW400^FO10,10^GB800,50,1^FS^XZ");
        assert_eq!(dims.width, 400);
        assert_eq!(dims.height, 60);

        let dims = resolve_dimensions("^XA^PW400^XZ");
        assert_eq!(dims.height, FALLBACK_HEIGHT);
    }

    #[test]
    fn test_width_from_rightmost_rule() {
        let dims = resolve_dimensions("^XA^FO15,296^GB553,0,1^FS^FO569,296^GB0,548,1^FS^XZ");
        assert_eq!(dims.width, 569);
        assert_eq!(dims.height, 844);
    }

    #[test]
    fn test_bounds_grow_by_excess_extent() {
        let base = "^XA^FO10,10^GB100,100,1^FS";
        let before = resolve_dimensions(&format!("{base}^XZ"));
        let after = resolve_dimensions(&format!("{base}^FO200,300^GB50,40,1^FS^XZ"));
        assert_eq!(after.width - before.width, 250 - 110);
        assert_eq!(after.height - before.height, 340 - 110);
    }
}
