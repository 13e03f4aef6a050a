//! Element extents and content bounds.
//!
//! Extents are estimates used for label sizing and centering, not exact
//! painted footprints:
//!
//! | Element | Width | Height |
//! |---------|-------|--------|
//! | Text    | chars × size × 0.6 | size |
//! | Box     | width | height |
//! | Barcode | module width × schematic modules | bar height |
//! | QR      | modules × dot size (or explicit size) | same |
//! | Image   | width | height |

use super::types::Element;
use crate::symbol::{MatrixSymbolGenerator, linear};

/// Average glyph advance as a fraction of the font height.
pub const TEXT_WIDTH_FACTOR: f64 = 0.6;

/// Axis-aligned rectangle in logical dots (`max` exclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl Bounds {
    /// Widened to `i64`: corners may sit at opposite ends of the `i32` range.
    pub fn width(&self) -> i64 {
        i64::from(self.max_x) - i64::from(self.min_x)
    }

    pub fn height(&self) -> i64 {
        i64::from(self.max_y) - i64::from(self.min_y)
    }

    /// Smallest rectangle containing both.
    pub fn union(self, other: Bounds) -> Bounds {
        Bounds {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }
}

/// Estimated (width, height) of an element in dots.
///
/// A QR code the generator cannot encode has no extent.
pub fn extent(element: &Element, generator: &dyn MatrixSymbolGenerator) -> Option<(i32, i32)> {
    match element {
        Element::Text(t) => {
            let chars = t.content.chars().count() as f64;
            let width = (chars * f64::from(t.font_size) * TEXT_WIDTH_FACTOR).ceil();
            Some((saturate(width), saturate(f64::from(t.font_size))))
        }
        Element::Box(b) => Some((b.width, b.height)),
        Element::Barcode(b) => {
            let modules = linear::module_count(&b.content) as f64;
            Some((
                saturate(modules * f64::from(b.module_width)),
                saturate(f64::from(b.height)),
            ))
        }
        Element::Qrcode(q) => {
            let side = match q.size.filter(|&s| s > 0) {
                Some(size) => f64::from(size),
                None => match generator.generate(&q.content) {
                    Ok(grid) => grid.module_count() as f64 * f64::from(q.dot_size),
                    Err(e) => {
                        tracing::debug!(error = %e, "QR code has no extent");
                        return None;
                    }
                },
            };
            Some((saturate(side), saturate(side)))
        }
        Element::Image(i) => Some((i.width, i.height)),
    }
}

/// Bounding rectangle of a single element.
///
/// Negative extents (a `^GB` with a negative width) extend back from the
/// origin.
pub fn element_bounds(element: &Element, generator: &dyn MatrixSymbolGenerator) -> Option<Bounds> {
    let (x, y) = element.origin();
    let (w, h) = extent(element, generator)?;
    let (x2, y2) = (x.saturating_add(w), y.saturating_add(h));
    Some(Bounds {
        min_x: x.min(x2),
        min_y: y.min(y2),
        max_x: x.max(x2),
        max_y: y.max(y2),
    })
}

/// Bounding rectangle of all elements, `None` when nothing has an extent.
pub fn content_bounds(elements: &[Element], generator: &dyn MatrixSymbolGenerator) -> Option<Bounds> {
    elements
        .iter()
        .filter_map(|el| element_bounds(el, generator))
        .reduce(Bounds::union)
}

fn saturate(value: f64) -> i32 {
    value.clamp(f64::from(i32::MIN), f64::from(i32::MAX)) as i32
}
