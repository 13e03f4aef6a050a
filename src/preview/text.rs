//! Text rendering for preview.
//!
//! Text is rasterized unrotated with its top-left at the origin, then each
//! covered pixel is mapped around the anchor point. Angles are clockwise
//! positive in device space (y down):
//!
//! | Rotation | Angle | Pixel (u, v) lands at |
//! |----------|-------|-----------------------|
//! | N | 0°   | (x + u, y + v) |
//! | R | −90° | (x + v, y − u − 1) |
//! | B | +90° | (x − v − 1, y + u) |
//! | I | 180° | (x − u − 1, y − v − 1) |
//!
//! Only the part of the line that maps onto the canvas is rasterized.

use super::Compositor;
use super::canvas::{BLACK, Canvas, LogicalRect};
use super::font::TextWindow;
use super::viewport::MAX_LABEL_DOTS;
use crate::document::{Rotation, Text};

impl Compositor {
    /// Render a text element.
    pub(super) fn render_text(&mut self, canvas: &mut Canvas, text: &Text) {
        if text.content.is_empty() {
            return;
        }

        // Taller than any canvas: only a slice could ever show
        let height = text.font_size.min(MAX_LABEL_DOTS);
        if height != text.font_size {
            tracing::debug!(font_size = text.font_size, height, "Clamped text height");
        }

        let (line_w, line_h) = self.face.line_size(&text.content, height);
        let Some(window) = visible_window(text, line_w, line_h, canvas.visible_rect()) else {
            return;
        };

        let bitmap = self
            .face
            .rasterize_window(&text.content, height, window, &mut self.glyph_cache);

        for y in 0..bitmap.height {
            for x in 0..bitmap.width {
                let coverage = bitmap.coverage(x, y);
                if coverage <= 0.0 {
                    continue;
                }
                let u = (bitmap.u0 + x) as i64;
                let v = (bitmap.v0 + y) as i64;
                let (px, py) = rotate_pixel(text.x, text.y, u, v, text.rotation);
                canvas.blend_pixel(px, py, BLACK, coverage);
            }
        }
    }
}

/// Device pixel covered by text pixel (`u`, `v`) anchored at (`x`, `y`).
fn rotate_pixel(x: i32, y: i32, u: i64, v: i64, rotation: Rotation) -> (i64, i64) {
    let (x, y) = (i64::from(x), i64::from(y));
    match rotation {
        Rotation::Normal => (x + u, y + v),
        Rotation::Rotated => (x + v, y - u - 1),
        Rotation::BottomUp => (x - v - 1, y + u),
        Rotation::Inverted => (x - u - 1, y - v - 1),
    }
}

/// Part of a `line_w` × `line_h` line that lands inside `visible`.
///
/// Inverts [`rotate_pixel`] on the visible rectangle. `None` when nothing
/// of the line is on the canvas.
fn visible_window(text: &Text, line_w: usize, line_h: usize, visible: LogicalRect) -> Option<TextWindow> {
    let (x, y) = (i64::from(text.x), i64::from(text.y));
    let r = visible;
    let ((u0, u1), (v0, v1)) = match text.rotation {
        Rotation::Normal => ((r.x0 - x, r.x1 - x), (r.y0 - y, r.y1 - y)),
        Rotation::Rotated => ((y - r.y1, y - r.y0), (r.x0 - x, r.x1 - x)),
        Rotation::BottomUp => ((r.y0 - y, r.y1 - y), (x - r.x1, x - r.x0)),
        Rotation::Inverted => ((x - r.x1, x - r.x0), (y - r.y1, y - r.y0)),
    };

    let clamp = |lo: i64, hi: i64, len: usize| {
        let len = i64::try_from(len).unwrap_or(i64::MAX);
        let (lo, hi) = (lo.clamp(0, len), hi.clamp(0, len));
        (lo < hi).then_some((lo as usize, hi as usize))
    };
    let (u0, u1) = clamp(u0, u1, line_w)?;
    let (v0, v1) = clamp(v0, v1, line_h)?;
    Some(TextWindow { u0, v0, u1, v1 })
}
