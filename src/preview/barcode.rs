//! Schematic barcode rendering.
//!
//! Bars come from [`linear::modules`]; a `1` module is a filled bar, a `0`
//! module only advances the cursor.

use super::Compositor;
use super::canvas::{BLACK, Canvas};
use crate::document::Barcode;
use crate::symbol::linear;

impl Compositor {
    /// Render a linear barcode element.
    pub(super) fn render_barcode(&self, canvas: &mut Canvas, barcode: &Barcode) {
        let module_width = linear::fitted_module_width(&barcode.content, barcode.module_width);
        let height = i32::try_from(barcode.height).unwrap_or(i32::MAX);
        let step = i32::try_from(module_width).unwrap_or(i32::MAX);

        let mut x = barcode.x;
        for bar in linear::modules(&barcode.content) {
            if bar {
                canvas.fill_rect(x, barcode.y, step, height, BLACK);
            }
            x = x.saturating_add(step);
        }
    }
}
