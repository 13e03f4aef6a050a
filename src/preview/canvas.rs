//! Raster surface with a translation.
//!
//! All drawing goes through [`Canvas`], which owns an RGBA image sized to the
//! logical label. Primitive calls take logical coordinates and have the
//! current paint offset added; anything outside the surface is clipped.
//!
//! Element coordinates span the whole `i32` range, so edge arithmetic is done
//! in `i64` and only clipped results ever index the image.

use image::{Rgba, RgbaImage};

/// Opaque black.
pub const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
/// Opaque white.
pub const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Half-open logical rectangle `[x0, x1) × [y0, y1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogicalRect {
    pub x0: i64,
    pub y0: i64,
    pub x1: i64,
    pub y1: i64,
}

/// A translated drawing surface.
pub struct Canvas {
    image: RgbaImage,
    offset_x: i32,
    offset_y: i32,
}

impl Canvas {
    /// Allocate a `width` × `height` surface. Pixels start transparent.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
            offset_x: 0,
            offset_y: 0,
        }
    }

    fn width(&self) -> i64 {
        i64::from(self.image.width())
    }

    fn height(&self) -> i64 {
        i64::from(self.image.height())
    }

    /// Fill the whole surface, ignoring the translation.
    pub fn fill_background(&mut self, color: Rgba<u8>) {
        for pixel in self.image.pixels_mut() {
            *pixel = color;
        }
    }

    /// Shift every subsequent primitive by (`dx`, `dy`).
    pub fn translate(&mut self, dx: i32, dy: i32) {
        self.offset_x = self.offset_x.saturating_add(dx);
        self.offset_y = self.offset_y.saturating_add(dy);
    }

    /// The part of logical space that lands on the surface.
    pub fn visible_rect(&self) -> LogicalRect {
        let dx = i64::from(self.offset_x);
        let dy = i64::from(self.offset_y);
        LogicalRect {
            x0: -dx,
            y0: -dy,
            x1: self.width() - dx,
            y1: self.height() - dy,
        }
    }

    /// Set one pixel (logical coordinates).
    pub fn set_pixel(&mut self, x: i64, y: i64, color: Rgba<u8>) {
        if let Some((px, py)) = self.device(x, y) {
            self.image.put_pixel(px, py, color);
        }
    }

    /// Composite `color` over one pixel with `coverage` in `[0, 1]`.
    pub fn blend_pixel(&mut self, x: i64, y: i64, color: Rgba<u8>, coverage: f32) {
        let coverage = coverage.clamp(0.0, 1.0);
        if coverage <= 0.0 {
            return;
        }
        let Some((px, py)) = self.device(x, y) else {
            return;
        };
        let dst = self.image.get_pixel_mut(px, py);
        for c in 0..3 {
            let src = f32::from(color.0[c]);
            let old = f32::from(dst.0[c]);
            dst.0[c] = (old + (src - old) * coverage).round() as u8;
        }
        let alpha = f32::from(dst.0[3]);
        dst.0[3] = (alpha + (255.0 - alpha) * coverage).round() as u8;
    }

    /// Fill an integer rectangle. Negative sizes extend back from the origin.
    pub fn fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32, color: Rgba<u8>) {
        let (x, y) = (i64::from(x), i64::from(y));
        let (x0, x1) = ordered(x, x + i64::from(width));
        let (y0, y1) = ordered(y, y + i64::from(height));
        self.fill_span(x0, y0, x1, y1, color);
    }

    /// Fill a fractional rectangle.
    ///
    /// Edges snap to the nearest pixel boundary, so adjacent cells tile
    /// without gaps or overlap.
    pub fn fill_rect_f(&mut self, x: f32, y: f32, width: f32, height: f32, color: Rgba<u8>) {
        // Float to int casts saturate
        let snap = |v: f32| v.round() as i64;
        self.fill_span(snap(x), snap(y), snap(x + width), snap(y + height), color);
    }

    /// Stroke a horizontal line of `length` starting at (`x`, `y`).
    ///
    /// The stroke is centered on `y`.
    pub fn stroke_hline(&mut self, x: i32, y: i32, length: i32, thickness: i32, color: Rgba<u8>) {
        let t = i64::from(thickness.max(1));
        let (x, y) = (i64::from(x), i64::from(y));
        let (x0, x1) = ordered(x, x + i64::from(length));
        let y0 = y - t / 2;
        self.fill_span(x0, y0, x1, y0 + t, color);
    }

    /// Stroke a vertical line of `length` starting at (`x`, `y`).
    ///
    /// The stroke is centered on `x`.
    pub fn stroke_vline(&mut self, x: i32, y: i32, length: i32, thickness: i32, color: Rgba<u8>) {
        let t = i64::from(thickness.max(1));
        let (x, y) = (i64::from(x), i64::from(y));
        let (y0, y1) = ordered(y, y + i64::from(length));
        let x0 = x - t / 2;
        self.fill_span(x0, y0, x0 + t, y1, color);
    }

    /// Stroke a rectangle outline; the interior is left untouched.
    pub fn stroke_rect(&mut self, x: i32, y: i32, width: i32, height: i32, thickness: i32, color: Rgba<u8>) {
        let (x, y) = (i64::from(x), i64::from(y));
        let (x0, x1) = ordered(x, x + i64::from(width));
        let (y0, y1) = ordered(y, y + i64::from(height));
        let t = i64::from(thickness.max(1));
        let half = t / 2;

        // Horizontal edges cover the corners
        self.fill_span(x0 - half, y0 - half, x1 - half + t, y0 - half + t, color);
        self.fill_span(x0 - half, y1 - half, x1 - half + t, y1 - half + t, color);
        self.fill_span(x0 - half, y0 - half, x0 - half + t, y1 - half + t, color);
        self.fill_span(x1 - half, y0 - half, x1 - half + t, y1 - half + t, color);
    }

    /// Copy raw RGBA pixels with their top-left at (`x`, `y`).
    ///
    /// Rows beyond the end of `data` are skipped.
    pub fn blit_rgba(&mut self, x: i32, y: i32, width: u32, height: u32, data: &[u8]) {
        for row in 0..height {
            for col in 0..width {
                let idx = ((row as usize) * (width as usize) + col as usize) * 4;
                let Some(px) = data.get(idx..idx + 4) else {
                    return;
                };
                self.set_pixel(
                    i64::from(x) + i64::from(col),
                    i64::from(y) + i64::from(row),
                    Rgba([px[0], px[1], px[2], px[3]]),
                );
            }
        }
    }

    /// Give up the surface.
    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Fill the half-open logical span `[x0, x1) × [y0, y1)`.
    fn fill_span(&mut self, x0: i64, y0: i64, x1: i64, y1: i64, color: Rgba<u8>) {
        let (w, h) = (self.width(), self.height());
        let dx = i64::from(self.offset_x);
        let dy = i64::from(self.offset_y);

        let px0 = x0.saturating_add(dx).clamp(0, w);
        let px1 = x1.saturating_add(dx).clamp(0, w);
        let py0 = y0.saturating_add(dy).clamp(0, h);
        let py1 = y1.saturating_add(dy).clamp(0, h);

        for py in py0..py1 {
            for px in px0..px1 {
                self.image.put_pixel(px as u32, py as u32, color);
            }
        }
    }

    /// Map logical to device coordinates, `None` if off the surface.
    fn device(&self, x: i64, y: i64) -> Option<(u32, u32)> {
        let px = x.saturating_add(i64::from(self.offset_x));
        let py = y.saturating_add(i64::from(self.offset_y));
        let in_x = (0..self.width()).contains(&px);
        let in_y = (0..self.height()).contains(&py);
        (in_x && in_y).then_some((px as u32, py as u32))
    }
}

fn ordered(a: i64, b: i64) -> (i64, i64) {
    if a <= b { (a, b) } else { (b, a) }
}
