//! Text faces and glyph rasterization for preview rendering.
//!
//! Two faces are available:
//!
//! - **Bitmap** (default): the Spleen bitmap font family, embedded in the
//!   binary. The closest source size (6×12, 8×16 or 12×24) is sampled
//!   nearest-neighbour at the requested height; cell width is half the
//!   height. Characters Spleen lacks (CJK, for one) draw as a box.
//! - **Outline**: any TrueType/OpenType font supplied by the host, rendered
//!   anti-aliased with `ab_glyph`.
//!
//! Both produce a [`TextBitmap`]: a coverage buffer in line space, where the
//! top edge is the top of the text line. Only the requested [`TextWindow`] of
//! the line is materialized, so a huge font costs no more than the part that
//! actually lands on the canvas.

use ab_glyph::{Font, FontArc, GlyphId, ScaleFont};
use spleen_font::{FONT_6X12, FONT_8X16, FONT_12X24, PSF2Font};
use std::collections::HashMap;

use crate::error::PreviewError;

/// Half-open region `[u0, u1) × [v0, v1)` of a text line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextWindow {
    pub u0: usize,
    pub v0: usize,
    pub u1: usize,
    pub v1: usize,
}

impl TextWindow {
    /// The whole of a `width` × `height` line.
    pub fn full(width: usize, height: usize) -> Self {
        Self {
            u0: 0,
            v0: 0,
            u1: width,
            v1: height,
        }
    }

    fn width(&self) -> usize {
        self.u1.saturating_sub(self.u0)
    }

    fn height(&self) -> usize {
        self.v1.saturating_sub(self.v0)
    }
}

/// Rasterized text as a coverage buffer.
///
/// Covers the window it was rendered for; (`u0`, `v0`) is the line-space
/// position of the buffer's top-left pixel.
pub struct TextBitmap {
    pub u0: usize,
    pub v0: usize,
    pub width: usize,
    pub height: usize,
    /// Coverage values: 0.0 = background, 1.0 = ink.
    pub data: Vec<f32>,
}

impl TextBitmap {
    fn blank(window: TextWindow) -> Self {
        let (width, height) = (window.width(), window.height());
        Self {
            u0: window.u0,
            v0: window.v0,
            width,
            height,
            data: vec![0.0; width * height],
        }
    }

    /// Coverage at buffer position (`x`, `y`).
    pub fn coverage(&self, x: usize, y: usize) -> f32 {
        if x >= self.width {
            return 0.0;
        }
        self.data.get(y * self.width + x).copied().unwrap_or(0.0)
    }

    fn add(&mut self, u: usize, v: usize, coverage: f32) {
        let idx = (v - self.v0) * self.width + (u - self.u0);
        if let Some(cell) = self.data.get_mut(idx) {
            *cell = (*cell + coverage).min(1.0);
        }
    }
}

/// Font face used for text elements.
#[derive(Clone, Default)]
pub enum TextFace {
    /// Embedded Spleen bitmap font.
    #[default]
    Bitmap,
    /// Host-supplied outline font.
    Outline(FontArc),
}

impl std::fmt::Debug for TextFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bitmap => write!(f, "TextFace::Bitmap"),
            Self::Outline(_) => write!(f, "TextFace::Outline"),
        }
    }
}

impl TextFace {
    /// Load an outline face from TrueType/OpenType bytes.
    pub fn from_font_bytes(bytes: Vec<u8>) -> Result<Self, PreviewError> {
        FontArc::try_from_vec(bytes)
            .map(Self::Outline)
            .map_err(|e| PreviewError::Font(e.to_string()))
    }

    /// Size of one line of `text` at `pixel_height`, without rasterizing it.
    pub fn line_size(&self, text: &str, pixel_height: u32) -> (usize, usize) {
        let height = pixel_height.max(1) as usize;
        match self {
            Self::Bitmap => (text.chars().count().saturating_mul(cell_width(height)), height),
            Self::Outline(font) => {
                let layout = OutlineLayout::new(font, text, height as f32);
                (layout.width, layout.height)
            }
        }
    }

    /// Rasterize one whole line of text at `pixel_height`.
    pub fn rasterize(&self, text: &str, pixel_height: u32, cache: &mut GlyphCache) -> TextBitmap {
        let (width, height) = self.line_size(text, pixel_height);
        self.rasterize_window(text, pixel_height, TextWindow::full(width, height), cache)
    }

    /// Rasterize the `window` part of one line of text at `pixel_height`.
    pub fn rasterize_window(
        &self,
        text: &str,
        pixel_height: u32,
        window: TextWindow,
        cache: &mut GlyphCache,
    ) -> TextBitmap {
        let pixel_height = pixel_height.max(1) as usize;
        match self {
            Self::Bitmap => render_bitmap_text(text, pixel_height, window, cache),
            Self::Outline(font) => render_outline_text(font, text, pixel_height as f32, window),
        }
    }
}

// ============================================================================
// BITMAP FACE
// ============================================================================

/// Spleen source sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum GlyphSource {
    Small,
    Medium,
    Large,
}

impl GlyphSource {
    /// Smallest source at least as tall as `height`, else the largest.
    fn for_height(height: usize) -> Self {
        match height {
            0..=12 => Self::Small,
            13..=16 => Self::Medium,
            _ => Self::Large,
        }
    }

    fn dims(self) -> (usize, usize) {
        match self {
            Self::Small => (6, 12),
            Self::Medium => (8, 16),
            Self::Large => (12, 24),
        }
    }

    fn data(self) -> &'static [u8] {
        match self {
            Self::Small => FONT_6X12,
            Self::Medium => FONT_8X16,
            Self::Large => FONT_12X24,
        }
    }
}

/// Cache of unscaled Spleen glyphs, keyed by source size and character.
///
/// `None` records a character the font does not have.
#[derive(Debug, Default)]
pub struct GlyphCache {
    glyphs: HashMap<(GlyphSource, char), Option<Vec<u8>>>,
}

impl GlyphCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn get(&mut self, source: GlyphSource, ch: char) -> Option<&[u8]> {
        self.glyphs
            .entry((source, ch))
            .or_insert_with(|| load_glyph(source, ch))
            .as_deref()
    }
}

/// Read one glyph from Spleen as a row-major 0/1 bitmap.
fn load_glyph(source: GlyphSource, ch: char) -> Option<Vec<u8>> {
    let (w, h) = source.dims();
    let mut spleen = PSF2Font::new(source.data()).ok()?;
    let utf8_bytes = ch.to_string();
    let glyph = spleen.glyph_for_utf8(utf8_bytes.as_bytes())?;

    let mut bitmap = vec![0u8; w * h];
    for (row_y, row) in glyph.enumerate() {
        for (col_x, on) in row.enumerate() {
            if row_y < h && col_x < w {
                bitmap[row_y * w + col_x] = u8::from(on);
            }
        }
    }
    Some(bitmap)
}

fn cell_width(height: usize) -> usize {
    (height / 2).max(1)
}

fn render_bitmap_text(text: &str, height: usize, window: TextWindow, cache: &mut GlyphCache) -> TextBitmap {
    let cell_w = cell_width(height);
    let chars: Vec<char> = text.chars().collect();
    let window = TextWindow {
        u1: window.u1.min(chars.len().saturating_mul(cell_w)),
        v1: window.v1.min(height),
        ..window
    };
    let mut out = TextBitmap::blank(window);
    if out.width == 0 || out.height == 0 {
        return out;
    }

    let source = GlyphSource::for_height(height);
    let (src_w, src_h) = source.dims();

    // Only the cells the window touches
    for idx in window.u0 / cell_w..=(window.u1 - 1) / cell_w {
        let ch = chars[idx];
        if ch.is_whitespace() {
            continue;
        }
        let glyph = cache.get(source, ch);
        let cell_x = idx * cell_w;
        let (cu0, cu1) = (window.u0.max(cell_x), window.u1.min(cell_x + cell_w));

        for v in window.v0..window.v1 {
            let sy = v * src_h / height;
            for u in cu0..cu1 {
                let gx = u - cell_x;
                let on = match glyph {
                    Some(g) => g.get(sy * src_w + gx * src_w / cell_w).is_some_and(|&b| b != 0),
                    None => on_box_edge(gx, v, cell_w, height),
                };
                if on {
                    out.add(u, v, 1.0);
                }
            }
        }
    }

    out
}

/// Whether (`x`, `y`) is on a box outline inset by one pixel (missing glyphs).
fn on_box_edge(x: usize, y: usize, width: usize, height: usize) -> bool {
    if width < 3 || height < 3 {
        return true;
    }
    let (x0, x1) = (1, width - 2);
    let (y0, y1) = (1, height - 2);
    let in_x = (x0..=x1).contains(&x);
    let in_y = (y0..=y1).contains(&y);
    (in_x && (y == y0 || y == y1)) || (in_y && (x == x0 || x == x1))
}

// ============================================================================
// OUTLINE FACE
// ============================================================================

/// Glyph positions for one line.
struct OutlineLayout {
    glyphs: Vec<(GlyphId, f32)>,
    ascent: f32,
    width: usize,
    height: usize,
}

impl OutlineLayout {
    fn new(font: &FontArc, text: &str, pixel_height: f32) -> Self {
        let scaled = font.as_scaled(pixel_height);

        let mut glyphs = Vec::new();
        let mut caret_x = 0.0f32;
        for ch in text.chars() {
            let glyph_id = font.glyph_id(ch);
            glyphs.push((glyph_id, caret_x));
            caret_x += scaled.h_advance(glyph_id);
        }

        let ascent = scaled.ascent();
        Self {
            glyphs,
            ascent,
            width: caret_x.ceil().max(0.0) as usize,
            height: (ascent - scaled.descent()).ceil().max(1.0) as usize,
        }
    }
}

fn render_outline_text(font: &FontArc, text: &str, pixel_height: f32, window: TextWindow) -> TextBitmap {
    let layout = OutlineLayout::new(font, text, pixel_height);
    let window = TextWindow {
        u1: window.u1.min(layout.width),
        v1: window.v1.min(layout.height),
        ..window
    };
    let mut out = TextBitmap::blank(window);
    if out.width == 0 || out.height == 0 {
        return out;
    }

    for (glyph_id, glyph_x) in layout.glyphs {
        let glyph = glyph_id.with_scale_and_position(pixel_height, ab_glyph::point(glyph_x, layout.ascent));
        let Some(outlined) = font.outline_glyph(glyph) else {
            continue;
        };
        let bounds = outlined.px_bounds();
        let (min_x, min_y) = (bounds.min.x as i64, bounds.min.y as i64);
        let (max_x, max_y) = (bounds.max.x.ceil() as i64, bounds.max.y.ceil() as i64);
        let outside = max_x <= window.u0 as i64
            || min_x >= window.u1 as i64
            || max_y <= window.v0 as i64
            || min_y >= window.v1 as i64;
        if outside {
            continue;
        }
        outlined.draw(|px, py, coverage| {
            let u = min_x + i64::from(px);
            let v = min_y + i64::from(py);
            let in_u = (window.u0 as i64..window.u1 as i64).contains(&u);
            let in_v = (window.v0 as i64..window.v1 as i64).contains(&v);
            if in_u && in_v {
                out.add(u as usize, v as usize, coverage);
            }
        });
    }

    out
}
