//! # Label Preview Compositor
//!
//! Paints a [`Document`] onto an RGBA raster the size of the logical label.
//!
//! ## Architecture
//!
//! ```text
//! text ──► parse ──► Document ──► Compositor ──► RgbaImage (logical dots)
//!                        │             ▲
//!                        ▼             │
//!               content bounds ──► Viewport (offset, display scale)
//! ```
//!
//! One pass, in document order:
//!
//! 1. Fill the whole canvas with the background (never translated)
//! 2. Translate by the viewport's paint offset
//! 3. Paint each element: text, box/rule, schematic barcode, QR, image
//!
//! The display scale never touches the raster; [`LabelPreview::display_image`]
//! produces a resized copy for on-screen use.
//!
//! ## Example
//!
//! ```
//! use zpl_preview::preview::render_label;
//! use zpl_preview::PreviewConfig;
//!
//! let preview = render_label("^XA^FO20,20^GB200,100,3^FS^XZ", &PreviewConfig::default()).unwrap();
//! assert_eq!(preview.image.dimensions(), (220, 120));
//! let png = preview.to_png().unwrap();
//! assert_eq!(&png[1..4], b"PNG");
//! ```

mod barcode;
pub mod canvas;
pub mod font;
mod text;
pub mod viewport;

pub use font::{GlyphCache, TextBitmap, TextFace, TextWindow};
pub use viewport::{MAX_LABEL_DOTS, Viewport};

use image::imageops::{self, FilterType};
use image::{ImageEncoder, Rgba, RgbaImage};

use crate::document::{Document, Element, GraphicBox, Image, Qrcode, content_bounds, parse};
use crate::error::PreviewError;
use crate::printer::PreviewConfig;
use crate::symbol::{MatrixSymbolGenerator, QrSymbolGenerator};

use canvas::{BLACK, Canvas, WHITE};

/// QR codes are drawn at this fraction of their nominal size.
pub const QR_PREVIEW_SHRINK: f32 = 0.85;

/// Paints documents onto RGBA rasters.
pub struct Compositor {
    generator: Box<dyn MatrixSymbolGenerator>,
    face: TextFace,
    glyph_cache: GlyphCache,
    background: Rgba<u8>,
}

impl Default for Compositor {
    fn default() -> Self {
        Self::new()
    }
}

impl Compositor {
    /// Compositor with the `qrcode` generator, the bitmap face and a white
    /// background.
    pub fn new() -> Self {
        Self::with_generator(Box::new(QrSymbolGenerator::default()))
    }

    /// Compositor using `generator` for matrix symbols.
    pub fn with_generator(generator: Box<dyn MatrixSymbolGenerator>) -> Self {
        Self {
            generator,
            face: TextFace::default(),
            glyph_cache: GlyphCache::new(),
            background: WHITE,
        }
    }

    /// Use `face` for text elements.
    pub fn with_face(mut self, face: TextFace) -> Self {
        self.face = face;
        self
    }

    /// Use `color` (RGBA) for the canvas background.
    pub fn with_background(mut self, color: [u8; 4]) -> Self {
        self.background = Rgba(color);
        self
    }

    /// The matrix symbol generator, for bounds computations that must agree
    /// with what gets painted.
    pub fn generator(&self) -> &dyn MatrixSymbolGenerator {
        self.generator.as_ref()
    }

    /// Paint `document` at full logical resolution.
    ///
    /// Returns `None` without allocating when the viewport has no area or a
    /// side exceeds [`MAX_LABEL_DOTS`].
    pub fn render(&mut self, document: &Document, viewport: &Viewport) -> Option<RgbaImage> {
        if viewport.logical_width == 0 || viewport.logical_height == 0 {
            tracing::warn!(
                width = viewport.logical_width,
                height = viewport.logical_height,
                "Skipping render of empty viewport"
            );
            return None;
        }
        if viewport.logical_width > MAX_LABEL_DOTS || viewport.logical_height > MAX_LABEL_DOTS {
            tracing::warn!(
                width = viewport.logical_width,
                height = viewport.logical_height,
                max = MAX_LABEL_DOTS,
                "Skipping render of oversized viewport"
            );
            return None;
        }

        tracing::debug!(
            elements = document.elements.len(),
            width = viewport.logical_width,
            height = viewport.logical_height,
            offset_x = viewport.offset_x,
            offset_y = viewport.offset_y,
            "Rendering label"
        );

        let mut canvas = Canvas::new(viewport.logical_width, viewport.logical_height);
        canvas.fill_background(self.background);
        canvas.translate(viewport.offset_x, viewport.offset_y);

        for element in &document.elements {
            match element {
                Element::Text(text) => self.render_text(&mut canvas, text),
                Element::Box(graphic) => render_box(&mut canvas, graphic),
                Element::Barcode(barcode) => self.render_barcode(&mut canvas, barcode),
                Element::Qrcode(qr) => self.render_qrcode(&mut canvas, qr),
                Element::Image(image) => render_image(&mut canvas, image),
            }
        }

        Some(canvas.into_image())
    }

    /// Render a QR code: a dark square with the light modules painted white.
    ///
    /// A payload the generator rejects is skipped.
    fn render_qrcode(&self, canvas: &mut Canvas, qr: &Qrcode) {
        let grid = match self.generator.generate(&qr.content) {
            Ok(grid) => grid,
            Err(e) => {
                tracing::warn!(error = %e, x = qr.x, y = qr.y, "Skipping QR code");
                return;
            }
        };

        let modules = grid.module_count();
        if modules == 0 {
            return;
        }

        let nominal = match qr.size.filter(|&s| s > 0) {
            Some(size) => size as f32,
            None => modules as f32 * qr.dot_size as f32,
        };
        let pixel_size = nominal * QR_PREVIEW_SHRINK;
        let cell = pixel_size / modules as f32;
        let (x, y) = (qr.x as f32, qr.y as f32);

        canvas.fill_rect_f(x, y, pixel_size, pixel_size, BLACK);
        for row in 0..modules {
            for col in 0..modules {
                if !grid.is_dark(row, col) {
                    canvas.fill_rect_f(x + col as f32 * cell, y + row as f32 * cell, cell, cell, WHITE);
                }
            }
        }
    }
}

/// Render a box outline, or a single line when one side is zero.
fn render_box(canvas: &mut Canvas, graphic: &GraphicBox) {
    let GraphicBox {
        x,
        y,
        width,
        height,
        border_thickness,
    } = *graphic;

    match (width, height) {
        (0, 0) => {}
        (0, _) => canvas.stroke_vline(x, y, height, border_thickness, BLACK),
        (_, 0) => canvas.stroke_hline(x, y, width, border_thickness, BLACK),
        _ => canvas.stroke_rect(x, y, width, height, border_thickness, BLACK),
    }
}

/// Render raw RGBA pixels; nothing for empty data or a non-positive size.
fn render_image(canvas: &mut Canvas, image: &Image) {
    if image.width <= 0 || image.height <= 0 || image.pixel_data.is_empty() {
        return;
    }
    canvas.blit_rgba(image.x, image.y, image.width as u32, image.height as u32, &image.pixel_data);
}

// ============================================================================
// LABEL PREVIEW
// ============================================================================

/// Result of one preview pass.
#[derive(Debug, Clone)]
pub struct LabelPreview {
    /// The interpreted document.
    pub document: Document,
    /// Geometry the raster was painted with.
    pub viewport: Viewport,
    /// Raster at full logical resolution.
    pub image: RgbaImage,
}

impl LabelPreview {
    /// Encode the logical raster as PNG.
    pub fn to_png(&self) -> Result<Vec<u8>, PreviewError> {
        let mut png_bytes = Vec::new();
        let encoder = image::codecs::png::PngEncoder::new(&mut png_bytes);
        encoder
            .write_image(
                self.image.as_raw(),
                self.image.width(),
                self.image.height(),
                image::ExtendedColorType::Rgba8,
            )
            .map_err(|e: image::ImageError| PreviewError::ImageEncode(e.to_string()))?;

        Ok(png_bytes)
    }

    /// A copy resized to the viewport's display size.
    pub fn display_image(&self) -> RgbaImage {
        let (width, height) = self.viewport.display_size();
        if (width, height) == self.image.dimensions() {
            return self.image.clone();
        }
        imageops::resize(&self.image, width, height, FilterType::Triangle)
    }
}

/// Parse `text` and render it with a default [`Compositor`].
///
/// Returns `None` when the label size is degenerate or larger than
/// [`MAX_LABEL_DOTS`] on either side.
pub fn render_label(text: &str, config: &PreviewConfig) -> Option<LabelPreview> {
    let mut compositor = Compositor::new().with_background(config.background);
    render_label_with(text, config, &mut compositor)
}

/// Parse `text` and render it with `compositor`.
pub fn render_label_with(text: &str, config: &PreviewConfig, compositor: &mut Compositor) -> Option<LabelPreview> {
    let document = parse(text);
    let (width, height) = config.logical_size(text);

    let Some(mut viewport) = Viewport::new(width, height) else {
        tracing::warn!(width, height, max = MAX_LABEL_DOTS, "Degenerate or oversized label size, nothing rendered");
        return None;
    };
    if config.center_content {
        viewport = viewport.centered_on(content_bounds(&document.elements, compositor.generator()));
    }
    viewport = viewport.fit_to(config.max_preview_width, config.max_preview_height);

    let image = compositor.render(&document, &viewport)?;
    Some(LabelPreview {
        document,
        viewport,
        image,
    })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Rotation, Text};
    use crate::symbol::SymbolGrid;

    /// 2×2 grid: dark on the main diagonal.
    struct Diagonal;

    impl MatrixSymbolGenerator for Diagonal {
        fn generate(&self, _content: &str) -> Result<SymbolGrid, PreviewError> {
            SymbolGrid::new(2, vec![true, false, false, true]).ok_or_else(|| PreviewError::Symbol("bad grid".into()))
        }
    }

    struct Failing;

    impl MatrixSymbolGenerator for Failing {
        fn generate(&self, content: &str) -> Result<SymbolGrid, PreviewError> {
            Err(PreviewError::Symbol(format!("cannot encode {}", content)))
        }
    }

    fn viewport(w: u32, h: u32) -> Viewport {
        Viewport::new(f64::from(w), f64::from(h)).unwrap()
    }

    fn doc(elements: Vec<Element>) -> Document {
        Document {
            elements,
            label_width: None,
        }
    }

    fn boxed(x: i32, y: i32, width: i32, height: i32, border_thickness: i32) -> Element {
        Element::Box(GraphicBox {
            x,
            y,
            width,
            height,
            border_thickness,
        })
    }

    fn qr(x: i32, y: i32, dot_size: u32) -> Element {
        Element::Qrcode(Qrcode {
            x,
            y,
            dot_size,
            size: None,
            content: "payload".into(),
        })
    }

    fn black(image: &RgbaImage, x: u32, y: u32) -> bool {
        image.get_pixel(x, y) == &BLACK
    }

    #[test]
    fn test_raster_has_logical_size() {
        let image = Compositor::new().render(&Document::new(), &viewport(120, 80)).unwrap();
        assert_eq!(image.dimensions(), (120, 80));
        assert!(image.pixels().all(|p| *p == WHITE));
    }

    #[test]
    fn test_zero_viewport_renders_nothing() {
        let mut vp = viewport(10, 10);
        vp.logical_width = 0;
        assert!(Compositor::new().render(&Document::new(), &vp).is_none());
    }

    #[test]
    fn test_oversized_viewport_renders_nothing() {
        let mut vp = viewport(10, 10);
        vp.logical_width = MAX_LABEL_DOTS + 1;
        assert!(Compositor::new().render(&Document::new(), &vp).is_none());
    }

    #[test]
    fn test_background_not_shifted_by_offset() {
        let mut vp = viewport(20, 20);
        vp.offset_x = 15;
        let image = Compositor::new()
            .with_background([10, 20, 30, 255])
            .render(&Document::new(), &vp)
            .unwrap();
        assert!(image.pixels().all(|p| p.0 == [10, 20, 30, 255]));
    }

    #[test]
    fn test_offset_translates_elements() {
        let mut vp = viewport(40, 40);
        vp.offset_x = 10;
        let image = Compositor::new()
            .render(&doc(vec![boxed(0, 0, 20, 20, 1)]), &vp)
            .unwrap();
        assert!(black(&image, 10, 0));
        assert!(!black(&image, 0, 0));
    }

    #[test]
    fn test_box_is_outline_only() {
        let image = Compositor::new()
            .render(&doc(vec![boxed(5, 5, 20, 20, 2)]), &viewport(40, 40))
            .unwrap();
        assert!(black(&image, 5, 15));
        assert!(black(&image, 15, 5));
        assert!(!black(&image, 15, 15));
    }

    #[test]
    fn test_rules_along_nonzero_axis() {
        let image = Compositor::new()
            .render(&doc(vec![boxed(0, 10, 30, 0, 3), boxed(20, 0, 0, 30, 1)]), &viewport(40, 40))
            .unwrap();
        // Horizontal rule, 3 dots thick, centered on y=10
        assert!(black(&image, 5, 9) && black(&image, 5, 10) && black(&image, 5, 11));
        assert!(!black(&image, 5, 12));
        // Vertical rule at x=20
        assert!(black(&image, 20, 25));
        assert!(!black(&image, 21, 25));
    }

    #[test]
    fn test_zero_box_draws_nothing() {
        let image = Compositor::new()
            .render(&doc(vec![boxed(5, 5, 0, 0, 4)]), &viewport(20, 20))
            .unwrap();
        assert!(image.pixels().all(|p| *p == WHITE));
    }

    #[test]
    fn test_qr_light_cells_painted_white() {
        let mut compositor = Compositor::with_generator(Box::new(Diagonal));
        // 2 modules × 10 dots × 0.85 = 17 px, cells 8.5 px
        let image = compositor.render(&doc(vec![qr(0, 0, 10)]), &viewport(30, 30)).unwrap();
        assert!(black(&image, 3, 3));
        assert!(!black(&image, 12, 3));
        assert!(!black(&image, 3, 12));
        assert!(black(&image, 12, 12));
        assert!(black(&image, 16, 16));
        assert!(!black(&image, 17, 17));
    }

    #[test]
    fn test_qr_explicit_size() {
        let mut compositor = Compositor::with_generator(Box::new(Diagonal));
        let element = Element::Qrcode(Qrcode {
            x: 0,
            y: 0,
            dot_size: 1,
            size: Some(40),
            content: "x".into(),
        });
        let image = compositor.render(&doc(vec![element]), &viewport(50, 50)).unwrap();
        // 40 × 0.85 = 34
        assert!(black(&image, 33, 33));
        assert!(!black(&image, 34, 34));
    }

    #[test]
    fn test_failed_qr_skipped_others_drawn() {
        let mut compositor = Compositor::with_generator(Box::new(Failing));
        let image = compositor
            .render(&doc(vec![qr(0, 0, 10), boxed(30, 30, 5, 5, 1)]), &viewport(40, 40))
            .unwrap();
        assert!(!black(&image, 3, 3));
        assert!(black(&image, 30, 30));
    }

    #[test]
    fn test_barcode_bars() {
        // 'A' = 1000001 then a gap, 2 dots per module
        let element = Element::Barcode(crate::document::Barcode {
            x: 0,
            y: 0,
            height: 10,
            module_width: 2,
            content: "A".into(),
        });
        let image = Compositor::new().render(&doc(vec![element]), &viewport(20, 20)).unwrap();
        assert!(black(&image, 0, 5) && black(&image, 1, 5));
        assert!(!black(&image, 2, 5));
        assert!(black(&image, 12, 5) && black(&image, 13, 5));
        assert!(!black(&image, 14, 5));
        assert!(!black(&image, 0, 10));
    }

    #[test]
    fn test_image_blit_and_guards() {
        let red = [255, 0, 0, 255];
        let image_el = |width, height, pixel_data: Vec<u8>| {
            Element::Image(Image {
                x: 2,
                y: 2,
                width,
                height,
                pixel_data,
            })
        };

        let image = Compositor::new()
            .render(&doc(vec![image_el(1, 1, red.to_vec())]), &viewport(5, 5))
            .unwrap();
        assert_eq!(image.get_pixel(2, 2).0, red);

        let image = Compositor::new()
            .render(
                &doc(vec![image_el(1, 1, Vec::new()), image_el(0, 1, red.to_vec())]),
                &viewport(5, 5),
            )
            .unwrap();
        assert!(image.pixels().all(|p| *p == WHITE));
    }

    #[test]
    fn test_text_anchored_at_top_left() {
        let element = Element::Text(Text {
            x: 10,
            y: 10,
            font_name: "0".into(),
            font_size: 24,
            rotation: Rotation::Normal,
            content: "HI".into(),
        });
        let image = Compositor::new().render(&doc(vec![element]), &viewport(60, 60)).unwrap();
        let inked: Vec<(u32, u32)> = image
            .enumerate_pixels()
            .filter(|(_, _, p)| p.0[0] < 128)
            .map(|(x, y, _)| (x, y))
            .collect();
        assert!(!inked.is_empty());
        assert!(inked.iter().all(|&(x, y)| (10..34).contains(&x) && (10..34).contains(&y)));
    }

    #[test]
    fn test_rotated_text_goes_up_from_anchor() {
        let element = Element::Text(Text {
            x: 10,
            y: 40,
            font_name: "0".into(),
            font_size: 24,
            rotation: Rotation::Rotated,
            content: "HI".into(),
        });
        let image = Compositor::new().render(&doc(vec![element]), &viewport(60, 60)).unwrap();
        let inked: Vec<(u32, u32)> = image
            .enumerate_pixels()
            .filter(|(_, _, p)| p.0[0] < 128)
            .map(|(x, y, _)| (x, y))
            .collect();
        assert!(!inked.is_empty());
        assert!(inked.iter().all(|&(x, y)| (10..34).contains(&x) && (16..40).contains(&y)));
    }

    #[test]
    fn test_render_label_centers_by_default() {
        let config = PreviewConfig {
            unit: crate::printer::Unit::Dots,
            label_width: Some(100.0),
            label_height: Some(50.0),
            ..Default::default()
        };
        let text = "^XA^FO0,0^GB20,10,1^FS^XZ";
        let preview = render_label(text, &config).unwrap();
        assert_eq!(preview.viewport.offset_x, 40);
        assert!(black(&preview.image, 40, 0));

        let literal = PreviewConfig {
            center_content: false,
            ..config
        };
        let preview = render_label(text, &literal).unwrap();
        assert_eq!(preview.viewport.offset_x, 0);
        assert!(black(&preview.image, 0, 0));
    }

    #[test]
    fn test_render_label_degenerate_size() {
        let config = PreviewConfig {
            label_width: Some(0.0),
            label_height: Some(10.0),
            ..Default::default()
        };
        assert!(render_label("^XA^XZ", &config).is_none());
    }

    #[test]
    fn test_render_label_oversized_print_width() {
        let text = "^XA^PW2000000000^FO0,0^GB1,1,1^FS^XZ";
        assert!(render_label(text, &PreviewConfig::default()).is_none());
    }

    #[test]
    fn test_huge_font_only_paints_canvas() {
        let element = Element::Text(Text {
            x: -5,
            y: -5,
            font_name: "0".into(),
            font_size: u32::MAX,
            rotation: Rotation::Inverted,
            content: "\u{E000}".into(),
        });
        // Inverted anchor at (-5, -5) puts the whole line off the top-left
        let image = Compositor::new().render(&doc(vec![element]), &viewport(30, 30)).unwrap();
        assert!(image.pixels().all(|p| *p == WHITE));

        let element = Element::Text(Text {
            x: 0,
            y: 0,
            font_name: "0".into(),
            font_size: u32::MAX,
            rotation: Rotation::Normal,
            content: "\u{E000}".into(),
        });
        // Missing glyph box: its inset edges at row 1 and column 1
        let image = Compositor::new().render(&doc(vec![element]), &viewport(30, 30)).unwrap();
        assert!(black(&image, 5, 1));
        assert!(black(&image, 1, 5));
        assert!(!black(&image, 5, 5));
    }

    #[test]
    fn test_display_image_downscaled() {
        let config = PreviewConfig {
            unit: crate::printer::Unit::Dots,
            label_width: Some(1200.0),
            label_height: Some(900.0),
            ..Default::default()
        };
        let preview = render_label("^XA^XZ", &config).unwrap();
        assert_eq!(preview.image.dimensions(), (1200, 900));
        assert_eq!(preview.display_image().dimensions(), (600, 450));
    }

    #[test]
    fn test_png_signature() {
        let preview = render_label("^XA^FO0,0^GB10,10,1^FS^XZ", &PreviewConfig::default()).unwrap();
        let png = preview.to_png().unwrap();
        assert_eq!(&png[..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
    }
}
