//! Viewport: logical canvas size, paint offset and display scale.
//!
//! A viewport is derived per render pass and never stored.
//!
//! ```text
//! logical size (dots) ──► paint offset (centering) ──► display scale (fit)
//! ```
//!
//! The display scale only affects the on-screen size. The raster is always
//! painted at full logical resolution.

use serde::Serialize;

use crate::document::Bounds;

/// Largest canvas side, in dots.
///
/// About 4 m at 203 dpi; anything larger is refused rather than allocated.
pub const MAX_LABEL_DOTS: u32 = 32_767;

/// Render geometry for one pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Viewport {
    /// Canvas width in dots.
    pub logical_width: u32,
    /// Canvas height in dots.
    pub logical_height: u32,
    /// Horizontal paint translation in dots.
    pub offset_x: i32,
    /// Vertical paint translation in dots.
    pub offset_y: i32,
    /// On-screen scale factor, in `(0, 1]`.
    pub display_scale: f64,
}

impl Viewport {
    /// Viewport for a canvas of `width` × `height` dots.
    ///
    /// Returns `None` for non-finite, zero or negative sizes, for sizes that
    /// round to zero dots, and for sides above [`MAX_LABEL_DOTS`].
    pub fn new(width: f64, height: f64) -> Option<Self> {
        let logical_width = whole_dots(width)?;
        let logical_height = whole_dots(height)?;
        Some(Self {
            logical_width,
            logical_height,
            offset_x: 0,
            offset_y: 0,
            display_scale: 1.0,
        })
    }

    /// Horizontally center `content` when it is narrower than the canvas.
    ///
    /// Wider content is left at its declared coordinates.
    pub fn centered_on(mut self, content: Option<Bounds>) -> Self {
        if let Some(bounds) = content {
            let logical = i64::from(self.logical_width);
            let content_width = bounds.width();
            if content_width < logical {
                let offset = (logical - content_width) / 2 - i64::from(bounds.min_x);
                self.offset_x = offset.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32;
            }
        }
        self
    }

    /// Scale the display down to fit `max_width` × `max_height`.
    ///
    /// Never scales up.
    pub fn fit_to(mut self, max_width: u32, max_height: u32) -> Self {
        let sx = f64::from(max_width) / f64::from(self.logical_width);
        let sy = f64::from(max_height) / f64::from(self.logical_height);
        let scale = sx.min(sy).min(1.0);
        self.display_scale = if scale > 0.0 { scale } else { 1.0 };
        self
    }

    /// Displayed size in pixels, at least 1×1.
    pub fn display_size(&self) -> (u32, u32) {
        let scale = |v: u32| ((f64::from(v) * self.display_scale).round() as u32).max(1);
        (scale(self.logical_width), scale(self.logical_height))
    }
}

fn whole_dots(value: f64) -> Option<u32> {
    if !value.is_finite() || value <= 0.0 {
        return None;
    }
    let rounded = value.round();
    (rounded >= 1.0 && rounded <= f64::from(MAX_LABEL_DOTS)).then_some(rounded as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degenerate_sizes_rejected() {
        assert!(Viewport::new(0.0, 100.0).is_none());
        assert!(Viewport::new(100.0, -1.0).is_none());
        assert!(Viewport::new(f64::NAN, 100.0).is_none());
        assert!(Viewport::new(100.0, f64::INFINITY).is_none());
        assert!(Viewport::new(0.3, 100.0).is_none());
    }

    #[test]
    fn test_oversized_canvas_rejected() {
        assert!(Viewport::new(32_768.0, 10.0).is_none());
        assert!(Viewport::new(10.0, 2_000_000_000.0).is_none());
        let vp = Viewport::new(32_767.0, 10.0).unwrap();
        assert_eq!(vp.logical_width, MAX_LABEL_DOTS);
    }

    #[test]
    fn test_rounds_to_whole_dots() {
        let vp = Viewport::new(607.4, 1038.98).unwrap();
        assert_eq!((vp.logical_width, vp.logical_height), (607, 1039));
    }

    #[test]
    fn test_centering_narrow_content() {
        let bounds = Bounds {
            min_x: 50,
            min_y: 0,
            max_x: 250,
            max_y: 100,
        };
        let vp = Viewport::new(600.0, 400.0).unwrap().centered_on(Some(bounds));
        // Content should land at 200..400
        assert_eq!(vp.offset_x, 150);
        assert_eq!(vp.offset_y, 0);
    }

    #[test]
    fn test_wide_content_not_moved() {
        let bounds = Bounds {
            min_x: 0,
            min_y: 0,
            max_x: 700,
            max_y: 100,
        };
        let vp = Viewport::new(600.0, 400.0).unwrap().centered_on(Some(bounds));
        assert_eq!(vp.offset_x, 0);
        let vp = Viewport::new(600.0, 400.0).unwrap().centered_on(None);
        assert_eq!(vp.offset_x, 0);
    }

    #[test]
    fn test_fit_scales_down_only() {
        let vp = Viewport::new(1200.0, 1800.0).unwrap().fit_to(600, 900);
        assert!((vp.display_scale - 0.5).abs() < 1e-12);
        assert_eq!(vp.display_size(), (600, 900));

        let vp = Viewport::new(100.0, 100.0).unwrap().fit_to(600, 900);
        assert_eq!(vp.display_scale, 1.0);
        assert_eq!(vp.display_size(), (100, 100));
    }

    #[test]
    fn test_fit_uses_tighter_axis() {
        let vp = Viewport::new(1000.0, 1000.0).unwrap().fit_to(500, 250);
        assert!((vp.display_scale - 0.25).abs() < 1e-12);
        // Logical size untouched
        assert_eq!(vp.logical_width, 1000);
    }
}
