//! Element types for the label document model.
//!
//! All types derive `Serialize` so a headless host can dump the document
//! model as JSON. Coordinates are logical dots with the label-home offset
//! already applied.

use serde::Serialize;

/// Field orientation.
///
/// Rendering rotates clockwise-positive around the field origin:
///
/// | Code | Variant    | Angle |
/// |------|------------|-------|
/// | `N`  | `Normal`   | 0°    |
/// | `R`  | `Rotated`  | −90°  |
/// | `I`  | `Inverted` | 180°  |
/// | `B`  | `BottomUp` | +90°  |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rotation {
    #[default]
    Normal,
    Rotated,
    Inverted,
    BottomUp,
}

impl Rotation {
    /// Parse an orientation code. Unknown codes are `None`.
    pub fn from_code(code: char) -> Option<Self> {
        match code.to_ascii_uppercase() {
            'N' => Some(Self::Normal),
            'R' => Some(Self::Rotated),
            'I' => Some(Self::Inverted),
            'B' => Some(Self::BottomUp),
            _ => None,
        }
    }

    /// Rotation angle in degrees, clockwise-positive.
    pub fn degrees(self) -> i32 {
        match self {
            Self::Normal => 0,
            Self::Rotated => -90,
            Self::Inverted => 180,
            Self::BottomUp => 90,
        }
    }
}

/// A text field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Text {
    pub x: i32,
    pub y: i32,
    pub font_name: String,
    /// Character height in dots.
    pub font_size: u32,
    pub rotation: Rotation,
    pub content: String,
}

/// A box outline, or a rule when exactly one of `width`/`height` is zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphicBox {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub border_thickness: i32,
}

impl GraphicBox {
    /// Whether this box is drawn as a single line.
    pub fn is_rule(&self) -> bool {
        (self.width == 0) != (self.height == 0)
    }
}

/// A linear barcode.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Barcode {
    pub x: i32,
    pub y: i32,
    /// Bar height in dots.
    pub height: u32,
    /// Narrowest bar width in dots.
    pub module_width: u32,
    pub content: String,
}

/// A matrix (QR) code.
///
/// Pixel size is derived at render time from the module grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Qrcode {
    pub x: i32,
    pub y: i32,
    /// Dots per module.
    pub dot_size: u32,
    /// Explicit side length in dots, overriding `module_count * dot_size`.
    pub size: Option<u32>,
    /// Payload with any mode prefix already stripped.
    pub content: String,
}

/// A bitmap image.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Image {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    /// Raw RGBA, row-major. Empty means nothing is painted.
    #[serde(skip)]
    pub pixel_data: Vec<u8>,
}

/// One drawing primitive of the document model.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Element {
    Text(Text),
    Box(GraphicBox),
    Barcode(Barcode),
    Qrcode(Qrcode),
    Image(Image),
}

impl Element {
    /// Origin of the element in logical dots.
    pub fn origin(&self) -> (i32, i32) {
        match self {
            Element::Text(t) => (t.x, t.y),
            Element::Box(b) => (b.x, b.y),
            Element::Barcode(b) => (b.x, b.y),
            Element::Qrcode(q) => (q.x, q.y),
            Element::Image(i) => (i.x, i.y),
        }
    }

    /// Short display label (for logs).
    pub fn kind(&self) -> &'static str {
        match self {
            Element::Text(_) => "text",
            Element::Box(_) => "box",
            Element::Barcode(_) => "barcode",
            Element::Qrcode(_) => "qrcode",
            Element::Image(_) => "image",
        }
    }
}
