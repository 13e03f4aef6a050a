//! # Directive Interpreter
//!
//! Folds the directive stream into a [`Document`]. Every directive is applied
//! to an [`InterpreterState`] owned by the fold; each step returns the updated
//! state and at most one emitted element.
//!
//! ```text
//! tokens ──► step(state, token) ──► (state', Option<Element>) ──► ...
//! ```
//!
//! ## Supported directives
//!
//! | Directive | Effect |
//! |-----------|--------|
//! | `^LH x,y` | label origin offset |
//! | `^FO x,y` | field origin (cursor), offset by label origin |
//! | `^PW w`   | declared label width |
//! | `^A<f>o,h,w` | orientation and font height |
//! | `^CFf,h`  | default font height |
//! | `^BYw,r,h` | barcode module width and height |
//! | `^BCo,h,...` | arm a linear barcode |
//! | `^BQo,m,s` | arm a QR code with magnification |
//! | `^GBw,h,t` | box or rule, emitted immediately |
//! | `^GFa,b,c,d,data` | image, emitted immediately |
//! | `^FD...`  | field data |
//! | `^FS`     | field separator, commits the field |
//!
//! Anything else (`^CI`, `^MM`, `^CW`, ...) is skipped.

use std::sync::OnceLock;

use regex::Regex;

use super::Document;
use super::types::{Barcode, Element, GraphicBox, Image, Qrcode, Rotation, Text};
use crate::protocol::{Args, Token, tokenize};

/// Font face name attached to every text element.
pub const DEFAULT_FONT_NAME: &str = "sans-serif";
/// Font height before any `^A`/`^CF`.
pub const DEFAULT_FONT_SIZE: u32 = 16;
/// Barcode module width before any `^BY`.
pub const DEFAULT_MODULE_WIDTH: u32 = 2;
/// Barcode height before any `^BY`.
pub const DEFAULT_BAR_HEIGHT: u32 = 80;
/// QR magnification before/without a valid `^BQ` value.
pub const DEFAULT_QR_MAGNIFICATION: u32 = 4;
/// Image size used when a `^GF` header cannot be read.
pub const DEFAULT_IMAGE_SIZE: i32 = 80;

// ============================================================================
// DIRECTIVES
// ============================================================================

/// Directive families the interpreter acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Directive {
    LabelHome,
    FieldOrigin,
    PrintWidth,
    FontSelect,
    DefaultFont,
    BarcodeDefaults,
    Code128,
    QrCode,
    GraphicBox,
    GraphicField,
    FieldData,
    FieldSeparator,
    Ignored,
}

impl Directive {
    fn from_code(code: &str) -> Self {
        match code {
            "LH" => Self::LabelHome,
            "FO" => Self::FieldOrigin,
            "PW" => Self::PrintWidth,
            "CF" => Self::DefaultFont,
            "BY" => Self::BarcodeDefaults,
            "BC" => Self::Code128,
            "BQ" => Self::QrCode,
            "GB" => Self::GraphicBox,
            "GF" => Self::GraphicField,
            "FD" => Self::FieldData,
            "FS" => Self::FieldSeparator,
            // ^A@, ^A0, ^AA ... : the font designator is the second character
            c if c.starts_with('A') => Self::FontSelect,
            _ => Self::Ignored,
        }
    }
}

// ============================================================================
// STATE
// ============================================================================

/// `^GF` header fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphicHeader {
    /// Total bitmap bytes.
    pub total_bytes: i32,
    /// Bytes per bitmap row.
    pub bytes_per_row: i32,
}

impl GraphicHeader {
    fn parse(args: &Args<'_>) -> Self {
        Self {
            total_bytes: args
                .first_present(&[1, 2])
                .and_then(crate::protocol::parse_int)
                .unwrap_or(0),
            bytes_per_row: args.int(3).unwrap_or(0),
        }
    }

    /// Image width in dots (8 per byte).
    pub fn width(&self) -> i32 {
        if self.bytes_per_row > 0 {
            self.bytes_per_row.saturating_mul(8)
        } else {
            DEFAULT_IMAGE_SIZE
        }
    }

    /// Image height in rows, rounded up.
    pub fn height(&self) -> i32 {
        if self.bytes_per_row > 0 && self.total_bytes > 0 {
            let total = i64::from(self.total_bytes);
            let per_row = i64::from(self.bytes_per_row);
            ((total + per_row - 1) / per_row).clamp(1, i64::from(i32::MAX)) as i32
        } else {
            DEFAULT_IMAGE_SIZE
        }
    }
}

/// A multi-token primitive waiting for its field separator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PendingConstruct {
    #[default]
    None,
    Barcode,
    Qrcode,
    Image { header: GraphicHeader },
}

/// Interpreter state, local to one parse.
#[derive(Debug, Clone, PartialEq)]
pub struct InterpreterState {
    pub label_origin: (i32, i32),
    pub cursor: (i32, i32),
    pub font_name: &'static str,
    pub font_size: u32,
    pub rotation: Rotation,
    pub module_width: u32,
    pub bar_height: u32,
    pub qr_magnification: u32,
    pub label_width: Option<u32>,
    pub pending: PendingConstruct,
    pub field_data: Option<String>,
}

impl Default for InterpreterState {
    fn default() -> Self {
        Self {
            label_origin: (0, 0),
            cursor: (0, 0),
            font_name: DEFAULT_FONT_NAME,
            font_size: DEFAULT_FONT_SIZE,
            rotation: Rotation::Normal,
            module_width: DEFAULT_MODULE_WIDTH,
            bar_height: DEFAULT_BAR_HEIGHT,
            qr_magnification: DEFAULT_QR_MAGNIFICATION,
            label_width: None,
            pending: PendingConstruct::None,
            field_data: None,
        }
    }
}

/// Positive value of a parsed field, if any.
fn positive(value: Option<i32>) -> Option<u32> {
    value.filter(|&v| v > 0).map(|v| v as u32)
}

// ============================================================================
// INTERPRETER
// ============================================================================

/// Parse label text into a document model.
///
/// Never fails; the worst case is an empty document.
pub fn parse(text: &str) -> Document {
    interpret(&tokenize(text))
}

/// Fold a token sequence into a document model.
pub fn interpret(tokens: &[Token<'_>]) -> Document {
    let (state, elements) = tokens.iter().fold(
        (InterpreterState::default(), Vec::new()),
        |(state, mut elements), token| {
            let (state, emitted) = step(state, token);
            elements.extend(emitted);
            (state, elements)
        },
    );

    if state.pending != PendingConstruct::None || state.field_data.is_some() {
        tracing::debug!(pending = ?state.pending, "discarding unterminated field at end of input");
    }
    tracing::trace!(tokens = tokens.len(), elements = elements.len(), "interpreted label");

    Document {
        elements,
        label_width: state.label_width,
    }
}

/// Apply one directive.
pub fn step(mut state: InterpreterState, token: &Token<'_>) -> (InterpreterState, Option<Element>) {
    let args = Args::new(token.args);

    match Directive::from_code(token.code) {
        Directive::LabelHome => {
            state.label_origin = (args.int(0).unwrap_or(0), args.int(1).unwrap_or(0));
        }

        Directive::FieldOrigin => {
            let (ox, oy) = state.label_origin;
            state.cursor = (
                args.int(0).unwrap_or(0).saturating_add(ox),
                args.int(1).unwrap_or(0).saturating_add(oy),
            );
        }

        Directive::PrintWidth => {
            if let Some(width) = positive(args.int(0)) {
                state.label_width = Some(width);
            }
        }

        Directive::FontSelect => {
            state.rotation = args
                .first_char(0)
                .and_then(Rotation::from_code)
                .unwrap_or_default();
            if let Some(size) = positive(args.int(1)) {
                state.font_size = size;
            }
            state.font_name = DEFAULT_FONT_NAME;
        }

        Directive::DefaultFont => {
            if let Some(size) = positive(args.int(1)) {
                state.font_size = size;
            }
        }

        Directive::BarcodeDefaults => {
            if let Some(width) = positive(args.int(0)) {
                state.module_width = width;
            }
            let height = args
                .first_present(&[2, 1])
                .and_then(crate::protocol::parse_int);
            if let Some(height) = positive(height) {
                state.bar_height = height;
            }
        }

        Directive::Code128 => {
            if let Some(rotation) = args.first_char(0).and_then(Rotation::from_code) {
                state.rotation = rotation;
            }
            if let Some(height) = positive(args.int(1)) {
                state.bar_height = height;
            }
            state.pending = PendingConstruct::Barcode;
        }

        Directive::QrCode => {
            let magnification = args
                .first_present(&[2, 1])
                .and_then(crate::protocol::parse_int);
            state.qr_magnification = positive(magnification).unwrap_or(DEFAULT_QR_MAGNIFICATION);
            state.pending = PendingConstruct::Qrcode;
        }

        Directive::GraphicBox => {
            let (x, y) = state.cursor;
            let element = Element::Box(GraphicBox {
                x,
                y,
                width: args.int(0).unwrap_or(0),
                height: args.int(1).unwrap_or(0),
                border_thickness: args.int(2).unwrap_or(1),
            });
            return (state, Some(element));
        }

        Directive::GraphicField => {
            let header = GraphicHeader::parse(&args);
            let (x, y) = state.cursor;
            let element = Element::Image(Image {
                x,
                y,
                width: header.width(),
                height: header.height(),
                pixel_data: Vec::new(),
            });
            state.pending = PendingConstruct::Image { header };
            return (state, Some(element));
        }

        Directive::FieldData => {
            state.field_data = Some(token.args.to_string());
        }

        Directive::FieldSeparator => {
            let pending = std::mem::take(&mut state.pending);
            let element = state
                .field_data
                .take()
                .map(|content| commit_field(&state, pending, content));
            return (state, element);
        }

        Directive::Ignored => {
            tracing::debug!(code = token.code, "skipping unsupported directive");
        }
    }

    (state, None)
}

/// Build the element a field separator commits.
fn commit_field(state: &InterpreterState, pending: PendingConstruct, content: String) -> Element {
    let (x, y) = state.cursor;
    match pending {
        PendingConstruct::Barcode => Element::Barcode(Barcode {
            x,
            y,
            height: state.bar_height,
            module_width: state.module_width,
            content,
        }),
        PendingConstruct::Qrcode => Element::Qrcode(Qrcode {
            x,
            y,
            dot_size: state.qr_magnification,
            size: None,
            content: strip_qr_prefix(&content).to_string(),
        }),
        PendingConstruct::None | PendingConstruct::Image { .. } => Element::Text(Text {
            x,
            y,
            font_name: state.font_name.to_string(),
            font_size: state.font_size,
            rotation: state.rotation,
            content,
        }),
    }
}

// ============================================================================
// QR PAYLOAD
// ============================================================================

/// `D03040C,LA,` style structured-append header, with optional mode pair.
fn structured_prefix() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)^[A-Za-z][0-9]+[A-Za-z]*,(?:[A-Za-z]+,)?(.*)$")
            .expect("Invalid structured QR prefix pattern")
    })
}

/// `LA,` / `QA,` style mode prefix.
fn mode_prefix() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)^[A-Za-z]{1,2},(.*)$").expect("Invalid QR mode prefix pattern")
    })
}

/// Strip a leading QR mode indicator from field data.
///
/// Best-effort: a payload that happens to look like a prefix (`A1,xyz`)
/// loses it.
pub fn strip_qr_prefix(content: &str) -> &str {
    [structured_prefix(), mode_prefix()]
        .into_iter()
        .find_map(|re| re.captures(content))
        .and_then(|caps| caps.get(1))
        .map_or(content, |m| m.as_str())
}
