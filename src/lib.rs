//! # zpl-preview - Label Command Interpreter and Preview Renderer
//!
//! zpl-preview turns ZPL label command text into a document model of
//! positioned drawing primitives and paints that model onto a raster preview.
//! It provides:
//!
//! - **Tokenizer**: `^`-prefixed directives split into code + arguments
//! - **Interpreter**: a fold over tokens tracking origin, font and pending
//!   barcode/QR/image fields
//! - **Dimension resolver**: logical label size from `^PW` and content extents
//! - **Units**: millimeters, centimeters, inches ↔ device dots
//! - **Compositor**: text, rules/boxes, schematic barcodes, QR codes and
//!   bitmaps on an RGBA canvas, with optional centering and fit-to-preview
//!
//! ## Quick Start
//!
//! ```
//! use zpl_preview::{PreviewConfig, parse, render_label};
//!
//! let label = "^XA^FO50,50^A0N,30,30^FDShip to^FS^FO50,100^GB400,0,2^FS^XZ";
//!
//! let document = parse(label);
//! assert_eq!(document.elements.len(), 2);
//!
//! let preview = render_label(label, &PreviewConfig::default()).unwrap();
//! let png = preview.to_png()?;
//! assert!(!png.is_empty());
//!
//! # Ok::<(), zpl_preview::PreviewError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`protocol`] | Directive tokenizer and argument parsing |
//! | [`document`] | Document model, interpreter, bounds and label size |
//! | [`symbol`] | Matrix symbol generation and the schematic barcode pattern |
//! | [`printer`] | Density, units and preview configuration |
//! | [`preview`] | Raster compositor |
//! | [`error`] | Error types |

pub mod document;
pub mod error;
pub mod preview;
pub mod printer;
pub mod protocol;
pub mod symbol;

// Re-exports for convenience
pub use document::{Document, Element, LabelDimensions, parse, resolve_dimensions};
pub use error::PreviewError;
pub use preview::{Compositor, LabelPreview, Viewport, render_label};
pub use printer::{Density, PreviewConfig, Unit};
