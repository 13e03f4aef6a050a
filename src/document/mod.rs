//! # Label Document Model
//!
//! The document model is the only contract between the interpreter and the
//! compositor: an ordered list of positioned drawing primitives. Emission
//! order is paint order; later elements paint over earlier ones.
//!
//! ```
//! use zpl_preview::document::{self, Element};
//!
//! let doc = document::parse("^XA^FO15,296^GB553,0,1,B^FS^XZ");
//! assert_eq!(doc.elements.len(), 1);
//! assert!(matches!(doc.elements[0], Element::Box(_)));
//!
//! let dims = document::resolve_dimensions("^XA^FO15,296^GB553,0,1,B^FS^XZ");
//! assert_eq!(dims.width, 568);
//! ```
//!
//! ## Modules
//!
//! - [`types`]: Element variants
//! - [`interpret`]: Directive interpreter (tokens → document)
//! - [`bounds`]: Element extents and content bounds
//! - [`resolve`]: Label dimension resolution

pub mod bounds;
pub mod interpret;
pub mod resolve;
pub mod types;

pub use bounds::{Bounds, content_bounds};
pub use interpret::{InterpreterState, PendingConstruct, interpret, parse};
pub use resolve::{LabelDimensions, resolve_dimensions, resolve_dimensions_with};
pub use types::*;

use serde::Serialize;

use crate::error::PreviewError;

/// A parsed label.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Document {
    /// Drawing primitives in paint order.
    pub elements: Vec<Element>,
    /// Declared label width (`^PW`), if positive.
    pub label_width: Option<u32>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether nothing would be painted.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Serialize the document model as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, PreviewError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_dump() {
        let doc = parse("^XA^PW596^FO1,2^A@N,20,20^FDhi^FS^XZ");
        let json: serde_json::Value = serde_json::from_str(&doc.to_json().unwrap()).unwrap();
        assert_eq!(json["label_width"], 596);
        assert_eq!(json["elements"][0]["type"], "text");
        assert_eq!(json["elements"][0]["content"], "hi");
    }

    #[test]
    fn test_empty_document() {
        assert!(parse("^XA^XZ").is_empty());
        assert!(Document::new().is_empty());
    }
}
