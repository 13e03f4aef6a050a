//! # Matrix Symbol Generation
//!
//! The compositor and the bounds computation never encode QR symbols
//! themselves; they ask a [`MatrixSymbolGenerator`] for a square module grid.
//! The default implementation, [`QrSymbolGenerator`], is backed by the
//! `qrcode` crate. Tests substitute a stub grid.
//!
//! Linear barcodes use the schematic pattern in [`linear`].
//!
//! ```
//! use zpl_preview::symbol::{MatrixSymbolGenerator, QrSymbolGenerator};
//!
//! let grid = QrSymbolGenerator::default().generate("HELLO").unwrap();
//! assert_eq!(grid.module_count(), 21);
//! assert!(grid.is_dark(0, 0)); // finder pattern corner
//! ```

pub mod linear;
pub mod qr;

pub use qr::{QrErrorLevel, QrSymbolGenerator};

use crate::error::PreviewError;

/// A square grid of dark/light modules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolGrid {
    module_count: usize,
    /// Row-major, `true` = dark.
    modules: Vec<bool>,
}

impl SymbolGrid {
    /// Build a grid from row-major modules.
    ///
    /// Returns `None` unless `modules.len() == module_count²`.
    pub fn new(module_count: usize, modules: Vec<bool>) -> Option<Self> {
        (module_count.checked_mul(module_count)? == modules.len()).then_some(Self {
            module_count,
            modules,
        })
    }

    /// Side length in modules.
    pub fn module_count(&self) -> usize {
        self.module_count
    }

    /// Whether the module at (`row`, `col`) is dark. Out of range is light.
    pub fn is_dark(&self, row: usize, col: usize) -> bool {
        if row >= self.module_count || col >= self.module_count {
            return false;
        }
        self.modules[row * self.module_count + col]
    }
}

/// Capability that turns content into a matrix symbol.
///
/// Implementations must be deterministic: identical content yields an
/// identical grid.
pub trait MatrixSymbolGenerator {
    /// Encode `content` as a module grid.
    fn generate(&self, content: &str) -> Result<SymbolGrid, PreviewError>;
}
