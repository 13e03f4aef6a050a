//! QR symbol generation backed by the `qrcode` crate.

use qrcode::{Color, EcLevel, QrCode};

use super::{MatrixSymbolGenerator, SymbolGrid};
use crate::error::PreviewError;

/// QR error correction level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QrErrorLevel {
    /// ~7% recovery
    #[default]
    L,
    /// ~15% recovery
    M,
    /// ~25% recovery
    Q,
    /// ~30% recovery
    H,
}

impl From<QrErrorLevel> for EcLevel {
    fn from(level: QrErrorLevel) -> Self {
        match level {
            QrErrorLevel::L => EcLevel::L,
            QrErrorLevel::M => EcLevel::M,
            QrErrorLevel::Q => EcLevel::Q,
            QrErrorLevel::H => EcLevel::H,
        }
    }
}

/// Generates QR symbols with the smallest version that fits the content.
#[derive(Debug, Clone, Copy, Default)]
pub struct QrSymbolGenerator {
    pub error_level: QrErrorLevel,
}

impl QrSymbolGenerator {
    pub fn new(error_level: QrErrorLevel) -> Self {
        Self { error_level }
    }
}

impl MatrixSymbolGenerator for QrSymbolGenerator {
    fn generate(&self, content: &str) -> Result<SymbolGrid, PreviewError> {
        let code = QrCode::with_error_correction_level(content, self.error_level.into())
            .map_err(|e| PreviewError::Symbol(format!("QR code generation failed: {}", e)))?;

        let modules = code
            .to_colors()
            .into_iter()
            .map(|color| color == Color::Dark)
            .collect();

        SymbolGrid::new(code.width(), modules)
            .ok_or_else(|| PreviewError::Symbol("QR module grid is not square".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_payload_is_version_1() {
        let grid = QrSymbolGenerator::default().generate("HELLO").unwrap();
        assert_eq!(grid.module_count(), 21);
    }

    #[test]
    fn test_deterministic() {
        let generator = QrSymbolGenerator::default();
        let a = generator.generate("SF3293304552812").unwrap();
        let b = generator.generate("SF3293304552812").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_higher_level_needs_more_modules() {
        let payload = "https://example.com/track/SF3293304552812";
        let low = QrSymbolGenerator::new(QrErrorLevel::L).generate(payload).unwrap();
        let high = QrSymbolGenerator::new(QrErrorLevel::H).generate(payload).unwrap();
        assert!(high.module_count() >= low.module_count());
    }

    #[test]
    fn test_oversized_payload_fails() {
        let payload = "x".repeat(8000);
        let result = QrSymbolGenerator::default().generate(&payload);
        assert!(matches!(result, Err(PreviewError::Symbol(_))));
    }
}
