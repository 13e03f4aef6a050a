//! Schematic linear barcode pattern.
//!
//! This is a visual stand-in, not a standards-compliant symbology: every
//! character contributes the binary digits of its code point (`1` = bar,
//! `0` = space) followed by one space module.
//!
//! ```text
//! 'A' = 65 = 1000001  →  █·····█·
//! ```

/// Bits per character assumed when fitting a barcode to the preview.
pub const ESTIMATED_BITS_PER_CHAR: usize = 8;

/// Widest a barcode is allowed to render, in dots.
pub const MAX_BARCODE_WIDTH: u32 = 560;

/// Module sequence for `content`, `true` = bar.
pub fn modules(content: &str) -> Vec<bool> {
    let mut out = Vec::with_capacity(content.len() * (ESTIMATED_BITS_PER_CHAR + 1));
    for ch in content.chars() {
        let code = ch as u32;
        let bits = bit_length(code);
        for i in (0..bits).rev() {
            out.push((code >> i) & 1 == 1);
        }
        out.push(false);
    }
    out
}

/// Number of modules [`modules`] produces, without allocating.
pub fn module_count(content: &str) -> usize {
    content.chars().map(|ch| bit_length(ch as u32) as usize + 1).sum()
}

/// Module width after shrinking to fit [`MAX_BARCODE_WIDTH`].
///
/// Uses the coarse [`ESTIMATED_BITS_PER_CHAR`] estimate; never below 1.
pub fn fitted_module_width(content: &str, module_width: u32) -> u32 {
    let estimated_bits = (ESTIMATED_BITS_PER_CHAR * content.chars().count()) as u64;
    let module_width = module_width.max(1);
    if estimated_bits * u64::from(module_width) > u64::from(MAX_BARCODE_WIDTH) {
        (u64::from(MAX_BARCODE_WIDTH) / estimated_bits).max(1) as u32
    } else {
        module_width
    }
}

/// Binary digit count of `code`; zero still has one digit.
fn bit_length(code: u32) -> u32 {
    (u32::BITS - code.leading_zeros()).max(1)
}
