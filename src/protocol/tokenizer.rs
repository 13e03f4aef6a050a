//! Directive tokenizer.
//!
//! Splits raw label text into `^`-prefixed directives. The tokenizer never
//! fails: malformed or truncated fragments are dropped and the rest of the
//! stream is kept.
//!
//! ```text
//! "^XA^FO15,296^GB553,0,1^FS^XZ"
//!        ↓ trim to label body
//! "^FO15,296^GB553,0,1^FS"
//!        ↓ split on '^'
//! [FO "15,296"] [GB "553,0,1"] [FS ""]
//! ```

use super::{DIRECTIVE_PREFIX, END_OF_LABEL, START_OF_LABEL};

/// A single directive borrowed from the source text.
///
/// `code` is always exactly two characters. `args` is the raw remainder of
/// the directive, with surrounding whitespace removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    /// Two-character directive identifier (e.g. `FO`, `A@`).
    pub code: &'a str,
    /// Unparsed argument string.
    pub args: &'a str,
}

/// Restrict the input to the span between the first start-of-label marker
/// and the last end-of-label marker.
///
/// If either marker is missing, or they are out of order, the whole input is
/// the body.
pub fn label_body(input: &str) -> &str {
    let start = input.find(START_OF_LABEL);
    let end = input.rfind(END_OF_LABEL);

    match (start, end) {
        (Some(start), Some(end)) if end > start => &input[start + START_OF_LABEL.len()..end],
        _ => input,
    }
}

/// Tokenize label text into directives.
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    label_body(input)
        .split(DIRECTIVE_PREFIX)
        .filter_map(|fragment| {
            let fragment = fragment.trim();
            if fragment.is_empty() {
                return None;
            }
            let token = split_directive(fragment);
            if token.is_none() {
                tracing::debug!(fragment, "dropping truncated directive");
            }
            token
        })
        .collect()
}

/// Split a trimmed fragment into its two-character code and arguments.
fn split_directive(fragment: &str) -> Option<Token<'_>> {
    // Byte offset just past the second character; code points may be
    // multi-byte, so walk chars rather than slicing at 2.
    let mut indices = fragment.char_indices().skip(1);
    let (second, ch) = indices.next()?;
    let split_at = second + ch.len_utf8();

    Some(Token {
        code: &fragment[..split_at],
        args: &fragment[split_at..],
    })
}
