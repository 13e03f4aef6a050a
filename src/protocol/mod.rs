//! # Command Language
//!
//! Lexical layer for the ZPL label language: a flat stream of `^`-prefixed
//! directives, each a two-character code followed by comma-separated
//! arguments.
//!
//! ## Modules
//!
//! - [`tokenizer`]: Label body extraction and directive splitting
//! - [`args`]: Best-effort numeric argument parsing
//!
//! ## Example
//!
//! ```
//! use zpl_preview::protocol::tokenize;
//!
//! let tokens = tokenize("^XA^FO10,20^FDHello^FS^XZ");
//! assert_eq!(tokens.len(), 3);
//! assert_eq!(tokens[0].code, "FO");
//! assert_eq!(tokens[0].args, "10,20");
//! ```

pub mod args;
pub mod tokenizer;

pub use args::{Args, parse_int};
pub use tokenizer::{Token, label_body, tokenize};

/// Directive prefix character.
pub const DIRECTIVE_PREFIX: char = '^';

/// Argument delimiter.
pub const ARG_DELIMITER: char = ',';

/// Start-of-label marker.
pub const START_OF_LABEL: &str = "^XA";

/// End-of-label marker.
pub const END_OF_LABEL: &str = "^XZ";
