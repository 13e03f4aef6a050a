//! Best-effort argument parsing.
//!
//! Directive arguments are comma separated and frequently incomplete in
//! real-world labels. Parsing here never fails hard: a missing or
//! unparseable field comes back as `None` and the caller picks a default.

use super::ARG_DELIMITER;

/// Comma-separated directive arguments.
#[derive(Debug, Clone)]
pub struct Args<'a> {
    fields: Vec<&'a str>,
}

impl<'a> Args<'a> {
    /// Split a raw argument string.
    pub fn new(raw: &'a str) -> Self {
        Self {
            fields: raw.split(ARG_DELIMITER).collect(),
        }
    }

    /// Raw field at `index`, if present and non-empty.
    pub fn get(&self, index: usize) -> Option<&'a str> {
        self.fields.get(index).copied().filter(|f| !f.is_empty())
    }

    /// First non-empty field among `indices`, in order.
    ///
    /// `BY` and `BQ` read their height/magnification from "the third field,
    /// else the second"; an empty third field falls through, a garbage one
    /// does not.
    pub fn first_present(&self, indices: &[usize]) -> Option<&'a str> {
        indices.iter().find_map(|&i| self.get(i))
    }

    /// Integer value of the field at `index`.
    pub fn int(&self, index: usize) -> Option<i32> {
        self.get(index).and_then(parse_int)
    }

    /// First character of the field at `index`.
    pub fn first_char(&self, index: usize) -> Option<char> {
        self.get(index).and_then(|f| f.chars().next())
    }
}

/// Parse the leading integer of a field.
///
/// Leading whitespace and a sign are accepted; parsing stops at the first
/// non-digit, so `"15abc"` is 15. No digits at all yields `None`. Values
/// outside `i32` saturate.
pub fn parse_int(field: &str) -> Option<i32> {
    let s = field.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let magnitude = digits[..end]
        .bytes()
        .fold(0i64, |acc, b| (acc * 10 + i64::from(b - b'0')).min(i64::from(u32::MAX)));
    let value = if negative { -magnitude } else { magnitude };
    Some(value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_int() {
        assert_eq!(parse_int("15"), Some(15));
        assert_eq!(parse_int(" 42"), Some(42));
        assert_eq!(parse_int("-7"), Some(-7));
        assert_eq!(parse_int("+3"), Some(3));
        assert_eq!(parse_int("15abc"), Some(15));
        assert_eq!(parse_int("abc"), None);
        assert_eq!(parse_int(""), None);
        assert_eq!(parse_int("-"), None);
        assert_eq!(parse_int("99999999999"), Some(i32::MAX));
    }

    #[test]
    fn test_fields() {
        let args = Args::new("N,,18");
        assert_eq!(args.get(0), Some("N"));
        assert_eq!(args.get(1), None);
        assert_eq!(args.int(2), Some(18));
        assert_eq!(args.int(5), None);
        assert_eq!(args.first_char(0), Some('N'));
    }

    #[test]
    fn test_first_present() {
        assert_eq!(Args::new("2,3,100").first_present(&[2, 1]), Some("100"));
        assert_eq!(Args::new("2,3").first_present(&[2, 1]), Some("3"));
        assert_eq!(Args::new("2,,").first_present(&[2, 1]), None);
        // A present but garbage field still wins
        assert_eq!(Args::new("2,3,x").first_present(&[2, 1]), Some("x"));
    }
}
