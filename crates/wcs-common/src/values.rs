//! Lenient conversions from XML text content to numbers and lists.

use std::str::FromStr;

/// Split `s` on `separator` (whitespace when `None`) and parse every token.
///
/// Tokens that fail to parse are dropped, so an empty string yields an
/// empty list rather than an error.
pub fn parse_list<T: FromStr>(s: &str, separator: Option<&str>) -> Vec<T> {
    match separator {
        Some(sep) => s
            .split(sep)
            .filter_map(|token| token.trim().parse().ok())
            .collect(),
        None => s
            .split_whitespace()
            .filter_map(|token| token.parse().ok())
            .collect(),
    }
}

/// Parse a list of floats, e.g. a `gml:pos` or `gml:posList`.
pub fn parse_float_list(s: &str, separator: Option<&str>) -> Vec<f64> {
    parse_list(s, separator)
}

/// Parse a list of integers, e.g. `gml:low` / `gml:high` grid limits.
pub fn parse_int_list(s: &str, separator: Option<&str>) -> Vec<i64> {
    s.split(|c: char| match separator {
        Some(sep) => sep.contains(c),
        None => c.is_whitespace(),
    })
    .filter_map(parse_int)
    .collect()
}

/// Parse the leading integer of a string.
///
/// Mirrors how OGC servers are read in practice: `"-9999.0"` yields `-9999`
/// and trailing garbage is ignored. Returns `None` when no digit leads.
pub fn parse_int(s: &str) -> Option<i64> {
    let s = s.trim();
    let mut end = 0;
    for (i, c) in s.char_indices() {
        if c.is_ascii_digit() || (i == 0 && (c == '-' || c == '+')) {
            end = i + c.len_utf8();
        } else {
            break;
        }
    }
    s[..end].parse().ok()
}

/// Map an empty string to `None`.
pub fn non_empty(s: String) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_float_list_whitespace() {
        assert_eq!(
            parse_float_list("-180 -90\n  180.5   90", None),
            vec![-180.0, -90.0, 180.5, 90.0]
        );
        assert!(parse_float_list("", None).is_empty());
    }

    #[test]
    fn test_parse_float_list_separator() {
        assert_eq!(parse_float_list("1,2.5, 3", Some(",")), vec![1.0, 2.5, 3.0]);
    }

    #[test]
    fn test_parse_int_list() {
        assert_eq!(parse_int_list("0 0", None), vec![0, 0]);
        assert_eq!(parse_int_list("719 359", None), vec![719, 359]);
        assert_eq!(parse_int_list("1,2", Some(",")), vec![1, 2]);
    }

    #[test]
    fn test_parse_int_leading_digits() {
        assert_eq!(parse_int("42"), Some(42));
        assert_eq!(parse_int(" -9999.0 "), Some(-9999));
        assert_eq!(parse_int("+7px"), Some(7));
        assert_eq!(parse_int(""), None);
        assert_eq!(parse_int("-"), None);
        assert_eq!(parse_int("abc"), None);
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty(String::new()), None);
        assert_eq!(non_empty("x".to_string()), Some("x".to_string()));
    }
}
