//! Compiled patterns shared by the cleaners.

use regex::Regex;
use std::sync::LazyLock;

/// Any run of whitespace.
pub(crate) static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern"));

/// Any run of characters outside digits, upper-case ASCII letters and space.
pub(crate) static PUNCTUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^0-9A-Z ]+").expect("punctuation pattern"));

/// Exactly twelve upper-case letters or digits.
pub(crate) static IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z0-9]{12}$").expect("identifier pattern"));

/// Currency and grouping symbols stripped from numeric text.
pub(crate) const NUMERIC_NOISE: [char; 6] = ['$', '£', '€', ',', '_', ' '];

pub(crate) fn strip_numeric_noise(s: &str) -> String {
    s.chars().filter(|c| !NUMERIC_NOISE.contains(c)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_numeric_noise() {
        assert_eq!(strip_numeric_noise("$1,234.50"), "1234.50");
        assert_eq!(strip_numeric_noise("£ 1_000"), "1000");
        assert_eq!(strip_numeric_noise("€12%"), "12%");
    }

    #[test]
    fn test_identifier_shape() {
        assert!(IDENTIFIER.is_match("US0378331005"));
        assert!(!IDENTIFIER.is_match("US037833100"));
        assert!(!IDENTIFIER.is_match("us0378331005"));
    }
}
