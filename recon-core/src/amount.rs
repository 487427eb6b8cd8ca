//! Monetary amount cleaning.
//!
//! Accepts currency-formatted text such as `$1,234.50`, accounting negatives
//! such as `(1,234.50)`, and percentages such as `12.5%`. Anything that still
//! fails to parse becomes `None`.

use crate::patterns::strip_numeric_noise;
use crate::value::RawValue;

pub fn clean_amount(raw: &RawValue) -> Option<f64> {
    if raw.is_missing() {
        return None;
    }
    if let Some(n) = raw.as_number() {
        return Some(n);
    }

    let rendered = raw.to_string();
    let mut s = rendered.trim();
    if s.is_empty() {
        return None;
    }

    // Parentheses bound the whole token, so they come off before symbols.
    let negative = s.len() >= 2 && s.starts_with('(') && s.ends_with(')');
    if negative {
        s = &s[1..s.len() - 1];
    }

    let stripped = strip_numeric_noise(s);
    let (digits, percent) = match stripped.strip_suffix('%') {
        Some(rest) => (rest, true),
        None => (stripped.as_str(), false),
    };

    let mut value: f64 = digits.parse().ok()?;
    if value.is_nan() {
        return None;
    }
    if negative {
        value = -value;
    }
    if percent {
        value /= 100.0;
    }
    Some(value)
}
