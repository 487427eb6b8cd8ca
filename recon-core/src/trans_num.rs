//! Transaction number cleaning.
//!
//! Transaction numbers are identifiers, not quantities: negative or
//! fractional values mean the row is corrupt and yield `None` instead of
//! being coerced.

use crate::patterns::strip_numeric_noise;
use crate::value::RawValue;

pub fn clean_trans_num(raw: &RawValue) -> Option<u64> {
    match raw {
        RawValue::Missing => None,
        RawValue::Integer(i) => u64::try_from(*i).ok(),
        RawValue::Float(f) => whole_non_negative(*f),
        RawValue::Text(text) => {
            let s = text.trim();
            // negative notation is rejected outright, never stripped
            if s.is_empty() || s.starts_with('-') || s.starts_with('(') {
                return None;
            }
            let value: f64 = strip_numeric_noise(s).parse().ok()?;
            whole_non_negative(value)
        }
    }
}

fn whole_non_negative(value: f64) -> Option<u64> {
    // 2^64 is exactly representable; anything at or above it does not fit
    const LIMIT: f64 = 18_446_744_073_709_551_616.0;
    if value.is_finite() && value.fract() == 0.0 && value >= 0.0 && value < LIMIT {
        Some(value as u64)
    } else {
        None
    }
}
