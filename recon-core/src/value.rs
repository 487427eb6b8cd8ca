//! Raw and canonical value types shared by every cleaner.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single cell as it arrives from a cashbook or bank statement.
///
/// Produced by ingestion; the normalizer only ever reads these.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    #[default]
    Missing,
    Integer(i64),
    Float(f64),
    Text(String),
}

impl RawValue {
    /// True for the missing marker and for floating-point NaN.
    pub fn is_missing(&self) -> bool {
        match self {
            RawValue::Missing => true,
            RawValue::Float(f) => f.is_nan(),
            _ => false,
        }
    }

    /// True when the value is missing or renders to whitespace only.
    pub fn is_blank(&self) -> bool {
        match self {
            RawValue::Text(s) => s.trim().is_empty(),
            other => other.is_missing(),
        }
    }

    /// The numeric payload when the value is already a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            RawValue::Integer(i) => Some(*i as f64),
            RawValue::Float(f) if !f.is_nan() => Some(*f),
            _ => None,
        }
    }

    /// Render as text. Missing values render as `None`.
    pub fn to_text(&self) -> Option<String> {
        if self.is_missing() {
            return None;
        }
        Some(self.to_string())
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::Missing => Ok(()),
            RawValue::Integer(i) => write!(f, "{i}"),
            // Debug keeps the decimal point on integral floats ("1.0", not "1")
            RawValue::Float(v) if v.is_nan() => Ok(()),
            RawValue::Float(v) => write!(f, "{v:?}"),
            RawValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        RawValue::Text(s.to_string())
    }
}

impl From<String> for RawValue {
    fn from(s: String) -> Self {
        RawValue::Text(s)
    }
}

impl From<i64> for RawValue {
    fn from(i: i64) -> Self {
        RawValue::Integer(i)
    }
}

impl From<f64> for RawValue {
    fn from(f: f64) -> Self {
        RawValue::Float(f)
    }
}

impl<T: Into<RawValue>> From<Option<T>> for RawValue {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(RawValue::Missing)
    }
}

/// The semantic type of a column, selecting which cleaner applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Identifier {
        #[serde(default)]
        strict: bool,
    },
    Amount,
    TransactionNumber,
    Date,
}

impl FieldKind {
    pub fn label(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Identifier { .. } => "identifier",
            FieldKind::Amount => "amount",
            FieldKind::TransactionNumber => "transaction-number",
            FieldKind::Date => "date",
        }
    }
}

/// A validated 12-character security identifier (ISIN shape).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identifier(String);

impl Identifier {
    /// Wrap an already-validated code. Callers go through the identifier cleaner.
    pub(crate) fn new_unchecked(code: String) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
