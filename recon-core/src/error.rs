//! Errors raised by the normalizer.
//!
//! Malformed input never shows up here: it degrades to the missing value of
//! its canonical type. The only hard failure is strict identifier validation.

use thiserror::Error;

use crate::value::RawValue;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum NormalizeError {
    #[error("invalid identifier after cleaning: {raw}")]
    InvalidIdentifier { raw: RawValue },
}

/// A failed row inside a batch.
#[derive(Debug, Clone, PartialEq)]
pub struct RowFailure {
    pub row: usize,
    pub error: NormalizeError,
}

/// Returned by a strict batch when one or more rows failed.
///
/// Every row is evaluated before this is returned, so `failures` lists all of
/// them in row order.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{} of {rows} rows failed validation (first at row {})", .failures.len(), first_row(.failures))]
pub struct ColumnError {
    pub rows: usize,
    pub failures: Vec<RowFailure>,
}

fn first_row(failures: &[RowFailure]) -> usize {
    failures.first().map(|f| f.row).unwrap_or(0)
}

impl ColumnError {
    pub fn failed_rows(&self) -> impl Iterator<Item = usize> + '_ {
        self.failures.iter().map(|f| f.row)
    }
}
