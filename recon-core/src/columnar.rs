//! Column-wise cleaning.
//!
//! Every batch returns exactly one output per input, in input order. Rows are
//! independent, so large columns are mapped on the rayon pool.

use chrono::NaiveDateTime;
use rayon::prelude::*;
use serde::Serialize;

use crate::error::{ColumnError, RowFailure};
use crate::normalizer::Normalizer;
use crate::value::{FieldKind, Identifier, RawValue};

/// Columns at least this long are cleaned in parallel.
pub const PARALLEL_THRESHOLD: usize = 4096;

/// Malformed row indices kept in a [`ColumnReport`].
pub const MALFORMED_SAMPLE_LIMIT: usize = 20;

fn map_rows<T, F>(raw: &[RawValue], f: F) -> Vec<T>
where
    T: Send,
    F: Fn(&RawValue) -> T + Sync + Send,
{
    if raw.len() >= PARALLEL_THRESHOLD {
        raw.par_iter().map(&f).collect()
    } else {
        raw.iter().map(&f).collect()
    }
}

impl Normalizer {
    pub fn clean_text_column(&self, raw: &[RawValue]) -> Vec<Option<String>> {
        map_rows(raw, |v| self.clean_text(v))
    }

    pub fn clean_identifier_column(&self, raw: &[RawValue]) -> Vec<Option<Identifier>> {
        map_rows(raw, |v| self.clean_identifier(v))
    }

    /// Strict identifier batch. All rows are checked; if any fail, the error
    /// lists every failing row and no partial column is returned.
    pub fn clean_identifier_column_strict(
        &self,
        raw: &[RawValue],
    ) -> Result<Vec<Option<Identifier>>, ColumnError> {
        let results = map_rows(raw, |v| self.clean_identifier_strict(v));

        let mut cleaned = Vec::with_capacity(results.len());
        let mut failures = Vec::new();
        for (row, result) in results.into_iter().enumerate() {
            match result {
                Ok(id) => cleaned.push(id),
                Err(error) => failures.push(RowFailure { row, error }),
            }
        }

        if failures.is_empty() {
            Ok(cleaned)
        } else {
            tracing::warn!(
                rows = raw.len(),
                failed = failures.len(),
                "strict identifier validation failed"
            );
            Err(ColumnError {
                rows: raw.len(),
                failures,
            })
        }
    }

    pub fn clean_amount_column(&self, raw: &[RawValue]) -> Vec<Option<f64>> {
        map_rows(raw, |v| self.clean_amount(v))
    }

    pub fn clean_trans_num_column(&self, raw: &[RawValue]) -> Vec<Option<u64>> {
        map_rows(raw, |v| self.clean_trans_num(v))
    }

    pub fn clean_date_column(&self, raw: &[RawValue]) -> Vec<Option<NaiveDateTime>> {
        map_rows(raw, |v| self.clean_date(v))
    }

    /// Clean a column by field kind and report how many rows degraded.
    pub fn clean_column(
        &self,
        kind: FieldKind,
        raw: &[RawValue],
    ) -> Result<(CleanedColumn, ColumnReport), ColumnError> {
        let column = match kind {
            FieldKind::Text => CleanedColumn::Text(self.clean_text_column(raw)),
            FieldKind::Identifier { strict: false } => {
                CleanedColumn::Identifier(self.clean_identifier_column(raw))
            }
            FieldKind::Identifier { strict: true } => {
                CleanedColumn::Identifier(self.clean_identifier_column_strict(raw)?)
            }
            FieldKind::Amount => CleanedColumn::Amount(self.clean_amount_column(raw)),
            FieldKind::TransactionNumber => {
                CleanedColumn::TransactionNumber(self.clean_trans_num_column(raw))
            }
            FieldKind::Date => CleanedColumn::Date(self.clean_date_column(raw)),
        };

        let report = ColumnReport::build(raw, &column);
        tracing::debug!(
            kind = kind.label(),
            rows = report.rows,
            present = report.present,
            absent = report.absent,
            malformed = report.malformed,
            "cleaned column"
        );
        Ok((column, report))
    }
}

/// A cleaned column, typed by the field kind that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "values", rename_all = "snake_case")]
pub enum CleanedColumn {
    Text(Vec<Option<String>>),
    Identifier(Vec<Option<Identifier>>),
    Amount(Vec<Option<f64>>),
    TransactionNumber(Vec<Option<u64>>),
    Date(Vec<Option<NaiveDateTime>>),
}

impl CleanedColumn {
    pub fn len(&self) -> usize {
        match self {
            CleanedColumn::Text(v) => v.len(),
            CleanedColumn::Identifier(v) => v.len(),
            CleanedColumn::Amount(v) => v.len(),
            CleanedColumn::TransactionNumber(v) => v.len(),
            CleanedColumn::Date(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn label(&self) -> &'static str {
        match self {
            CleanedColumn::Text(_) => "text",
            CleanedColumn::Identifier(_) => "identifier",
            CleanedColumn::Amount(_) => "amount",
            CleanedColumn::TransactionNumber(_) => "transaction-number",
            CleanedColumn::Date(_) => "date",
        }
    }

    /// True when `row` holds a canonical value. Out-of-range rows are not present.
    pub fn is_present(&self, row: usize) -> bool {
        match self {
            CleanedColumn::Text(v) => matches!(v.get(row), Some(Some(_))),
            CleanedColumn::Identifier(v) => matches!(v.get(row), Some(Some(_))),
            CleanedColumn::Amount(v) => matches!(v.get(row), Some(Some(_))),
            CleanedColumn::TransactionNumber(v) => matches!(v.get(row), Some(Some(_))),
            CleanedColumn::Date(v) => matches!(v.get(row), Some(Some(_))),
        }
    }

    /// Render one cell for display; missing cells render as `None`.
    pub fn display(&self, row: usize) -> Option<String> {
        match self {
            CleanedColumn::Text(v) => v.get(row)?.clone(),
            CleanedColumn::Identifier(v) => v.get(row)?.as_ref().map(ToString::to_string),
            CleanedColumn::Amount(v) => v.get(row)?.map(|a| format!("{a:.2}")),
            CleanedColumn::TransactionNumber(v) => v.get(row)?.map(|n| n.to_string()),
            CleanedColumn::Date(v) => v
                .get(row)?
                .map(|d| d.format("%Y-%m-%d %H:%M:%S").to_string()),
        }
    }

    pub fn as_text(&self) -> Option<&[Option<String>]> {
        match self {
            CleanedColumn::Text(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_identifiers(&self) -> Option<&[Option<Identifier>]> {
        match self {
            CleanedColumn::Identifier(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_amounts(&self) -> Option<&[Option<f64>]> {
        match self {
            CleanedColumn::Amount(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_trans_nums(&self) -> Option<&[Option<u64>]> {
        match self {
            CleanedColumn::TransactionNumber(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_dates(&self) -> Option<&[Option<NaiveDateTime>]> {
        match self {
            CleanedColumn::Date(v) => Some(v),
            _ => None,
        }
    }
}

/// Row accounting for one cleaned column.
///
/// `absent` rows were missing or blank on input; `malformed` rows had a value
/// that could not be cleaned. Both end up missing in the output column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ColumnReport {
    pub rows: usize,
    pub present: usize,
    pub absent: usize,
    pub malformed: usize,
    /// First malformed row indices, capped at [`MALFORMED_SAMPLE_LIMIT`].
    pub malformed_rows: Vec<usize>,
}

impl ColumnReport {
    pub fn build(raw: &[RawValue], column: &CleanedColumn) -> Self {
        let mut report = ColumnReport {
            rows: raw.len(),
            ..Default::default()
        };
        for (row, value) in raw.iter().enumerate() {
            if column.is_present(row) {
                report.present += 1;
            } else if value.is_blank() {
                report.absent += 1;
            } else {
                report.malformed += 1;
                if report.malformed_rows.len() < MALFORMED_SAMPLE_LIMIT {
                    report.malformed_rows.push(row);
                }
            }
        }
        report
    }

    /// Share of rows that produced a canonical value (0.0 for an empty column).
    pub fn coverage(&self) -> f64 {
        if self.rows == 0 {
            0.0
        } else {
            self.present as f64 / self.rows as f64
        }
    }
}
