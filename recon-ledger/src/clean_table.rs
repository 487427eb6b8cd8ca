//! Apply a schema to a raw table.

use anyhow::{Context, Result, bail};
use recon_core::{CleanedColumn, ColumnReport, FieldKind, Normalizer};
use recon_ingest::{RawTable, SourceKind};

use crate::schema::TableSchema;

/// One cleaned column with its row accounting.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanedField {
    pub column: String,
    pub kind: FieldKind,
    pub values: CleanedColumn,
    pub report: ColumnReport,
}

/// The cleaned columns of one source table, in schema order.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanTable {
    pub source: SourceKind,
    pub rows: usize,
    pub fields: Vec<CleanedField>,
}

impl CleanTable {
    pub fn field(&self, column: &str) -> Option<&CleanedField> {
        self.fields
            .iter()
            .find(|f| f.column == column)
            .or_else(|| self.fields.iter().find(|f| f.column.eq_ignore_ascii_case(column)))
    }

    /// Rows where every cleaned field came out missing.
    pub fn empty_rows(&self) -> Vec<usize> {
        (0..self.rows)
            .filter(|&row| self.fields.iter().all(|f| !f.values.is_present(row)))
            .collect()
    }
}

/// Clean every schema column of `table`.
///
/// Fails when a schema column is not in the table, or when a strict identifier
/// column has invalid rows.
pub fn clean_table(
    normalizer: &Normalizer,
    table: &RawTable,
    schema: &TableSchema,
) -> Result<CleanTable> {
    let mut fields = Vec::with_capacity(schema.columns.len());

    for spec in &schema.columns {
        let Some(raw) = table.column(&spec.column) else {
            tracing::warn!(column = %spec.column, source = %table.source, "schema column missing");
            bail!(
                "column '{}' not found in {} table (columns: {})",
                spec.column,
                table.source,
                table.headers.join(", ")
            );
        };

        let (values, report) = normalizer
            .clean_column(spec.kind, raw)
            .with_context(|| format!("cleaning {} column '{}'", spec.kind.label(), spec.column))?;

        fields.push(CleanedField {
            column: spec.column.clone(),
            kind: spec.kind,
            values,
            report,
        });
    }

    Ok(CleanTable {
        source: table.source,
        rows: table.row_count(),
        fields,
    })
}
