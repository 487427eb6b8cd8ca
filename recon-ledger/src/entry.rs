//! Row-wise ledger entries handed to the matching engine.

use anyhow::{Result, bail};
use chrono::NaiveDateTime;
use recon_core::{CleanedColumn, FieldKind};
use recon_ingest::SourceKind;
use serde::{Deserialize, Serialize};

use crate::clean_table::CleanTable;
use crate::schema::TableSchema;

/// One cleaned statement row. Fields the source lacked, or that failed to
/// clean, are `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LedgerEntry {
    pub source: SourceKind,
    /// Zero-based data row in the source table.
    pub row: usize,
    pub date: Option<NaiveDateTime>,
    pub description: Option<String>,
    pub amount: Option<f64>,
    pub trans_num: Option<u64>,
}

impl LedgerEntry {
    /// Date and amount are the keys the matcher compares on.
    pub fn is_matchable(&self) -> bool {
        self.date.is_some() && self.amount.is_some()
    }
}

/// Which cleaned column plays each entry role. `None` leaves the role empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntryColumns {
    pub date: Option<String>,
    pub description: Option<String>,
    pub amount: Option<String>,
    pub trans_num: Option<String>,
}

impl Default for EntryColumns {
    fn default() -> Self {
        Self {
            date: Some("DATE".to_string()),
            description: Some("DESCRIPTION".to_string()),
            amount: Some("AMOUNT".to_string()),
            trans_num: Some("TRANS_NUM".to_string()),
        }
    }
}

impl EntryColumns {
    /// First schema column of each matching kind.
    pub fn from_schema(schema: &TableSchema) -> Self {
        let first = |kind: FieldKind| {
            schema
                .columns
                .iter()
                .find(|c| c.kind == kind)
                .map(|c| c.column.clone())
        };
        Self {
            date: first(FieldKind::Date),
            description: first(FieldKind::Text),
            amount: first(FieldKind::Amount),
            trans_num: first(FieldKind::TransactionNumber),
        }
    }
}

impl CleanTable {
    /// Project cleaned columns into one entry per row.
    pub fn entries(&self, roles: &EntryColumns) -> Result<Vec<LedgerEntry>> {
        let dates = self.role(roles.date.as_deref(), CleanedColumn::as_dates)?;
        let descriptions = self.role(roles.description.as_deref(), CleanedColumn::as_text)?;
        let amounts = self.role(roles.amount.as_deref(), CleanedColumn::as_amounts)?;
        let trans_nums = self.role(roles.trans_num.as_deref(), CleanedColumn::as_trans_nums)?;

        let entries = (0..self.rows)
            .map(|row| LedgerEntry {
                source: self.source,
                row,
                date: dates.and_then(|v| v[row]),
                description: descriptions.and_then(|v| v[row].clone()),
                amount: amounts.and_then(|v| v[row]),
                trans_num: trans_nums.and_then(|v| v[row]),
            })
            .collect();
        Ok(entries)
    }

    fn role<'a, T>(
        &'a self,
        column: Option<&str>,
        view: fn(&'a CleanedColumn) -> Option<&'a [T]>,
    ) -> Result<Option<&'a [T]>> {
        let Some(column) = column else {
            return Ok(None);
        };
        let Some(field) = self.field(column) else {
            bail!("entry column '{column}' was not cleaned");
        };
        match view(&field.values) {
            Some(values) => Ok(Some(values)),
            None => bail!(
                "entry column '{column}' holds {} values",
                field.values.label()
            ),
        }
    }
}
