use recon_core::RawValue;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which side of the reconciliation a table came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// Internal ledger.
    Cashbook,
    /// External bank statement.
    Bank,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKind::Cashbook => f.write_str("cashbook"),
            SourceKind::Bank => f.write_str("bank"),
        }
    }
}

impl FromStr for SourceKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cashbook" | "cb" | "ledger" => Ok(SourceKind::Cashbook),
            "bank" | "bs" | "statement" => Ok(SourceKind::Bank),
            other => anyhow::bail!("unknown source kind: {other} (expected cashbook or bank)"),
        }
    }
}

/// Column-major table of raw cells. Every column has `row_count()` entries.
#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    pub source: SourceKind,
    pub headers: Vec<String>,
    pub columns: Vec<Vec<RawValue>>,
}

impl RawTable {
    pub fn new(source: SourceKind, headers: Vec<String>) -> Self {
        let columns = vec![Vec::new(); headers.len()];
        Self {
            source,
            headers,
            columns,
        }
    }

    /// Append one row. Short rows are padded with missing cells; extra cells are dropped.
    pub fn push_row(&mut self, mut cells: Vec<RawValue>) {
        cells.resize(self.headers.len(), RawValue::Missing);
        for (column, cell) in self.columns.iter_mut().zip(cells) {
            column.push(cell);
        }
    }

    pub fn row_count(&self) -> usize {
        self.columns.first().map(Vec::len).unwrap_or(0)
    }

    /// Index of a header: exact match first, then trimmed and case-insensitive.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name).or_else(|| {
            let wanted = name.trim();
            self.headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(wanted))
        })
    }

    pub fn column(&self, name: &str) -> Option<&[RawValue]> {
        self.column_index(name).map(|i| self.columns[i].as_slice())
    }
}
