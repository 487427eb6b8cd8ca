//! Which column of a statement holds which kind of field.

use recon_core::FieldKind;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    /// Header name in the source table.
    pub column: String,
    pub kind: FieldKind,
}

impl ColumnSpec {
    pub fn new(column: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            column: column.into(),
            kind,
        }
    }
}

/// Ordered list of columns to clean. Columns not listed are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSchema {
    pub columns: Vec<ColumnSpec>,
}

impl Default for TableSchema {
    /// DATE, DESCRIPTION, AMOUNT, TRANS_NUM: the layout both reconciliation sources are unified to.
    fn default() -> Self {
        Self {
            columns: vec![
                ColumnSpec::new("DATE", FieldKind::Date),
                ColumnSpec::new("DESCRIPTION", FieldKind::Text),
                ColumnSpec::new("AMOUNT", FieldKind::Amount),
                ColumnSpec::new("TRANS_NUM", FieldKind::TransactionNumber),
            ],
        }
    }
}

impl TableSchema {
    pub fn new(columns: Vec<ColumnSpec>) -> Self {
        Self { columns }
    }

    pub fn with_column(mut self, column: impl Into<String>, kind: FieldKind) -> Self {
        self.columns.push(ColumnSpec::new(column, kind));
        self
    }

    pub fn kind_of(&self, column: &str) -> Option<FieldKind> {
        self.columns
            .iter()
            .find(|c| c.column.eq_ignore_ascii_case(column))
            .map(|c| c.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_schema() {
        let s = TableSchema::default();
        assert_eq!(s.columns.len(), 4);
        assert_eq!(s.kind_of("amount"), Some(FieldKind::Amount));
        assert_eq!(s.kind_of("ISIN"), None);
    }

    #[test]
    fn test_schema_from_toml() {
        let s: TableSchema = toml::from_str(
            r#"
            [[columns]]
            column = "Posted"
            kind = "date"

            [[columns]]
            column = "ISIN"
            kind = { identifier = { strict = true } }
            "#,
        )
        .unwrap();
        assert_eq!(s.kind_of("posted"), Some(FieldKind::Date));
        assert_eq!(s.kind_of("ISIN"), Some(FieldKind::Identifier { strict: true }));
    }
}
