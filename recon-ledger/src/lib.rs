//! recon-ledger: column schemas, table cleaning and ledger entries for the matcher.

pub mod clean_table;
pub mod entry;
pub mod schema;

pub use clean_table::{CleanTable, CleanedField, clean_table};
pub use entry::{EntryColumns, LedgerEntry};
pub use schema::{ColumnSpec, TableSchema};
