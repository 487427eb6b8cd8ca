//! recon-ingest: statement ingestion into raw, column-major tables.

pub mod csv_table;
pub mod types;

pub use csv_table::{CsvOptions, DEFAULT_NA_VALUES, read_csv_table, read_csv_table_from_reader};
pub use types::{RawTable, SourceKind};
