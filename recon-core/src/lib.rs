//! recon-core: field-level normalization for cashbook and bank statement records.
//!
//! Raw cells from either source are turned into canonical typed values before
//! the two sides are compared for reconciliation. Every cleaner is total:
//! malformed input degrades to the missing value of its type. The single hard
//! failure is strict identifier validation.

pub mod amount;
pub mod columnar;
pub mod config;
pub mod date;
pub mod error;
pub mod identifier;
pub mod normalizer;
mod patterns;
pub mod text;
pub mod trans_num;
pub mod value;

pub use columnar::{CleanedColumn, ColumnReport, PARALLEL_THRESHOLD};
pub use config::NormalizerConfig;
pub use error::{ColumnError, NormalizeError, RowFailure};
pub use normalizer::Normalizer;
pub use value::{FieldKind, Identifier, RawValue};
