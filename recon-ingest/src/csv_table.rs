//! CSV statement reader.
//!
//! Statement exports often carry banner or blank rows above the header, and
//! rows of uneven width. The header is the first non-blank row, or with a
//! header hint the first row holding that cell; later rows are padded or
//! truncated to its width.
//!
//! Number inference is decided per column: a column converts only when every
//! non-missing cell is a plain decimal literal, so numeric-looking text in a
//! description column is kept as written.

use anyhow::{Context, Result, bail};
use recon_core::RawValue;
use regex::Regex;
use std::io;
use std::path::Path;
use std::sync::LazyLock;

use crate::types::{RawTable, SourceKind};

/// Cell spellings read as missing, matching common dataframe tooling.
pub const DEFAULT_NA_VALUES: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

static DECIMAL_LITERAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?$").expect("decimal literal pattern")
});

#[derive(Debug, Clone, PartialEq)]
pub struct CsvOptions {
    pub delimiter: u8,
    /// Convert all-numeric columns into `Integer`/`Float` cells.
    pub infer_numbers: bool,
    /// Cell spellings (after trimming) that mean "no value".
    pub na_values: Vec<String>,
    /// Skip rows until one has a cell equal to this (case-insensitive).
    pub header_hint: Option<String>,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            infer_numbers: true,
            na_values: DEFAULT_NA_VALUES.iter().map(|s| s.to_string()).collect(),
            header_hint: None,
        }
    }
}

impl CsvOptions {
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_infer_numbers(mut self, on: bool) -> Self {
        self.infer_numbers = on;
        self
    }

    pub fn with_header_hint(mut self, hint: impl Into<String>) -> Self {
        self.header_hint = Some(hint.into());
        self
    }

    fn is_header(&self, record: &csv::StringRecord) -> bool {
        match &self.header_hint {
            Some(hint) => record.iter().any(|c| c.trim().eq_ignore_ascii_case(hint.trim())),
            None => true,
        }
    }

    fn parse_cell(&self, cell: &str) -> RawValue {
        let s = cell.trim();
        if self.na_values.iter().any(|na| na == s) {
            return RawValue::Missing;
        }
        RawValue::Text(s.to_string())
    }
}

/// Convert a column in place when all of its present cells are numeric.
/// A column mixing integers and decimals becomes all `Float`.
fn infer_column(column: &mut [RawValue]) -> bool {
    let mut parsed = Vec::with_capacity(column.len());
    for cell in column.iter() {
        match cell {
            RawValue::Text(s) => match infer_number(s) {
                Some(n) => parsed.push(Some(n)),
                None => return false,
            },
            _ => parsed.push(None),
        }
    }
    if parsed.iter().all(Option::is_none) {
        return false;
    }

    let any_float = parsed.iter().flatten().any(|n| matches!(n, RawValue::Float(_)));
    for (cell, n) in column.iter_mut().zip(parsed) {
        *cell = match n {
            Some(RawValue::Integer(i)) if any_float => RawValue::Float(i as f64),
            Some(n) => n,
            None => continue,
        };
    }
    true
}

/// Numeric cell inference. Integers with leading zeros ("007") are not numbers.
fn infer_number(s: &str) -> Option<RawValue> {
    if !DECIMAL_LITERAL.is_match(s) {
        return None;
    }
    let unsigned = s.trim_start_matches(['+', '-']);
    if unsigned.len() > 1 && unsigned.starts_with('0') && !unsigned[1..].starts_with('.') {
        return None;
    }
    if !s.contains(['.', 'e', 'E']) {
        if let Ok(i) = s.parse::<i64>() {
            return Some(RawValue::Integer(i));
        }
    }
    s.parse::<f64>().ok().map(RawValue::Float)
}

/// Read a CSV statement file into a raw table.
pub fn read_csv_table(
    path: impl AsRef<Path>,
    source: SourceKind,
    options: &CsvOptions,
) -> Result<RawTable> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let table = read_csv_table_from_reader(file, source, options)
        .with_context(|| format!("reading {}", path.display()))?;

    tracing::info!(
        path = %path.display(),
        source = %source,
        rows = table.row_count(),
        columns = table.headers.len(),
        "read statement table"
    );
    Ok(table)
}

/// Read CSV from any reader. Blank rows are skipped everywhere.
pub fn read_csv_table_from_reader<R: io::Read>(
    reader: R,
    source: SourceKind,
    options: &CsvOptions,
) -> Result<RawTable> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(false)
        .delimiter(options.delimiter)
        .from_reader(reader);

    let mut table: Option<RawTable> = None;

    for (line, result) in rdr.records().enumerate() {
        let record = result.with_context(|| format!("record {}", line + 1))?;
        if record.iter().all(|c| c.trim().is_empty()) {
            continue;
        }

        if let Some(t) = table.as_mut() {
            let cells = record.iter().map(|c| options.parse_cell(c)).collect();
            t.push_row(cells);
        } else if options.is_header(&record) {
            let headers = record
                .iter()
                .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
                .collect();
            table = Some(RawTable::new(source, headers));
        }
    }

    let Some(mut table) = table else {
        bail!("no header row found");
    };

    if options.infer_numbers {
        for (header, column) in table.headers.iter().zip(table.columns.iter_mut()) {
            if infer_column(column) {
                tracing::debug!(column = %header, "inferred numeric column");
            }
        }
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(text: &str) -> RawTable {
        read_csv_table_from_reader(text.as_bytes(), SourceKind::Bank, &CsvOptions::default())
            .unwrap()
    }

    #[test]
    fn test_skips_banner_blank_rows() {
        let t = read(",,\n,,\nDate,Description,Amount\n01/15/2024,Coffee,-4.50\n");
        assert_eq!(t.headers, vec!["Date", "Description", "Amount"]);
        assert_eq!(t.row_count(), 1);
        assert_eq!(t.column("Amount").unwrap(), &[RawValue::Float(-4.5)]);
    }

    #[test]
    fn test_header_hint_skips_banner_text() {
        let opts = CsvOptions::default().with_header_hint("date");
        let text = "Acme Bank,,\nAccount 1234,,\nDate,Description,Amount\n2024-01-02,Fee,-5\n";
        let t = read_csv_table_from_reader(text.as_bytes(), SourceKind::Bank, &opts).unwrap();
        assert_eq!(t.headers[0], "Date");
        assert_eq!(t.column("Amount").unwrap(), &[RawValue::Integer(-5)]);
    }

    #[test]
    fn test_hint_never_found_errors() {
        let opts = CsvOptions::default().with_header_hint("Posted");
        let text = "Date,Amount\n2024-01-02,-5\n";
        assert!(read_csv_table_from_reader(text.as_bytes(), SourceKind::Bank, &opts).is_err());
    }

    #[test]
    fn test_na_markers_and_text() {
        let t = read("A,B,C\nN/A,  hello ,\n");
        assert_eq!(t.column("A").unwrap(), &[RawValue::Missing]);
        assert_eq!(t.column("B").unwrap(), &[RawValue::from("hello")]);
        assert_eq!(t.column("C").unwrap(), &[RawValue::Missing]);
    }

    #[test]
    fn test_number_inference() {
        assert_eq!(infer_number("42"), Some(RawValue::Integer(42)));
        assert_eq!(infer_number("-3.25"), Some(RawValue::Float(-3.25)));
        assert_eq!(infer_number("0.5"), Some(RawValue::Float(0.5)));
        assert_eq!(infer_number("0"), Some(RawValue::Integer(0)));
        assert_eq!(infer_number("1e3"), Some(RawValue::Float(1000.0)));
        assert_eq!(infer_number("007"), None);
        assert_eq!(infer_number("$5"), None);
        assert_eq!(infer_number("1,000"), None);
        assert_eq!(infer_number("inf"), None);
    }

    #[test]
    fn test_numeric_looking_text_in_text_column_is_kept() {
        let t = read("DESCRIPTION,REF\nInvoice 7,1\n10.50,2\n2E5,\n");
        assert_eq!(
            t.column("DESCRIPTION").unwrap(),
            &[
                RawValue::from("Invoice 7"),
                RawValue::from("10.50"),
                RawValue::from("2E5")
            ]
        );
        assert_eq!(
            t.column("REF").unwrap(),
            &[RawValue::Integer(1), RawValue::Integer(2), RawValue::Missing]
        );
    }

    #[test]
    fn test_mixed_integer_decimal_column_is_float() {
        let t = read("AMOUNT\n5\n-4.50\n");
        assert_eq!(
            t.column("AMOUNT").unwrap(),
            &[RawValue::Float(5.0), RawValue::Float(-4.5)]
        );
    }

    #[test]
    fn test_leading_zero_reference_keeps_column_text() {
        let t = read("REF\n007\n12\n");
        assert_eq!(t.column("REF").unwrap(), &[RawValue::from("007"), RawValue::from("12")]);
    }

    #[test]
    fn test_inference_off_keeps_text() {
        let opts = CsvOptions::default().with_infer_numbers(false);
        let t = read_csv_table_from_reader("N\n42\n".as_bytes(), SourceKind::Cashbook, &opts)
            .unwrap();
        assert_eq!(t.column("N").unwrap(), &[RawValue::from("42")]);
    }

    #[test]
    fn test_semicolon_delimiter() {
        let opts = CsvOptions::default().with_delimiter(b';');
        let t = read_csv_table_from_reader("X;Y\n1;2\n".as_bytes(), SourceKind::Bank, &opts)
            .unwrap();
        assert_eq!(t.column("Y").unwrap(), &[RawValue::Integer(2)]);
    }

    #[test]
    fn test_empty_input_errors() {
        let err = read_csv_table_from_reader("\n\n".as_bytes(), SourceKind::Bank, &CsvOptions::default());
        assert!(err.is_err());
    }
}
