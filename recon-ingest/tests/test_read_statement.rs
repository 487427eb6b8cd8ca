use recon_core::RawValue;
use recon_ingest::{CsvOptions, SourceKind, read_csv_table};
use std::path::PathBuf;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn test_read_bank_statement_with_banner() {
    let opts = CsvOptions::default().with_header_hint("DATE");
    let t = read_csv_table(fixture("bank_statement.csv"), SourceKind::Bank, &opts)
        .expect("should read fixture");

    assert_eq!(t.source, SourceKind::Bank);
    assert_eq!(t.headers, vec!["DATE", "DESCRIPTION", "AMOUNT", "TRANS_NUM", "BALANCE"]);
    assert_eq!(t.row_count(), 4);

    let amounts = t.column("AMOUNT").unwrap();
    assert_eq!(amounts[0], RawValue::from("$5,000.00"));
    assert_eq!(amounts[1], RawValue::from("(1,250.00)"));
    assert_eq!(amounts[2], RawValue::Missing);
    // mixed with currency text, so the column is not numeric
    assert_eq!(amounts[3], RawValue::from("0.45"));

    // ragged row is padded
    assert_eq!(t.column("BALANCE").unwrap()[2], RawValue::Missing);
    assert_eq!(t.column("trans_num").unwrap()[0], RawValue::Integer(1001));
}

#[test]
fn test_without_hint_banner_becomes_header() {
    let t = read_csv_table(fixture("bank_statement.csv"), SourceKind::Bank, &CsvOptions::default())
        .unwrap();
    assert_eq!(t.headers[0], "First National Bank");
    assert!(t.column("AMOUNT").is_none());
}

#[test]
fn test_missing_file_has_context() {
    let err = read_csv_table(fixture("nope.csv"), SourceKind::Cashbook, &CsvOptions::default())
        .unwrap_err();
    assert!(format!("{err:#}").contains("nope.csv"));
}
