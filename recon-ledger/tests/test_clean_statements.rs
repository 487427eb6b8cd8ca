use chrono::NaiveDate;
use recon_core::{FieldKind, Normalizer};
use recon_ingest::{CsvOptions, SourceKind, read_csv_table, read_csv_table_from_reader};
use recon_ledger::{EntryColumns, LedgerEntry, TableSchema, clean_table};
use std::collections::HashMap;
use std::path::PathBuf;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn cashbook_entries() -> Vec<LedgerEntry> {
    let raw = read_csv_table(fixture("cashbook.csv"), SourceKind::Cashbook, &CsvOptions::default())
        .unwrap();
    let clean = clean_table(&Normalizer::default(), &raw, &TableSchema::default()).unwrap();
    clean.entries(&EntryColumns::default()).unwrap()
}

fn bank_schema() -> TableSchema {
    TableSchema::new(vec![])
        .with_column("Posted", FieldKind::Date)
        .with_column("Details", FieldKind::Text)
        .with_column("Amount", FieldKind::Amount)
        .with_column("Ref", FieldKind::TransactionNumber)
}

fn bank_entries() -> Vec<LedgerEntry> {
    let raw = read_csv_table(fixture("bank.csv"), SourceKind::Bank, &CsvOptions::default()).unwrap();
    let schema = bank_schema();
    let clean = clean_table(&Normalizer::default(), &raw, &schema).unwrap();
    clean.entries(&EntryColumns::from_schema(&schema)).unwrap()
}

#[test]
fn test_cashbook_rows_are_canonical() {
    let entries = cashbook_entries();
    assert_eq!(entries.len(), 6);

    assert_eq!(entries[0].amount, Some(5000.0));
    assert_eq!(entries[2].amount, Some(0.125));
    assert_eq!(entries[3].amount, Some(-89.99));
    assert_eq!(entries[3].trans_num, Some(1004));
    assert_eq!(entries[4].trans_num, None);
    assert_eq!(
        entries[1].date.map(|d| d.date()),
        NaiveDate::from_ymd_opt(2024, 1, 3)
    );

    let last = &entries[5];
    assert_eq!(last.date, None);
    assert_eq!(last.amount, None);
    assert!(!last.is_matchable());
}

#[test]
fn test_both_sources_agree_after_cleaning() {
    let cashbook: HashMap<u64, LedgerEntry> = cashbook_entries()
        .into_iter()
        .filter_map(|e| e.trans_num.map(|n| (n, e)))
        .collect();

    let mut agreed = 0;
    for bank in bank_entries() {
        let Some(n) = bank.trans_num else { continue };
        let Some(cb) = cashbook.get(&n) else { continue };
        assert_eq!(cb.date, bank.date, "date for {n}");
        assert_eq!(cb.amount, bank.amount, "amount for {n}");
        assert_eq!(cb.description, bank.description, "description for {n}");
        agreed += 1;
    }
    assert_eq!(agreed, 3);
}

#[test]
fn test_reports_flag_malformed_rows() {
    let raw = read_csv_table(fixture("cashbook.csv"), SourceKind::Cashbook, &CsvOptions::default())
        .unwrap();
    let clean = clean_table(&Normalizer::default(), &raw, &TableSchema::default()).unwrap();

    let date = &clean.field("DATE").unwrap().report;
    assert_eq!(date.malformed_rows, vec![5]);

    let trans = &clean.field("TRANS_NUM").unwrap().report;
    assert_eq!(trans.present, 4);
    assert_eq!(trans.malformed_rows, vec![4]);
    assert_eq!(trans.absent, 1);
}

#[test]
fn test_strict_isin_column_rejects_nothing_here() {
    let raw = read_csv_table(fixture("cashbook.csv"), SourceKind::Cashbook, &CsvOptions::default())
        .unwrap();
    let schema = TableSchema::new(vec![]).with_column("ISIN", FieldKind::Identifier { strict: true });
    let clean = clean_table(&Normalizer::default(), &raw, &schema).unwrap();
    let isin = clean.field("ISIN").unwrap();
    assert_eq!(isin.report.present, 1);
    assert_eq!(isin.values.display(2).as_deref(), Some("US0378331005"));
}

#[test]
fn test_description_text_same_with_or_without_inference() {
    let text = "DESCRIPTION\nInvoice 7\n10.50\n2E5\n";
    let schema = TableSchema::new(vec![]).with_column("DESCRIPTION", FieldKind::Text);
    let descriptions = |opts: CsvOptions| {
        let raw = read_csv_table_from_reader(text.as_bytes(), SourceKind::Cashbook, &opts).unwrap();
        let clean = clean_table(&Normalizer::default(), &raw, &schema).unwrap();
        clean.field("DESCRIPTION").unwrap().values.as_text().unwrap().to_vec()
    };

    let inferred = descriptions(CsvOptions::default());
    let raw_text = descriptions(CsvOptions::default().with_infer_numbers(false));
    assert_eq!(inferred, raw_text);
    assert_eq!(inferred[1].as_deref(), Some("10 50"));
}
