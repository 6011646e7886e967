use anyhow::{Result, anyhow, bail};
use statement_ingest::{
    COLUMNS, MemoryDocument, RowExtractor, StatementLayout, Table, TableDocument, TableSource,
    TransactionRecord, extract_path,
};
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

const ICICI_JSON: &str = r#"{"pages": [
  [
    [
      ["Date", "Description", "Debit Amt", "Credit Amt", "Balance"],
      ["01-02-2023", "Grocery", "500.00", "", "10,000.00"],
      ["03-02-2023", " UPI/Coffee ", "120.50", null, "9,879.50"],
      ["Total", "", "", "", ""]
    ]
  ],
  [
    [
      ["  DATE ", "description", "Debit  Amt", "CREDIT AMT", "balance"],
      ["10-02-2023", "Salary", null, 50000, "59,879.50", "extra"]
    ],
    [
      ["15-02-2023", "Refund", "", "abc", "59,879.50"],
      ["Page 2 of 2"]
    ]
  ]
]}"#;

/// Serves a fixed document and counts how often documents get closed.
struct FixtureSource {
    doc: MemoryDocument,
    fail_on_page: Option<usize>,
    closes: Arc<AtomicUsize>,
}

struct FixtureDocument {
    inner: MemoryDocument,
    fail_on_page: Option<usize>,
    closes: Arc<AtomicUsize>,
}

impl TableSource for FixtureSource {
    type Document = FixtureDocument;

    fn open(&self, path: &Path) -> Result<FixtureDocument> {
        if path.extension().and_then(|e| e.to_str()) != Some("pdf") {
            bail!("not a pdf: {}", path.display());
        }
        Ok(FixtureDocument {
            inner: self.doc.clone(),
            fail_on_page: self.fail_on_page,
            closes: Arc::clone(&self.closes),
        })
    }
}

impl TableDocument for FixtureDocument {
    fn page_count(&self) -> usize {
        self.inner.page_count()
    }

    fn extract_tables(&mut self, page_index: usize) -> Result<Vec<Table>> {
        if self.fail_on_page == Some(page_index) {
            return Err(anyhow!("corrupt content stream"));
        }
        self.inner.extract_tables(page_index)
    }

    fn close(&mut self) -> Result<()> {
        self.closes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

fn fixture(fail_on_page: Option<usize>) -> FixtureSource {
    FixtureSource {
        doc: MemoryDocument::from_json_str(ICICI_JSON).unwrap(),
        fail_on_page,
        closes: Arc::new(AtomicUsize::new(0)),
    }
}

fn rec(date: &str, desc: &str, debit: Option<f64>, credit: Option<f64>, balance: Option<f64>) -> TransactionRecord {
    TransactionRecord {
        date: date.to_string(),
        description: desc.to_string(),
        debit_amount: debit,
        credit_amount: credit,
        balance,
    }
}

#[test]
fn test_multi_page_statement_in_encounter_order() {
    let source = fixture(None);
    let table = extract_path(&source, "icici_feb.pdf").unwrap();

    assert_eq!(table.columns(), COLUMNS);
    assert_eq!(
        table.records(),
        &[
            rec("01-02-2023", "Grocery", Some(500.0), None, Some(10000.0)),
            rec("03-02-2023", "UPI/Coffee", Some(120.5), None, Some(9879.5)),
            rec("10-02-2023", "Salary", None, Some(50000.0), Some(59879.5)),
            rec("15-02-2023", "Refund", None, None, Some(59879.5)),
        ]
    );
    assert_eq!(source.closes.load(Ordering::SeqCst), 1);
}

#[test]
fn test_extraction_is_deterministic() {
    let source = fixture(None);
    let extractor = RowExtractor::new(&StatementLayout::default()).unwrap();
    let first = extractor.extract_path(&source, "a.pdf").unwrap();
    let second = extractor.extract_path(&source, "a.pdf").unwrap();
    assert_eq!(first, second);
    assert_eq!(source.closes.load(Ordering::SeqCst), 2);
}

#[test]
fn test_page_fault_propagates_and_still_closes() {
    let source = fixture(Some(1));
    let err = extract_path(&source, "broken.pdf").unwrap_err();

    let chain = format!("{err:#}");
    assert!(chain.contains("broken.pdf"), "{chain}");
    assert!(chain.contains("page 2"), "{chain}");
    assert!(chain.contains("corrupt content stream"), "{chain}");
    assert_eq!(source.closes.load(Ordering::SeqCst), 1);
}

#[test]
fn test_open_failure_is_fatal() {
    let source = fixture(None);
    assert!(extract_path(&source, "statement.txt").is_err());
    assert_eq!(source.closes.load(Ordering::SeqCst), 0);
}

#[test]
fn test_stats_for_fixture() {
    let mut doc = MemoryDocument::from_json_str(ICICI_JSON).unwrap();
    let extractor = RowExtractor::new(&StatementLayout::default()).unwrap();
    let (table, stats) = extractor.extract_with_stats(&mut doc).unwrap();

    assert_eq!(table.len(), 4);
    assert_eq!(stats.pages, 2);
    assert_eq!(stats.tables, 3);
    assert_eq!(stats.rows, 8);
    assert_eq!(stats.data, 4);
    assert_eq!(stats.headers, 2);
    assert_eq!(stats.unclassified, 1);
    assert_eq!(stats.short, 1);
}

#[test]
fn test_custom_headers_from_toml() {
    let layout = StatementLayout::from_toml_str(
        r#"headers = ["Txn Date", "Narration", "Withdrawal", "Deposit", "Closing Balance"]"#,
    )
    .unwrap();
    let extractor = RowExtractor::new(&layout).unwrap();

    let mut doc = MemoryDocument::from_json_str(
        r#"{"pages": [[[
            ["Txn  Date", "NARRATION", "Withdrawal", "Deposit", "Closing Balance"],
            ["Date", "Description", "Debit Amt", "Credit Amt", "Balance"],
            ["01-02-2023", "ATM", "2,000", "", "8,000"],
            ["01/02/2023", "other date form", "1", "", "1"],
            ["Total", "", "", "", ""]
        ]]]}"#,
    )
    .unwrap();
    let (table, stats) = extractor.extract_with_stats(&mut doc).unwrap();

    assert_eq!(table.records(), &[rec("01-02-2023", "ATM", Some(2000.0), None, Some(8000.0))]);
    assert_eq!(stats.headers, 1);
    assert_eq!(stats.unclassified, 3);
}

#[test]
fn test_only_statement_dates_become_records() {
    assert!(StatementLayout::from_toml_str("date_pattern = '.*'").is_err());

    let source = fixture(None);
    let table = extract_path(&source, "icici_feb.pdf").unwrap();
    for record in &table {
        assert!(record.parsed_date().is_some(), "{}", record.date);
    }
}
