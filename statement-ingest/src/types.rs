use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Output schema, in column order.
pub const COLUMNS: [&str; 5] = ["Date", "Description", "Debit Amt", "Credit Amt", "Balance"];

/// A single value as yielded by the table extractor.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "serde_json::Value")]
pub enum Cell {
    Absent,
    Text(String),
    /// Any non-string scalar, carried as its string form.
    Other(String),
}

impl Cell {
    /// Trimmed string form; absent cells become `""`.
    pub fn normalized(&self) -> String {
        match self {
            Cell::Absent => String::new(),
            Cell::Text(s) | Cell::Other(s) => s.trim().to_string(),
        }
    }
}

impl From<serde_json::Value> for Cell {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Cell::Absent,
            serde_json::Value::String(s) => Cell::Text(s),
            other => Cell::Other(other.to_string()),
        }
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Cell::Text(s)
    }
}

impl From<f64> for Cell {
    /// Whole numbers keep their `.0` (`1500.0`), as in the JSON form.
    fn from(v: f64) -> Self {
        Cell::Other(format!("{v:?}"))
    }
}

impl From<i64> for Cell {
    fn from(v: i64) -> Self {
        Cell::Other(v.to_string())
    }
}

impl<T: Into<Cell>> From<Option<T>> for Cell {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Cell::Absent)
    }
}

pub type Row = Vec<Cell>;
pub type Table = Vec<Row>;

/// One normalized statement line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Verbatim `DD-MM-YYYY`.
    pub date: String,
    pub description: String,
    pub debit_amount: Option<f64>,
    pub credit_amount: Option<f64>,
    pub balance: Option<f64>,
}

impl TransactionRecord {
    /// Day-month-year reading of `date`, if it names a real calendar day.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%d-%m-%Y").ok()
    }
}

/// Ordered records with the fixed five-column schema in [`COLUMNS`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionTable {
    records: Vec<TransactionRecord>,
}

impl TransactionTable {
    pub fn new(records: Vec<TransactionRecord>) -> Self {
        Self { records }
    }

    pub fn columns(&self) -> [&'static str; 5] {
        COLUMNS
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TransactionRecord> {
        self.records.iter()
    }

    pub fn records(&self) -> &[TransactionRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<TransactionRecord> {
        self.records
    }
}

impl IntoIterator for TransactionTable {
    type Item = TransactionRecord;
    type IntoIter = std::vec::IntoIter<TransactionRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a TransactionTable {
    type Item = &'a TransactionRecord;
    type IntoIter = std::slice::Iter<'a, TransactionRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
