//! Row cleaning and classification.

use regex::Regex;

use crate::types::Cell;

/// Number of cells a transaction row needs.
pub const ROW_WIDTH: usize = 5;

/// Statement date, `DD-MM-YYYY`, matched against the whole first cell.
pub const DATE_PATTERN: &str = r"^\d{2}-\d{2}-\d{4}$";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowClass {
    /// Fewer than [`ROW_WIDTH`] cells.
    Short,
    /// First cell is a statement date.
    Data,
    /// The column header, repeated or not.
    Header,
    /// Totals, page footers and other stray text.
    Unclassified,
}

impl RowClass {
    pub fn is_data(self) -> bool {
        self == RowClass::Data
    }
}

pub fn clean_row(cells: &[Cell]) -> Vec<String> {
    cells.iter().map(Cell::normalized).collect()
}

/// Collapse whitespace runs, trim, lowercase.
pub fn normalize_label(ws: &Regex, s: &str) -> String {
    ws.replace_all(s.trim(), " ").trim().to_lowercase()
}

/// Compiled classification state for one statement layout.
#[derive(Debug, Clone)]
pub struct RowClassifier {
    date_re: Regex,
    ws_re: Regex,
    header: Vec<String>,
}

impl RowClassifier {
    pub fn new(headers: &[String; ROW_WIDTH]) -> Result<Self, regex::Error> {
        let date_re = Regex::new(DATE_PATTERN)?;
        let ws_re = Regex::new(r"\s+")?;
        let header = headers.iter().map(|h| normalize_label(&ws_re, h)).collect();
        Ok(Self { date_re, ws_re, header })
    }

    pub fn classify(&self, cleaned: &[String]) -> RowClass {
        if cleaned.len() < ROW_WIDTH {
            return RowClass::Short;
        }
        if self.date_re.is_match(&cleaned[0]) {
            return RowClass::Data;
        }

        let is_header = cleaned[..ROW_WIDTH]
            .iter()
            .zip(&self.header)
            .all(|(cell, label)| normalize_label(&self.ws_re, cell) == *label);
        if is_header {
            RowClass::Header
        } else {
            RowClass::Unclassified
        }
    }
}
