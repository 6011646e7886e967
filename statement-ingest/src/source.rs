//! Table-extraction collaborator contract.
//!
//! Turning PDF geometry into tables happens elsewhere. Whatever does it hands
//! us pages in document order, each page a list of tables, each table a list
//! of rows of [`Cell`](crate::Cell)s.

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::path::Path;

use crate::types::Table;

/// An open document that yields extracted tables page by page.
pub trait TableDocument {
    fn page_count(&self) -> usize;

    /// Tables on `page_index` (0-based), in extraction order.
    fn extract_tables(&mut self, page_index: usize) -> Result<Vec<Table>>;

    /// Release the underlying handle. Called exactly once by the extractor.
    fn close(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Opens documents by path.
pub trait TableSource {
    type Document: TableDocument;

    fn open(&self, path: &Path) -> Result<Self::Document>;
}

/// Pre-extracted pages held in memory.
///
/// JSON form: `{"pages": [[[["01-02-2023", "Grocery", "500.00", null, 1000]]]]}`
/// (pages → tables → rows → cells).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MemoryDocument {
    pub pages: Vec<Vec<Table>>,
}

impl MemoryDocument {
    pub fn new(pages: Vec<Vec<Table>>) -> Self {
        Self { pages }
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        serde_json::from_str(s).context("parse extracted tables json")
    }
}

impl TableDocument for MemoryDocument {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn extract_tables(&mut self, page_index: usize) -> Result<Vec<Table>> {
        match self.pages.get(page_index) {
            Some(tables) => Ok(tables.clone()),
            None => bail!("page {} out of range ({} pages)", page_index, self.pages.len()),
        }
    }
}
