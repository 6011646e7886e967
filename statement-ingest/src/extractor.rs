//! Table rows → [`TransactionTable`].
//!
//! Every row of every table on every page is cleaned and classified in the
//! order the collaborator yields it. Only rows whose first cell is a statement
//! date survive; headers, totals and fragments are dropped without error.

use anyhow::{Context, Result};
use std::path::Path;
use tracing::{debug, info, warn};

use crate::classify::{ROW_WIDTH, RowClass, RowClassifier, clean_row};
use crate::coerce::coerce_amount;
use crate::layout::StatementLayout;
use crate::source::{TableDocument, TableSource};
use crate::types::{TransactionRecord, TransactionTable};

/// Per-call counts, mostly for diagnosing why a statement came out short.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractStats {
    pub pages: usize,
    pub tables: usize,
    pub rows: usize,
    pub data: usize,
    pub headers: usize,
    pub short: usize,
    pub unclassified: usize,
}

impl ExtractStats {
    fn record(&mut self, class: RowClass) {
        self.rows += 1;
        match class {
            RowClass::Data => self.data += 1,
            RowClass::Header => self.headers += 1,
            RowClass::Short => self.short += 1,
            RowClass::Unclassified => self.unclassified += 1,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RowExtractor {
    classifier: RowClassifier,
}

impl RowExtractor {
    pub fn new(layout: &StatementLayout) -> Result<Self> {
        let classifier = RowClassifier::new(&layout.headers).context("compile row patterns")?;
        Ok(Self { classifier })
    }

    pub fn classify(&self, cleaned: &[String]) -> RowClass {
        self.classifier.classify(cleaned)
    }

    pub fn extract<D: TableDocument + ?Sized>(&self, doc: &mut D) -> Result<TransactionTable> {
        Ok(self.extract_with_stats(doc)?.0)
    }

    pub fn extract_with_stats<D: TableDocument + ?Sized>(
        &self,
        doc: &mut D,
    ) -> Result<(TransactionTable, ExtractStats)> {
        let mut stats = ExtractStats::default();
        let mut rows: Vec<Vec<String>> = Vec::new();

        for page in 0..doc.page_count() {
            let tables = doc
                .extract_tables(page)
                .with_context(|| format!("extract tables from page {}", page + 1))?;
            stats.pages += 1;

            for (t, table) in tables.iter().enumerate() {
                stats.tables += 1;
                for (r, row) in table.iter().enumerate() {
                    let mut cleaned = clean_row(row);
                    let class = self.classify(&cleaned);
                    stats.record(class);

                    if class.is_data() {
                        cleaned.truncate(ROW_WIDTH);
                        rows.push(cleaned);
                    } else {
                        debug!(page = page + 1, table = t, row = r, ?class, "dropping row");
                    }
                }
            }
        }

        let records: Vec<TransactionRecord> = rows.into_iter().map(to_record).collect();

        info!(
            pages = stats.pages,
            tables = stats.tables,
            rows = stats.rows,
            transactions = records.len(),
            "extracted statement rows"
        );
        Ok((TransactionTable::new(records), stats))
    }

    /// Open `path`, extract, and close the document on every exit path.
    pub fn extract_path<S: TableSource>(&self, source: &S, path: impl AsRef<Path>) -> Result<TransactionTable> {
        let path = path.as_ref();
        let mut doc = source
            .open(path)
            .with_context(|| format!("opening {}", path.display()))?;

        let extracted = self.extract(&mut doc);
        let closed = doc
            .close()
            .with_context(|| format!("closing {}", path.display()));

        match (extracted, closed) {
            (Ok(table), Ok(())) => Ok(table),
            (Err(e), Ok(())) => Err(e.context(format!("reading {}", path.display()))),
            (Err(e), Err(close_err)) => {
                warn!(error = %close_err, "close failed after extraction fault");
                Err(e.context(format!("reading {}", path.display())))
            }
            (Ok(_), Err(close_err)) => Err(close_err),
        }
    }
}

/// Extract with the default (ICICI) layout.
pub fn extract_path<S: TableSource>(source: &S, path: impl AsRef<Path>) -> Result<TransactionTable> {
    RowExtractor::new(&StatementLayout::default())?.extract_path(source, path)
}

fn to_record(row: Vec<String>) -> TransactionRecord {
    let mut cells = row.into_iter();
    let mut next = || cells.next().unwrap_or_default();
    let date = next();
    let description = next();
    let debit = next();
    let credit = next();
    let balance = next();

    TransactionRecord {
        date,
        description,
        debit_amount: coerce_amount(&debit),
        credit_amount: coerce_amount(&credit),
        balance: coerce_amount(&balance),
    }
}
