//! statement-ingest: typed transaction rows from tables extracted out of bank statement PDFs.

pub mod classify;
pub mod coerce;
pub mod extractor;
pub mod layout;
pub mod source;
pub mod types;

pub use classify::RowClass;
pub use coerce::coerce_amount;
pub use extractor::{ExtractStats, RowExtractor, extract_path};
pub use layout::StatementLayout;
pub use source::{MemoryDocument, TableDocument, TableSource};
pub use types::{COLUMNS, Cell, Row, Table, TransactionRecord, TransactionTable};
