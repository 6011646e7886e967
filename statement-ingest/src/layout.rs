//! Statement layout: the header labels a bank prints above its transactions.
//!
//! Defaults describe the ICICI statement table:
//!   Date         Description        Debit Amt     Credit Amt     Balance
//!   01-02-2023   Grocery            500.00                       10,000.00

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::types::COLUMNS;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StatementLayout {
    /// Header labels as printed, used only to recognize header rows.
    pub headers: [String; 5],
}

impl Default for StatementLayout {
    fn default() -> Self {
        Self {
            headers: COLUMNS.map(str::to_string),
        }
    }
}

impl StatementLayout {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s).context("parse statement layout")
    }
}
