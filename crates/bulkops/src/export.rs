//! Export formatter.
//!
//! This module owns the column set and row ordering of an export; turning
//! rows into bytes is delegated to an `ExportEncoder` collaborator. Rows
//! sort by item name (id as tie-break) so the same selection always
//! produces the same file.

use core::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use stockops_inventory::InventoryItem;

/// Column headers of an inventory export, in output order.
pub const EXPORT_COLUMNS: [&str; 9] = [
    "id",
    "name",
    "category_id",
    "weight",
    "purchase_price",
    "sell_price",
    "stock",
    "min_stock",
    "active",
];

/// Supported export formats.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Excel,
}

impl core::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Csv => f.write_str("csv"),
            Self::Excel => f.write_str("excel"),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "csv" => Ok(Self::Csv),
            "excel" => Ok(Self::Excel),
            other => Err(ExportError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Export pipeline error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExportError {
    #[error("unsupported export format: {0}")]
    UnsupportedFormat(String),

    #[error("export encoding failed: {0}")]
    Encode(String),
}

/// External byte-encoding collaborator (CSV writer, spreadsheet library).
#[async_trait]
pub trait ExportEncoder: Send + Sync {
    async fn encode(
        &self,
        format: ExportFormat,
        columns: &[&str],
        rows: &[Vec<String>],
    ) -> Result<Vec<u8>, ExportError>;
}

#[async_trait]
impl<E> ExportEncoder for std::sync::Arc<E>
where
    E: ExportEncoder + ?Sized,
{
    async fn encode(
        &self,
        format: ExportFormat,
        columns: &[&str],
        rows: &[Vec<String>],
    ) -> Result<Vec<u8>, ExportError> {
        (**self).encode(format, columns, rows).await
    }
}

/// Converts an item selection into a downloadable byte payload.
pub struct Exporter<E> {
    encoder: E,
}

impl<E: ExportEncoder> Exporter<E> {
    pub fn new(encoder: E) -> Self {
        Self { encoder }
    }

    /// Format `items` for download.
    ///
    /// Row order is stable: name ascending, id as tie-break.
    pub async fn export(
        &self,
        items: &[InventoryItem],
        format: ExportFormat,
    ) -> Result<Vec<u8>, ExportError> {
        let mut sorted: Vec<&InventoryItem> = items.iter().collect();
        sorted.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));

        let rows: Vec<Vec<String>> = sorted.into_iter().map(item_row).collect();
        self.encoder.encode(format, &EXPORT_COLUMNS, &rows).await
    }
}

fn item_row(item: &InventoryItem) -> Vec<String> {
    vec![
        item.id.to_string(),
        item.name.clone(),
        item.category_id.to_string(),
        item.weight.to_string(),
        item.purchase_price.to_string(),
        item.sell_price.to_string(),
        item.stock.to_string(),
        item.min_stock.to_string(),
        item.active.to_string(),
    ]
}
