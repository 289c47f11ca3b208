use serde::Serialize;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use thiserror::Error;

use crate::models::{FulfilledBy, SkuListItem, SkuStatus};
use crate::utils::calculations::format_currency;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Csv => write!(f, "csv"),
            ExportFormat::Json => write!(f, "json"),
        }
    }
}

/// CSV row; money is pre-formatted so the file always shows two decimals.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SkuCsvRow<'a> {
    id: &'a str,
    sku_code: &'a str,
    asin: &'a str,
    active: SkuStatus,
    fulfilled_by: FulfilledBy,
    condition: &'a str,
    title: &'a str,
    qty: u32,
    main_image_url: &'a str,
    total_cost: String,
    shipping_fee: String,
    selling_price: String,
}

impl<'a> From<&'a SkuListItem> for SkuCsvRow<'a> {
    fn from(item: &'a SkuListItem) -> Self {
        Self {
            id: &item.id,
            sku_code: &item.sku_code,
            asin: &item.asin,
            active: item.active,
            fulfilled_by: item.fulfilled_by,
            condition: &item.condition,
            title: &item.title,
            qty: item.qty,
            main_image_url: item.main_image_url.as_deref().unwrap_or(""),
            total_cost: format_currency(item.total_cost),
            shipping_fee: format_currency(item.shipping_fee),
            selling_price: format_currency(item.selling_price),
        }
    }
}

pub fn write_csv<W: Write>(items: &[SkuListItem], writer: W) -> Result<(), ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for item in items {
        csv_writer.serialize(SkuCsvRow::from(item))?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn write_json<W: Write>(items: &[SkuListItem], mut writer: W) -> Result<(), ExportError> {
    serde_json::to_writer_pretty(&mut writer, items)?;
    writeln!(writer)?;
    Ok(())
}

pub fn write_items<W: Write>(
    items: &[SkuListItem],
    format: ExportFormat,
    writer: W,
) -> Result<(), ExportError> {
    match format {
        ExportFormat::Csv => write_csv(items, writer),
        ExportFormat::Json => write_json(items, writer),
    }
}

/// Export to `path`, or to stdout when no path is given.
pub fn export_items(
    items: &[SkuListItem],
    format: ExportFormat,
    path: Option<&Path>,
) -> Result<(), ExportError> {
    match path {
        Some(path) => {
            tracing::info!("Exporting {} SKUs as {} to {}", items.len(), format, path.display());
            write_items(items, format, File::create(path)?)
        }
        None => write_items(items, format, io::stdout().lock()),
    }
}
