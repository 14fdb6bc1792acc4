//! Persistence for flattened asset datasets (CSV or Parquet, by extension).

mod arrow_schemas;
mod csv_io;
mod format;
mod parquet_io;

pub use format::{force_csv, DatasetFormat};

use anyhow::Result;
use std::path::Path;
use tio_core::{AssetRecord, Table};

/// Writes `records` in the format named by the path's extension.
pub fn save_assets(records: &[AssetRecord], path: &Path) -> Result<DatasetFormat> {
    let format = DatasetFormat::from_path(path);
    match format {
        DatasetFormat::Csv => csv_io::write_assets(records, path)?,
        DatasetFormat::Parquet => parquet_io::write_assets(records, path)?,
    }
    tracing::debug!(path = %path.display(), rows = records.len(), ?format, "dataset written");
    Ok(format)
}

/// Reads a dataset of any column set. A missing file surfaces as
/// `io::ErrorKind::NotFound` in the error chain.
pub fn load_table(path: &Path) -> Result<Table> {
    let table = match DatasetFormat::from_path(path) {
        DatasetFormat::Csv => csv_io::read_table(path)?,
        DatasetFormat::Parquet => parquet_io::read_table(path)?,
    };
    tracing::debug!(path = %path.display(), rows = table.len(), "dataset loaded");
    Ok(table)
}

/// True when `err` was caused by a file that does not exist.
pub fn is_not_found(err: &anyhow::Error) -> bool {
    err.chain().any(|e| {
        e.downcast_ref::<std::io::Error>().is_some_and(|io| io.kind() == std::io::ErrorKind::NotFound)
    })
}
