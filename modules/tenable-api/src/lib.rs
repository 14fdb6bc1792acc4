//! Client for the Tenable Vulnerability Management cloud API.
//!
//! Covers the handful of endpoints the asset tool needs: scan listing, asset
//! export jobs, asset lookups, plugin metadata and the vulnerability
//! workbench. Requests are authenticated with the `X-ApiKeys` header.

mod assets;
mod client;
mod error;
mod exports;
mod plugins;
mod scans;

#[cfg(test)]
pub(crate) mod test_utils;

pub use client::{ClientOptions, Credentials, TenableClient, DEFAULT_URL};
pub use error::ApiError;
pub use exports::{AssetExport, AssetExportRequest};
