use serde::Deserialize;
use tio_core::ScanRecord;

use crate::client::TenableClient;
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
struct ScanList {
    #[serde(default)]
    scans: Option<Vec<ScanRecord>>,
}

impl TenableClient {
    /// Every scan visible to the API keys; a `null` list comes back empty.
    pub async fn list_scans(&self) -> Result<Vec<ScanRecord>, ApiError> {
        let list: ScanList = self.get_json("scans", &[]).await?;
        Ok(list.scans.unwrap_or_default())
    }
}
