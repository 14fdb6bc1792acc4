use serde::Deserialize;
use serde_json::Value;

use crate::client::TenableClient;
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
struct AssetList {
    #[serde(default)]
    assets: Vec<Value>,
}

impl TenableClient {
    /// The live asset list (the lightweight `/assets` view, not an export).
    pub async fn list_assets(&self) -> Result<Vec<Value>, ApiError> {
        let list: AssetList = self.get_json("assets", &[]).await?;
        Ok(list.assets)
    }

    /// Full details of one asset by its UUID.
    pub async fn asset_details(&self, asset_id: &str) -> Result<Value, ApiError> {
        self.get_json(&format!("assets/{asset_id}"), &[]).await
    }
}
