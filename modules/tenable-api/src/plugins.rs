use serde::Deserialize;
use serde_json::Value;

use crate::client::TenableClient;
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
struct WorkbenchAssets {
    #[serde(default)]
    assets: Vec<Value>,
}

impl TenableClient {
    /// Plugin metadata including its `attributes` array.
    pub async fn plugin_details(&self, plugin_id: u64) -> Result<Value, ApiError> {
        self.get_json(&format!("plugins/plugin/{plugin_id}"), &[]).await
    }

    /// Assets on which the vulnerability workbench reports `plugin_id`.
    pub async fn plugin_affected_assets(&self, plugin_id: u64) -> Result<Vec<Value>, ApiError> {
        let query = [
            ("filter.0.filter", "plugin.id".to_string()),
            ("filter.0.quality", "eq".to_string()),
            ("filter.0.value", plugin_id.to_string()),
            ("filter.search_type", "and".to_string()),
        ];
        let found: WorkbenchAssets = self.get_json("workbenches/assets/vulnerabilities", &query).await?;
        Ok(found.assets)
    }
}
