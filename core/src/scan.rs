use serde::{Deserialize, Serialize};

/// Scan metadata as returned by the scan list endpoint. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanRecord {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl ScanRecord {
    pub fn is_completed(&self) -> bool {
        self.status.as_deref() == Some("completed")
    }
}
