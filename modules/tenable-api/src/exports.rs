use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::{BTreeSet, HashSet, VecDeque};
use std::time::Duration;

use crate::client::TenableClient;
use crate::error::ApiError;

/// Parameters of an asset export job.
#[derive(Debug, Clone)]
pub struct AssetExportRequest {
    pub chunk_size: u32,
    /// `(category, value)` tag pairs; an empty list exports everything.
    pub tags: Vec<(String, String)>,
    pub poll_interval: Duration,
}

impl Default for AssetExportRequest {
    fn default() -> Self {
        AssetExportRequest { chunk_size: 1000, tags: Vec::new(), poll_interval: Duration::from_secs(5) }
    }
}

impl AssetExportRequest {
    fn body(&self) -> Value {
        let mut filters = Map::new();
        for (category, value) in &self.tags {
            let entry = filters.entry(format!("tag.{category}")).or_insert_with(|| Value::Array(Vec::new()));
            if let Value::Array(values) = entry {
                values.push(Value::String(value.clone()));
            }
        }
        let mut body = Map::new();
        body.insert("chunk_size".into(), Value::from(self.chunk_size));
        if !filters.is_empty() {
            body.insert("filters".into(), Value::Object(filters));
        }
        Value::Object(body)
    }
}

#[derive(Debug, Deserialize)]
struct ExportStarted {
    export_uuid: String,
}

#[derive(Debug, Deserialize)]
struct ExportStatus {
    status: String,
    #[serde(default)]
    chunks_available: Vec<u64>,
}

/// A running export job. Chunks are yielded once each, in id order, as the
/// job makes them available.
#[derive(Debug)]
pub struct AssetExport<'a> {
    client: &'a TenableClient,
    uuid: String,
    poll_interval: Duration,
    pending: VecDeque<u64>,
    seen: HashSet<u64>,
    finished: bool,
}

impl TenableClient {
    pub async fn start_asset_export(&self, req: &AssetExportRequest) -> Result<AssetExport<'_>, ApiError> {
        let started: ExportStarted = self.post_json("assets/export", &req.body()).await?;
        tracing::info!(uuid = %started.export_uuid, tags = ?req.tags, "asset export started");
        Ok(AssetExport {
            client: self,
            uuid: started.export_uuid,
            poll_interval: req.poll_interval,
            pending: VecDeque::new(),
            seen: HashSet::new(),
            finished: false,
        })
    }
}

impl AssetExport<'_> {
    pub fn uuid(&self) -> &str {
        &self.uuid
    }

    /// Next chunk of raw asset objects, or `None` once the job has finished
    /// and every chunk has been handed out.
    pub async fn next_chunk(&mut self) -> Result<Option<Vec<Value>>, ApiError> {
        loop {
            if let Some(chunk_id) = self.pending.pop_front() {
                let path = format!("assets/export/{}/chunks/{}", self.uuid, chunk_id);
                let assets: Vec<Value> = self.client.get_json(&path, &[]).await?;
                tracing::info!(chunk = chunk_id, assets = assets.len(), "export chunk downloaded");
                return Ok(Some(assets));
            }
            if self.finished {
                return Ok(None);
            }

            let path = format!("assets/export/{}/status", self.uuid);
            let status: ExportStatus = self.client.get_json(&path, &[]).await?;
            tracing::debug!(status = %status.status, chunks = ?status.chunks_available, "export status");
            match status.status.as_str() {
                "FINISHED" => self.finished = true,
                "ERROR" | "CANCELLED" => {
                    return Err(ApiError::ExportFailed { uuid: self.uuid.clone(), status: status.status.clone() });
                }
                _ => {}
            }
            let fresh: BTreeSet<u64> = status.chunks_available.into_iter().filter(|c| self.seen.insert(*c)).collect();
            self.pending.extend(fresh);

            if self.pending.is_empty() && !self.finished {
                tokio::time::sleep(self.poll_interval).await;
            }
        }
    }
}
