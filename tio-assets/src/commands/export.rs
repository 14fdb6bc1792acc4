use anyhow::{Context as _, Result};
use std::path::PathBuf;
use std::time::Instant;
use tenable_api::{ApiError, AssetExportRequest};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use tio_core::{flatten_asset, AssetRecord, Table};

use super::Context;
use crate::cli::ExportScope;

fn now_rfc3339() -> String {
    OffsetDateTime::now_utc().format(&Rfc3339).unwrap_or_else(|_| String::new())
}

/// Runs the export and returns the exported table for later steps, or
/// `None` when the job produced no assets.
pub async fn run(ctx: &Context<'_>, scope: ExportScope) -> Result<Option<Table>> {
    let s = ctx.settings;
    let tags = match scope {
        ExportScope::Tagged => {
            println!("\n--- Asset Export (Tag: {}:{}) ---", s.tag_category, s.tag_value);
            vec![(s.tag_category.clone(), s.tag_value.clone())]
        }
        ExportScope::All => {
            println!("\n--- Asset Export (All Assets) ---");
            Vec::new()
        }
    };

    let Some(records) = export(ctx, tags).await? else {
        println!("{}", empty_line(ctx, scope));
        return Ok(None);
    };
    let path = save(ctx, &records)?;
    println!("{} assets exported to '{}'", records.len(), path.display());
    Ok(Some(Table::from_records(&records)))
}

fn empty_line(ctx: &Context<'_>, scope: ExportScope) -> String {
    match scope {
        ExportScope::Tagged => format!("No assets found with tag {}:{}", ctx.settings.tag_category, ctx.settings.tag_value),
        ExportScope::All => "No assets found".to_string(),
    }
}

pub fn error_line(e: &anyhow::Error) -> String {
    match e.downcast_ref::<ApiError>() {
        Some(api) if api.is_export_failure() => format!("Export job error: {api}"),
        _ => format!("Unexpected error: {e:#}"),
    }
}

async fn export(ctx: &Context<'_>, tags: Vec<(String, String)>) -> Result<Option<Vec<AssetRecord>>> {
    let s = ctx.settings;
    let req = AssetExportRequest { chunk_size: s.chunk_size, tags, poll_interval: s.poll_interval };
    let started = Instant::now();
    let mut job = ctx.client()?.start_asset_export(&req).await?;
    println!("Export job {} started at {}, downloading data...", job.uuid(), now_rfc3339());

    let mut records = Vec::new();
    while let Some(chunk) = job.next_chunk().await? {
        records.extend(chunk.iter().map(flatten_asset));
    }
    tracing::info!(assets = records.len(), elapsed_ms = started.elapsed().as_millis() as u64, "export complete");
    Ok(if records.is_empty() { None } else { Some(records) })
}

fn save(ctx: &Context<'_>, records: &[AssetRecord]) -> Result<PathBuf> {
    let s = ctx.settings;
    let path = if s.force_csv { asset_store::force_csv(&s.output) } else { s.output.clone() };
    asset_store::save_assets(records, &path).with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_utils::{cli_settings, client_for};
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn empty_export_names_the_tag() {
        let (_, settings) = cli_settings(&["--tag-category", "Env", "--tag-value", "prod"]);
        let ctx = Context { settings: &settings, client: None };
        assert_eq!(empty_line(&ctx, ExportScope::Tagged), "No assets found with tag Env:prod");
        assert_eq!(empty_line(&ctx, ExportScope::All), "No assets found");
    }

    #[test]
    fn failed_job_is_reported_as_export_error() {
        let failed = anyhow::Error::new(ApiError::ExportFailed { uuid: "exp-1".into(), status: "CANCELLED".into() });
        assert!(error_line(&failed).starts_with("Export job error: "));
        assert!(error_line(&failed).contains("CANCELLED"));
        let other = anyhow::anyhow!("disk full");
        assert_eq!(error_line(&other), "Unexpected error: disk full");
    }

    #[tokio::test]
    async fn tagged_export_without_assets_returns_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/assets/export"))
            .and(body_json(json!({ "chunk_size": 1000, "filters": { "tag.Location": ["London"] } })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "export_uuid": "exp-0" })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/assets/export/exp-0/status"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "FINISHED", "chunks_available": [] })))
            .mount(&server)
            .await;
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("assets.csv");
        let (_, settings) = cli_settings(&["-o", output.to_str().unwrap()]);
        let client = client_for(&server);
        let ctx = Context { settings: &settings, client: Some(&client) };

        assert!(run(&ctx, ExportScope::Tagged).await.unwrap().is_none());
        assert!(!output.exists());
    }

    #[tokio::test]
    async fn errored_job_surfaces_as_export_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/assets/export"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "export_uuid": "exp-e" })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/assets/export/exp-e/status"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "ERROR" })))
            .mount(&server)
            .await;
        let (_, settings) = cli_settings(&[]);
        let client = client_for(&server);
        let ctx = Context { settings: &settings, client: Some(&client) };

        let err = run(&ctx, ExportScope::All).await.unwrap_err();
        assert!(error_line(&err).starts_with("Export job error: "));
    }

    #[tokio::test]
    async fn parquet_output_is_forced_to_csv() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/assets/export"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "export_uuid": "exp-c" })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/assets/export/exp-c/status"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "FINISHED", "chunks_available": [1] })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/assets/export/exp-c/chunks/1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "id": "u-1", "ipv4s": ["10.0.0.1"] }])))
            .mount(&server)
            .await;
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("assets.parquet");
        let (_, settings) = cli_settings(&["--to-csv", "-o", output.to_str().unwrap()]);
        let client = client_for(&server);
        let ctx = Context { settings: &settings, client: Some(&client) };

        let table = run(&ctx, ExportScope::All).await.unwrap().unwrap();
        assert_eq!(table.len(), 1);
        assert!(dir.path().join("assets.csv").exists());
        assert!(!output.exists());
    }
}
