use anyhow::Result;
use serde_json::Value;
use std::path::Path;
use tio_core::{flatten_asset, friendly_details, host_names, hostname_matches};

use super::Context;

/// Where an asset id was resolved from, with the fields known at that point.
#[derive(Debug, PartialEq)]
enum Resolved {
    Cache { id: String, fields: Value },
    AssetList { id: String, fields: Value },
}

impl Resolved {
    fn id(&self) -> &str {
        match self {
            Resolved::Cache { id, .. } | Resolved::AssetList { id, .. } => id,
        }
    }

    fn fallback(self) -> Value {
        let (mut fields, source) = match self {
            Resolved::Cache { fields, .. } => (fields, "cache"),
            Resolved::AssetList { fields, .. } => (fields, "asset_list"),
        };
        if let Value::Object(map) = &mut fields {
            map.insert("source".into(), Value::String(source.into()));
        }
        fields
    }
}

pub async fn run(ctx: &Context<'_>, hostname: &str) -> Result<()> {
    match lookup(ctx, hostname).await? {
        Some(out) => println!("{}", serde_json::to_string_pretty(&out)?),
        None => println!("Asset '{hostname}' not found"),
    }
    Ok(())
}

/// Details for `hostname`, degraded to the resolved fields when the detail
/// call fails. `None` when no asset carries that name.
async fn lookup(ctx: &Context<'_>, hostname: &str) -> Result<Option<Value>> {
    let client = ctx.client()?;
    let resolved = match find_in_cache(&ctx.settings.input, hostname) {
        Some(found) => Some(found),
        None => {
            tracing::info!(hostname, "not in local dataset, querying asset list");
            find_in_list(&client.list_assets().await?, hostname)
        }
    };
    let Some(resolved) = resolved else {
        return Ok(None);
    };

    let out = match client.asset_details(resolved.id()).await {
        Ok(details) => friendly_details(&details),
        Err(e) => {
            eprintln!("Warning: could not fetch details for asset {}: {e}. Showing cached fields only.", resolved.id());
            resolved.fallback()
        }
    };
    Ok(Some(out))
}

fn find_in_cache(path: &Path, hostname: &str) -> Option<Resolved> {
    let table = match asset_store::load_table(path) {
        Ok(t) => t,
        Err(e) => {
            if !asset_store::is_not_found(&e) {
                tracing::warn!(path = %path.display(), error = %format!("{e:#}"), "local dataset unreadable");
            }
            return None;
        }
    };
    (0..table.len())
        .find(|&r| !table.cell(r, "id").is_empty() && hostname_matches(table.cell(r, "hostname"), hostname))
        .map(|r| Resolved::Cache { id: table.cell(r, "id").to_string(), fields: table.row_object(r) })
}

fn find_in_list(assets: &[Value], hostname: &str) -> Option<Resolved> {
    assets
        .iter()
        .find(|a| host_names(a).iter().any(|h| hostname_matches(h, hostname)))
        .map(flatten_asset)
        .filter(|rec| !rec.id.is_empty())
        .map(|rec| Resolved::AssetList { id: rec.id.clone(), fields: serde_json::to_value(&rec).unwrap_or(Value::Null) })
}
