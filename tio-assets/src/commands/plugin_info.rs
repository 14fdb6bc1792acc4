use anyhow::Result;
use serde::Serialize;
use tio_core::{AffectedAsset, PluginRecord};

use super::Context;

#[derive(Debug, Serialize)]
struct PluginReport {
    #[serde(flatten)]
    plugin: PluginRecord,
    affected_asset_count: usize,
    affected_assets_truncated: bool,
    affected_assets: Vec<AffectedAsset>,
}

pub async fn run(ctx: &Context<'_>, plugin_id: u64) -> Result<()> {
    let client = ctx.client()?;
    let raw = client.plugin_details(plugin_id).await?;
    let mut plugin = PluginRecord::from_api(&raw);
    plugin.id.get_or_insert(plugin_id);

    let affected = match client.plugin_affected_assets(plugin_id).await {
        Ok(list) => list.iter().map(AffectedAsset::from_api).collect(),
        Err(e) => {
            eprintln!("Warning: could not fetch assets affected by plugin {plugin_id}: {e}");
            Vec::new()
        }
    };

    let report = build_report(plugin, affected, ctx.settings.plugin_max_assets, ctx.settings.plugin_max_text);
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn build_report(mut plugin: PluginRecord, mut affected: Vec<AffectedAsset>, max_assets: usize, max_text: usize) -> PluginReport {
    plugin.truncate_attributes(max_text);
    let count = affected.len();
    affected.truncate(max_assets);
    PluginReport { plugin, affected_asset_count: count, affected_assets_truncated: count > max_assets, affected_assets: affected }
}
