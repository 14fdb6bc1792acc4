use anyhow::Result;
use serde_json::Value;
use tio_core::{flatten_asset, AssetRecord, Query, Table};

use super::Context;
use crate::settings::OutputFormat;

pub async fn run(ctx: &Context<'_>, query: &str) -> Result<()> {
    let input = &ctx.settings.input;
    let table = match asset_store::load_table(input) {
        Ok(t) => {
            tracing::info!(path = %input.display(), "searching local dataset");
            t
        }
        Err(e) if asset_store::is_not_found(&e) => {
            tracing::info!(path = %input.display(), "no local dataset, searching live asset list");
            let records: Vec<AssetRecord> = ctx.client()?.list_assets().await?.iter().map(flatten_asset).collect();
            Table::from_records(&records)
        }
        Err(e) => return Err(e),
    };

    let hits = Query::parse(query).search_table(&table);
    match ctx.settings.format {
        OutputFormat::Text => {
            println!("\n--- Asset Search: '{query}' ---");
            for line in render(&table, &hits) {
                println!("{line}");
            }
        }
        OutputFormat::Json => {
            let rows: Vec<Value> = hits.iter().map(|&r| table.row_object(r)).collect();
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
    }
    Ok(())
}

fn render(table: &Table, hits: &[usize]) -> Vec<String> {
    let mut lines = Vec::with_capacity(hits.len() + 4);
    if !hits.is_empty() {
        lines.push(format!("{:<36} | {:<15} | {:<30} | {:<25} | {}", "ID", "IP Address", "Hostname", "OS", "AES"));
        lines.push("-".repeat(120));
        for &r in hits {
            lines.push(format!(
                "{:<36} | {:<15} | {:<30} | {:<25} | {}",
                table.cell(r, "id"),
                table.cell(r, "ipv4"),
                table.cell(r, "hostname"),
                table.cell(r, "os"),
                table.cell(r, "exposure_score")
            ));
        }
        lines.push(String::new());
    }
    lines.push(format!("Found {} matching assets", hits.len()));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_hits_prints_only_the_count() {
        let t = Table::new(vec!["id".into()]);
        assert_eq!(render(&t, &[]), vec!["Found 0 matching assets".to_string()]);
    }

    #[test]
    fn hits_render_in_table_order() {
        let mut t = Table::new(vec!["id".into(), "ipv4".into(), "hostname".into()]);
        t.rows.push(vec!["a".into(), "10.0.0.1".into(), "web".into()]);
        t.rows.push(vec!["b".into(), "10.0.0.2".into(), "db".into()]);
        let lines = render(&t, &[1]);
        assert!(lines[2].starts_with("b "));
        assert!(lines[2].contains("| 10.0.0.2 "));
        assert_eq!(lines.last().unwrap(), "Found 1 matching assets");
    }
}
