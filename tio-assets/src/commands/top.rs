use anyhow::{bail, Result};
use tio_core::{top_exposed, RankError, RankedAsset, Table};

use super::Context;
use crate::settings::OutputFormat;

/// Ranks `dataset` when a previous step produced one, else the input file.
pub fn run(ctx: &Context<'_>, dataset: Option<Table>) -> Result<()> {
    let s = ctx.settings;
    let table = match dataset {
        Some(t) => t,
        None => match asset_store::load_table(&s.input) {
            Ok(t) => {
                if s.format == OutputFormat::Text {
                    println!("\nLoaded {} assets from '{}'", t.len(), s.input.display());
                }
                t
            }
            Err(e) if asset_store::is_not_found(&e) => {
                bail!("Error: File '{}' not found. Run --export-assets first.", s.input.display());
            }
            Err(e) => return Err(e.context(format!("Error loading '{}'", s.input.display()))),
        },
    };

    if s.format == OutputFormat::Text {
        println!("\n--- Top {} Most Exposed Assets (AES) ---", s.top);
    }
    for line in report(&table, s.top, s.format) {
        println!("{line}");
    }
    Ok(())
}

fn report(table: &Table, n: usize, format: OutputFormat) -> Vec<String> {
    if table.is_empty() {
        return vec!["No data available for analysis.".to_string()];
    }
    match top_exposed(table, n) {
        Err(RankError::MissingColumn(_)) => {
            vec!["Warning: 'exposure_score' (AES) field not found. Check license/permissions.".to_string()]
        }
        Ok(ranked) => match format {
            OutputFormat::Text => render(&ranked),
            OutputFormat::Json => vec![serde_json::to_string_pretty(&ranked).unwrap_or_else(|_| "[]".to_string())],
        },
    }
}

fn render(ranked: &[RankedAsset]) -> Vec<String> {
    let mut lines = vec![format!("{:<10} | {:<15} | {}", "AES", "IP Address", "Hostname"), "-".repeat(50)];
    for r in ranked {
        lines.push(format!("{:<10} | {:<15} | {}", r.exposure_score as i64, r.ipv4, r.hostname));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> Table {
        let mut t = Table::new(vec!["ipv4".into(), "hostname".into(), "exposure_score".into()]);
        t.rows.push(vec!["10.0.0.1".into(), "low".into(), "120.9".into()]);
        t.rows.push(vec!["10.0.0.2".into(), "high".into(), "951".into()]);
        t.rows.push(vec!["10.0.0.3".into(), "odd".into(), "n/a".into()]);
        t
    }

    #[test]
    fn text_report_truncates_scores_to_integers() {
        let lines = report(&table(), 2, OutputFormat::Text);
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[2], "951        | 10.0.0.2        | high");
        assert_eq!(lines[3], "120        | 10.0.0.1        | low");
    }

    #[test]
    fn json_report_is_an_array() {
        let lines = report(&table(), 10, OutputFormat::Json);
        let v: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
        assert_eq!(v.as_array().unwrap().len(), 3);
        assert_eq!(v[2]["hostname"], "odd");
        assert_eq!(v[2]["exposure_score"], 0.0);
    }

    #[test]
    fn empty_and_columnless_tables_warn() {
        let empty = Table::new(vec!["exposure_score".into()]);
        assert_eq!(report(&empty, 5, OutputFormat::Text), vec!["No data available for analysis."]);
        let mut no_score = Table::new(vec!["hostname".into()]);
        no_score.rows.push(vec!["h".into()]);
        assert!(report(&no_score, 5, OutputFormat::Text)[0].starts_with("Warning: 'exposure_score'"));
    }

    #[test]
    fn missing_input_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("gone.csv");
        let (_, settings) = crate::commands::test_utils::cli_settings(&["-i", input.to_str().unwrap()]);
        let ctx = Context { settings: &settings, client: None };
        let err = run(&ctx, None).unwrap_err();
        assert_eq!(format!("{err:#}"), format!("Error: File '{}' not found. Run --export-assets first.", input.display()));
    }
}
