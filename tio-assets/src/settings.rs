use std::path::PathBuf;
use std::time::Duration;

use crate::cli::Cli;
use crate::config::Config;

pub const URL_VAR: &str = "TENABLE_URL";

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Effective settings: command-line flag, then config file, then default.
#[derive(Debug, Clone)]
pub struct Settings {
    pub api_url: String,
    pub timeout: Duration,
    pub chunk_size: u32,
    pub poll_interval: Duration,
    pub tag_category: String,
    pub tag_value: String,
    pub output: PathBuf,
    pub input: PathBuf,
    pub top: usize,
    pub force_csv: bool,
    pub format: OutputFormat,
    pub plugin_max_assets: usize,
    pub plugin_max_text: usize,
}

impl Settings {
    pub fn resolve(cli: &Cli, cfg: Option<&Config>, env_url: Option<String>) -> Self {
        let cfg = cfg.cloned().unwrap_or_default();
        let api = cfg.api.unwrap_or_default();
        let export = cfg.export.unwrap_or_default();
        let plugin = cfg.plugin.unwrap_or_default();
        Settings {
            api_url: env_url.filter(|u| !u.trim().is_empty()).or(api.url).unwrap_or_else(|| tenable_api::DEFAULT_URL.to_string()),
            timeout: Duration::from_secs(api.timeout_secs.unwrap_or(60)),
            chunk_size: export.chunk_size.unwrap_or(1000).max(1),
            poll_interval: Duration::from_secs(export.poll_interval_secs.unwrap_or(5)),
            tag_category: cli.tag_category.clone().or(export.tag_category).unwrap_or_else(|| "Location".to_string()),
            tag_value: cli.tag_value.clone().or(export.tag_value).unwrap_or_else(|| "London".to_string()),
            output: cli.output.clone().or_else(|| cfg.output.map(PathBuf::from)).unwrap_or_else(|| PathBuf::from("assets.csv")),
            input: cli.input.clone().or_else(|| cfg.input.map(PathBuf::from)).unwrap_or_else(|| PathBuf::from("assets.csv")),
            top: cli.top.or(cfg.top).unwrap_or(5),
            force_csv: cli.to_csv,
            format: if cli.to_json { OutputFormat::Json } else { OutputFormat::Text },
            plugin_max_assets: plugin.max_assets.unwrap_or(50),
            plugin_max_text: plugin.max_text_len.unwrap_or(1000),
        }
    }
}
