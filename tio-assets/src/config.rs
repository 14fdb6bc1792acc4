use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const DEFAULT_CONFIG: &str = "tio-assets.yaml";

#[derive(Debug, Default, Deserialize, Clone)]
pub struct ApiConfig {
    pub url: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Clone)]
pub struct ExportConfig {
    pub chunk_size: Option<u32>,
    pub poll_interval_secs: Option<u64>,
    pub tag_category: Option<String>,
    pub tag_value: Option<String>,
}

#[derive(Debug, Default, Deserialize, Clone)]
pub struct PluginConfig {
    pub max_assets: Option<usize>,
    pub max_text_len: Option<usize>,
}

#[derive(Debug, Default, Deserialize, Clone)]
pub struct Config {
    pub api: Option<ApiConfig>,
    pub export: Option<ExportConfig>,
    pub plugin: Option<PluginConfig>,
    pub output: Option<String>,
    pub input: Option<String>,
    pub top: Option<usize>,
}

/// Loads `path`, or `./tio-assets.yaml` when no path is given and it exists.
/// An unreadable or malformed file is logged and ignored.
pub fn load_config(path: Option<&Path>) -> Option<Config> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => {
            let p = Path::new(DEFAULT_CONFIG);
            if p.exists() { p.to_path_buf() } else { return None; }
        }
    };
    let s = match fs::read_to_string(&path) {
        Ok(s) => s,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "config file not readable");
            return None;
        }
    };
    match serde_yaml::from_str(&s) {
        Ok(cfg) => Some(cfg),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "config file ignored");
            None
        }
    }
}
