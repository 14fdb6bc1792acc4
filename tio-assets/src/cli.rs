use clap::{ArgAction, Parser};
use std::path::PathBuf;

const EXAMPLES: &str = "\
Examples:
  tio-assets --list-scans
  tio-assets --export-assets --tag-category Location --tag-value London
  tio-assets --export-all -o all_assets.parquet
  tio-assets --asset-info win-2019
  tio-assets --plugin-info 10114
  tio-assets --search-assets 192.168.1
  tio-assets --search-assets 10.0.0.0/24 --to-json
  tio-assets --top-assets --input assets.csv --top 10
  tio-assets --all --tag-category Location --tag-value London";

#[derive(Debug, Parser)]
#[command(name = "tio-assets", version, about = "Tenable One Asset Analysis Tool", after_help = EXAMPLES)]
pub struct Cli {
    /// List all completed scans
    #[arg(long)]
    pub list_scans: bool,
    /// Export assets filtered by tag
    #[arg(long)]
    pub export_assets: bool,
    /// Export all assets without tag filtering
    #[arg(long)]
    pub export_all: bool,
    /// Get detailed asset info by hostname (JSON output)
    #[arg(long, value_name = "HOSTNAME")]
    pub asset_info: Option<String>,
    /// Get plugin details and affected assets (JSON output)
    #[arg(long, value_name = "PLUGIN_ID")]
    pub plugin_info: Option<u64>,
    /// Search assets by IP address, CIDR, hostname or id
    #[arg(long, value_name = "QUERY")]
    pub search_assets: Option<String>,
    /// Display top exposed assets by AES score
    #[arg(long)]
    pub top_assets: bool,
    /// Run list-scans, export-assets and top-assets
    #[arg(long)]
    pub all: bool,
    /// Tag category for filtering assets (default: Location)
    #[arg(long)]
    pub tag_category: Option<String>,
    /// Tag value for filtering assets (default: London)
    #[arg(long)]
    pub tag_value: Option<String>,
    /// Output dataset path; .parquet/.pq writes Parquet, anything else CSV (default: assets.csv)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
    /// Input dataset for lookups and top-assets (default: assets.csv)
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,
    /// Number of top assets to display (default: 5)
    #[arg(long)]
    pub top: Option<usize>,
    /// Always write the exported dataset as CSV
    #[arg(long)]
    pub to_csv: bool,
    /// Print scan, search and ranking results as JSON
    #[arg(long)]
    pub to_json: bool,
    /// Optional config file (YAML). If omitted, loads ./tio-assets.yaml if present.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ExportScope {
    Tagged,
    All,
}

/// The commands selected on the command line, in execution order.
#[derive(Debug, Clone, PartialEq)]
pub struct Plan {
    pub list_scans: bool,
    pub export: Option<ExportScope>,
    pub asset_info: Option<String>,
    pub plugin_info: Option<u64>,
    pub search: Option<String>,
    pub top_assets: bool,
}

impl Cli {
    pub fn plan(&self) -> Plan {
        let export = if self.export_all {
            Some(ExportScope::All)
        } else if self.export_assets || self.all {
            Some(ExportScope::Tagged)
        } else {
            None
        };
        Plan {
            list_scans: self.list_scans || self.all,
            export,
            asset_info: self.asset_info.clone(),
            plugin_info: self.plugin_info,
            search: self.search_assets.clone(),
            top_assets: self.top_assets || self.all,
        }
    }
}

impl Plan {
    pub fn is_empty(&self) -> bool {
        !self.list_scans
            && self.export.is_none()
            && self.asset_info.is_none()
            && self.plugin_info.is_none()
            && self.search.is_none()
            && !self.top_assets
    }

    /// Everything except a lone top-assets ranking talks to the API.
    pub fn needs_client(&self) -> bool {
        self.list_scans || self.export.is_some() || self.asset_info.is_some() || self.plugin_info.is_some() || self.search.is_some()
    }
}
