//! Shared records and table logic for the tio-assets tool.

pub mod asset;
pub mod plugin;
pub mod rank;
pub mod scan;
pub mod search;
pub mod table;

pub use asset::{flatten_asset, friendly_details, host_names, AssetRecord, ASSET_COLUMNS};
pub use plugin::{collapse_attributes, truncate_text, AffectedAsset, AttributeValue, Attributes, PluginRecord};
pub use rank::{coerce_score, top_exposed, RankError, RankedAsset};
pub use scan::ScanRecord;
pub use search::{hostname_matches, Query};
pub use table::Table;
