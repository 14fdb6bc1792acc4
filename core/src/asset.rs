use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Column order of a persisted asset dataset.
pub const ASSET_COLUMNS: [&str; 7] = ["id", "ipv4", "hostname", "os", "exposure_score", "acr_score", "tags"];

const IPV4_KEYS: &[&str] = &["ipv4s", "ipv4"];
const HOSTNAME_KEYS: &[&str] = &["hostnames", "hostname", "fqdns", "fqdn", "netbios_name"];
const OS_KEYS: &[&str] = &["operating_systems", "operating_system"];

/// One asset flattened to a single row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetRecord {
    pub id: String,
    pub ipv4: String,
    pub hostname: String,
    pub os: String,
    pub exposure_score: Option<f64>,
    pub acr_score: Option<f64>,
    pub tags: String,
}

impl AssetRecord {
    /// Cell values in `ASSET_COLUMNS` order. Absent scores become empty cells.
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.ipv4.clone(),
            self.hostname.clone(),
            self.os.clone(),
            self.exposure_score.map(format_score).unwrap_or_default(),
            self.acr_score.map(format_score).unwrap_or_default(),
            self.tags.clone(),
        ]
    }
}

fn format_score(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 { format!("{}", v as i64) } else { v.to_string() }
}

/// Flattens an asset object from the export, list or detail endpoints.
///
/// Multi-valued attributes keep only their first element; missing values fall
/// back to an empty string (`Unknown` for the operating system).
pub fn flatten_asset(v: &Value) -> AssetRecord {
    AssetRecord {
        id: scalar_str(v.get("id")).unwrap_or_default(),
        ipv4: first_of(v, IPV4_KEYS).unwrap_or_default(),
        hostname: first_of(v, HOSTNAME_KEYS).unwrap_or_default(),
        os: first_of(v, OS_KEYS).unwrap_or_else(|| "Unknown".to_string()),
        exposure_score: score(v.get("exposure_score")),
        acr_score: score(v.get("acr_score")),
        tags: tag_pairs(v.get("tags")).join("; "),
    }
}

/// First non-empty value found under any of `keys`, in key order.
pub fn first_of(v: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|k| first_str(v.get(*k)))
}

fn first_str(v: Option<&Value>) -> Option<String> {
    match v? {
        Value::Array(items) => items.iter().find_map(|i| scalar_str(Some(i))),
        other => scalar_str(Some(other)),
    }
}

fn scalar_str(v: Option<&Value>) -> Option<String> {
    match v? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn all_str(v: Option<&Value>) -> Vec<String> {
    match v {
        Some(Value::Array(items)) => items.iter().filter_map(|i| scalar_str(Some(i))).collect(),
        other => scalar_str(other).into_iter().collect(),
    }
}

fn score(v: Option<&Value>) -> Option<f64> {
    match v? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}

/// Every hostname-like value an asset carries, in alias order.
pub fn host_names(v: &Value) -> Vec<String> {
    HOSTNAME_KEYS.iter().chain(["agent_name"].iter()).flat_map(|k| all_str(v.get(*k))).collect()
}

/// Renders tags as `Category:Value`, accepting both the export (`key`/`value`)
/// and the detail (`tag_key`/`tag_value`) shapes.
pub fn tag_pairs(v: Option<&Value>) -> Vec<String> {
    let Some(Value::Array(tags)) = v else { return Vec::new() };
    tags.iter()
        .filter_map(|t| {
            let key = t.get("key").or_else(|| t.get("tag_key")).and_then(Value::as_str)?;
            let value = t.get("value").or_else(|| t.get("tag_value")).and_then(Value::as_str).unwrap_or("");
            Some(format!("{key}:{value}"))
        })
        .collect()
}

/// Reduces an asset detail response to the fields worth reading on a terminal.
pub fn friendly_details(v: &Value) -> Value {
    let sources: Vec<String> = match v.get("sources") {
        Some(Value::Array(items)) => items.iter().filter_map(|s| s.get("name").and_then(Value::as_str)).map(str::to_string).collect(),
        _ => Vec::new(),
    };
    let mut out = Map::new();
    out.insert("id".into(), json!(scalar_str(v.get("id"))));
    out.insert("hostnames".into(), json!(all_str(v.get("hostname").or_else(|| v.get("hostnames")))));
    out.insert("fqdns".into(), json!(all_str(v.get("fqdn").or_else(|| v.get("fqdns")))));
    out.insert("ipv4".into(), json!(all_str(v.get("ipv4").or_else(|| v.get("ipv4s")))));
    out.insert("ipv6".into(), json!(all_str(v.get("ipv6").or_else(|| v.get("ipv6s")))));
    out.insert("mac_address".into(), json!(all_str(v.get("mac_address").or_else(|| v.get("mac_addresses")))));
    out.insert("operating_system".into(), json!(all_str(v.get("operating_system").or_else(|| v.get("operating_systems")))));
    out.insert("netbios_name".into(), json!(all_str(v.get("netbios_name"))));
    out.insert("agent_name".into(), json!(all_str(v.get("agent_name"))));
    out.insert("exposure_score".into(), json!(score(v.get("exposure_score"))));
    out.insert("acr_score".into(), json!(score(v.get("acr_score"))));
    out.insert("has_agent".into(), v.get("has_agent").cloned().unwrap_or(Value::Null));
    for key in ["first_seen", "last_seen", "last_authenticated_scan_date", "last_licensed_scan_date"] {
        out.insert(key.into(), v.get(key).cloned().unwrap_or(Value::Null));
    }
    out.insert("sources".into(), json!(sources));
    out.insert("tags".into(), json!(tag_pairs(v.get("tags"))));
    Value::Object(out)
}
