use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::asset::first_of;

/// A plugin attribute: one value, or every value when the name repeats.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Single(String),
    Multi(Vec<String>),
}

impl AttributeValue {
    fn push(&mut self, value: String) {
        match self {
            AttributeValue::Single(first) => {
                let first = std::mem::take(first);
                *self = AttributeValue::Multi(vec![first, value]);
            }
            AttributeValue::Multi(all) => all.push(value),
        }
    }

    fn truncate(&mut self, max_chars: usize) {
        match self {
            AttributeValue::Single(s) => *s = truncate_text(s, max_chars),
            AttributeValue::Multi(all) => all.iter_mut().for_each(|s| *s = truncate_text(s, max_chars)),
        }
    }
}

/// Plugin attributes in the order the API listed them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attributes(Vec<(String, AttributeValue)>);

impl Attributes {
    pub fn get(&self, name: &str) -> Option<&AttributeValue> {
        self.0.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(n, _)| n.as_str())
    }

    fn values_mut(&mut self) -> impl Iterator<Item = &mut AttributeValue> {
        self.0.iter_mut().map(|(_, v)| v)
    }
}

impl Serialize for Attributes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, value) in &self.0 {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PluginRecord {
    pub id: Option<u64>,
    pub name: Option<String>,
    pub family: Option<String>,
    pub attributes: Attributes,
}

impl PluginRecord {
    /// Builds the record from a plugin details response.
    pub fn from_api(v: &Value) -> Self {
        let pairs: Vec<(String, String)> = match v.get("attributes") {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|a| {
                    let name = a.get("attribute_name").and_then(Value::as_str)?;
                    let value = match a.get("attribute_value") {
                        Some(Value::String(s)) => s.clone(),
                        Some(Value::Null) | None => String::new(),
                        Some(other) => other.to_string(),
                    };
                    Some((name.to_string(), value))
                })
                .collect(),
            _ => Vec::new(),
        };
        PluginRecord {
            id: v.get("id").and_then(Value::as_u64),
            name: v.get("name").and_then(Value::as_str).map(str::to_string),
            family: v.get("family_name").or_else(|| v.get("family")).and_then(Value::as_str).map(str::to_string),
            attributes: collapse_attributes(pairs),
        }
    }

    pub fn truncate_attributes(&mut self, max_chars: usize) {
        self.attributes.values_mut().for_each(|a| a.truncate(max_chars));
    }
}

/// Collapses `(name, value)` pairs keeping first-seen order; repeated names
/// become lists.
pub fn collapse_attributes<I>(pairs: I) -> Attributes
where
    I: IntoIterator<Item = (String, String)>,
{
    let mut out: Vec<(String, AttributeValue)> = Vec::new();
    for (name, value) in pairs {
        match out.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => existing.push(value),
            None => out.push((name, AttributeValue::Single(value))),
        }
    }
    Attributes(out)
}

/// Cuts `s` to at most `max_chars` characters, marking the cut with `...`.
pub fn truncate_text(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &s[..idx]),
        None => s.to_string(),
    }
}

/// An asset reported by the vulnerability workbench for a plugin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AffectedAsset {
    pub id: String,
    pub hostname: String,
    pub ipv4: String,
    pub severities: BTreeMap<String, u64>,
}

impl AffectedAsset {
    pub fn from_api(v: &Value) -> Self {
        let severities = match v.get("severities") {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|s| {
                    let name = s.get("name").and_then(Value::as_str)?;
                    let count = s.get("count").and_then(Value::as_u64).unwrap_or(0);
                    (count > 0).then(|| (name.to_string(), count))
                })
                .collect(),
            _ => BTreeMap::new(),
        };
        AffectedAsset {
            id: v.get("id").and_then(Value::as_str).unwrap_or_default().to_string(),
            hostname: first_of(v, &["fqdn", "netbios_name", "agent_name", "hostname"]).unwrap_or_default(),
            ipv4: first_of(v, &["ipv4"]).unwrap_or_default(),
            severities,
        }
    }
}
