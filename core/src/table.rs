use serde_json::{Map, Value};

use crate::asset::{AssetRecord, ASSET_COLUMNS};

/// A loaded dataset: whatever columns the file carried, every cell as text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Table { columns, rows: Vec::new() }
    }

    pub fn from_records(records: &[AssetRecord]) -> Self {
        Table {
            columns: ASSET_COLUMNS.iter().map(|c| c.to_string()).collect(),
            rows: records.iter().map(AssetRecord::to_row).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Cell text for `name` in `row`; empty when the column or cell is missing.
    pub fn cell(&self, row: usize, name: &str) -> &str {
        self.column(name)
            .and_then(|c| self.rows.get(row).and_then(|r| r.get(c)))
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn row_object(&self, row: usize) -> Value {
        let mut obj = Map::new();
        if let Some(cells) = self.rows.get(row) {
            for (name, cell) in self.columns.iter().zip(cells) {
                obj.insert(name.clone(), Value::String(cell.clone()));
            }
        }
        Value::Object(obj)
    }
}
