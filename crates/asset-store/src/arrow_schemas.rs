use arrow::datatypes::{DataType, Field, Schema};

pub fn assets_schema() -> Schema {
    Schema::new(vec![
        Field::new("id", DataType::Utf8, false),
        Field::new("ipv4", DataType::Utf8, false),
        Field::new("hostname", DataType::Utf8, false),
        Field::new("os", DataType::Utf8, false),
        Field::new("exposure_score", DataType::Float64, true),
        Field::new("acr_score", DataType::Float64, true),
        Field::new("tags", DataType::Utf8, false),
    ])
}
