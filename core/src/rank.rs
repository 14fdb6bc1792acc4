use serde::Serialize;
use thiserror::Error;

use crate::table::Table;

pub const SCORE_COLUMN: &str = "exposure_score";

#[derive(Debug, Error, PartialEq)]
pub enum RankError {
    #[error("'{0}' (AES) field not found")]
    MissingColumn(&'static str),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedAsset {
    pub exposure_score: f64,
    pub id: String,
    pub ipv4: String,
    pub hostname: String,
}

/// Parses a score cell; anything non-numeric or non-finite counts as zero.
pub fn coerce_score(cell: &str) -> f64 {
    cell.trim().parse::<f64>().ok().filter(|v| v.is_finite()).unwrap_or(0.0)
}

/// Highest exposure scores first. Ties keep their order in the table.
pub fn top_exposed(table: &Table, n: usize) -> Result<Vec<RankedAsset>, RankError> {
    if table.column(SCORE_COLUMN).is_none() {
        return Err(RankError::MissingColumn(SCORE_COLUMN));
    }
    let mut ranked: Vec<RankedAsset> = (0..table.len())
        .map(|r| RankedAsset {
            exposure_score: coerce_score(table.cell(r, SCORE_COLUMN)),
            id: table.cell(r, "id").to_string(),
            ipv4: table.cell(r, "ipv4").to_string(),
            hostname: table.cell(r, "hostname").to_string(),
        })
        .collect();
    ranked.sort_by(|a, b| b.exposure_score.total_cmp(&a.exposure_score));
    ranked.truncate(n);
    Ok(ranked)
}
