use serde::{Deserialize, Serialize};
use serde_json::Value;

// ---------------------------------------------------------------------------
// ReportRow — latest buylist price for one (card, finish)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    pub set: String,
    pub number: String,
    pub name: String,
    pub uuid: String,
    #[serde(rename = "scryfallId")]
    pub scryfall_id: String,
    pub finish: String,
    /// Price exactly as the snapshot holds it, usually a number or `null`.
    #[serde(default)]
    pub price: Value,
    pub price_date: String,
}

// ---------------------------------------------------------------------------
// Report — `{set, count, data}`
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub set: String,
    pub count: usize,
    pub data: Vec<ReportRow>,
}

impl Report {
    pub fn new(set: impl Into<String>, data: Vec<ReportRow>) -> Self {
        Self {
            set: set.into(),
            count: data.len(),
            data,
        }
    }
}
