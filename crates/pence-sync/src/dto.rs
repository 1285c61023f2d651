//! Wire shapes for the REST endpoints. Field names follow the server's
//! single-letter keys, so everything here is rename-heavy by design.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Envelope of the bulk `GET data/all` response.
#[derive(Debug, Clone, Deserialize)]
pub struct BulkResponse {
    pub data: BulkData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BulkData {
    pub overview: OverviewDto,
    /// One node per category, keyed by category name.
    #[serde(flatten)]
    pub pages: HashMap<String, PageDto>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OverviewDto {
    /// Monthly cost series per category name, plus the `balance` series.
    pub cost: HashMap<String, Vec<i64>>,
    #[serde(rename = "startYearMonth")]
    pub start_year_month: Vec<i64>,
    #[serde(rename = "endYearMonth")]
    pub end_year_month: Vec<i64>,
    #[serde(rename = "currentYear")]
    pub current_year: i32,
    #[serde(rename = "currentMonth")]
    pub current_month: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PageDto {
    pub data: Vec<ItemDto>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ItemDto {
    #[serde(rename = "I")]
    pub id: i64,
    /// `[year, month, day]`.
    pub d: Vec<i64>,
    /// Item label.
    pub i: String,
    /// Cost in pence. Absent for pages without costs.
    #[serde(default)]
    pub c: i64,
    /// Consumable kind (food, general).
    #[serde(default)]
    pub k: Option<String>,
    /// Shop (food, general, holiday, social).
    #[serde(default)]
    pub s: Option<String>,
    /// Holiday name.
    #[serde(default)]
    pub h: Option<String>,
    /// Fund transactions.
    #[serde(default)]
    pub tr: Option<Vec<FundTransactionDto>>,
    /// Fund price history, most recent last.
    #[serde(default)]
    pub pr: Option<Vec<f64>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FundTransactionDto {
    pub units: f64,
    pub cost: i64,
}

/// Body of an item create/update request.
#[derive(Debug, Clone, Serialize)]
pub struct ItemBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub d: [i64; 3],
    pub i: String,
    pub c: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub k: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub s: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub h: Option<String>,
}

/// Response to a successful item create.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateResponse {
    pub id: i64,
}
