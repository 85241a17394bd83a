use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use crate::core::seasonal::Season;
use crate::models::domain::{CargoCategory, Match};

/// Response for compute matches endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputeMatchesResponse {
    #[serde(rename = "requestId")]
    pub request_id: String,
    #[serde(rename = "shipmentId")]
    pub shipment_id: String,
    pub matches: Vec<Match>,
    #[serde(rename = "totalCandidates")]
    pub total_candidates: usize,
    #[serde(rename = "seasonalMultiplier")]
    pub seasonal_multiplier: f64,
    pub season: Season,
    #[serde(rename = "effectivePrice")]
    pub effective_price: i64,
    #[serde(rename = "formattedPrice")]
    pub formatted_price: String,
}

/// Response for seasonal multiplier lookup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonalMultiplierResponse {
    pub category: CargoCategory,
    pub date: NaiveDate,
    pub season: Season,
    pub multiplier: f64,
}

/// Response for price formatting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatPriceResponse {
    pub amount: i64,
    pub formatted: String,
}

/// Directory snapshot summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryResponse {
    pub transporters: usize,
    pub online: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
