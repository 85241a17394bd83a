use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};
use crate::models::domain::{CargoCategory, Shipment, Transporter};

/// Request to rank transporters for a shipment
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ComputeMatchesRequest {
    #[validate(nested)]
    pub shipment: Shipment,
    /// Caller-supplied pool; the transporter directory is used when absent
    #[serde(default)]
    pub candidates: Option<Vec<Transporter>>,
    #[serde(default = "default_max_results")]
    #[serde(alias = "max_results", rename = "maxResults")]
    #[validate(range(min = 1))]
    pub max_results: u16,
    /// Reference time; the service clock is used when absent
    #[serde(default)]
    pub now: Option<DateTime<Utc>>,
}

fn default_max_results() -> u16 {
    10
}

impl ComputeMatchesRequest {
    /// Validate the request, the shipment and every supplied candidate
    pub fn validate_all(&self) -> Result<(), ValidationErrors> {
        self.validate()?;
        if let Some(candidates) = &self.candidates {
            for candidate in candidates {
                candidate.validate()?;
            }
        }
        Ok(())
    }
}

/// Query for a standalone seasonal multiplier lookup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonalMultiplierQuery {
    pub category: CargoCategory,
    /// Calendar date; today when absent
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

/// Query for price formatting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatPriceQuery {
    pub amount: i64,
}
