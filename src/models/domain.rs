use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use validator::{Validate, ValidationError};

/// Category of cargo carried by a shipment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CargoCategory {
    Food,
    Tobacco,
    Maize,
    General,
    Livestock,
    Fertilizer,
    Construction,
    Fuel,
}

impl CargoCategory {
    pub const ALL: [CargoCategory; 8] = [
        CargoCategory::Food,
        CargoCategory::Tobacco,
        CargoCategory::Maize,
        CargoCategory::General,
        CargoCategory::Livestock,
        CargoCategory::Fertilizer,
        CargoCategory::Construction,
        CargoCategory::Fuel,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CargoCategory::Food => "food",
            CargoCategory::Tobacco => "tobacco",
            CargoCategory::Maize => "maize",
            CargoCategory::General => "general",
            CargoCategory::Livestock => "livestock",
            CargoCategory::Fertilizer => "fertilizer",
            CargoCategory::Construction => "construction",
            CargoCategory::Fuel => "fuel",
        }
    }
}

impl fmt::Display for CargoCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A directed city pair, e.g. Blantyre -> Lilongwe
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoutePair {
    pub origin: String,
    pub destination: String,
}

impl RoutePair {
    pub fn new(origin: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
        }
    }
}

/// Completed trips a transporter has on one directed city pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteExperience {
    pub origin: String,
    pub destination: String,
    pub trips: u32,
}

/// A posted load waiting for a transporter
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_shipment_invariants"))]
pub struct Shipment {
    #[validate(length(min = 1))]
    pub id: String,
    #[validate(length(min = 1))]
    pub origin: String,
    #[validate(length(min = 1))]
    pub destination: String,
    #[serde(rename = "weightKg")]
    #[validate(range(exclusive_min = 0.0))]
    pub weight_kg: f64,
    #[serde(rename = "cargoCategory")]
    pub cargo_category: CargoCategory,
    #[validate(range(min = 1))]
    pub price: i64,
    #[serde(rename = "pickupDate")]
    pub pickup_date: DateTime<Utc>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// Cross-field invariants: distinct endpoints, pickup not before posting
fn validate_shipment_invariants(shipment: &Shipment) -> Result<(), ValidationError> {
    if shipment.origin.trim().eq_ignore_ascii_case(shipment.destination.trim()) {
        return Err(ValidationError::new("origin_equals_destination"));
    }
    if shipment.pickup_date < shipment.created_at {
        return Err(ValidationError::new("pickup_before_creation"));
    }
    Ok(())
}

/// One vehicle + driver unit that can be offered a shipment
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Transporter {
    #[validate(length(min = 1))]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub verified: bool,
    #[serde(rename = "ratingAverage", default)]
    #[validate(range(min = 0.0, max = 5.0))]
    pub rating_average: f64,
    #[serde(rename = "ratingCount", default)]
    pub rating_count: u32,
    #[serde(rename = "vehicleCapacityKg")]
    #[validate(range(exclusive_min = 0.0))]
    pub vehicle_capacity_kg: f64,
    #[serde(rename = "vehiclePlate")]
    pub vehicle_plate: String,
    #[serde(rename = "routeExperience", default)]
    pub route_experience: Vec<RouteExperience>,
    #[serde(rename = "returnRouteHistory", default)]
    pub return_route_history: Vec<RoutePair>,
    #[serde(rename = "currentLocation")]
    #[validate(length(min = 1))]
    pub current_location: String,
    #[serde(rename = "availableFrom")]
    pub available_from: DateTime<Utc>,
    #[serde(default = "default_true")]
    pub online: bool,
}

fn default_true() -> bool { true }

/// The five sub-scores behind a match, each on a 0-100 scale
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub route: f64,
    pub capacity: f64,
    pub timing: f64,
    pub reputation: f64,
    pub experience: f64,
}

/// Ranked shipment/transporter pairing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    #[serde(rename = "transporterId")]
    pub transporter_id: String,
    #[serde(rename = "vehiclePlate")]
    pub vehicle_plate: String,
    #[serde(rename = "totalScore")]
    pub total_score: u8,
    #[serde(rename = "isBackhaul")]
    pub is_backhaul: bool,
    #[serde(rename = "scoreBreakdown")]
    pub score_breakdown: ScoreBreakdown,
    #[serde(rename = "effectivePrice")]
    pub effective_price: i64,
    #[serde(rename = "seasonalMultiplier")]
    pub seasonal_multiplier: f64,
    #[serde(rename = "ratingAverage")]
    pub rating_average: f64,
    #[serde(rename = "deviationKm")]
    pub deviation_km: f64,
}

/// Scoring weights
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub route: f64,
    pub capacity: f64,
    pub timing: f64,
    pub reputation: f64,
    pub experience: f64,
}

/// Allowed drift of the weight sum from 1.0
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

impl ScoringWeights {
    pub fn sum(&self) -> f64 {
        self.route + self.capacity + self.timing + self.reputation + self.experience
    }

    /// Every weight finite and non-negative, summing to 1.0
    ///
    /// Only normalized weights keep totals within 0-100.
    pub fn is_normalized(&self) -> bool {
        [self.route, self.capacity, self.timing, self.reputation, self.experience]
            .iter()
            .all(|w| w.is_finite() && *w >= 0.0)
            && (self.sum() - 1.0).abs() <= WEIGHT_SUM_TOLERANCE
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            route: 0.40,
            capacity: 0.20,
            timing: 0.15,
            reputation: 0.15,
            experience: 0.10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn shipment() -> Shipment {
        let created = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();
        Shipment {
            id: "load-1".to_string(),
            origin: "Lilongwe".to_string(),
            destination: "Blantyre".to_string(),
            weight_kg: 8_000.0,
            cargo_category: CargoCategory::Maize,
            price: 450_000,
            pickup_date: created + Duration::days(2),
            created_at: created,
        }
    }

    #[test]
    fn test_valid_shipment_passes() {
        assert!(shipment().validate().is_ok());
    }

    #[test]
    fn test_same_city_route_rejected() {
        let mut s = shipment();
        s.destination = " lilongwe ".to_string();
        assert!(s.validate().is_err());
    }

    #[test]
    fn test_non_positive_weight_and_price_rejected() {
        let mut s = shipment();
        s.weight_kg = 0.0;
        assert!(s.validate().is_err());

        let mut s = shipment();
        s.price = 0;
        assert!(s.validate().is_err());
    }

    #[test]
    fn test_pickup_before_creation_rejected() {
        let mut s = shipment();
        s.pickup_date = s.created_at - Duration::hours(1);
        assert!(s.validate().is_err());
    }

    #[test]
    fn test_transporter_deserializes_with_defaults() {
        let json = r#"{
            "id": "t-1",
            "vehicleCapacityKg": 10000,
            "vehiclePlate": "BT 1234",
            "currentLocation": "Blantyre",
            "availableFrom": "2024-05-01T00:00:00Z"
        }"#;
        let t: Transporter = serde_json::from_str(json).unwrap();
        assert!(t.online);
        assert!(!t.verified);
        assert_eq!(t.rating_count, 0);
        assert!(t.route_experience.is_empty());
        assert!(t.validate().is_ok());
    }

    #[test]
    fn test_zero_capacity_transporter_rejected() {
        let json = r#"{
            "id": "t-1",
            "vehicleCapacityKg": 0,
            "vehiclePlate": "BT 1234",
            "currentLocation": "Blantyre",
            "availableFrom": "2024-05-01T00:00:00Z"
        }"#;
        let t: Transporter = serde_json::from_str(json).unwrap();
        assert!(t.validate().is_err());
    }

    #[test]
    fn test_cargo_category_serde() {
        let c: CargoCategory = serde_json::from_str("\"livestock\"").unwrap();
        assert_eq!(c, CargoCategory::Livestock);
        assert_eq!(c.to_string(), "livestock");
    }

    #[test]
    fn test_default_weights_sum_to_one() {
        assert!((ScoringWeights::default().sum() - 1.0).abs() < 1e-9);
        assert!(ScoringWeights::default().is_normalized());
    }

    #[test]
    fn test_unnormalized_weights_detected() {
        let all_ones = ScoringWeights {
            route: 1.0,
            capacity: 1.0,
            timing: 1.0,
            reputation: 1.0,
            experience: 1.0,
        };
        assert!(!all_ones.is_normalized());

        let nan_route = ScoringWeights { route: f64::NAN, ..ScoringWeights::default() };
        assert!(!nan_route.is_normalized());

        let negative = ScoringWeights { route: 0.6, experience: -0.1, ..ScoringWeights::default() };
        assert!(!negative.is_normalized());
    }
}
