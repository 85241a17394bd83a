use crate::models::{RoutePair, Shipment, Transporter};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Distance used when a city pair is missing from the table
pub const DEFAULT_FALLBACK_DISTANCE_KM: f64 = 500.0;

/// Road distances between Malawian cities in kilometers
const BUILTIN_DISTANCES: &[(&str, &str, f64)] = &[
    ("lilongwe", "blantyre", 311.0),
    ("lilongwe", "mzuzu", 350.0),
    ("lilongwe", "zomba", 290.0),
    ("lilongwe", "kasungu", 127.0),
    ("lilongwe", "salima", 103.0),
    ("lilongwe", "dedza", 85.0),
    ("lilongwe", "mangochi", 250.0),
    ("lilongwe", "ntcheu", 160.0),
    ("lilongwe", "nkhotakota", 200.0),
    ("lilongwe", "karonga", 575.0),
    ("lilongwe", "liwonde", 240.0),
    ("lilongwe", "balaka", 210.0),
    ("blantyre", "zomba", 65.0),
    ("blantyre", "mzuzu", 660.0),
    ("blantyre", "mangochi", 190.0),
    ("blantyre", "mulanje", 65.0),
    ("blantyre", "liwonde", 120.0),
    ("blantyre", "balaka", 100.0),
    ("blantyre", "ntcheu", 155.0),
    ("blantyre", "dedza", 230.0),
    ("blantyre", "kasungu", 440.0),
    ("zomba", "liwonde", 55.0),
    ("zomba", "mangochi", 120.0),
    ("zomba", "mzuzu", 620.0),
    ("mzuzu", "karonga", 225.0),
    ("mzuzu", "kasungu", 230.0),
    ("mzuzu", "nkhotakota", 240.0),
    ("kasungu", "nkhotakota", 130.0),
    ("salima", "nkhotakota", 110.0),
    ("salima", "mangochi", 165.0),
    ("dedza", "ntcheu", 75.0),
    ("balaka", "liwonde", 35.0),
];

/// Extra city pair supplied through configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistanceEntry {
    pub from: String,
    pub to: String,
    pub km: f64,
}

#[inline]
fn normalize_city(city: &str) -> String {
    city.trim().to_lowercase()
}

#[inline]
fn same_city(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}

/// Resolves road distances and per-transporter route facts
#[derive(Debug, Clone)]
pub struct RouteResolver {
    distances: HashMap<(String, String), f64>,
    fallback_km: f64,
}

impl RouteResolver {
    /// Empty table; every pair resolves to `fallback_km`
    pub fn new(fallback_km: f64) -> Self {
        Self {
            distances: HashMap::new(),
            fallback_km,
        }
    }

    /// Resolver preloaded with the built-in city table
    pub fn with_builtin_table(fallback_km: f64) -> Self {
        let mut resolver = Self::new(fallback_km);
        for (from, to, km) in BUILTIN_DISTANCES {
            resolver.insert(from, to, *km);
        }
        resolver
    }

    /// Add or replace a symmetric city pair
    pub fn insert(&mut self, from: &str, to: &str, km: f64) {
        let key = Self::key(from, to);
        self.distances.insert(key, km);
    }

    pub fn extend<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = DistanceEntry>,
    {
        for entry in entries {
            self.insert(&entry.from, &entry.to, entry.km);
        }
    }

    pub fn fallback_km(&self) -> f64 {
        self.fallback_km
    }

    pub fn len(&self) -> usize {
        self.distances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }

    /// Order-independent key so A->B and B->A share one entry
    fn key(a: &str, b: &str) -> (String, String) {
        let (a, b) = (normalize_city(a), normalize_city(b));
        if a <= b { (a, b) } else { (b, a) }
    }

    /// Road distance between two cities; unknown pairs get the fallback
    pub fn distance_km(&self, origin: &str, destination: &str) -> f64 {
        if same_city(origin, destination) {
            return 0.0;
        }

        match self.distances.get(&Self::key(origin, destination)) {
            Some(km) => *km,
            None => {
                tracing::warn!(
                    "No distance for {} -> {}, using fallback {} km",
                    origin,
                    destination,
                    self.fallback_km
                );
                self.fallback_km
            }
        }
    }

    /// Distance the transporter must cover to reach the pickup city
    pub fn deviation_km(&self, transporter: &Transporter, shipment: &Shipment) -> f64 {
        self.distance_km(&transporter.current_location, &shipment.origin)
    }

    /// True when the transporter has driven the reverse of this leg before
    pub fn is_known_return_route(&self, transporter: &Transporter, shipment: &Shipment) -> bool {
        transporter
            .return_route_history
            .iter()
            .any(|pair| is_pair(pair, &shipment.destination, &shipment.origin))
    }

    /// Completed trips on the same-direction pair
    pub fn experience_on_route(&self, transporter: &Transporter, shipment: &Shipment) -> u32 {
        transporter
            .route_experience
            .iter()
            .filter(|exp| {
                same_city(&exp.origin, &shipment.origin)
                    && same_city(&exp.destination, &shipment.destination)
            })
            .map(|exp| exp.trips)
            .sum()
    }
}

impl Default for RouteResolver {
    fn default() -> Self {
        Self::with_builtin_table(DEFAULT_FALLBACK_DISTANCE_KM)
    }
}

#[inline]
fn is_pair(pair: &RoutePair, origin: &str, destination: &str) -> bool {
    same_city(&pair.origin, origin) && same_city(&pair.destination, destination)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CargoCategory, RouteExperience};
    use chrono::{TimeZone, Utc};

    fn shipment(origin: &str, destination: &str) -> Shipment {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();
        Shipment {
            id: "load".to_string(),
            origin: origin.to_string(),
            destination: destination.to_string(),
            weight_kg: 5_000.0,
            cargo_category: CargoCategory::General,
            price: 300_000,
            pickup_date: now,
            created_at: now,
        }
    }

    fn transporter() -> Transporter {
        Transporter {
            id: "t-1".to_string(),
            name: "Chisomo Haulage".to_string(),
            verified: true,
            rating_average: 4.5,
            rating_count: 12,
            vehicle_capacity_kg: 10_000.0,
            vehicle_plate: "BT 4521".to_string(),
            route_experience: vec![
                RouteExperience { origin: "Lilongwe".into(), destination: "Blantyre".into(), trips: 3 },
                RouteExperience { origin: "lilongwe".into(), destination: "BLANTYRE".into(), trips: 2 },
                RouteExperience { origin: "Blantyre".into(), destination: "Lilongwe".into(), trips: 7 },
            ],
            return_route_history: vec![RoutePair::new("Blantyre", "Lilongwe")],
            current_location: "Lilongwe".to_string(),
            available_from: Utc.with_ymd_and_hms(2024, 4, 30, 0, 0, 0).unwrap(),
            online: true,
        }
    }

    #[test]
    fn test_distance_is_symmetric_and_case_insensitive() {
        let resolver = RouteResolver::default();
        assert_eq!(resolver.distance_km("Lilongwe", "Blantyre"), 311.0);
        assert_eq!(resolver.distance_km("BLANTYRE", " lilongwe"), 311.0);
    }

    #[test]
    fn test_same_city_is_zero() {
        let resolver = RouteResolver::default();
        assert_eq!(resolver.distance_km("Zomba", "zomba"), 0.0);
    }

    #[test]
    fn test_unknown_pair_uses_fallback() {
        let resolver = RouteResolver::with_builtin_table(750.0);
        assert_eq!(resolver.distance_km("Lilongwe", "Lusaka"), 750.0);
        assert_eq!(resolver.fallback_km(), 750.0);
    }

    #[test]
    fn test_configured_entries_override_builtin() {
        let mut resolver = RouteResolver::default();
        resolver.extend(vec![
            DistanceEntry { from: "Blantyre".into(), to: "Lilongwe".into(), km: 320.0 },
            DistanceEntry { from: "Lilongwe".into(), to: "Lusaka".into(), km: 700.0 },
        ]);
        assert_eq!(resolver.distance_km("Lilongwe", "Blantyre"), 320.0);
        assert_eq!(resolver.distance_km("Lusaka", "Lilongwe"), 700.0);
    }

    #[test]
    fn test_backhaul_detection() {
        let resolver = RouteResolver::default();
        let t = transporter();
        assert!(resolver.is_known_return_route(&t, &shipment("Lilongwe", "Blantyre")));
        assert!(!resolver.is_known_return_route(&t, &shipment("Blantyre", "Lilongwe")));
        assert!(!resolver.is_known_return_route(&t, &shipment("Mzuzu", "Zomba")));
    }

    #[test]
    fn test_experience_counts_same_direction_only() {
        let resolver = RouteResolver::default();
        let t = transporter();
        assert_eq!(resolver.experience_on_route(&t, &shipment("Lilongwe", "Blantyre")), 5);
        assert_eq!(resolver.experience_on_route(&t, &shipment("Blantyre", "Lilongwe")), 7);
        assert_eq!(resolver.experience_on_route(&t, &shipment("Mzuzu", "Zomba")), 0);
    }

    #[test]
    fn test_deviation_from_current_location() {
        let resolver = RouteResolver::default();
        let t = transporter();
        assert_eq!(resolver.deviation_km(&t, &shipment("Lilongwe", "Blantyre")), 0.0);
        assert_eq!(resolver.deviation_km(&t, &shipment("Dedza", "Blantyre")), 85.0);
    }
}
