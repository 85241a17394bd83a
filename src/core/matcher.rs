use crate::core::{
    pricing::effective_price,
    route::RouteResolver,
    scoring::{
        capacity_score, days_until_pickup, experience_score, has_schedule_conflict,
        reputation_score, route_score, timing_score, utilization, weighted_sum, RouteFacts,
        TimingFacts, CAPACITY_TABLE, ROUTE_TABLE,
    },
    seasonal::{SeasonalAdjustment, SeasonalCalendar},
};
use crate::models::{Match, ScoreBreakdown, ScoringWeights, Shipment, Transporter};
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Matches scoring below this are dropped
pub const MIN_MATCH_SCORE: u8 = 30;

/// Upper bound on returned matches
pub const MAX_MATCHES: usize = 10;

/// Errors raised when inputs would produce meaningless scores
#[derive(Debug, Error, PartialEq)]
pub enum MatchError {
    #[error("Invalid weight for shipment {shipment_id}: {weight_kg} kg")]
    InvalidWeight { shipment_id: String, weight_kg: f64 },

    #[error("Invalid vehicle capacity for transporter {transporter_id}: {capacity_kg} kg")]
    InvalidCapacity { transporter_id: String, capacity_kg: f64 },

    #[error("Non-finite {component} score for transporter {transporter_id}")]
    NonFiniteScore {
        transporter_id: String,
        component: &'static str,
    },

    #[error("Scoring weights must be non-negative and sum to 1.0, got sum {sum}")]
    InvalidWeights { sum: f64 },

    #[error("Invalid seasonal multiplier {multiplier} for shipment {shipment_id}")]
    InvalidMultiplier { shipment_id: String, multiplier: f64 },

    #[error("Non-finite deviation for transporter {transporter_id}: {deviation_km} km")]
    NonFiniteDistance { transporter_id: String, deviation_km: f64 },

    #[error("Total score {total} for transporter {transporter_id} is outside 0-100")]
    ScoreOutOfRange { transporter_id: String, total: f64 },
}

/// Main matching orchestrator
///
/// # Pipeline Stages
/// 1. Per-candidate sub-scores (route, capacity, timing, reputation, experience)
/// 2. Weighted aggregation, backhaul flag and seasonal price
/// 3. Minimum-score filter
/// 4. Ranking and truncation
#[derive(Debug, Clone)]
pub struct Matcher {
    weights: ScoringWeights,
    resolver: RouteResolver,
    calendar: SeasonalCalendar,
    min_match_score: u8,
    max_matches: usize,
}

impl Matcher {
    pub fn new(weights: ScoringWeights) -> Self {
        Self {
            weights,
            resolver: RouteResolver::default(),
            calendar: SeasonalCalendar::default(),
            min_match_score: MIN_MATCH_SCORE,
            max_matches: MAX_MATCHES,
        }
    }

    pub fn with_default_weights() -> Self {
        Self::new(ScoringWeights::default())
    }

    pub fn with_resolver(mut self, resolver: RouteResolver) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn with_calendar(mut self, calendar: SeasonalCalendar) -> Self {
        self.calendar = calendar;
        self
    }

    pub fn with_limits(mut self, min_match_score: u8, max_matches: usize) -> Self {
        self.min_match_score = min_match_score;
        self.max_matches = max_matches;
        self
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    pub fn resolver(&self) -> &RouteResolver {
        &self.resolver
    }

    pub fn calendar(&self) -> &SeasonalCalendar {
        &self.calendar
    }

    pub fn max_matches(&self) -> usize {
        self.max_matches
    }

    /// Rank candidate transporters for a shipment
    ///
    /// # Arguments
    /// * `shipment` - The posted load
    /// * `candidates` - Point-in-time snapshot of available transporters
    /// * `max_results` - Caller cap; never exceeds the configured maximum
    /// * `now` - Reference time for pickup urgency and seasonal pricing
    ///
    /// # Returns
    /// Matches ordered best first. An empty pool or a pool where nobody
    /// reaches the minimum score gives an empty list.
    pub fn compute_matches(
        &self,
        shipment: &Shipment,
        candidates: &[Transporter],
        max_results: usize,
        now: DateTime<Utc>,
    ) -> Result<Vec<Match>, MatchError> {
        if !self.weights.is_normalized() {
            tracing::error!("Refusing to match with weights {:?}", self.weights);
            return Err(MatchError::InvalidWeights { sum: self.weights.sum() });
        }

        if !(shipment.weight_kg.is_finite() && shipment.weight_kg > 0.0) {
            return Err(MatchError::InvalidWeight {
                shipment_id: shipment.id.clone(),
                weight_kg: shipment.weight_kg,
            });
        }

        let (adjustment, price) = self.seasonal_price(shipment, now)?;

        let scored = candidates
            .iter()
            .map(|transporter| self.score_candidate(shipment, transporter, adjustment, price, now))
            .collect::<Result<Vec<_>, _>>()?;

        let matches = rank_matches(
            scored,
            self.min_match_score,
            max_results.min(self.max_matches),
        );

        tracing::info!(
            "Shipment {} ({} -> {}): {} matches from {} candidates",
            shipment.id,
            shipment.origin,
            shipment.destination,
            matches.len(),
            candidates.len()
        );

        Ok(matches)
    }

    /// Seasonal adjustment in force at `now` and the resulting price
    pub fn seasonal_price(
        &self,
        shipment: &Shipment,
        now: DateTime<Utc>,
    ) -> Result<(SeasonalAdjustment, i64), MatchError> {
        let adjustment = self.calendar.adjustment(shipment.cargo_category, &now);

        if !(adjustment.multiplier.is_finite() && adjustment.multiplier > 0.0) {
            tracing::error!(
                "Seasonal multiplier {} ({:?}) rejected for shipment {}",
                adjustment.multiplier,
                adjustment.season,
                shipment.id
            );
            return Err(MatchError::InvalidMultiplier {
                shipment_id: shipment.id.clone(),
                multiplier: adjustment.multiplier,
            });
        }

        Ok((adjustment, effective_price(shipment.price, adjustment.multiplier)))
    }

    /// Score one transporter against a shipment
    pub fn score_candidate(
        &self,
        shipment: &Shipment,
        transporter: &Transporter,
        adjustment: SeasonalAdjustment,
        price: i64,
        now: DateTime<Utc>,
    ) -> Result<Match, MatchError> {
        if !(transporter.vehicle_capacity_kg.is_finite() && transporter.vehicle_capacity_kg > 0.0) {
            return Err(MatchError::InvalidCapacity {
                transporter_id: transporter.id.clone(),
                capacity_kg: transporter.vehicle_capacity_kg,
            });
        }

        let is_backhaul = self.resolver.is_known_return_route(transporter, shipment);
        let experience = self.resolver.experience_on_route(transporter, shipment);
        let deviation_km = self.resolver.deviation_km(transporter, shipment);

        if !deviation_km.is_finite() {
            tracing::error!("Non-finite deviation for transporter {}", transporter.id);
            return Err(MatchError::NonFiniteDistance {
                transporter_id: transporter.id.clone(),
                deviation_km,
            });
        }

        let route_facts = RouteFacts {
            is_known_return_route: is_backhaul,
            experience_on_route: experience,
            deviation_km,
        };
        let load_pct = utilization(shipment.weight_kg, transporter.vehicle_capacity_kg);

        let breakdown = ScoreBreakdown {
            route: route_score(route_facts),
            capacity: capacity_score(load_pct),
            timing: timing_score(TimingFacts {
                days_until_pickup: days_until_pickup(now, shipment.pickup_date),
                has_schedule_conflict: has_schedule_conflict(transporter, shipment),
            }),
            reputation: reputation_score(
                transporter.verified,
                transporter.rating_average,
                transporter.rating_count,
            ),
            experience: experience_score(experience),
        };

        ensure_finite(&transporter.id, &breakdown)?;

        let raw_total = weighted_sum(&breakdown, &self.weights);
        if !(raw_total.is_finite() && (0.0..=100.0).contains(&raw_total)) {
            tracing::error!("Total {} out of range for transporter {}", raw_total, transporter.id);
            return Err(MatchError::ScoreOutOfRange {
                transporter_id: transporter.id.clone(),
                total: raw_total,
            });
        }
        let total = raw_total.round() as u8;

        tracing::debug!(
            "Transporter {} scored {} (route {} [{}], capacity {} [{}], timing {}, reputation {}, experience {})",
            transporter.id,
            total,
            breakdown.route,
            ROUTE_TABLE.label(route_facts),
            breakdown.capacity,
            CAPACITY_TABLE.label(load_pct),
            breakdown.timing,
            breakdown.reputation,
            breakdown.experience
        );

        Ok(Match {
            transporter_id: transporter.id.clone(),
            vehicle_plate: transporter.vehicle_plate.clone(),
            total_score: total,
            is_backhaul,
            score_breakdown: breakdown,
            effective_price: price,
            seasonal_multiplier: adjustment.multiplier,
            rating_average: transporter.rating_average,
            deviation_km,
        })
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_weights()
    }
}

fn ensure_finite(transporter_id: &str, breakdown: &ScoreBreakdown) -> Result<(), MatchError> {
    let components = [
        ("route", breakdown.route),
        ("capacity", breakdown.capacity),
        ("timing", breakdown.timing),
        ("reputation", breakdown.reputation),
        ("experience", breakdown.experience),
    ];

    match components.iter().find(|(_, value)| !value.is_finite()) {
        Some(&(component, _)) => {
            tracing::error!("Non-finite {} score for transporter {}", component, transporter_id);
            Err(MatchError::NonFiniteScore {
                transporter_id: transporter_id.to_string(),
                component,
            })
        }
        None => Ok(()),
    }
}

/// Filter, order and cap scored matches
///
/// Order is total score descending, then backhaul first, then rating
/// descending. The sort is stable so equal entries keep input order.
pub fn rank_matches(mut matches: Vec<Match>, min_score: u8, max_results: usize) -> Vec<Match> {
    matches.retain(|m| m.total_score >= min_score);

    matches.sort_by(|a, b| {
        b.total_score
            .cmp(&a.total_score)
            .then_with(|| b.is_backhaul.cmp(&a.is_backhaul))
            .then_with(|| b.rating_average.total_cmp(&a.rating_average))
    });

    matches.truncate(max_results);
    matches
}
