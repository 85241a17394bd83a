use crate::core::steps::{Step, StepTable};
use crate::models::{ScoreBreakdown, ScoringWeights, Shipment, Transporter};
use chrono::{DateTime, Utc};

/// Route facts for one shipment/transporter pair
#[derive(Debug, Clone, Copy)]
pub struct RouteFacts {
    pub is_known_return_route: bool,
    pub experience_on_route: u32,
    pub deviation_km: f64,
}

/// Timing facts for one shipment/transporter pair
#[derive(Debug, Clone, Copy)]
pub struct TimingFacts {
    pub days_until_pickup: i64,
    pub has_schedule_conflict: bool,
}

/// Route score: backhaul beats experience beats proximity
pub const ROUTE_TABLE: StepTable<RouteFacts> = StepTable {
    steps: &[
        Step { label: "known return route", when: |f| f.is_known_return_route, score: 100.0 },
        Step { label: "route experience", when: |f| f.experience_on_route > 0, score: 90.0 },
        Step { label: "deviation < 50 km", when: |f| f.deviation_km < 50.0, score: 70.0 },
        Step { label: "deviation 50-99 km", when: |f| f.deviation_km < 100.0, score: 50.0 },
        Step { label: "deviation 100-199 km", when: |f| f.deviation_km < 200.0, score: 30.0 },
        Step { label: "deviation >= 200 km", when: |_| true, score: 10.0 },
    ],
};

/// Capacity score over utilization percent; rewards near-full loads
pub const CAPACITY_TABLE: StepTable<f64> = StepTable {
    steps: &[
        Step { label: "unsafe overload", when: |u| u > 110.0, score: 20.0 },
        Step { label: "tolerated overload", when: |u| u > 100.0, score: 60.0 },
        Step { label: "near full", when: |u| u >= 80.0, score: 100.0 },
        Step { label: "well loaded", when: |u| u >= 60.0, score: 90.0 },
        Step { label: "half loaded", when: |u| u >= 40.0, score: 70.0 },
        Step { label: "light load", when: |u| u >= 20.0, score: 50.0 },
        Step { label: "mostly empty", when: |u| u < 20.0, score: 30.0 },
    ],
};

/// Timing score; a schedule conflict short-circuits the day table
pub const TIMING_TABLE: StepTable<TimingFacts> = StepTable {
    steps: &[
        Step { label: "schedule conflict", when: |f| f.has_schedule_conflict, score: 20.0 },
        Step { label: "today", when: |f| f.days_until_pickup <= 0, score: 100.0 },
        Step { label: "tomorrow", when: |f| f.days_until_pickup == 1, score: 95.0 },
        Step { label: "2-3 days", when: |f| f.days_until_pickup <= 3, score: 85.0 },
        Step { label: "4-7 days", when: |f| f.days_until_pickup <= 7, score: 70.0 },
        Step { label: "8-14 days", when: |f| f.days_until_pickup <= 14, score: 50.0 },
        Step { label: "over 14 days", when: |_| true, score: 30.0 },
    ],
};

pub const VERIFICATION_TABLE: StepTable<bool> = StepTable {
    steps: &[
        Step { label: "verified", when: |v| v, score: 40.0 },
        Step { label: "unverified", when: |v| !v, score: 10.0 },
    ],
};

/// How the rating component is derived for a given rating count
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RatingComponent {
    /// `rating_average / 5 * max`
    Scaled(f64),
    /// Fixed points regardless of the average
    Flat(f64),
}

pub struct RatingBand {
    pub when: fn(u32) -> bool,
    pub component: RatingComponent,
}

/// Established ratings count fully, few ratings count less, none get a
/// flat benefit-of-the-doubt score
pub const RATING_BANDS: &[RatingBand] = &[
    RatingBand { when: |n| n >= 5, component: RatingComponent::Scaled(40.0) },
    RatingBand { when: |n| n > 0, component: RatingComponent::Scaled(30.0) },
    RatingBand { when: |_| true, component: RatingComponent::Flat(20.0) },
];

/// Experience on the exact pair; capped at 50
pub const EXPERIENCE_TABLE: StepTable<u32> = StepTable {
    steps: &[
        Step { label: "10+ trips", when: |n| n >= 10, score: 50.0 },
        Step { label: "5-9 trips", when: |n| n >= 5, score: 40.0 },
        Step { label: "2-4 trips", when: |n| n >= 2, score: 30.0 },
        Step { label: "1 trip", when: |n| n == 1, score: 20.0 },
        Step { label: "no trips", when: |_| true, score: 10.0 },
    ],
};

#[inline]
pub fn route_score(facts: RouteFacts) -> f64 {
    ROUTE_TABLE.evaluate(facts)
}

/// Shipment weight as a percentage of vehicle capacity
#[inline]
pub fn utilization(weight_kg: f64, capacity_kg: f64) -> f64 {
    weight_kg * 100.0 / capacity_kg
}

#[inline]
pub fn capacity_score(utilization_pct: f64) -> f64 {
    CAPACITY_TABLE.evaluate(utilization_pct)
}

#[inline]
pub fn timing_score(facts: TimingFacts) -> f64 {
    TIMING_TABLE.evaluate(facts)
}

/// Verification points plus rating points, clamped to 0-100
pub fn reputation_score(verified: bool, rating_average: f64, rating_count: u32) -> f64 {
    let verification = VERIFICATION_TABLE.evaluate(verified);

    let rating = RATING_BANDS
        .iter()
        .find(|band| (band.when)(rating_count))
        .map(|band| match band.component {
            RatingComponent::Scaled(max) => (rating_average / 5.0) * max,
            RatingComponent::Flat(points) => points,
        })
        .unwrap_or(0.0);

    (verification + rating).clamp(0.0, 100.0)
}

#[inline]
pub fn experience_score(experience_on_route: u32) -> f64 {
    EXPERIENCE_TABLE.evaluate(experience_on_route)
}

/// Whole days from `now` until pickup; overdue pickups count as today
pub fn days_until_pickup(now: DateTime<Utc>, pickup_date: DateTime<Utc>) -> i64 {
    (pickup_date - now).num_days().max(0)
}

/// Transporter is still committed elsewhere when the load must be picked up
pub fn has_schedule_conflict(transporter: &Transporter, shipment: &Shipment) -> bool {
    transporter.available_from > shipment.pickup_date
}

/// Weighted sum of the sub-scores before rounding
#[inline]
pub fn weighted_sum(breakdown: &ScoreBreakdown, weights: &ScoringWeights) -> f64 {
    breakdown.route * weights.route
        + breakdown.capacity * weights.capacity
        + breakdown.timing * weights.timing
        + breakdown.reputation * weights.reputation
        + breakdown.experience * weights.experience
}

/// Calculate the 0-100 total for a breakdown
///
/// Scoring formula:
/// total = round(
///     route * 0.40 +
///     capacity * 0.20 +
///     timing * 0.15 +
///     reputation * 0.15 +
///     experience * 0.10
/// )
#[inline]
pub fn total_score(breakdown: &ScoreBreakdown, weights: &ScoringWeights) -> u8 {
    weighted_sum(breakdown, weights).round() as u8
}
