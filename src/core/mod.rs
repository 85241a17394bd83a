// Core algorithm exports
pub mod matcher;
pub mod pricing;
pub mod route;
pub mod scoring;
pub mod seasonal;
pub mod steps;

pub use matcher::{rank_matches, MatchError, Matcher, MAX_MATCHES, MIN_MATCH_SCORE};
pub use pricing::{effective_price, format_price};
pub use route::{DistanceEntry, RouteResolver};
pub use scoring::{
    capacity_score, experience_score, reputation_score, route_score, timing_score, total_score,
};
pub use seasonal::{get_seasonal_multiplier, Season, SeasonalAdjustment, SeasonalCalendar, SeasonalWindow};
