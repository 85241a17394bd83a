//! Freight Match - shipment/transporter matching and ranking engine
//!
//! This library scores a pool of candidate transporters against a posted
//! shipment, rewards backhaul opportunities, applies seasonal pricing and
//! returns a short, deterministic ranking.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{format_price, get_seasonal_multiplier, rank_matches, MatchError, Matcher, RouteResolver};
pub use models::{CargoCategory, Match, ScoreBreakdown, ScoringWeights, Shipment, Transporter};
