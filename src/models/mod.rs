// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{CargoCategory, Match, RouteExperience, RoutePair, ScoreBreakdown, ScoringWeights, Shipment, Transporter};
pub use requests::{ComputeMatchesRequest, FormatPriceQuery, SeasonalMultiplierQuery};
pub use responses::{ComputeMatchesResponse, DirectoryResponse, ErrorResponse, FormatPriceResponse, HealthResponse, SeasonalMultiplierResponse};
