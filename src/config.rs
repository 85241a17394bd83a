use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::core::{
    route::{DistanceEntry, RouteResolver, DEFAULT_FALLBACK_DISTANCE_KM},
    seasonal::{SeasonalCalendar, SeasonalWindow},
    Matcher, MAX_MATCHES, MIN_MATCH_SCORE,
};
use crate::models::ScoringWeights;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub routes: RouteSettings,
    #[serde(default)]
    pub seasonal: SeasonalSettings,
    #[serde(default)]
    pub directory: DirectorySettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_min_match_score")]
    pub min_match_score: u8,
    #[serde(default = "default_max_matches")]
    pub max_matches: usize,
    #[serde(default = "default_fallback_distance_km")]
    pub fallback_distance_km: f64,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            min_match_score: default_min_match_score(),
            max_matches: default_max_matches(),
            fallback_distance_km: default_fallback_distance_km(),
        }
    }
}

fn default_min_match_score() -> u8 { MIN_MATCH_SCORE }
fn default_max_matches() -> usize { MAX_MATCHES }
fn default_fallback_distance_km() -> f64 { DEFAULT_FALLBACK_DISTANCE_KM }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_route_weight")]
    pub route: f64,
    #[serde(default = "default_capacity_weight")]
    pub capacity: f64,
    #[serde(default = "default_timing_weight")]
    pub timing: f64,
    #[serde(default = "default_reputation_weight")]
    pub reputation: f64,
    #[serde(default = "default_experience_weight")]
    pub experience: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            route: default_route_weight(),
            capacity: default_capacity_weight(),
            timing: default_timing_weight(),
            reputation: default_reputation_weight(),
            experience: default_experience_weight(),
        }
    }
}

fn default_route_weight() -> f64 { 0.40 }
fn default_capacity_weight() -> f64 { 0.20 }
fn default_timing_weight() -> f64 { 0.15 }
fn default_reputation_weight() -> f64 { 0.15 }
fn default_experience_weight() -> f64 { 0.10 }

impl From<&WeightsConfig> for ScoringWeights {
    fn from(config: &WeightsConfig) -> Self {
        Self {
            route: config.route,
            capacity: config.capacity,
            timing: config.timing,
            reputation: config.reputation,
            experience: config.experience,
        }
    }
}

/// Extra city pairs layered over the built-in distance table
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RouteSettings {
    #[serde(default)]
    pub distances: Vec<DistanceEntry>,
}

/// Replaces the default seasonal calendar when `windows` is non-empty
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeasonalSettings {
    #[serde(default)]
    pub windows: Vec<SeasonalWindow>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DirectorySettings {
    pub seed_path: Option<String>,
}

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with FREIGHT__)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., FREIGHT__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("FREIGHT")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings: Settings = settings.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("FREIGHT")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings: Settings = settings.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject settings that would produce meaningless scores or prices
    pub fn validate(&self) -> Result<(), ConfigError> {
        let weights = ScoringWeights::from(&self.scoring.weights);
        if !weights.is_normalized() {
            return Err(ConfigError::Message(format!(
                "scoring weights must be non-negative and sum to 1.0, got {:?}",
                weights
            )));
        }

        if !(self.matching.fallback_distance_km.is_finite() && self.matching.fallback_distance_km >= 0.0) {
            return Err(ConfigError::Message(
                "matching.fallback_distance_km must be a non-negative number".to_string(),
            ));
        }

        if self.matching.min_match_score > 100 {
            return Err(ConfigError::Message(
                "matching.min_match_score must be within 0-100".to_string(),
            ));
        }

        if self.matching.max_matches == 0 {
            return Err(ConfigError::Message(
                "matching.max_matches must be at least 1".to_string(),
            ));
        }

        for entry in &self.routes.distances {
            if !(entry.km.is_finite() && entry.km >= 0.0) {
                return Err(ConfigError::Message(format!(
                    "routes.distances {} -> {} must be a non-negative number, got {}",
                    entry.from, entry.to, entry.km
                )));
            }
        }

        for window in &self.seasonal.windows {
            if !(window.multiplier.is_finite() && window.multiplier > 0.0) {
                return Err(ConfigError::Message(format!(
                    "seasonal window {:?} multiplier must be positive, got {}",
                    window.season, window.multiplier
                )));
            }
            if let Some(month) = window.months.iter().find(|m| !(1..=12).contains(*m)) {
                return Err(ConfigError::Message(format!(
                    "seasonal window {:?} has invalid month {}",
                    window.season, month
                )));
            }
        }

        Ok(())
    }

    /// Build the matcher described by these settings
    pub fn build_matcher(&self) -> Matcher {
        let mut resolver = RouteResolver::with_builtin_table(self.matching.fallback_distance_km);
        resolver.extend(self.routes.distances.iter().cloned());

        let calendar = if self.seasonal.windows.is_empty() {
            SeasonalCalendar::default()
        } else {
            SeasonalCalendar::new(self.seasonal.windows.clone())
        };

        Matcher::new(ScoringWeights::from(&self.scoring.weights))
            .with_resolver(resolver)
            .with_calendar(calendar)
            .with_limits(self.matching.min_match_score, self.matching.max_matches)
    }
}
