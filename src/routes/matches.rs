use actix_web::{web, HttpResponse, Responder};
use crate::core::{format_price, MatchError, Matcher};
use crate::models::{
    ComputeMatchesRequest, ComputeMatchesResponse, DirectoryResponse, ErrorResponse,
    FormatPriceQuery, FormatPriceResponse, HealthResponse, SeasonalMultiplierQuery,
    SeasonalMultiplierResponse, Transporter,
};
use crate::services::{Clock, TransporterDirectory};
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub matcher: Matcher,
    pub directory: Arc<dyn TransporterDirectory>,
    pub clock: Arc<dyn Clock>,
}

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/matches/compute", web::post().to(compute_matches))
        .route("/pricing/seasonal", web::get().to(seasonal_multiplier))
        .route("/pricing/format", web::get().to(format_amount))
        .route("/directory", web::get().to(directory_summary))
        .route("/directory/transporters", web::put().to(replace_directory));
}

fn bad_request(error: &str, message: String) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: error.to_string(),
        message,
        status_code: 400,
    })
}

fn matching_failed(shipment_id: &str, e: MatchError) -> HttpResponse {
    tracing::error!("Matching failed for shipment {}: {}", shipment_id, e);
    HttpResponse::InternalServerError().json(ErrorResponse {
        error: "Matching failed".to_string(),
        message: e.to_string(),
        status_code: 500,
    })
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: state.clock.now(),
    })
}

/// Compute matches endpoint
///
/// POST /api/v1/matches/compute
///
/// Request body:
/// ```json
/// {
///   "shipment": { "id": "load-1", "origin": "Lilongwe", "destination": "Blantyre", ... },
///   "candidates": [ ... ],
///   "maxResults": 10,
///   "now": "2024-05-01T08:00:00Z"
/// }
/// ```
async fn compute_matches(
    state: web::Data<AppState>,
    req: web::Json<ComputeMatchesRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate_all() {
        tracing::info!("Validation failed for compute_matches request: {:?}", errors);
        return bad_request("Validation failed", errors.to_string());
    }

    let req = req.into_inner();
    let now = req.now.unwrap_or_else(|| state.clock.now());

    let candidates: Vec<Transporter> = match req.candidates {
        Some(candidates) => candidates,
        None => state.directory.online().await,
    };

    tracing::debug!(
        "Computing matches for shipment {} over {} candidates",
        req.shipment.id,
        candidates.len()
    );

    let matches = match state.matcher.compute_matches(
        &req.shipment,
        &candidates,
        req.max_results as usize,
        now,
    ) {
        Ok(matches) => matches,
        Err(e) => return matching_failed(&req.shipment.id, e),
    };

    let (adjustment, price) = match state.matcher.seasonal_price(&req.shipment, now) {
        Ok(priced) => priced,
        Err(e) => return matching_failed(&req.shipment.id, e),
    };

    HttpResponse::Ok().json(ComputeMatchesResponse {
        request_id: uuid::Uuid::new_v4().to_string(),
        shipment_id: req.shipment.id,
        matches,
        total_candidates: candidates.len(),
        seasonal_multiplier: adjustment.multiplier,
        season: adjustment.season,
        effective_price: price,
        formatted_price: format_price(price),
    })
}

/// Seasonal multiplier lookup
///
/// GET /api/v1/pricing/seasonal?category=maize&date=2024-05-10
async fn seasonal_multiplier(
    state: web::Data<AppState>,
    query: web::Query<SeasonalMultiplierQuery>,
) -> impl Responder {
    let date = query
        .date
        .unwrap_or_else(|| state.clock.now().date_naive());
    let adjustment = state.matcher.calendar().adjustment(query.category, &date);

    HttpResponse::Ok().json(SeasonalMultiplierResponse {
        category: query.category,
        date,
        season: adjustment.season,
        multiplier: adjustment.multiplier,
    })
}

/// Price formatting
///
/// GET /api/v1/pricing/format?amount=150000
async fn format_amount(query: web::Query<FormatPriceQuery>) -> impl Responder {
    HttpResponse::Ok().json(FormatPriceResponse {
        amount: query.amount,
        formatted: format_price(query.amount),
    })
}

/// Directory snapshot counts
async fn directory_summary(state: web::Data<AppState>) -> impl Responder {
    let (transporters, online) = state.directory.counts().await;
    HttpResponse::Ok().json(DirectoryResponse { transporters, online })
}

/// Replace the transporter directory snapshot
///
/// PUT /api/v1/directory/transporters
async fn replace_directory(
    state: web::Data<AppState>,
    body: web::Json<Vec<Transporter>>,
) -> impl Responder {
    match state.directory.replace(body.into_inner()).await {
        Ok(_) => {
            let (transporters, online) = state.directory.counts().await;
            tracing::info!("Directory updated: {} transporters ({} online)", transporters, online);
            HttpResponse::Ok().json(DirectoryResponse { transporters, online })
        }
        Err(e) => {
            tracing::warn!("Rejected directory update: {}", e);
            bad_request("Invalid transporter", e.to_string())
        }
    }
}
