//! HTTP handlers for the analysis server.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use zonewatch::analysis::{analyze_entities, AnalysisOptions, LocationAnalysis};
use zonewatch::models::{Coordinate, EntityRecord, Zone};
use zonewatch::schema::{EntitySchema, FieldViolation};
use zonewatch::store::SnapshotStore;

/// Upper bound on `size` / `max_results` accepted from clients
const MAX_RESULTS_CAP: usize = 50;

/// Application state shared across handlers
pub struct AppState {
    pub store: SnapshotStore,
    pub options: AnalysisOptions,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/v1/analyze", get(analyze_handler).post(analyze_inline_handler))
        .route("/v1/validate", post(validate_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    store: String,
}

/// Health check endpoint
async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        store: state.store.describe(),
    })
}

#[derive(Deserialize)]
struct AnalyzeQueryParams {
    lat: f64,
    lon: f64,
    /// Search radius in meters
    radius: Option<f64>,
    /// Number of nearby records
    size: Option<usize>,
}

/// Store-backed analysis: zones and records are fetched fresh per request
async fn analyze_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AnalyzeQueryParams>,
) -> Result<Json<LocationAnalysis>, (StatusCode, String)> {
    let mut options = state.options.clone();
    if let Some(radius) = params.radius {
        options.radius_meters = radius;
    }
    if let Some(size) = params.size {
        options.max_results = size.min(MAX_RESULTS_CAP);
    }

    let (zones, entities) = state.store.fetch_all().await.map_err(|e| {
        tracing::error!("Snapshot fetch failed: {}", e);
        (StatusCode::BAD_GATEWAY, e.to_string())
    })?;

    let point = Coordinate::new(params.lat, params.lon);
    Ok(Json(analyze_entities(&point, zones, &entities, &options)))
}

#[derive(Deserialize)]
struct AnalyzeRequest {
    point: Coordinate,
    #[serde(default)]
    zones: Vec<Zone>,
    #[serde(default)]
    records: Vec<EntityRecord>,
    radius_meters: Option<f64>,
    max_results: Option<usize>,
    location_field: Option<String>,
}

/// Analysis against a snapshot supplied in the request body
async fn analyze_inline_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AnalyzeRequest>,
) -> Json<LocationAnalysis> {
    let mut options = state.options.clone();
    if let Some(radius) = request.radius_meters {
        options.radius_meters = radius;
    }
    if let Some(max) = request.max_results {
        options.max_results = max.min(MAX_RESULTS_CAP);
    }
    if let Some(field) = request.location_field {
        options.location_field = field;
    }

    Json(analyze_entities(
        &request.point,
        request.zones,
        &request.records,
        &options,
    ))
}

#[derive(Deserialize)]
struct ValidateRequest {
    schema: EntitySchema,
    record: Map<String, Value>,
}

#[derive(Serialize, Deserialize)]
struct ValidateResponse {
    valid: bool,
    violations: Vec<FieldViolation>,
}

/// Check a record against a dynamic entity schema
async fn validate_handler(Json(request): Json<ValidateRequest>) -> Json<ValidateResponse> {
    let violations = request.schema.validate(&request.record);
    if !violations.is_empty() {
        tracing::debug!(
            "{} record failed validation with {} violations",
            request.schema.name,
            violations.len()
        );
    }
    Json(ValidateResponse {
        valid: violations.is_empty(),
        violations,
    })
}
