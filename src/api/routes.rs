//! Inbound GET routes. Each one forwards its parameters to the matching
//! upstream operation and wraps the result in the `{success, count, data}`
//! envelope.

use crate::api::extract::{ApiPath, ApiQuery};
use crate::core::handler::{respond, HandlerError};
use crate::core::upstream::OpenF1Api;
use crate::domain::filters::{
    CarDataFilters, DriverFilters, DriverNumberFilter, LapFilters, LocationFilters,
    PositionFilters, SessionFilters,
};
use crate::domain::model::{Envelope, SessionKey};
use crate::domain::ports::UpstreamSource;
use crate::domain::resource::Resource;
use axum::{
    extract::State,
    Json,
};
use serde_json::{json, Value};
use std::sync::Arc;

/// Shared per-router state. The upstream handle is immutable and shared.
#[derive(Clone)]
pub struct AppState {
    pub upstream: Arc<dyn UpstreamSource>,
}

impl AppState {
    pub fn new(upstream: Arc<dyn UpstreamSource>) -> Self {
        Self { upstream }
    }
}

type EnvelopeResult = Result<Json<Envelope>, HandlerError>;

pub async fn root() -> Json<Value> {
    Json(json!({
        "message": "F1 Racing Dashboard API",
        "status": "online",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "sessions": "/api/sessions",
            "drivers": "/api/drivers",
            "driver_by_number": "/api/drivers/{driver_number}",
            "location": "/api/location/{session_key}",
            "telemetry": "/api/telemetry/{session_key}",
            "laps": "/api/laps/{session_key}",
            "positions": "/api/positions/{session_key}",
            "intervals": "/api/intervals/{session_key}",
            "pitstops": "/api/pitstops/{session_key}",
            "stints": "/api/stints/{session_key}",
        }
    }))
}

pub async fn get_sessions(
    State(state): State<AppState>,
    ApiQuery(filters): ApiQuery<SessionFilters>,
) -> EnvelopeResult {
    let outcome = state.upstream.get_sessions(&filters).await;
    respond(Resource::Sessions, outcome).map(Json)
}

pub async fn get_drivers(
    State(state): State<AppState>,
    ApiQuery(filters): ApiQuery<DriverFilters>,
) -> EnvelopeResult {
    let outcome = state.upstream.get_drivers(&filters).await;
    respond(Resource::Drivers, outcome).map(Json)
}

pub async fn get_driver(
    State(state): State<AppState>,
    ApiPath(driver_number): ApiPath<u32>,
    ApiQuery(filters): ApiQuery<DriverFilters>,
) -> EnvelopeResult {
    let outcome = state
        .upstream
        .get_driver_by_number(driver_number, &filters)
        .await;
    respond(Resource::DriverByNumber, outcome).map(Json)
}

pub async fn get_location(
    State(state): State<AppState>,
    ApiPath(session_key): ApiPath<SessionKey>,
    ApiQuery(filters): ApiQuery<LocationFilters>,
) -> EnvelopeResult {
    let outcome = state.upstream.get_location_data(session_key, &filters).await;
    respond(Resource::Location, outcome).map(Json)
}

pub async fn get_telemetry(
    State(state): State<AppState>,
    ApiPath(session_key): ApiPath<SessionKey>,
    ApiQuery(filters): ApiQuery<CarDataFilters>,
) -> EnvelopeResult {
    let outcome = state.upstream.get_car_data(session_key, &filters).await;
    respond(Resource::Telemetry, outcome).map(Json)
}

pub async fn get_laps(
    State(state): State<AppState>,
    ApiPath(session_key): ApiPath<SessionKey>,
    ApiQuery(filters): ApiQuery<LapFilters>,
) -> EnvelopeResult {
    let outcome = state.upstream.get_laps(session_key, &filters).await;
    respond(Resource::Laps, outcome).map(Json)
}

pub async fn get_positions(
    State(state): State<AppState>,
    ApiPath(session_key): ApiPath<SessionKey>,
    ApiQuery(filters): ApiQuery<PositionFilters>,
) -> EnvelopeResult {
    let outcome = state.upstream.get_positions(session_key, &filters).await;
    respond(Resource::Positions, outcome).map(Json)
}

pub async fn get_intervals(
    State(state): State<AppState>,
    ApiPath(session_key): ApiPath<SessionKey>,
    ApiQuery(filters): ApiQuery<DriverNumberFilter>,
) -> EnvelopeResult {
    let outcome = state.upstream.get_intervals(session_key, &filters).await;
    respond(Resource::Intervals, outcome).map(Json)
}

pub async fn get_pit_stops(
    State(state): State<AppState>,
    ApiPath(session_key): ApiPath<SessionKey>,
    ApiQuery(filters): ApiQuery<DriverNumberFilter>,
) -> EnvelopeResult {
    let outcome = state.upstream.get_pit_stops(session_key, &filters).await;
    respond(Resource::PitStops, outcome).map(Json)
}

pub async fn get_stints(
    State(state): State<AppState>,
    ApiPath(session_key): ApiPath<SessionKey>,
    ApiQuery(filters): ApiQuery<DriverNumberFilter>,
) -> EnvelopeResult {
    let outcome = state.upstream.get_stints(session_key, &filters).await;
    respond(Resource::Stints, outcome).map(Json)
}
