//! Router construction for the proxy server.

pub mod error;
pub mod extract;
pub mod routes;

use crate::domain::ports::UpstreamSource;
use crate::utils::error::{ProxyError, Result};
use axum::{
    http::HeaderValue,
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{AllowHeaders, AllowMethods, CorsLayer},
    trace::TraceLayer,
};

pub use routes::AppState;

fn cors_layer(origins: &[String]) -> Result<CorsLayer> {
    let origins = origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin).map_err(|e| ProxyError::InvalidConfigValueError {
                field: "server.cors_origins".to_string(),
                value: origin.clone(),
                reason: e.to_string(),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    // 帶 credentials 時不能用 `*`，改為回傳請求中的 method 與 headers
    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true))
}

/// Build the full axum router with all routes and middleware.
pub fn build_router(upstream: Arc<dyn UpstreamSource>, cors_origins: &[String]) -> Result<Router> {
    let api = Router::new()
        .route("/sessions", get(routes::get_sessions))
        .route("/drivers", get(routes::get_drivers))
        .route("/drivers/:driver_number", get(routes::get_driver))
        .route("/location/:session_key", get(routes::get_location))
        .route("/telemetry/:session_key", get(routes::get_telemetry))
        .route("/laps/:session_key", get(routes::get_laps))
        .route("/positions/:session_key", get(routes::get_positions))
        .route("/intervals/:session_key", get(routes::get_intervals))
        .route("/pitstops/:session_key", get(routes::get_pit_stops))
        .route("/stints/:session_key", get(routes::get_stints));

    Ok(Router::new()
        .route("/", get(routes::root))
        .nest("/api", api)
        .with_state(AppState::new(upstream))
        .layer(CatchPanicLayer::custom(error::handle_panic))
        .layer(cors_layer(cors_origins)?)
        .layer(TraceLayer::new_for_http()))
}
