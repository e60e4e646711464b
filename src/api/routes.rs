//! API route configuration.
//!
//! Rate and conversion endpoints sit behind the request throttle; the health
//! endpoint does not, so monitoring keeps working while callers are limited.

use std::any::Any;

use axum::{
    Router, middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

use crate::api::handlers::{
    convert_handler, health_handler, historical_range_handler, historical_rates_handler,
    latest_rates_handler,
};
use crate::api::middleware::throttle;
use crate::error::AppError;
use crate::state::AppState;

/// Builds the application router.
///
/// # Endpoints
///
/// - `GET  /api/rates/latest`  - Latest rates for a base currency
/// - `GET  /api/rates/history` - Paginated historical range
/// - `GET  /api/rates/{date}`  - Rates on a specific date
/// - `POST /api/convert`       - Currency conversion
/// - `GET  /api/health`        - Health check (not throttled)
pub fn app_router(state: AppState) -> Router {
    let throttled = Router::new()
        .route("/api/rates/latest", get(latest_rates_handler))
        .route("/api/rates/history", get(historical_range_handler))
        .route("/api/rates/{date}", get(historical_rates_handler))
        .route("/api/convert", post(convert_handler))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            throttle::layer,
        ));

    Router::new()
        .merge(throttled)
        .route("/api/health", get(health_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(handle_panic))
        .with_state(state)
}

/// Maps a handler panic to a 500 response.
///
/// The panic payload is logged but never exposed to the caller.
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic"
    };

    tracing::error!("Request handler panicked: {}", detail);

    AppError::internal("Internal server error", serde_json::json!({})).into_response()
}
