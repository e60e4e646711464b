//! Health check endpoint.

use axum::{Json, extract::State};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Reports service health: cache reachability and provider reachability.
///
/// # Endpoint
///
/// `GET /api/health`
///
/// The provider check goes through the rates service, so a warm cache
/// answers it without an upstream call.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let cache_ok = state.cache.health_check().await;
    let provider_ok = state.rates_service.get_latest(None).await.is_ok();

    let status = if cache_ok && provider_ok {
        "healthy"
    } else {
        "degraded"
    };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        checks: HealthChecks {
            cache: CheckStatus::from_ok(cache_ok),
            provider: CheckStatus::from_ok(provider_ok),
        },
    })
}
