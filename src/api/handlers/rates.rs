//! Handlers for exchange rate endpoints.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::NaiveDate;

use crate::api::dto::rates::{
    HistoricalRangeQuery, HistoricalRatesQuery, LatestRatesQuery, PagedRatesResponse,
    RatesResponse,
};
use crate::error::AppError;
use crate::state::AppState;

/// Returns the latest exchange rates.
///
/// # Endpoint
///
/// `GET /api/rates/latest?base=EUR`
///
/// The `base` parameter is optional; the configured default base currency is
/// used when it is absent.
///
/// # Errors
///
/// Returns 400 for an invalid or restricted base currency, 503 when the
/// upstream provider is unavailable.
pub async fn latest_rates_handler(
    State(state): State<AppState>,
    Query(query): Query<LatestRatesQuery>,
) -> Result<Json<RatesResponse>, AppError> {
    let snapshot = state.rates_service.get_latest(query.base.as_deref()).await?;

    Ok(Json(snapshot.into()))
}

/// Returns the exchange rates published on a specific date.
///
/// # Endpoint
///
/// `GET /api/rates/{date}?base=EUR`
///
/// # Errors
///
/// Returns 400 for a missing/invalid base currency or a future date, 503
/// when the upstream provider is unavailable.
pub async fn historical_rates_handler(
    State(state): State<AppState>,
    Path(date): Path<NaiveDate>,
    Query(query): Query<HistoricalRatesQuery>,
) -> Result<Json<RatesResponse>, AppError> {
    let base = query.base.as_deref().unwrap_or_default();
    let snapshot = state.rates_service.get_historical(base, date).await?;

    Ok(Json(snapshot.into()))
}

/// Returns one page of historical rates over an inclusive date range.
///
/// # Endpoint
///
/// `GET /api/rates/history?base=EUR&start_date=2024-01-01&end_date=2024-01-31&page=1&page_size=10`
///
/// `page` defaults to 1 and `page_size` to 10. Pagination metadata always
/// reflects the full requested span.
///
/// # Errors
///
/// Returns 400 for an invalid base currency, inverted or future dates, or
/// pagination bounds out of range; 503 when the provider is unavailable.
pub async fn historical_range_handler(
    State(state): State<AppState>,
    Query(query): Query<HistoricalRangeQuery>,
) -> Result<Json<PagedRatesResponse>, AppError> {
    let base = query.base.as_deref().unwrap_or_default();
    let page = state
        .rates_service
        .get_historical_range(
            base,
            query.start_date,
            query.end_date,
            query.page,
            query.page_size,
        )
        .await?;

    Ok(Json(page.into()))
}
