//! Handler for the currency conversion endpoint.

use axum::{Json, extract::State};

use crate::api::dto::convert::{ConvertRequest, ConvertResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Converts an amount between two currencies at the latest rate.
///
/// # Endpoint
///
/// `POST /api/convert`
///
/// # Request Body
///
/// ```json
/// {
///   "from_currency": "USD",
///   "to_currency": "EUR",
///   "amount": "100"
/// }
/// ```
///
/// # Errors
///
/// Returns 400 with all collected violations if validation fails, 404 when
/// no rate exists for the target currency, 503 when the provider is
/// unavailable.
pub async fn convert_handler(
    State(state): State<AppState>,
    Json(payload): Json<ConvertRequest>,
) -> Result<Json<ConvertResponse>, AppError> {
    let conversion = state
        .conversion_service
        .convert(
            &payload.from_currency,
            &payload.to_currency,
            payload.amount,
        )
        .await?;

    Ok(Json(conversion.into()))
}
