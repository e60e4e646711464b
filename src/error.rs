use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

use crate::domain::{DomainError, ProviderError};

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

#[derive(Serialize)]
struct ErrorInfo {
    code: &'static str,
    message: String,
    details: Value,
}

/// Application-level error with a fixed HTTP mapping.
///
/// - `Validation` - caller-caused request or domain failures (400)
/// - `NotFound` - requested rate absent from the fetched snapshot (404)
/// - `TooManyRequests` - throttled by the request limiter (429)
/// - `ProviderUnavailable` - upstream provider failure after transport
///   retries were exhausted (503)
/// - `Internal` - everything else, with no internal detail exposed (500)
#[derive(Debug)]
pub enum AppError {
    Validation { message: String, details: Value },
    NotFound { message: String, details: Value },
    TooManyRequests,
    ProviderUnavailable { message: String },
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match self {
            AppError::Validation { message, details } => (
                StatusCode::BAD_REQUEST,
                "validation_error",
                message,
                details,
            ),
            AppError::NotFound { message, details } => {
                (StatusCode::NOT_FOUND, "not_found", message, details)
            }
            AppError::TooManyRequests => (
                StatusCode::TOO_MANY_REQUESTS,
                "too_many_requests",
                "Too many requests".to_string(),
                json!({}),
            ),
            AppError::ProviderUnavailable { message } => (
                StatusCode::SERVICE_UNAVAILABLE,
                "provider_unavailable",
                message,
                json!({}),
            ),
            AppError::Internal { message, details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                message,
                details,
            ),
        };

        let body = ErrorBody {
            error: ErrorInfo {
                code,
                message,
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Domain-construction failures are always caller-caused.
impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        let details = match &e {
            DomainError::RestrictedCurrency(code) | DomainError::NonPositiveRate(code) => {
                json!({ "currency": code })
            }
            _ => json!({}),
        };

        AppError::bad_request(e.to_string(), details)
    }
}

/// Provider failures propagate unchanged; they are never retried here.
impl From<ProviderError> for AppError {
    fn from(e: ProviderError) -> Self {
        match e {
            ProviderError::Unavailable(message) => AppError::ProviderUnavailable { message },
            ProviderError::Domain(domain) => domain.into(),
        }
    }
}
