//! Request-level validation.
//!
//! Every rule for a request is evaluated and every violation collected into
//! a single [`AppError::Validation`] with field-scoped messages, rather than
//! failing fast on the first problem. Date comparisons use the UTC calendar
//! date, never wall-clock time.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde_json::json;

use crate::domain::CurrencyRules;
use crate::error::AppError;

/// One field-scoped violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Builds the aggregate validation error from collected violations.
fn validation_error(errors: Vec<FieldError>) -> AppError {
    let details: Vec<_> = errors
        .iter()
        .map(|e| json!({ "field": e.field, "message": e.message }))
        .collect();

    AppError::bad_request("Validation failed", json!({ "errors": details }))
}

/// Checks a required currency field: presence, format, restriction.
///
/// The restriction check only runs when the format is valid, so a malformed
/// code yields one violation, not two.
fn check_currency(
    rules: &CurrencyRules,
    field: &'static str,
    label: &str,
    value: &str,
    errors: &mut Vec<FieldError>,
) {
    if value.trim().is_empty() {
        errors.push(FieldError::new(field, format!("{} is required", label)));
        return;
    }

    match CurrencyRules::normalize(value) {
        Ok(normalized) => {
            if rules.is_restricted(&normalized) {
                errors.push(FieldError::new(field, format!("{} is restricted", label)));
            }
        }
        Err(_) => {
            errors.push(FieldError::new(
                field,
                format!("{} has invalid format", label),
            ));
        }
    }
}

fn is_future(date: NaiveDate) -> bool {
    date > Utc::now().date_naive()
}

/// Validates a latest-rates request. The base currency is optional; when
/// present it must be well-formed and not restricted.
pub fn validate_latest_request(
    rules: &CurrencyRules,
    base_currency: Option<&str>,
) -> Result<(), AppError> {
    let mut errors = Vec::new();

    if let Some(base) = base_currency
        && !base.trim().is_empty()
    {
        check_currency(rules, "base_currency", "Base currency", base, &mut errors);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(validation_error(errors))
    }
}

/// Validates a historical range request: base currency, date ordering,
/// future dates, and pagination bounds. All violations are collected.
pub fn validate_range_request(
    rules: &CurrencyRules,
    base_currency: &str,
    start_date: NaiveDate,
    end_date: NaiveDate,
    page: u32,
    page_size: u32,
) -> Result<(), AppError> {
    let mut errors = Vec::new();

    check_currency(
        rules,
        "base_currency",
        "Base currency",
        base_currency,
        &mut errors,
    );

    if start_date > end_date {
        errors.push(FieldError::new(
            "start_date",
            "Start date must be before or equal to end date",
        ));
    }
    if is_future(start_date) {
        errors.push(FieldError::new(
            "start_date",
            "Start date cannot be in the future",
        ));
    }
    if is_future(end_date) {
        errors.push(FieldError::new(
            "end_date",
            "End date cannot be in the future",
        ));
    }

    if !(1..=100).contains(&page_size) {
        errors.push(FieldError::new(
            "page_size",
            "Page size must be between 1 and 100",
        ));
    }
    if page < 1 {
        errors.push(FieldError::new(
            "page",
            "Page number must be greater than 0",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(validation_error(errors))
    }
}

/// Validates a conversion request: both currencies and a positive amount.
pub fn validate_convert_request(
    rules: &CurrencyRules,
    from_currency: &str,
    to_currency: &str,
    amount: Decimal,
) -> Result<(), AppError> {
    let mut errors = Vec::new();

    check_currency(
        rules,
        "from_currency",
        "From currency",
        from_currency,
        &mut errors,
    );
    check_currency(rules, "to_currency", "To currency", to_currency, &mut errors);

    if amount <= Decimal::ZERO {
        errors.push(FieldError::new(
            "amount",
            "Amount must be greater than zero",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(validation_error(errors))
    }
}
