//! Currency conversion built on latest exchange rates.

use std::sync::Arc;

use rust_decimal::Decimal;
use serde_json::json;
use tracing::{error, info};

use crate::application::services::rates_service::ExchangeRateService;
use crate::application::validation;
use crate::domain::CurrencyRules;
use crate::error::AppError;

/// Outcome of a conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    pub from_currency: String,
    pub to_currency: String,
    pub amount: Decimal,
    pub converted_amount: Decimal,
    pub rate: Decimal,
}

/// Converts an amount between two currencies using the latest rates for the
/// source currency. All arithmetic is decimal, never floating point.
pub struct ConversionService {
    rates_service: Arc<ExchangeRateService>,
    rules: CurrencyRules,
}

impl ConversionService {
    pub fn new(rates_service: Arc<ExchangeRateService>, rules: CurrencyRules) -> Self {
        Self {
            rates_service,
            rules,
        }
    }

    /// Converts `amount` from one currency to another.
    ///
    /// Fetches the latest snapshot for the source currency and looks the
    /// target up in its rate map. The target is restriction-checked again at
    /// lookup time even though snapshot construction already filtered
    /// restricted entries.
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] for invalid/restricted currencies or a
    ///   non-positive amount (all violations collected).
    /// - [`AppError::NotFound`] when the target currency is absent from the
    ///   fetched rate map, naming the currency.
    /// - [`AppError::ProviderUnavailable`] on upstream failure, unchanged.
    pub async fn convert(
        &self,
        from_currency: &str,
        to_currency: &str,
        amount: Decimal,
    ) -> Result<Conversion, AppError> {
        validation::validate_convert_request(&self.rules, from_currency, to_currency, amount)?;

        let from = CurrencyRules::normalize(from_currency)?;
        let to = CurrencyRules::normalize(to_currency)?;

        let snapshot = self
            .rates_service
            .get_latest(Some(&from))
            .await
            .inspect_err(|e| {
                error!(
                    "Error converting {} {} to {}: {:?}",
                    amount, from, to, e
                );
            })?;

        let rate = snapshot.rate_for(&to, &self.rules)?.ok_or_else(|| {
            AppError::not_found(
                format!("No rate found for {}", to),
                json!({ "currency": to }),
            )
        })?;

        let converted_amount = amount * rate;

        info!(
            "Converted {} {} to {} {}",
            amount, from, converted_amount, to
        );

        Ok(Conversion {
            from_currency: from,
            to_currency: to,
            amount,
            converted_amount,
            rate,
        })
    }
}
