//! Upstream rate provider contract.

use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::error::DomainError;
use crate::domain::exchange_rate::ExchangeRate;

/// Errors surfaced by a rate provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The upstream service could not be reached after the client's
    /// transport-level retries were exhausted.
    #[error("Exchange rate provider unavailable: {0}")]
    Unavailable(String),

    /// The upstream payload failed domain validation (bad currency code,
    /// empty rate set). Propagates unchanged to the caller.
    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Source-of-truth for exchange rates.
///
/// Implementations own their transport retry/backoff policy; callers treat
/// any transient failure as [`ProviderError::Unavailable`] and never retry
/// themselves.
///
/// # Implementations
///
/// - [`crate::infrastructure::provider::FrankfurterClient`] - Frankfurter API client
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RateProvider: Send + Sync {
    /// Fetches the latest published rates for a base currency.
    async fn fetch_latest(&self, base_currency: &str) -> Result<ExchangeRate, ProviderError>;

    /// Fetches the rates published on a specific date.
    async fn fetch_on(
        &self,
        base_currency: &str,
        date: NaiveDate,
    ) -> Result<ExchangeRate, ProviderError>;

    /// Fetches one snapshot per published day in the inclusive date range.
    ///
    /// A single upstream call covers the whole range; callers paginate by
    /// narrowing the range, not by issuing one call per day.
    async fn fetch_range(
        &self,
        base_currency: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<ExchangeRate>, ProviderError>;
}
