//! Exchange rate retrieval with cache-aside reads and range pagination.

use std::sync::Arc;
use std::time::Duration;

use chrono::{Days, NaiveDate};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{error, info, warn};

use crate::application::validation;
use crate::domain::{CurrencyRules, ExchangeRate, RateProvider};
use crate::error::AppError;
use crate::infrastructure::cache::CacheService;

/// Latest rates change throughout the day; keep them only briefly.
const LATEST_TTL: Duration = Duration::from_secs(5 * 60);
/// Historical rates are immutable once published.
const HISTORICAL_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// One page of results with pagination metadata.
///
/// Pure value, recomputed per request; only the constituent snapshots are
/// ever cached.
#[derive(Debug, Clone)]
pub struct PagedResponse<T> {
    pub items: Vec<T>,
    pub current_page: u32,
    pub page_size: u32,
    pub total_pages: u32,
    pub total_items: u32,
}

impl<T> PagedResponse<T> {
    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }
}

/// Service for latest, single-date, and date-range exchange rates.
///
/// Reads are cache-aside: check the store first, fall back to the provider
/// on a miss, then write through. The cache is never authoritative - every
/// cache failure, read or write, degrades to a miss and the call proceeds
/// against the provider. Two callers racing the same miss may both fetch and
/// both write; that duplicate work is accepted rather than locked away.
pub struct ExchangeRateService {
    cache: Arc<dyn CacheService>,
    provider: Arc<dyn RateProvider>,
    rules: CurrencyRules,
}

impl ExchangeRateService {
    /// Creates the service with its collaborators passed explicitly.
    pub fn new(
        cache: Arc<dyn CacheService>,
        provider: Arc<dyn RateProvider>,
        rules: CurrencyRules,
    ) -> Self {
        Self {
            cache,
            provider,
            rules,
        }
    }

    pub fn rules(&self) -> &CurrencyRules {
        &self.rules
    }

    /// Returns the latest rates for `base_currency`, or for the configured
    /// default when absent.
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] for an invalid or restricted base currency.
    /// - [`AppError::ProviderUnavailable`] when the provider fails after its
    ///   transport retries.
    pub async fn get_latest(&self, base_currency: Option<&str>) -> Result<ExchangeRate, AppError> {
        validation::validate_latest_request(&self.rules, base_currency)?;

        let currency = match base_currency {
            Some(base) if !base.trim().is_empty() => CurrencyRules::normalize(base)?,
            _ => self.rules.default_base_currency()?,
        };

        let cache_key = format!("rates:{}:latest", currency);

        if let Some(snapshot) = self.cache_get::<ExchangeRate>(&cache_key).await {
            info!("Retrieved latest rates for {} from cache", currency);
            return Ok(snapshot);
        }

        let snapshot = self.provider.fetch_latest(&currency).await?;
        self.cache_put(&cache_key, &snapshot, LATEST_TTL).await;
        info!("Retrieved and cached latest rates for {}", currency);

        Ok(snapshot)
    }

    /// Returns the rates published on a specific (non-future) date.
    ///
    /// # Errors
    ///
    /// Same as [`Self::get_latest`], plus a validation failure for a future
    /// date.
    pub async fn get_historical(
        &self,
        base_currency: &str,
        date: NaiveDate,
    ) -> Result<ExchangeRate, AppError> {
        // A single date is the degenerate range [date, date].
        validation::validate_range_request(&self.rules, base_currency, date, date, 1, 1)?;

        let currency = CurrencyRules::normalize(base_currency)?;
        let cache_key = format!("rates:{}:{}", currency, date);

        if let Some(snapshot) = self.cache_get::<ExchangeRate>(&cache_key).await {
            info!(
                "Retrieved historical rates for {} on {} from cache",
                currency, date
            );
            return Ok(snapshot);
        }

        let snapshot = self.provider.fetch_on(&currency, date).await?;
        self.cache_put(&cache_key, &snapshot, HISTORICAL_TTL).await;
        info!(
            "Retrieved and cached historical rates for {} on {}",
            currency, date
        );

        Ok(snapshot)
    }

    /// Returns one page of an inclusive date range of historical rates.
    ///
    /// The requested page is translated into a date sub-window and cached per
    /// resolved window, so two page-size combinations that resolve to the
    /// same window share one cache entry and one provider call. Pagination
    /// metadata is always computed from the full requested span, never from
    /// the cached window.
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] for an invalid base currency, inverted or
    ///   future dates, `page_size` outside `[1, 100]`, or `page` < 1.
    /// - [`AppError::ProviderUnavailable`] on provider failure.
    pub async fn get_historical_range(
        &self,
        base_currency: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
        page: u32,
        page_size: u32,
    ) -> Result<PagedResponse<ExchangeRate>, AppError> {
        validation::validate_range_request(
            &self.rules,
            base_currency,
            start_date,
            end_date,
            page,
            page_size,
        )?;

        let currency = CurrencyRules::normalize(base_currency)?;

        let total_items = (end_date - start_date).num_days() as u32 + 1;
        let total_pages = total_items.div_ceil(page_size);

        let skip = (page - 1) as u64 * page_size as u64;
        let page_start = start_date
            .checked_add_days(Days::new(skip))
            .ok_or_else(|| AppError::bad_request("Page is out of range", serde_json::json!({})))?;
        let page_end = page_start
            .checked_add_days(Days::new(page_size as u64 - 1))
            .map(|d| d.min(end_date))
            .unwrap_or(end_date);

        let cache_key = format!("rates:{}:{}:{}", currency, page_start, page_end);

        let items = if let Some(snapshots) = self.cache_get::<Vec<ExchangeRate>>(&cache_key).await
        {
            info!(
                "Retrieved historical rates from cache for {} from {} to {}",
                currency, page_start, page_end
            );
            snapshots
        } else {
            let snapshots = self
                .provider
                .fetch_range(&currency, page_start, page_end)
                .await?;
            self.cache_put(&cache_key, &snapshots, HISTORICAL_TTL).await;
            info!(
                "Retrieved and cached historical rates for {} from {} to {}",
                currency, page_start, page_end
            );
            snapshots
        };

        Ok(PagedResponse {
            items,
            current_page: page,
            page_size,
            total_pages,
            total_items,
        })
    }

    /// Cache read that degrades every failure to a miss: backend errors,
    /// absent keys, and undecodable payloads all return `None`.
    async fn cache_get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let bytes = match self.cache.get(key).await {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return None,
            Err(e) => {
                warn!("Cache read failed for {}: {}", key, e);
                return None;
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Discarding undecodable cache entry {}: {}", key, e);
                None
            }
        }
    }

    /// Best-effort cache write: a failure is recorded, never surfaced.
    async fn cache_put<T: Serialize>(&self, key: &str, value: &T, ttl: Duration) {
        let bytes = match serde_json::to_vec(value) {
            Ok(bytes) => bytes,
            Err(e) => {
                error!("Failed to serialize cache entry {}: {}", key, e);
                return;
            }
        };

        if let Err(e) = self.cache.set(key, &bytes, ttl).await {
            warn!("Cache write failed for {}: {}", key, e);
        }
    }
}
