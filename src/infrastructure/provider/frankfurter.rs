//! Frankfurter API client.
//!
//! Fetches exchange rates from the public Frankfurter service and rebuilds
//! them as domain snapshots, so upstream payloads are re-validated (and
//! restricted currencies filtered) on entry.

use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::{error, info};

use crate::domain::{CurrencyRules, ExchangeRate, ProviderError, RateProvider};

/// Latest/single-date response body.
#[derive(Debug, Deserialize)]
struct FrankfurterResponse {
    base: String,
    date: NaiveDate,
    rates: HashMap<String, Decimal>,
}

/// Time-series response body: one rate map per published day.
#[derive(Debug, Deserialize)]
struct FrankfurterTimeSeriesResponse {
    base: String,
    rates: BTreeMap<NaiveDate, HashMap<String, Decimal>>,
}

/// [`RateProvider`] implementation backed by the Frankfurter HTTP API.
///
/// Transient transport failures are retried with exponential backoff and
/// jitter; once the configured attempts are exhausted the failure surfaces
/// as [`ProviderError::Unavailable`] and is never retried by callers.
pub struct FrankfurterClient {
    http: reqwest::Client,
    base_url: String,
    rules: CurrencyRules,
    retry_attempts: usize,
    retry_base_delay: Duration,
}

impl FrankfurterClient {
    /// Creates a client for the given API base URL.
    ///
    /// `retry_attempts` is the number of retries after the initial request;
    /// `retry_base_delay` seeds the exponential backoff.
    pub fn new(
        base_url: impl Into<String>,
        rules: CurrencyRules,
        retry_attempts: usize,
        retry_base_delay: Duration,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            rules,
            retry_attempts,
            retry_base_delay,
        }
    }

    /// Issues a GET with retry/backoff and deserializes the JSON body.
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ProviderError> {
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), path);
        let strategy = ExponentialBackoff::from_millis(self.retry_base_delay.as_millis() as u64)
            .map(jitter)
            .take(self.retry_attempts);

        Retry::spawn(strategy, || async {
            let response = self
                .http
                .get(&url)
                .send()
                .await
                .map_err(|e| e.to_string())?;

            let response = response.error_for_status().map_err(|e| e.to_string())?;

            response.json::<T>().await.map_err(|e| e.to_string())
        })
        .await
        .map_err(|e| {
            error!("Provider request failed after retries: {} ({})", url, e);
            ProviderError::Unavailable(e)
        })
    }
}

/// Rebuilds a time-series payload as one validated snapshot per day.
///
/// Kept as a free function so the mapping is testable without HTTP.
fn snapshots_from_series(
    series: FrankfurterTimeSeriesResponse,
    rules: &CurrencyRules,
) -> Result<Vec<ExchangeRate>, ProviderError> {
    series
        .rates
        .into_iter()
        .map(|(date, rates)| {
            ExchangeRate::create(&series.base, date, rates, rules).map_err(ProviderError::from)
        })
        .collect()
}

#[async_trait]
impl RateProvider for FrankfurterClient {
    async fn fetch_latest(&self, base_currency: &str) -> Result<ExchangeRate, ProviderError> {
        let body: FrankfurterResponse = self
            .get_json(&format!("latest?base={}", base_currency))
            .await?;

        info!("Fetched latest rates for {} from provider", base_currency);

        Ok(ExchangeRate::create(
            &body.base, body.date, body.rates, &self.rules,
        )?)
    }

    async fn fetch_on(
        &self,
        base_currency: &str,
        date: NaiveDate,
    ) -> Result<ExchangeRate, ProviderError> {
        let body: FrankfurterResponse = self
            .get_json(&format!("{}?base={}", date, base_currency))
            .await?;

        info!(
            "Fetched historical rates for {} on {} from provider",
            base_currency, date
        );

        Ok(ExchangeRate::create(
            &body.base, body.date, body.rates, &self.rules,
        )?)
    }

    async fn fetch_range(
        &self,
        base_currency: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<ExchangeRate>, ProviderError> {
        let body: FrankfurterTimeSeriesResponse = self
            .get_json(&format!(
                "{}..{}?base={}",
                start_date, end_date, base_currency
            ))
            .await?;

        info!(
            "Fetched historical rates for {} from {} to {} from provider",
            base_currency, start_date, end_date
        );

        snapshots_from_series(body, &self.rules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CurrencySettings;
    use rust_decimal_macros::dec;

    fn rules_with(restricted: &[&str]) -> CurrencyRules {
        CurrencyRules::new(&CurrencySettings {
            default_base_currency: "EUR".to_string(),
            restricted_currencies: restricted.iter().map(|s| s.to_string()).collect(),
        })
    }

    #[test]
    fn test_deserialize_latest_response() {
        let body = r#"{"amount":1.0,"base":"EUR","date":"2024-01-15","rates":{"USD":1.0914,"GBP":0.8592}}"#;

        let parsed: FrankfurterResponse = serde_json::from_str(body).unwrap();

        assert_eq!(parsed.base, "EUR");
        assert_eq!(parsed.date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        assert_eq!(parsed.rates.get("USD"), Some(&dec!(1.0914)));
    }

    #[test]
    fn test_deserialize_time_series_response() {
        let body = r#"{"amount":1.0,"base":"EUR","start_date":"2024-01-01","end_date":"2024-01-02","rates":{"2024-01-01":{"USD":1.10},"2024-01-02":{"USD":1.11}}}"#;

        let parsed: FrankfurterTimeSeriesResponse = serde_json::from_str(body).unwrap();

        assert_eq!(parsed.base, "EUR");
        assert_eq!(parsed.rates.len(), 2);
    }

    #[test]
    fn test_snapshots_from_series_ordered_and_filtered() {
        let body = r#"{"base":"EUR","rates":{"2024-01-02":{"USD":1.11,"TRY":30.0},"2024-01-01":{"USD":1.10}}}"#;
        let series: FrankfurterTimeSeriesResponse = serde_json::from_str(body).unwrap();

        let snapshots = snapshots_from_series(series, &rules_with(&["TRY"])).unwrap();

        assert_eq!(snapshots.len(), 2);
        assert_eq!(
            snapshots[0].date,
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
        );
        assert_eq!(
            snapshots[1].date,
            NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()
        );
        assert!(!snapshots[1].rates.contains_key("TRY"));
    }

    #[test]
    fn test_snapshots_from_series_propagates_domain_failure() {
        let body = r#"{"base":"EUR","rates":{"2024-01-01":{"USD":0}}}"#;
        let series: FrankfurterTimeSeriesResponse = serde_json::from_str(body).unwrap();

        assert!(matches!(
            snapshots_from_series(series, &rules_with(&[])),
            Err(ProviderError::Domain(_))
        ));
    }
}
