#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal_macros::dec;

use currency_converter::api::middleware::throttle::ThrottleSettings;
use currency_converter::application::services::{ConversionService, ExchangeRateService};
use currency_converter::domain::{
    CurrencyRules, CurrencySettings, ExchangeRate, ProviderError, RateProvider,
};
use currency_converter::infrastructure::cache::{CacheResult, CacheService};
use currency_converter::state::AppState;

/// The publication date every stubbed "latest" snapshot carries.
pub const LATEST_DATE: (i32, u32, u32) = (2024, 1, 15);

pub fn test_rules() -> CurrencyRules {
    CurrencyRules::new(&CurrencySettings {
        default_base_currency: "EUR".to_string(),
        restricted_currencies: vec!["TRY".to_string(), "PLN".to_string()],
    })
}

/// In-process store with real expiry, standing in for Redis.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, (Vec<u8>, Instant)>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CacheService for MemoryStore {
    async fn get(&self, key: &str) -> CacheResult<Option<Vec<u8>>> {
        let mut entries = self.entries.lock().unwrap();
        let now = Instant::now();

        let expired = matches!(entries.get(key), Some((_, expires_at)) if *expires_at <= now);
        if expired {
            entries.remove(key);
            return Ok(None);
        }

        Ok(entries.get(key).map(|(bytes, _)| bytes.clone()))
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Duration) -> CacheResult<()> {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), (value.to_vec(), Instant::now() + ttl));
        Ok(())
    }

    async fn delete(&self, key: &str) -> CacheResult<()> {
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }
}

/// Deterministic provider: every snapshot carries the same rate table, so
/// tests can assert exact conversion results.
///
/// Counts upstream calls so tests can observe whether the cache absorbed a
/// request.
pub struct StubProvider {
    rules: CurrencyRules,
    fail: bool,
    delay: Duration,
    pub calls: Arc<AtomicUsize>,
}

impl StubProvider {
    pub fn new() -> Self {
        Self {
            rules: test_rules(),
            fail: false,
            delay: Duration::ZERO,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// A provider whose every call fails as unavailable.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    /// A provider that sleeps before answering, to hold a window open for
    /// concurrency tests.
    pub fn slow(delay: Duration) -> Self {
        Self {
            delay,
            ..Self::new()
        }
    }

    fn snapshot(&self, base: &str, date: NaiveDate) -> Result<ExchangeRate, ProviderError> {
        if self.fail {
            return Err(ProviderError::Unavailable("stub offline".to_string()));
        }

        let rates = HashMap::from([
            ("USD".to_string(), dec!(1.1)),
            ("GBP".to_string(), dec!(0.85)),
            ("JPY".to_string(), dec!(160)),
        ]);

        Ok(ExchangeRate::create(base, date, rates, &self.rules)?)
    }
}

#[async_trait]
impl RateProvider for StubProvider {
    async fn fetch_latest(&self, base_currency: &str) -> Result<ExchangeRate, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        let (y, m, d) = LATEST_DATE;
        self.snapshot(base_currency, NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    async fn fetch_on(
        &self,
        base_currency: &str,
        date: NaiveDate,
    ) -> Result<ExchangeRate, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.snapshot(base_currency, date)
    }

    async fn fetch_range(
        &self,
        base_currency: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<ExchangeRate>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        start_date
            .iter_days()
            .take_while(|day| *day <= end_date)
            .map(|day| self.snapshot(base_currency, day))
            .collect()
    }
}

/// Throttle settings loose enough to never trip in non-throttle tests.
pub fn permissive_throttle() -> ThrottleSettings {
    ThrottleSettings {
        permit_limit: 1_000,
        window: Duration::from_secs(60),
    }
}

pub fn create_test_state(provider: StubProvider, throttle: ThrottleSettings) -> AppState {
    let cache: Arc<dyn CacheService> = Arc::new(MemoryStore::new());
    let rules = test_rules();

    let rates_service = Arc::new(ExchangeRateService::new(
        cache.clone(),
        Arc::new(provider),
        rules.clone(),
    ));
    let conversion_service = Arc::new(ConversionService::new(rates_service.clone(), rules));

    AppState {
        rates_service,
        conversion_service,
        cache,
        throttle,
    }
}
