//! DTOs for exchange rate endpoints.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::application::services::PagedResponse;
use crate::domain::ExchangeRate;

fn default_page() -> u32 {
    1
}

fn default_page_size() -> u32 {
    10
}

/// Query parameters for the latest-rates endpoint.
#[derive(Debug, Deserialize)]
pub struct LatestRatesQuery {
    /// Base currency; the configured default is used when absent.
    pub base: Option<String>,
}

/// Query parameters for the single-date historical endpoint.
#[derive(Debug, Deserialize)]
pub struct HistoricalRatesQuery {
    pub base: Option<String>,
}

/// Query parameters for the historical range endpoint.
#[derive(Debug, Deserialize)]
pub struct HistoricalRangeQuery {
    pub base: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

/// One rate snapshot. The internal snapshot identity is not exposed.
#[derive(Debug, Serialize)]
pub struct RatesResponse {
    pub base_currency: String,
    pub date: NaiveDate,
    pub rates: BTreeMap<String, Decimal>,
}

impl From<ExchangeRate> for RatesResponse {
    fn from(snapshot: ExchangeRate) -> Self {
        Self {
            base_currency: snapshot.base_currency,
            date: snapshot.date,
            rates: snapshot.rates,
        }
    }
}

/// One page of historical snapshots with pagination metadata.
#[derive(Debug, Serialize)]
pub struct PagedRatesResponse {
    pub items: Vec<RatesResponse>,
    pub current_page: u32,
    pub page_size: u32,
    pub total_pages: u32,
    pub total_items: u32,
    pub has_previous: bool,
    pub has_next: bool,
}

impl From<PagedResponse<ExchangeRate>> for PagedRatesResponse {
    fn from(page: PagedResponse<ExchangeRate>) -> Self {
        let has_previous = page.has_previous();
        let has_next = page.has_next();
        Self {
            items: page.items.into_iter().map(RatesResponse::from).collect(),
            current_page: page.current_page,
            page_size: page.page_size,
            total_pages: page.total_pages,
            total_items: page.total_items,
            has_previous,
            has_next,
        }
    }
}
