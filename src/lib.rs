//! # Currency Converter
//!
//! A currency exchange rate and conversion service built with Axum and Redis.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Exchange rate snapshots, currency rules, provider trait
//! - **Application Layer** ([`application`]) - Request validation and service orchestration
//! - **Infrastructure Layer** ([`infrastructure`]) - Redis cache and the upstream rate provider
//! - **API Layer** ([`api`]) - REST API handlers, DTOs, and middleware
//!
//! ## Features
//!
//! - Latest, dated, and paginated historical exchange rates
//! - Currency conversion via latest rates
//! - Cache-aside Redis layer that fails open when the store is down
//! - Restricted-currency policy applied to every input and every snapshot
//! - Distributed fixed-window request limiting backed by the shared cache
//!
//! ## Quick Start
//!
//! ```bash
//! # All settings have defaults; Redis is optional
//! export REDIS_URL="redis://localhost:6379"
//!
//! # Start the service
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;

pub mod config;
pub mod server;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{ConversionService, ExchangeRateService, PagedResponse};
    pub use crate::domain::{CurrencyRules, CurrencySettings, ExchangeRate, RateProvider};
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}
