//! Core business entities, currency rules, and the provider contract.
//!
//! This layer is free of I/O: validation, snapshot construction, and the
//! [`RateProvider`] trait that infrastructure implements.

pub mod currency;
pub mod error;
pub mod exchange_rate;
pub mod provider;

pub use currency::{CurrencyRules, CurrencySettings};
pub use error::DomainError;
pub use exchange_rate::ExchangeRate;
pub use provider::{ProviderError, RateProvider};
