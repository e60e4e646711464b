//! Business logic services for the application layer.

pub mod conversion_service;
pub mod rates_service;

pub use conversion_service::{Conversion, ConversionService};
pub use rates_service::{ExchangeRateService, PagedResponse};
