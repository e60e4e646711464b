//! HTTP request handlers for API endpoints.

mod convert;
mod health;
mod rates;

pub use convert::convert_handler;
pub use health::health_handler;
pub use rates::{historical_range_handler, historical_rates_handler, latest_rates_handler};
