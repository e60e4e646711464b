//! Upstream exchange rate provider clients.

mod frankfurter;

pub use frankfurter::FrankfurterClient;
