//! Domain-level error taxonomy.

use thiserror::Error;

/// Errors raised by currency validation and snapshot construction.
///
/// All variants are caller-caused: they are detected locally, returned
/// immediately, and never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// A currency code failed format validation (empty, wrong length,
    /// or non-alphabetic characters).
    #[error("{0}")]
    InvalidFormat(String),

    /// The currency is excluded from all rate computations by configuration.
    #[error("Currency {0} is restricted")]
    RestrictedCurrency(String),

    /// A rate map was empty, either as received or after dropping
    /// restricted entries.
    #[error("Rates cannot be empty")]
    EmptyRateSet,

    /// A non-restricted rate entry carried a zero or negative value.
    #[error("Rate for {0} must be greater than zero")]
    NonPositiveRate(String),
}
