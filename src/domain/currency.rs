//! Currency code validation and restricted-currency policy.

use std::collections::HashSet;

use crate::domain::error::DomainError;

/// Process-wide currency configuration.
///
/// Loaded once at startup and passed by reference to every validating
/// component. Never mutated after load.
#[derive(Debug, Clone)]
pub struct CurrencySettings {
    /// Base currency used when a request omits one.
    pub default_base_currency: String,
    /// Currency codes excluded from all rate computations and outputs.
    pub restricted_currencies: Vec<String>,
}

impl Default for CurrencySettings {
    fn default() -> Self {
        Self {
            default_base_currency: "EUR".to_string(),
            restricted_currencies: Vec::new(),
        }
    }
}

/// Format validation and restriction policy for 3-letter currency codes.
///
/// Every currency string entering the system from any boundary (request
/// parameter, provider response, configuration) goes through
/// [`CurrencyRules::normalize`] before use.
#[derive(Debug, Clone)]
pub struct CurrencyRules {
    /// Stored raw; validated on access so a misconfigured default fails
    /// loudly at the first call rather than silently at startup.
    default_base: String,
    /// Uppercased for case-insensitive membership tests against codes
    /// that are already normalized.
    restricted: HashSet<String>,
}

impl CurrencyRules {
    pub fn new(settings: &CurrencySettings) -> Self {
        Self {
            default_base: settings.default_base_currency.clone(),
            restricted: settings
                .restricted_currencies
                .iter()
                .map(|c| c.trim().to_ascii_uppercase())
                .collect(),
        }
    }

    /// Validates a currency code and returns its normalized (uppercase) form.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidFormat`] if the code is empty or
    /// whitespace, is not exactly 3 characters, or contains non-alphabetic
    /// characters.
    pub fn normalize(code: &str) -> Result<String, DomainError> {
        if code.trim().is_empty() {
            return Err(DomainError::InvalidFormat(
                "Currency code cannot be empty".to_string(),
            ));
        }

        if code.chars().count() != 3 {
            return Err(DomainError::InvalidFormat(
                "Currency code must be exactly 3 characters".to_string(),
            ));
        }

        if !code.chars().all(|c| c.is_alphabetic()) {
            return Err(DomainError::InvalidFormat(
                "Currency code must contain only letters".to_string(),
            ));
        }

        Ok(code.to_uppercase())
    }

    /// Checks whether a currency is restricted by configuration.
    ///
    /// `code` must already be normalized.
    pub fn is_restricted(&self, code: &str) -> bool {
        self.restricted.contains(code)
    }

    /// Fails if the currency is restricted, no-op otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::RestrictedCurrency`] naming the code.
    pub fn assert_not_restricted(&self, code: &str) -> Result<(), DomainError> {
        if self.is_restricted(code) {
            return Err(DomainError::RestrictedCurrency(code.to_string()));
        }
        Ok(())
    }

    /// Returns the configured default base currency, normalized.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidFormat`] if the configured default
    /// itself fails format validation.
    pub fn default_base_currency(&self) -> Result<String, DomainError> {
        Self::normalize(&self.default_base)
    }
}
