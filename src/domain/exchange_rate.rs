//! Exchange rate snapshot entity.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::currency::CurrencyRules;
use crate::domain::error::DomainError;

/// Immutable set of exchange rates for one base currency as of one date.
///
/// Constructed exclusively through [`ExchangeRate::create`], which validates
/// and filters raw provider data. Never mutated after construction; discarded
/// when superseded by a fresh fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeRate {
    pub id: Uuid,
    pub base_currency: String,
    pub date: NaiveDate,
    /// Target currency code to rate (1 unit of base = rate units of target).
    /// Contains only valid, non-restricted codes with strictly positive rates.
    pub rates: BTreeMap<String, Decimal>,
}

impl ExchangeRate {
    /// Validating factory for raw (untrusted) provider data.
    ///
    /// Restricted entries are dropped before their rate is inspected, so a
    /// restricted currency with a zero or negative rate never raises
    /// [`DomainError::NonPositiveRate`].
    ///
    /// # Errors
    ///
    /// - [`DomainError::InvalidFormat`] if the base or any rate key fails
    ///   format validation.
    /// - [`DomainError::RestrictedCurrency`] if the base currency is
    ///   restricted.
    /// - [`DomainError::EmptyRateSet`] if `raw_rates` is empty, or becomes
    ///   empty after dropping restricted entries.
    /// - [`DomainError::NonPositiveRate`] if a surviving entry has a rate
    ///   less than or equal to zero.
    pub fn create(
        raw_base: &str,
        date: NaiveDate,
        raw_rates: HashMap<String, Decimal>,
        rules: &CurrencyRules,
    ) -> Result<Self, DomainError> {
        let base_currency = CurrencyRules::normalize(raw_base)?;
        rules.assert_not_restricted(&base_currency)?;

        if raw_rates.is_empty() {
            return Err(DomainError::EmptyRateSet);
        }

        let mut rates = BTreeMap::new();
        for (currency, rate) in raw_rates {
            let currency = CurrencyRules::normalize(&currency)?;

            // Restriction filter runs before the positivity check: data that
            // will be discarded anyway is never validated further.
            if rules.is_restricted(&currency) {
                continue;
            }

            if rate <= Decimal::ZERO {
                return Err(DomainError::NonPositiveRate(currency));
            }

            rates.insert(currency, rate);
        }

        if rates.is_empty() {
            return Err(DomainError::EmptyRateSet);
        }

        Ok(Self {
            id: Uuid::new_v4(),
            base_currency,
            date,
            rates,
        })
    }

    /// Looks up the rate for a target currency.
    ///
    /// The target is independently restriction-checked even though the
    /// snapshot already filtered restricted entries, because the snapshot may
    /// have been built for a different base than the caller is asking about.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidFormat`] or
    /// [`DomainError::RestrictedCurrency`] for an invalid or restricted
    /// target. An absent entry is `Ok(None)`, not an error.
    pub fn rate_for(
        &self,
        currency_code: &str,
        rules: &CurrencyRules,
    ) -> Result<Option<Decimal>, DomainError> {
        let currency = CurrencyRules::normalize(currency_code)?;
        rules.assert_not_restricted(&currency)?;

        Ok(self.rates.get(&currency).copied())
    }
}
