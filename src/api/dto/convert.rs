//! DTOs for the conversion endpoint.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::application::services::Conversion;

/// Request to convert an amount between two currencies.
#[derive(Debug, Deserialize)]
pub struct ConvertRequest {
    pub from_currency: String,
    pub to_currency: String,
    pub amount: Decimal,
}

/// Conversion result echoing the normalized inputs.
#[derive(Debug, Serialize)]
pub struct ConvertResponse {
    pub from_currency: String,
    pub to_currency: String,
    pub amount: Decimal,
    pub converted_amount: Decimal,
    pub rate: Decimal,
}

impl From<Conversion> for ConvertResponse {
    fn from(c: Conversion) -> Self {
        Self {
            from_currency: c.from_currency,
            to_currency: c.to_currency,
            amount: c.amount,
            converted_amount: c.converted_amount,
            rate: c.rate,
        }
    }
}
