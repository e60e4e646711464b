//! Data Transfer Objects for API requests and responses.

pub mod convert;
pub mod health;
pub mod rates;
