//! Application layer services implementing business logic.
//!
//! Orchestrates domain operations: request validation, cache-aside rate
//! retrieval, pagination, and conversion arithmetic. No HTTP or storage
//! details live here.

pub mod services;
pub mod validation;
