//! REST API layer for HTTP request/response handling.
//!
//! Translates HTTP requests into application service calls and formats
//! responses. Thin by design: validation and orchestration live in the
//! application layer.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
