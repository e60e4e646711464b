//! Infrastructure layer for external integrations.
//!
//! Implements interfaces consumed by the application layer: the shared
//! Redis key/value store and the upstream rate provider client.

pub mod cache;
pub mod provider;
