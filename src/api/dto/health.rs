//! DTOs for the health endpoint.

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub checks: HealthChecks,
}

#[derive(Debug, Serialize)]
pub struct HealthChecks {
    pub cache: CheckStatus,
    pub provider: CheckStatus,
}

/// Serializes as a bare string ("ok" / "unavailable").
#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct CheckStatus {
    status: &'static str,
}

impl CheckStatus {
    pub fn from_ok(ok: bool) -> Self {
        Self {
            status: if ok { "ok" } else { "unavailable" },
        }
    }
}
