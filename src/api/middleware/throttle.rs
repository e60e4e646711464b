//! Request throttling middleware backed by the shared key/value store.
//!
//! A fixed-window counter per caller identity: the first request in a window
//! creates the counter, every admitted request increments it and pushes the
//! expiry out to a full window, and the counter disappears on its own when
//! the window elapses. Counters live in the same store as the rate cache, so
//! the limit is enforced across every instance of the service.

use std::net::SocketAddr;
use std::time::Duration;

use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::Response,
};
use tracing::{debug, warn};

use crate::error::AppError;
use crate::infrastructure::cache::CacheService;
use crate::state::AppState;

/// Throttling configuration.
#[derive(Debug, Clone)]
pub struct ThrottleSettings {
    /// Requests admitted per identity per window.
    pub permit_limit: u32,
    /// Window duration; the expiry is re-anchored on every admitted request.
    pub window: Duration,
}

impl Default for ThrottleSettings {
    fn default() -> Self {
        Self {
            permit_limit: 100,
            window: Duration::from_secs(60),
        }
    }
}

/// Authenticated caller identity, inserted into request extensions by the
/// authentication layer (outside this crate's scope).
#[derive(Debug, Clone)]
pub struct ClientId(pub String);

/// Axum middleware gating every request through [`check`].
///
/// Rejected requests receive `429 Too Many Requests` and never reach the
/// wrapped handler.
pub async fn layer(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let identity = resolve_identity(&req);

    if !check(state.cache.as_ref(), &state.throttle, &identity).await {
        debug!("Throttled request from {}", identity);
        return Err(AppError::TooManyRequests);
    }

    Ok(next.run(req).await)
}

/// Resolves the caller identity: authenticated client id, else the peer
/// network address, else a shared anonymous bucket. First available wins.
fn resolve_identity(req: &Request) -> String {
    if let Some(ClientId(id)) = req.extensions().get::<ClientId>() {
        return id.clone();
    }

    if let Some(ConnectInfo(addr)) = req.extensions().get::<ConnectInfo<SocketAddr>>() {
        return addr.ip().to_string();
    }

    "anonymous".to_string()
}

/// Admits or rejects one request for `identity`.
///
/// Reads the current counter (absent means zero); at or above the permit
/// limit the request is rejected without touching state. Otherwise the
/// counter is incremented and its expiry reset to a full window from now.
///
/// The read and the write are two separate store operations, so concurrent
/// requests from one identity can both observe the pre-increment count and
/// both be admitted, slightly overshooting the limit. Enforcement is
/// approximate, not a hard guarantee.
///
/// A store failure admits the request: throttling degrades open, matching
/// the cache layer's fail-open policy.
pub async fn check(store: &dyn CacheService, settings: &ThrottleSettings, identity: &str) -> bool {
    let key = format!("throttle:{}", identity);

    let count = current_count(store, &key).await;
    if count >= settings.permit_limit {
        return false;
    }

    let bytes = (count + 1).to_le_bytes();
    if let Err(e) = store.set(&key, &bytes, settings.window).await {
        warn!("Failed to update throttle counter {}: {}", key, e);
    }

    true
}

/// Reads the stored counter; absent, malformed, or failing reads count as 0.
async fn current_count(store: &dyn CacheService, key: &str) -> u32 {
    match store.get(key).await {
        Ok(Some(bytes)) if bytes.len() == 4 => {
            u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
        }
        Ok(Some(_)) | Ok(None) => 0,
        Err(e) => {
            warn!("Failed to read throttle counter {}: {}", key, e);
            0
        }
    }
}
