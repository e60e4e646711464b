use std::sync::Arc;

use crate::api::middleware::throttle::ThrottleSettings;
use crate::application::services::{ConversionService, ExchangeRateService};
use crate::infrastructure::cache::CacheService;

/// Shared application state, wired explicitly in [`crate::server::run`].
///
/// Every component receives its collaborators through constructors; there is
/// no ambient lookup and no global mutable state beyond the immutable
/// configuration captured here at startup.
#[derive(Clone)]
pub struct AppState {
    pub rates_service: Arc<ExchangeRateService>,
    pub conversion_service: Arc<ConversionService>,
    /// Shared store consulted directly by the request limiter.
    pub cache: Arc<dyn CacheService>,
    pub throttle: ThrottleSettings,
}
