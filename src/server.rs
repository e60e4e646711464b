//! HTTP server initialization and runtime setup.
//!
//! Handles cache setup, provider wiring, and Axum server lifecycle.

use crate::api::routes::app_router;
use crate::config::Config;
use crate::domain::{CurrencyRules, RateProvider};
use crate::infrastructure::cache::{CacheService, NullCache, RedisCache};
use crate::infrastructure::provider::FrankfurterClient;
use crate::state::AppState;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use crate::application::services::{ConversionService, ExchangeRateService};

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Redis cache (or NullCache fallback)
/// - Upstream rate provider client
/// - Application services
/// - Axum HTTP server
///
/// # Errors
///
/// Returns an error if:
/// - Server bind fails
/// - Server runtime error occurs
///
/// A Redis connection failure is not fatal: the service degrades to
/// NullCache and every request goes to the upstream provider.
pub async fn run(config: Config) -> Result<()> {
    let cache: Arc<dyn CacheService> = if let Some(redis_url) = &config.redis_url {
        match RedisCache::connect(redis_url).await {
            Ok(redis) => {
                tracing::info!("Cache enabled (Redis)");
                Arc::new(redis)
            }
            Err(e) => {
                tracing::warn!("Failed to connect to Redis: {}. Using NullCache.", e);
                Arc::new(NullCache::new())
            }
        }
    } else {
        tracing::info!("Cache disabled (NullCache)");
        Arc::new(NullCache::new())
    };

    let rules = CurrencyRules::new(&config.currency_settings());

    let provider: Arc<dyn RateProvider> = Arc::new(FrankfurterClient::new(
        config.provider_base_url.clone(),
        rules.clone(),
        config.provider_retry_attempts,
        Duration::from_millis(config.provider_retry_base_delay_ms),
    ));

    let rates_service = Arc::new(ExchangeRateService::new(
        cache.clone(),
        provider,
        rules.clone(),
    ));
    let conversion_service = Arc::new(ConversionService::new(rates_service.clone(), rules));

    let state = AppState {
        rates_service,
        conversion_service,
        cache,
        throttle: config.throttle_settings(),
    };

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    // Connection info is required: the request limiter keys by client IP
    // when no explicit identity is attached to the request.
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    tracing::info!("Shutdown signal received");
}
