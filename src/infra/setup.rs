use std::fs::File;
use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    adapters::http::app_state::AppState,
    infra::{
        InMemoryRateLimiter, InfraError, RateLimiterTrait, RedisRateLimiter, StoreGate,
        config::AppConfig, mongo_persistence,
    },
    use_cases::signup::{SignupRepo, SignupUseCases},
};

/// Builds the state the router needs. The store gate starts closed; call
/// [`connect_store`] to open it.
pub async fn init_app_state(config: AppConfig) -> Result<AppState, InfraError> {
    let rate_limiter: Arc<dyn RateLimiterTrait> = match &config.redis_url {
        Some(redis_url) => Arc::new(
            RedisRateLimiter::new(redis_url, config.rate_limit_window_secs, config.rate_limit_max)
                .await?,
        ),
        None => Arc::new(InMemoryRateLimiter::new(
            Duration::from_secs(config.rate_limit_window_secs),
            config.rate_limit_max,
        )),
    };

    Ok(AppState {
        config: Arc::new(config),
        store_gate: StoreGate::pending(),
        rate_limiter,
    })
}

/// Connects to MongoDB once and opens the gate on success. A failed attempt
/// is logged and leaves the gate closed.
pub async fn connect_store(config: Arc<AppConfig>, gate: StoreGate) {
    match mongo_persistence(&config).await {
        Ok(persistence) => {
            let repo = Arc::new(persistence) as Arc<dyn SignupRepo>;
            if gate.open(SignupUseCases::new(repo)) {
                info!("Store ready, accepting signups");
            } else {
                warn!("Store gate was already open");
            }
        }
        Err(e) => {
            error!(error = %e, "Store connection failed, signup routes will answer 503");
        }
    }
}

pub fn init_tracing(log_file: Option<&str>) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "waitlist_api=debug,tower_http=debug".into());

    // Console (pretty logs)
    let console_layer = fmt::layer()
        .with_target(false) // don't show target (module path)
        .with_level(true) // show log level
        .pretty(); // human-friendly, with colors

    // File (structured JSON logs)
    let mut file_error = None;
    let json_layer = match log_file.map(File::create) {
        Some(Ok(file)) => Some(
            fmt::layer()
                .json()
                .with_writer(Arc::new(file))
                .with_current_span(true)
                .with_span_list(true),
        ),
        Some(Err(e)) => {
            file_error = Some(e);
            None
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(json_layer)
        .try_init()
        .ok();

    if let (Some(path), Some(e)) = (log_file, file_error) {
        warn!(path, error = %e, "cannot create log file, logging to console only");
    }
}
