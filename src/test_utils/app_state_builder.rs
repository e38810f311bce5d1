//! Test app state builder for HTTP-level integration testing.
//!
//! This module provides `TestAppStateBuilder` which creates a minimal `AppState`
//! with in-memory mocks for testing HTTP endpoints.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use secrecy::SecretString;

use crate::{
    adapters::http::app_state::AppState,
    domain::entities::signup::CollectionNames,
    infra::{
        InMemoryRateLimiter, RateLimiterTrait, StoreGate,
        config::{AppConfig, DEFAULT_CORS_ORIGINS, parse_cors_origins},
    },
    test_utils::InMemorySignupRepo,
    use_cases::signup::{SignupRepo, SignupUseCases},
};

/// Builder for creating `AppState` with in-memory mocks for testing.
///
/// # Example
///
/// ```ignore
/// let (app_state, repo) = TestAppStateBuilder::new().build_with_repo();
/// let closed = TestAppStateBuilder::new().without_store().build();
/// ```
pub struct TestAppStateBuilder {
    repo: Option<Arc<dyn SignupRepo>>,
    store_ready: bool,
    rate_limit_max: u64,
}

impl TestAppStateBuilder {
    pub fn new() -> Self {
        Self {
            repo: None,
            store_ready: true,
            rate_limit_max: u64::MAX,
        }
    }

    /// Use a custom repository instead of a fresh in-memory one.
    pub fn with_repo(mut self, repo: Arc<dyn SignupRepo>) -> Self {
        self.repo = Some(repo);
        self
    }

    /// Leave the store gate closed, as before the database connects.
    pub fn without_store(mut self) -> Self {
        self.store_ready = false;
        self
    }

    /// Cap requests per client within one window.
    pub fn with_rate_limit(mut self, max_per_ip: u64) -> Self {
        self.rate_limit_max = max_per_ip;
        self
    }

    /// Build with a fresh in-memory repo and return it for assertions.
    pub fn build_with_repo(self) -> (AppState, Arc<InMemorySignupRepo>) {
        let repo = Arc::new(InMemorySignupRepo::new());
        let app_state = self.with_repo(repo.clone()).build();
        (app_state, repo)
    }

    pub fn build(self) -> AppState {
        let store_gate = StoreGate::pending();
        if self.store_ready {
            let repo = self
                .repo
                .unwrap_or_else(|| Arc::new(InMemorySignupRepo::new()));
            store_gate.open(SignupUseCases::new(repo));
        }

        let rate_limiter: Arc<dyn RateLimiterTrait> = Arc::new(InMemoryRateLimiter::new(
            Duration::from_secs(900),
            self.rate_limit_max,
        ));

        AppState {
            config: Arc::new(test_config(self.rate_limit_max)),
            store_gate,
            rate_limiter,
        }
    }
}

impl Default for TestAppStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Minimal config for testing; nothing here is dialed.
pub fn test_config(rate_limit_max: u64) -> AppConfig {
    AppConfig {
        mongodb_uri: SecretString::new("mongodb://localhost:27017".into()),
        database_name: "ast_beta_test".to_string(),
        collections: CollectionNames::default(),
        bind_addr: "127.0.0.1:4000".parse::<SocketAddr>().unwrap(),
        cors_origins: parse_cors_origins(DEFAULT_CORS_ORIGINS).unwrap(),
        rate_limit_window_secs: 900,
        rate_limit_max,
        redis_url: None,
        trust_proxy: false,
        enforce_unique_email: false,
        log_file: None,
    }
}
