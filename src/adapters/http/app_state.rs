use std::sync::Arc;

use crate::infra::{AppConfig, RateLimiterTrait, StoreGate};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store_gate: StoreGate,
    pub rate_limiter: Arc<dyn RateLimiterTrait>,
}
