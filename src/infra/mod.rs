use crate::{adapters::persistence::MongoPersistence, infra::db::init_db};

pub mod app;
pub mod config;
pub mod db;
pub mod error;
pub mod rate_limit;
pub mod readiness;
pub mod setup;

pub use config::AppConfig;
pub use error::InfraError;
pub use rate_limit::{InMemoryRateLimiter, RateLimitQuota, RateLimiterTrait, RedisRateLimiter};
pub use readiness::StoreGate;

pub async fn mongo_persistence(config: &AppConfig) -> Result<MongoPersistence, InfraError> {
    let db = init_db(&config.mongodb_uri, &config.database_name).await?;
    let persistence = MongoPersistence::new(db, config.collections.clone());
    if config.enforce_unique_email {
        persistence
            .ensure_unique_email_indexes()
            .await
            .map_err(InfraError::IndexCreation)?;
    }
    Ok(persistence)
}
