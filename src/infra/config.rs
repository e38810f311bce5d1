use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use axum::http::{HeaderValue, header::InvalidHeaderValue};
use env_helpers::{get_env, get_env_default};
use secrecy::SecretString;

use crate::domain::entities::signup::CollectionNames;

pub const DEFAULT_CORS_ORIGINS: &str = "https://after-school.tech,http://localhost:3000,http://localhost:4000,http://127.0.0.1:3000,http://127.0.0.1:4000";

pub struct AppConfig {
    /// Full connection string; may embed credentials.
    pub mongodb_uri: SecretString,
    pub database_name: String,
    pub collections: CollectionNames,
    pub bind_addr: SocketAddr,
    pub cors_origins: Vec<HeaderValue>,
    pub rate_limit_window_secs: u64,
    pub rate_limit_max: u64,
    /// When set, rate limit counters live in Redis instead of process memory.
    pub redis_url: Option<String>,
    /// Whether to trust X-Forwarded-For headers. Set to true when behind a reverse proxy.
    /// SECURITY: Only enable this when the API is not directly exposed to the internet.
    pub trust_proxy: bool,
    /// Create a unique index on `email` in every signup collection at connect time.
    pub enforce_unique_email: bool,
    /// Optional path for structured JSON logs, in addition to the console.
    pub log_file: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let mongodb_uri: SecretString = SecretString::new(get_env::<String>("MONGODB_URI").into());
        let database_name: String = get_env_default("MONGODB_DB", "ast_beta".to_string());

        let defaults = CollectionNames::default();
        let collections = CollectionNames {
            waitlist: get_env_default("WAITLIST_COLLECTION", defaults.waitlist),
            beta_request: get_env_default("BETA_REQUEST_COLLECTION", defaults.beta_request),
            beta_invite: get_env_default("BETA_INVITE_COLLECTION", defaults.beta_invite),
        };

        let bind_host: IpAddr = get_env_default("BIND_HOST", IpAddr::V4(Ipv4Addr::UNSPECIFIED));
        let port: u16 = get_env_default("PORT", 4000);

        let cors_origins = parse_cors_origins(&get_env_default(
            "CORS_ORIGINS",
            DEFAULT_CORS_ORIGINS.to_string(),
        ))
        .expect("CORS_ORIGINS must be a comma-separated list of valid header values");

        // 100 requests per 15 minutes per IP
        let rate_limit_window_secs: u64 = get_env_default("RATE_LIMIT_WINDOW_SECS", 900);
        let rate_limit_max: u64 = get_env_default("RATE_LIMIT_MAX", 100);
        let redis_url: Option<String> = std::env::var("REDIS_URL")
            .ok()
            .filter(|s| !s.trim().is_empty());
        // Default to false for security - must explicitly enable when behind a trusted proxy
        let trust_proxy: bool = get_env_default("TRUST_PROXY", false);
        let enforce_unique_email: bool = get_env_default("ENFORCE_UNIQUE_EMAIL", false);
        let log_file: Option<String> = std::env::var("LOG_FILE")
            .ok()
            .filter(|s| !s.trim().is_empty());

        Self {
            mongodb_uri,
            database_name,
            collections,
            bind_addr: SocketAddr::new(bind_host, port),
            cors_origins,
            rate_limit_window_secs,
            rate_limit_max,
            redis_url,
            trust_proxy,
            enforce_unique_email,
            log_file,
        }
    }
}

/// Splits a comma-separated origin list, skipping blank entries.
pub fn parse_cors_origins(raw: &str) -> Result<Vec<HeaderValue>, InvalidHeaderValue> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(HeaderValue::from_str)
        .collect()
}
