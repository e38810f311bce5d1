use std::time::{Duration, Instant};

use async_trait::async_trait;
use dashmap::DashMap;
use redis::{Script, aio::ConnectionManager};

use super::InfraError;
use crate::app_error::{AppError, AppResult};

/// In-memory windows are swept once the map grows past this many clients.
const PRUNE_THRESHOLD: usize = 10_000;

/// Where a client stands in its current window, after counting one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitQuota {
    pub limit: u64,
    pub remaining: u64,
    /// Whole seconds until the window resets, rounded up.
    pub reset_secs: u64,
    pub exceeded: bool,
}

impl RateLimitQuota {
    fn from_count(count: u64, limit: u64, reset_secs: u64) -> Self {
        Self {
            limit,
            remaining: limit.saturating_sub(count),
            reset_secs,
            exceeded: count > limit,
        }
    }
}

/// Trait for rate limiting implementations.
#[async_trait]
pub trait RateLimiterTrait: Send + Sync {
    /// Count one request from `ip` and report the quota left.
    /// Errors only when the backing store fails; an exhausted quota is
    /// reported through `RateLimitQuota::exceeded`.
    async fn check(&self, ip: &str) -> AppResult<RateLimitQuota>;
}

/// Fixed-window limiter kept in process memory. Counters reset on restart
/// and are not shared between replicas.
pub struct InMemoryRateLimiter {
    windows: DashMap<String, (Instant, u64)>,
    window: Duration,
    max_per_ip: u64,
}

impl InMemoryRateLimiter {
    pub fn new(window: Duration, max_per_ip: u64) -> Self {
        Self {
            windows: DashMap::new(),
            window,
            max_per_ip,
        }
    }

    /// A limiter that never blocks (for most tests).
    pub fn permissive() -> Self {
        Self::new(Duration::from_secs(60), u64::MAX)
    }

    fn prune(&self, now: Instant) {
        self.windows
            .retain(|_, (started, _)| now.duration_since(*started) < self.window);
    }
}

#[async_trait]
impl RateLimiterTrait for InMemoryRateLimiter {
    async fn check(&self, ip: &str) -> AppResult<RateLimitQuota> {
        let now = Instant::now();
        if self.windows.len() > PRUNE_THRESHOLD {
            self.prune(now);
        }

        let mut entry = self.windows.entry(ip.to_string()).or_insert((now, 0));
        let (started, count) = entry.value_mut();
        if now.duration_since(*started) >= self.window {
            *started = now;
            *count = 0;
        }
        *count = count.saturating_add(1);

        let left = self.window.saturating_sub(now.duration_since(*started));
        let reset_secs = left.as_millis().div_ceil(1000) as u64;
        Ok(RateLimitQuota::from_count(*count, self.max_per_ip, reset_secs))
    }
}

/// Lua script for atomic increment with TTL.
/// Returns the new count after increment and the key's remaining TTL.
/// If the key doesn't exist, it's created with TTL.
/// If the key exists but has no TTL, TTL is set.
const INCR_WITH_TTL_SCRIPT: &str = r#"
local current = redis.call('INCR', KEYS[1])
if current == 1 then
    redis.call('EXPIRE', KEYS[1], ARGV[1])
elseif redis.call('TTL', KEYS[1]) == -1 then
    redis.call('EXPIRE', KEYS[1], ARGV[1])
end
return {current, redis.call('TTL', KEYS[1])}
"#;

/// Redis-backed rate limiter, shared across replicas.
#[derive(Clone)]
pub struct RedisRateLimiter {
    manager: ConnectionManager,
    window_secs: u64,
    max_per_ip: u64,
    script: Script,
}

impl RedisRateLimiter {
    pub async fn new(redis_url: &str, window_secs: u64, max_per_ip: u64) -> Result<Self, InfraError> {
        let client = redis::Client::open(redis_url).map_err(InfraError::RedisConnection)?;
        let manager = ConnectionManager::new(client)
            .await
            .map_err(InfraError::RedisConnection)?;
        let script = Script::new(INCR_WITH_TTL_SCRIPT);
        Ok(Self {
            manager,
            window_secs,
            max_per_ip,
            script,
        })
    }
}

#[async_trait]
impl RateLimiterTrait for RedisRateLimiter {
    async fn check(&self, ip: &str) -> AppResult<RateLimitQuota> {
        let mut conn = self.manager.clone();
        let (current, ttl): (u64, i64) = self
            .script
            .key(format!("rate:ip:{ip}"))
            .arg(self.window_secs)
            .invoke_async(&mut conn)
            .await
            .map_err(|e| AppError::Internal(e.to_string()))?;

        Ok(RateLimitQuota::from_count(
            current,
            self.max_per_ip,
            redis_reset_secs(ttl, self.window_secs),
        ))
    }
}

// TTL is -1/-2 when the key has no expiry or vanished between calls.
fn redis_reset_secs(ttl: i64, window_secs: u64) -> u64 {
    u64::try_from(ttl).unwrap_or(window_secs)
}
