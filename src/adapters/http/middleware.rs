use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, Request, State},
    http::{
        HeaderMap, HeaderValue,
        header::{HeaderName, RETRY_AFTER},
    },
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::{adapters::http::app_state::AppState, app_error::AppError, infra::RateLimitQuota};

/// Key used when neither the socket nor trusted headers identify the client.
const UNKNOWN_CLIENT: &str = "unknown";

const RATELIMIT_LIMIT: HeaderName = HeaderName::from_static("ratelimit-limit");
const RATELIMIT_REMAINING: HeaderName = HeaderName::from_static("ratelimit-remaining");
const RATELIMIT_RESET: HeaderName = HeaderName::from_static("ratelimit-reset");

pub async fn rate_limit_middleware(
    State(app_state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let connect_ip = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string());

    // Only trust forwarded headers if explicitly configured (when behind a reverse proxy)
    let ip = if app_state.config.trust_proxy {
        forwarded_ip(&request).or_else(|| connect_ip.clone())
    } else {
        connect_ip.clone()
    }
    .unwrap_or_else(|| UNKNOWN_CLIENT.to_string());

    tracing::debug!(
        trust_proxy = app_state.config.trust_proxy,
        connect_ip = ?connect_ip,
        using_ip = %ip,
        "Rate limiting request"
    );

    let quota = app_state.rate_limiter.check(&ip).await?;

    let mut response = if quota.exceeded {
        AppError::RateLimited.into_response()
    } else {
        next.run(request).await
    };
    insert_quota_headers(response.headers_mut(), &quota);

    Ok(response)
}

/// `RateLimit-*` headers on every response, plus `Retry-After` once blocked.
fn insert_quota_headers(headers: &mut HeaderMap, quota: &RateLimitQuota) {
    headers.insert(RATELIMIT_LIMIT, HeaderValue::from(quota.limit));
    headers.insert(RATELIMIT_REMAINING, HeaderValue::from(quota.remaining));
    headers.insert(RATELIMIT_RESET, HeaderValue::from(quota.reset_secs));
    if quota.exceeded {
        headers.insert(RETRY_AFTER, HeaderValue::from(quota.reset_secs));
    }
}

fn forwarded_ip(req: &Request) -> Option<String> {
    // Extract IP from X-Forwarded-For or X-Real-IP headers
    if let Some(forwarded) = req.headers().get("x-forwarded-for")
        && let Ok(val) = forwarded.to_str()
        && let Some(first) = val.split(',').next()
    {
        let trimmed = first.trim();
        if !trimmed.is_empty() {
            return Some(trimmed.to_string());
        }
    }
    if let Some(real) = req.headers().get("x-real-ip")
        && let Ok(val) = real.to_str()
        && !val.trim().is_empty()
    {
        return Some(val.trim().to_string());
    }
    None
}
