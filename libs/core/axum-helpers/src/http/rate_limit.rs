//! Per-client-IP rate limiting backed by `governor`.

use axum::{
    extract::{ConnectInfo, Request, State},
    http::{HeaderValue, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use core_config::{ConfigError, FromEnv, env_parse};
use governor::{
    DefaultKeyedRateLimiter, Quota, RateLimiter,
    clock::{Clock, DefaultClock},
};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use crate::errors::AppError;

/// Keys tracked before stale entries are pruned
const PRUNE_THRESHOLD: usize = 10_000;

/// A keyed limiter allowing `max_requests` per `window` for each client IP.
///
/// The full budget is available as a burst and refills evenly over the window.
/// Clients are identified by `ConnectInfo<SocketAddr>`; requests without it
/// share a single bucket.
#[derive(Clone)]
pub struct RateLimit {
    limiter: Arc<DefaultKeyedRateLimiter<IpAddr>>,
    message: &'static str,
}

impl RateLimit {
    pub fn new(max_requests: u32, window: Duration, message: &'static str) -> Self {
        let burst = NonZeroU32::new(max_requests).unwrap_or(NonZeroU32::MIN);
        let quota = Quota::with_period(window / burst.get())
            .unwrap_or_else(|| Quota::per_second(burst))
            .allow_burst(burst);

        Self {
            limiter: Arc::new(RateLimiter::keyed(quota)),
            message,
        }
    }

    /// `Err` carries how long the client should wait
    fn check(&self, client: IpAddr) -> Result<(), Duration> {
        if self.limiter.len() > PRUNE_THRESHOLD {
            self.limiter.retain_recent();
        }

        self.limiter
            .check_key(&client)
            .map_err(|not_until| not_until.wait_time_from(DefaultClock::default().now()))
    }
}

impl std::fmt::Debug for RateLimit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimit")
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

/// Middleware for `axum::middleware::from_fn_with_state`.
///
/// Rejects with `429 TOO_MANY_REQUESTS` and a `Retry-After` header.
pub async fn enforce_rate_limit(
    State(limit): State<RateLimit>,
    request: Request,
    next: Next,
) -> Response {
    let client = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip())
        .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED));

    match limit.check(client) {
        Ok(()) => next.run(request).await,
        Err(wait) => {
            tracing::debug!(%client, wait_ms = wait.as_millis() as u64, "Request rate limited");

            let mut response = AppError::TooManyRequests(limit.message.to_string()).into_response();
            let retry_after = wait.as_secs().max(1);
            response
                .headers_mut()
                .insert(header::RETRY_AFTER, HeaderValue::from(retry_after));
            response
        }
    }
}

/// Limits for the public API.
///
/// Environment variables:
/// - `RATE_LIMIT_WINDOW_SECS` (900)
/// - `RATE_LIMIT_GENERAL_MAX` (100) for every `/api` request
/// - `RATE_LIMIT_STRICT_MAX` (30) for mutating requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    pub window: Duration,
    pub general_max: u32,
    pub strict_max: u32,
}

impl RateLimitConfig {
    pub fn general(&self) -> RateLimit {
        RateLimit::new(
            self.general_max,
            self.window,
            "Too many requests from this IP, please try again later.",
        )
    }

    pub fn strict(&self) -> RateLimit {
        RateLimit::new(
            self.strict_max,
            self.window,
            "Too many modification requests, please try again later.",
        )
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            window: Duration::from_secs(15 * 60),
            general_max: 100,
            strict_max: 30,
        }
    }
}

impl FromEnv for RateLimitConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        Ok(Self {
            window: Duration::from_secs(env_parse(
                "RATE_LIMIT_WINDOW_SECS",
                defaults.window.as_secs(),
            )?),
            general_max: env_parse("RATE_LIMIT_GENERAL_MAX", defaults.general_max)?,
            strict_max: env_parse("RATE_LIMIT_STRICT_MAX", defaults.strict_max)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http::StatusCode, middleware, routing::get};
    use tower::ServiceExt;

    fn limited_app(limit: RateLimit) -> Router {
        Router::new()
            .route("/", get(|| async { "ok" }))
            .route_layer(middleware::from_fn_with_state(limit, enforce_rate_limit))
    }

    fn request_from(ip: [u8; 4]) -> Request {
        let mut request = Request::builder().uri("/").body(Body::empty()).unwrap();
        request
            .extensions_mut()
            .insert(ConnectInfo(SocketAddr::from((ip, 4000))));
        request
    }

    #[tokio::test]
    async fn test_rejects_after_budget_is_spent() {
        let app = limited_app(RateLimit::new(2, Duration::from_secs(60), "slow down"));

        for _ in 0..2 {
            let response = app.clone().oneshot(request_from([10, 0, 0, 1])).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }

        let response = app.oneshot(request_from([10, 0, 0, 1])).await.unwrap();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert!(response.headers().contains_key(header::RETRY_AFTER));
    }

    #[tokio::test]
    async fn test_clients_have_separate_budgets() {
        let app = limited_app(RateLimit::new(1, Duration::from_secs(60), "slow down"));

        let first = app.clone().oneshot(request_from([10, 0, 0, 1])).await.unwrap();
        let other = app.clone().oneshot(request_from([10, 0, 0, 2])).await.unwrap();
        let again = app.oneshot(request_from([10, 0, 0, 1])).await.unwrap();

        assert_eq!(first.status(), StatusCode::OK);
        assert_eq!(other.status(), StatusCode::OK);
        assert_eq!(again.status(), StatusCode::TOO_MANY_REQUESTS);
    }

    #[test]
    fn test_config_from_env_defaults() {
        temp_env::with_vars_unset(
            [
                "RATE_LIMIT_WINDOW_SECS",
                "RATE_LIMIT_GENERAL_MAX",
                "RATE_LIMIT_STRICT_MAX",
            ],
            || {
                let config = RateLimitConfig::from_env().unwrap();
                assert_eq!(config, RateLimitConfig::default());
                assert_eq!(config.window, Duration::from_secs(900));
            },
        );
    }

    #[test]
    fn test_config_from_env_rejects_garbage() {
        temp_env::with_var("RATE_LIMIT_STRICT_MAX", Some("thirty"), || {
            let err = RateLimitConfig::from_env().unwrap_err();
            assert!(err.to_string().contains("RATE_LIMIT_STRICT_MAX"));
        });
    }
}
