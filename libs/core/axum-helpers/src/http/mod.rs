//! HTTP middleware: CORS, security headers and per-client rate limiting.
//!
//! ```ignore
//! use axum_helpers::http::{cors_layer_from_env, security_headers, RateLimit, enforce_rate_limit};
//!
//! let app = Router::new()
//!     .route_layer(middleware::from_fn_with_state(limit, enforce_rate_limit))
//!     .layer(middleware::from_fn(security_headers))
//!     .layer(cors_layer_from_env(&environment)?);
//! ```

pub mod cors;
pub mod rate_limit;
pub mod security;

pub use cors::{cors_layer_from_env, create_cors_layer, parse_allowed_origins};
pub use rate_limit::{RateLimit, RateLimitConfig, enforce_rate_limit};
pub use security::security_headers;
