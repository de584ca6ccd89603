//! # Axum Helpers
//!
//! Shared HTTP plumbing for the catalog service.
//!
//! ## Modules
//!
//! - **[`server`]**: router assembly with OpenAPI UIs, health endpoints, graceful shutdown
//! - **[`http`]**: CORS, security headers, per-IP rate limiting
//! - **[`errors`]**: `AppError` and the uniform `{code, error, message, details}` body
//! - **[`extractors`]**: `UuidPath` and `ValidatedJson`
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum_helpers::server::{create_production_app, create_router};
//! use core_config::{Environment, server::ServerConfig};
//!
//! let router = create_router::<ApiDoc>(api_routes, &Environment::from_env())?;
//! create_production_app(router, &ServerConfig::default(), Duration::from_secs(30), async {}).await?;
//! ```

pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

pub use errors::{AppError, ErrorCode, ErrorResponse};
pub use extractors::{UuidPath, ValidatedJson};
pub use http::{RateLimit, RateLimitConfig, enforce_rate_limit, security_headers};
pub use server::{
    HealthCheckFuture, HealthResponse, create_production_app, create_router, health_router,
    run_health_checks, shutdown_signal,
};
