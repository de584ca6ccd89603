//! API routes module

pub mod health;
pub mod products;

use axum::{Json, Router, middleware, routing::get};
use axum_helpers::http::enforce_rate_limit;
use axum_helpers::server::{create_router, health_router};
use serde_json::{Value, json};

use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Routes mounted under `/api`, all subject to the general rate limit
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .nest("/products", products::router(state))
        .layer(middleware::from_fn_with_state(
            state.config.rate_limits.general(),
            enforce_rate_limit,
        ))
}

/// `/ready` with storage checks
pub fn ready_router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}

async fn root() -> Json<Value> {
    Json(json!({ "message": "Hello API" }))
}

/// The complete application: documented `/api`, `/health`, `/ready` and `/`
pub fn app(state: &AppState) -> eyre::Result<Router> {
    let router = create_router::<ApiDoc>(routes(state), &state.config.environment)?;

    Ok(router
        .merge(health_router(state.config.app))
        .merge(ready_router(state.clone()))
        .route("/", get(root)))
}
