//! Readiness probe backed by the storage health check.

use crate::state::{AppState, Storage};
use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use axum_helpers::server::{HealthCheckFuture, run_health_checks};

/// 200 once storage answers, 503 otherwise
pub async fn ready_handler(State(state): State<AppState>) -> Response {
    let mut checks: Vec<(&str, HealthCheckFuture<'_>)> = Vec::new();

    if let Storage::Postgres(db) = &state.storage {
        checks.push((
            "database",
            Box::pin(async move {
                let status = database::postgres::check_health_detailed(db).await;
                tracing::debug!(response_time_ms = status.response_time_ms, "Database probe");

                if status.healthy {
                    Ok(())
                } else {
                    Err(status.message.unwrap_or_default())
                }
            }),
        ));
    }

    match run_health_checks(checks).await {
        Ok(ok) => ok.into_response(),
        Err(unavailable) => unavailable.into_response(),
    }
}
