//! Products API routes

use axum::Router;
use domain_products::{PgProductRepository, ProductUseCases, handlers};

use crate::state::{AppState, Storage};

/// Product routes over the configured storage, writes under the strict limit
pub fn router(state: &AppState) -> Router {
    let write_limit = state.config.rate_limits.strict();

    match &state.storage {
        Storage::Postgres(db) => {
            let repository = PgProductRepository::new(db.clone());
            handlers::rate_limited_router(ProductUseCases::new(repository), write_limit)
        }
        Storage::Memory(repository) => {
            handlers::rate_limited_router(ProductUseCases::new(repository.clone()), write_limit)
        }
    }
}
