//! Application state management

use database::postgres::{self, DatabaseConnection};
use domain_products::InMemoryProductRepository;
use migration::Migrator;
use tracing::{info, warn};

use crate::config::{Config, StorageBackend};

/// Connected storage, chosen by `STORAGE_BACKEND`
#[derive(Clone)]
pub enum Storage {
    Postgres(DatabaseConnection),
    Memory(InMemoryProductRepository),
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub storage: Storage,
}

impl AppState {
    /// Open storage and, for PostgreSQL, apply pending migrations when enabled
    pub async fn connect(config: Config) -> eyre::Result<Self> {
        let storage = match &config.storage {
            StorageBackend::Postgres(pg) => {
                let db = postgres::connect_from_config_with_retry(pg.clone(), None)
                    .await
                    .map_err(|e| eyre::eyre!("PostgreSQL connection failed: {}", e))?;

                if config.run_migrations {
                    postgres::run_migrations::<Migrator>(&db, config.app.name).await?;
                } else {
                    info!("RUN_MIGRATIONS=false, skipping migrations");
                }

                Storage::Postgres(db)
            }
            StorageBackend::Memory => {
                warn!("Using in-memory storage; products are lost on restart");
                Storage::Memory(InMemoryProductRepository::new())
            }
        };

        Ok(Self { config, storage })
    }

    /// Release storage resources during shutdown
    pub async fn close(self) {
        if let Storage::Postgres(db) = self.storage {
            if let Err(e) = postgres::close(db).await {
                tracing::error!("Error closing PostgreSQL: {}", e);
            }
        }
    }
}
