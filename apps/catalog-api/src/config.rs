//! Configuration for the catalog API

use axum_helpers::RateLimitConfig;
use core_config::{AppInfo, ConfigError, FromEnv, app_info, env_parse, server::ServerConfig};
use database::postgres::PostgresConfig;
use std::str::FromStr;

pub use core_config::Environment;

/// Where products are stored
#[derive(Clone, Debug)]
pub enum StorageBackend {
    Postgres(PostgresConfig),
    /// Process-local map, lost on restart
    Memory,
}

impl StorageBackend {
    pub fn name(&self) -> &'static str {
        match self {
            StorageBackend::Postgres(_) => "postgres",
            StorageBackend::Memory => "memory",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum BackendKind {
    Postgres,
    Memory,
}

impl FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "memory" | "in-memory" => Ok(Self::Memory),
            other => Err(format!("expected 'postgres' or 'memory', got '{other}'")),
        }
    }
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub environment: Environment,
    pub server: ServerConfig,
    pub storage: StorageBackend,
    /// Apply pending migrations before serving
    pub run_migrations: bool,
    pub rate_limits: RateLimitConfig,
}

impl FromEnv for Config {
    fn from_env() -> Result<Self, ConfigError> {
        let storage = match env_parse("STORAGE_BACKEND", BackendKind::Postgres)? {
            BackendKind::Postgres => StorageBackend::Postgres(PostgresConfig::from_env()?),
            BackendKind::Memory => StorageBackend::Memory,
        };

        Ok(Self {
            app: app_info!(),
            environment: Environment::from_env(),
            server: ServerConfig::from_env()?,
            storage,
            run_migrations: env_parse("RUN_MIGRATIONS", true)?,
            rate_limits: RateLimitConfig::from_env()?,
        })
    }
}
