//! Storage Config

use clap::{Args, ValueEnum};
use thiserror::Error;

/// Which store the services run against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StorageBackend {
    /// PostgreSQL via `DATABASE_URL`.
    Postgres,

    /// Process-local store, lost on restart.
    Memory,
}

/// Raised when the postgres backend is selected without a connection URL.
#[derive(Debug, Error)]
#[error("DATABASE_URL is required when STORAGE_BACKEND is postgres")]
pub struct MissingDatabaseUrl;

/// Backing store settings.
#[derive(Debug, Args)]
pub struct StorageConfig {
    /// Storage backend (postgres, memory)
    #[arg(
        long = "storage-backend",
        env = "STORAGE_BACKEND",
        value_enum,
        default_value_t = StorageBackend::Postgres
    )]
    pub backend: StorageBackend,

    /// Database connection URL
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,
}

impl StorageConfig {
    /// The connection URL for the postgres backend.
    ///
    /// # Errors
    ///
    /// Returns [`MissingDatabaseUrl`] when no URL was configured.
    pub fn database_url(&self) -> Result<&str, MissingDatabaseUrl> {
        self.database_url.as_deref().ok_or(MissingDatabaseUrl)
    }
}
