//! Storage backend implementations.
//!
//! This module provides concrete implementations of the repository trait
//! defined in `kennel_core::storage`. The backend is selected at start-up
//! from the `STORAGE_BACKEND` environment variable.
//!
//! - `sqlite` (default): SQLite storage using `rusqlite` and `tokio-rusqlite`
//! - `memory`: process-local storage, lost on restart

use std::sync::Arc;

use kennel_core::storage::{DogRepository, Result};

use crate::config::{Config, StorageBackend};

pub mod inmemory;
pub mod sqlite;

#[cfg(test)]
pub mod testing;

pub use inmemory::InMemoryRepository;
pub use sqlite::SqliteRepository;

/// Opens the configured repository.
pub async fn connect(config: &Config) -> Result<Arc<dyn DogRepository>> {
    match config.storage_backend {
        StorageBackend::Sqlite => {
            tracing::info!(path = %config.sqlite_path, "Opening SQLite database");
            let repo = SqliteRepository::new(&config.sqlite_path).await?;
            Ok(Arc::new(repo))
        }
        StorageBackend::Memory => {
            tracing::info!("Using in-memory storage");
            Ok(Arc::new(InMemoryRepository::new()))
        }
    }
}
