//! Shared application state.
//!
//! The dog repository is created once at start-up and injected here; every
//! request handler receives a cheap clone of this state.

use std::{sync::Arc, time::Duration};

use kennel_core::storage::DogRepository;

use crate::config::Config;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Dog repository (SQLite or in-memory).
    pub dog_repo: Arc<dyn DogRepository>,
    /// How long a request may stay unanswered before the server gives up.
    pub request_timeout: Duration,
}

impl AppState {
    /// Creates a new AppState around the given repository and configuration.
    pub fn new(dog_repo: Arc<dyn DogRepository>, config: &Config) -> Self {
        Self {
            dog_repo,
            request_timeout: config.request_timeout(),
        }
    }

    /// Replaces the request timeout.
    #[cfg(test)]
    pub fn with_request_timeout(mut self, request_timeout: Duration) -> Self {
        self.request_timeout = request_timeout;
        self
    }
}

#[cfg(test)]
impl Default for AppState {
    /// In-memory state with the default timeout.
    fn default() -> Self {
        Self {
            dog_repo: Arc::new(crate::storage::InMemoryRepository::new()),
            request_timeout: Duration::from_secs(10),
        }
    }
}
