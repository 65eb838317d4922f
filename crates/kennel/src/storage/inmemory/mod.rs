//! In-memory storage backend.
//!
//! This module provides an in-memory implementation of the repository trait
//! that keeps every dog in a `BTreeMap` behind an async `RwLock`. It backs the
//! router tests and the `STORAGE_BACKEND=memory` mode.
//!
//! # Example
//!
//! ```rust,ignore
//! use crate::storage::inmemory::InMemoryRepository;
//!
//! let repo = InMemoryRepository::new();
//! // Use repo for testing...
//! ```

mod repository;

pub use repository::InMemoryRepository;
