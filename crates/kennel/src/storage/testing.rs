//! Repository doubles for exercising store-failure paths.

use async_trait::async_trait;

use kennel_core::dog::{Dog, DogPatch, NewDog};
use kennel_core::storage::{DogRepository, RepositoryError, Result};

/// A repository whose every operation fails with `ConnectionFailed`.
#[derive(Debug, Default)]
pub struct UnavailableRepository;

fn unavailable<T>() -> Result<T> {
    Err(RepositoryError::ConnectionFailed(
        "database is unavailable".to_string(),
    ))
}

#[async_trait]
impl DogRepository for UnavailableRepository {
    async fn list_dogs(&self) -> Result<Vec<Dog>> {
        unavailable()
    }

    async fn get_dog(&self, _id: i64) -> Result<Option<Dog>> {
        unavailable()
    }

    async fn create_dog(&self, _dog: &NewDog) -> Result<Dog> {
        unavailable()
    }

    async fn update_dog(&self, _id: i64, _patch: &DogPatch) -> Result<Dog> {
        unavailable()
    }

    async fn delete_dog(&self, _id: i64) -> Result<Dog> {
        unavailable()
    }

    async fn ping(&self) -> Result<()> {
        unavailable()
    }
}
