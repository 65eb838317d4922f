use async_trait::async_trait;

use crate::dog::{Dog, DogPatch, NewDog};

use super::Result;

/// Repository for dog records.
///
/// Implementations own all persisted state. Handlers hold an
/// `Arc<dyn DogRepository>` created once at start-up.
#[async_trait]
pub trait DogRepository: Send + Sync {
    /// Gets every dog in the store's natural order.
    async fn list_dogs(&self) -> Result<Vec<Dog>>;

    /// Gets a dog by its ID.
    async fn get_dog(&self, id: i64) -> Result<Option<Dog>>;

    /// Creates a dog and returns the stored record with its generated ID.
    async fn create_dog(&self, dog: &NewDog) -> Result<Dog>;

    /// Writes the supplied fields onto an existing dog and returns the result.
    ///
    /// Fails with `NotFound` if no dog has this ID.
    async fn update_dog(&self, id: i64, patch: &DogPatch) -> Result<Dog>;

    /// Deletes a dog and returns its prior contents.
    ///
    /// Fails with `NotFound` if no dog has this ID.
    async fn delete_dog(&self, id: i64) -> Result<Dog>;

    /// Checks that the store is reachable.
    async fn ping(&self) -> Result<()>;
}
