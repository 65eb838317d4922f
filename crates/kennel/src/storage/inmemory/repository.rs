//! In-memory repository implementation.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use kennel_core::dog::{Dog, DogPatch, NewDog};
use kennel_core::storage::{DogRepository, RepositoryError, Result};

/// Rows plus the last id handed out. Ids are never reused, like an
/// autoincrement column.
#[derive(Debug, Default)]
struct Table {
    rows: BTreeMap<i64, Dog>,
    last_id: i64,
}

/// In-memory storage backend.
///
/// Data is not persisted and will be lost when the repository is dropped.
/// Natural order is ascending id, which is also insertion order.
#[derive(Debug, Clone)]
pub struct InMemoryRepository {
    table: Arc<RwLock<Table>>,
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self {
            table: Arc::new(RwLock::new(Table::default())),
        }
    }
}

fn not_found(id: i64) -> RepositoryError {
    RepositoryError::NotFound {
        entity_type: "Dog",
        id: id.to_string(),
    }
}

#[async_trait]
impl DogRepository for InMemoryRepository {
    async fn list_dogs(&self) -> Result<Vec<Dog>> {
        let table = self.table.read().await;
        Ok(table.rows.values().cloned().collect())
    }

    async fn get_dog(&self, id: i64) -> Result<Option<Dog>> {
        let table = self.table.read().await;
        Ok(table.rows.get(&id).cloned())
    }

    async fn create_dog(&self, dog: &NewDog) -> Result<Dog> {
        let mut table = self.table.write().await;
        let id = table.last_id + 1;
        let dog = dog.clone().into_dog(id)?;

        table.last_id = id;
        table.rows.insert(id, dog.clone());
        Ok(dog)
    }

    async fn update_dog(&self, id: i64, patch: &DogPatch) -> Result<Dog> {
        let mut table = self.table.write().await;
        let dog = table.rows.get_mut(&id).ok_or_else(|| not_found(id))?;
        patch.apply_to(dog);
        Ok(dog.clone())
    }

    async fn delete_dog(&self, id: i64) -> Result<Dog> {
        let mut table = self.table.write().await;
        table.rows.remove(&id).ok_or_else(|| not_found(id))
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Number;

    fn new_dog(name: &str) -> NewDog {
        NewDog {
            name: name.to_string(),
            description: "Loyal".to_string(),
            breed: "Lab".to_string(),
            age: Number::from(3_i64),
        }
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let repo = InMemoryRepository::new();

        let rex = repo.create_dog(&new_dog("Rex")).await.unwrap();

        assert_eq!(rex.id, 1);
        assert_eq!(repo.get_dog(1).await.unwrap(), Some(rex));
        assert_eq!(repo.get_dog(2).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_failed_create_does_not_consume_an_id() {
        let repo = InMemoryRepository::new();
        let mut bad = new_dog("Rex");
        bad.age = Number::from_f64(2.5).unwrap();

        assert!(repo.create_dog(&bad).await.is_err());
        let rex = repo.create_dog(&new_dog("Rex")).await.unwrap();

        assert_eq!(rex.id, 1);
    }

    #[tokio::test]
    async fn test_list_in_id_order() {
        let repo = InMemoryRepository::new();
        for name in ["Rex", "Max", "Bella"] {
            repo.create_dog(&new_dog(name)).await.unwrap();
        }

        let ids: Vec<_> = repo.list_dogs().await.unwrap().iter().map(|d| d.id).collect();

        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_update_merges_patch() {
        let repo = InMemoryRepository::new();
        let rex = repo.create_dog(&new_dog("Rex")).await.unwrap();

        let patch = DogPatch {
            name: Some("Rexy".to_string()),
            ..DogPatch::default()
        };
        let updated = repo.update_dog(rex.id, &patch).await.unwrap();

        assert_eq!(updated.name, "Rexy");
        assert_eq!(updated.breed, "Lab");
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let repo = InMemoryRepository::new();

        let result = repo.update_dog(5, &DogPatch::default()).await;

        assert_eq!(result, Err(not_found(5)));
    }

    #[tokio::test]
    async fn test_delete_and_ids_not_reused() {
        let repo = InMemoryRepository::new();
        let rex = repo.create_dog(&new_dog("Rex")).await.unwrap();

        assert_eq!(repo.delete_dog(rex.id).await.unwrap(), rex);
        assert_eq!(repo.delete_dog(rex.id).await, Err(not_found(rex.id)));

        let max = repo.create_dog(&new_dog("Max")).await.unwrap();
        assert_eq!(max.id, 2);
    }
}
