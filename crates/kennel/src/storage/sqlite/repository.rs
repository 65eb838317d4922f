//! SQLite repository implementation.
//!
//! Implements the repository trait from `kennel_core::storage` using SQLite.

use async_trait::async_trait;
use tokio_rusqlite::Connection;

use kennel_core::dog::{Dog, DogPatch, NewDog};
use kennel_core::storage::{DogRepository, RepositoryError, Result};

use super::conversions::row_to_dog;
use super::error::{map_tokio_rusqlite_error, map_tokio_rusqlite_error_with_id};
use super::schema;

const ENTITY: &str = "Dog";

/// Helper to wrap rusqlite errors for tokio_rusqlite closures.
fn wrap_err(e: rusqlite::Error) -> tokio_rusqlite::Error {
    tokio_rusqlite::Error::Rusqlite(e)
}

/// SQLite-based repository implementation.
///
/// All statements run on the single background thread owned by the
/// `tokio_rusqlite` connection, so concurrent requests are serialized there.
pub struct SqliteRepository {
    conn: Connection,
}

impl SqliteRepository {
    /// Creates a new repository with a file-based database.
    ///
    /// The database file will be created if it doesn't exist.
    /// Schema tables are created automatically.
    pub async fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Creates a new repository with an in-memory database.
    ///
    /// Useful for testing - data is lost when the connection is dropped.
    #[cfg_attr(not(test), allow(dead_code))]
    pub async fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Initialize the database schema.
    async fn init_schema(conn: &Connection) -> Result<()> {
        conn.call(|conn| {
            conn.execute_batch(schema::CREATE_TABLES)
                .map_err(wrap_err)?;
            Ok(())
        })
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))
    }
}

#[async_trait]
impl DogRepository for SqliteRepository {
    async fn list_dogs(&self) -> Result<Vec<Dog>> {
        self.conn
            .call(|conn| {
                let mut stmt = conn.prepare(schema::SELECT_DOGS).map_err(wrap_err)?;
                let rows = stmt.query_map([], row_to_dog).map_err(wrap_err)?;

                let mut dogs = Vec::new();
                for row_result in rows {
                    dogs.push(row_result.map_err(wrap_err)?);
                }
                Ok(dogs)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, ENTITY))
    }

    async fn get_dog(&self, id: i64) -> Result<Option<Dog>> {
        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(schema::SELECT_DOG_BY_ID).map_err(wrap_err)?;
                match stmt.query_row([id], row_to_dog) {
                    Ok(dog) => Ok(Some(dog)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, ENTITY, id.to_string()))
    }

    async fn create_dog(&self, dog: &NewDog) -> Result<Dog> {
        let name = dog.name.clone();
        let description = dog.description.clone();
        let breed = dog.breed.clone();
        let age = dog.integer_age()?;

        let created = self
            .conn
            .call(move |conn| {
                conn.query_row(
                    schema::INSERT_DOG,
                    rusqlite::params![name, description, breed, age],
                    row_to_dog,
                )
                .map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, ENTITY))?;

        tracing::debug!(dog_id = created.id, "Inserted dog row");

        Ok(created)
    }

    async fn update_dog(&self, id: i64, patch: &DogPatch) -> Result<Dog> {
        let patch = patch.clone();

        self.conn
            .call(move |conn| {
                conn.query_row(
                    schema::UPDATE_DOG,
                    rusqlite::params![id, patch.name, patch.description, patch.breed, patch.age],
                    row_to_dog,
                )
                .map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, ENTITY, id.to_string()))
    }

    async fn delete_dog(&self, id: i64) -> Result<Dog> {
        self.conn
            .call(move |conn| {
                conn.query_row(schema::DELETE_DOG, [id], row_to_dog)
                    .map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, ENTITY, id.to_string()))
    }

    async fn ping(&self) -> Result<()> {
        self.conn
            .call(|conn| {
                conn.query_row(schema::PING, [], |row| row.get::<_, i64>(0))
                    .map_err(wrap_err)?;
                Ok(())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, ENTITY))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Number;

    fn new_dog(name: &str, age: Number) -> NewDog {
        NewDog {
            name: name.to_string(),
            description: "Loyal".to_string(),
            breed: "Lab".to_string(),
            age,
        }
    }

    async fn repo() -> SqliteRepository {
        SqliteRepository::new_in_memory().await.unwrap()
    }

    #[tokio::test]
    async fn test_create_assigns_increasing_ids() {
        let repo = repo().await;

        let rex = repo.create_dog(&new_dog("Rex", Number::from(3_i64))).await.unwrap();
        let max = repo.create_dog(&new_dog("Max", Number::from(5_i64))).await.unwrap();

        assert_eq!(rex.id, 1);
        assert_eq!(max.id, 2);
        assert_eq!(max.name, "Max");
        assert_eq!(max.age, 5);
    }

    #[tokio::test]
    async fn test_get_dog() {
        let repo = repo().await;
        let rex = repo.create_dog(&new_dog("Rex", Number::from(3_i64))).await.unwrap();

        assert_eq!(repo.get_dog(rex.id).await.unwrap(), Some(rex));
        assert_eq!(repo.get_dog(999_999).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_list_dogs_in_insertion_order() {
        let repo = repo().await;
        assert!(repo.list_dogs().await.unwrap().is_empty());

        repo.create_dog(&new_dog("Rex", Number::from(3_i64))).await.unwrap();
        repo.create_dog(&new_dog("Max", Number::from(5_i64))).await.unwrap();

        let names: Vec<_> = repo
            .list_dogs()
            .await
            .unwrap()
            .into_iter()
            .map(|d| d.name)
            .collect();
        assert_eq!(names, vec!["Rex", "Max"]);
    }

    #[tokio::test]
    async fn test_create_rejects_fractional_age() {
        let repo = repo().await;
        let age = Number::from_f64(3.5).unwrap();

        let result = repo.create_dog(&new_dog("Rex", age)).await;

        assert!(matches!(result, Err(RepositoryError::InvalidData(_))));
        assert!(repo.list_dogs().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_only_changes_supplied_fields() {
        let repo = repo().await;
        let rex = repo.create_dog(&new_dog("Rex", Number::from(3_i64))).await.unwrap();

        let patch = DogPatch {
            breed: Some("Beagle".to_string()),
            age: Some(4),
            ..DogPatch::default()
        };
        let updated = repo.update_dog(rex.id, &patch).await.unwrap();

        assert_eq!(updated.name, "Rex");
        assert_eq!(updated.description, "Loyal");
        assert_eq!(updated.breed, "Beagle");
        assert_eq!(updated.age, 4);
        assert_eq!(repo.get_dog(rex.id).await.unwrap(), Some(updated));
    }

    #[tokio::test]
    async fn test_empty_update_returns_current_record() {
        let repo = repo().await;
        let rex = repo.create_dog(&new_dog("Rex", Number::from(3_i64))).await.unwrap();

        let updated = repo.update_dog(rex.id, &DogPatch::default()).await.unwrap();

        assert_eq!(updated, rex);
    }

    #[tokio::test]
    async fn test_update_missing_dog_is_not_found() {
        let repo = repo().await;

        let result = repo.update_dog(42, &DogPatch::default()).await;

        assert_eq!(
            result,
            Err(RepositoryError::NotFound {
                entity_type: "Dog",
                id: "42".to_string(),
            })
        );
    }

    #[tokio::test]
    async fn test_delete_returns_prior_contents() {
        let repo = repo().await;
        let rex = repo.create_dog(&new_dog("Rex", Number::from(3_i64))).await.unwrap();

        let deleted = repo.delete_dog(rex.id).await.unwrap();

        assert_eq!(deleted, rex);
        assert_eq!(repo.get_dog(rex.id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_delete_missing_dog_is_not_found() {
        let repo = repo().await;

        let result = repo.delete_dog(999_999).await;

        assert!(matches!(result, Err(RepositoryError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_delete() {
        let repo = repo().await;
        let rex = repo.create_dog(&new_dog("Rex", Number::from(3_i64))).await.unwrap();
        repo.delete_dog(rex.id).await.unwrap();

        let max = repo.create_dog(&new_dog("Max", Number::from(5_i64))).await.unwrap();

        assert_eq!(max.id, rex.id + 1);
    }

    #[tokio::test]
    async fn test_ping() {
        let repo = repo().await;
        assert!(repo.ping().await.is_ok());
    }
}
