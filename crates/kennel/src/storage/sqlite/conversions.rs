//! SQLite row conversion functions.

use kennel_core::dog::Dog;
use rusqlite::Row;

/// Convert a SQLite row to a Dog.
///
/// Expected columns: id, name, description, breed, age
pub fn row_to_dog(row: &Row) -> rusqlite::Result<Dog> {
    Ok(Dog {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        breed: row.get(3)?,
        age: row.get(4)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::sqlite::schema;

    #[test]
    fn test_row_to_dog() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        conn.execute_batch(schema::CREATE_TABLES).unwrap();

        let dog = conn
            .query_row(
                schema::INSERT_DOG,
                rusqlite::params!["Rex", "Loyal", "Lab", 3_i64],
                row_to_dog,
            )
            .unwrap();

        assert_eq!(
            dog,
            Dog {
                id: 1,
                name: "Rex".to_string(),
                description: "Loyal".to_string(),
                breed: "Lab".to_string(),
                age: 3,
            }
        );
    }

    #[test]
    fn test_row_to_dog_rejects_wrong_column_type() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        let result = conn.query_row("SELECT 'x', 'a', 'b', 'c', 1", [], row_to_dog);

        assert!(matches!(
            result,
            Err(rusqlite::Error::InvalidColumnType(0, _, _))
        ));
    }
}
