//! SQLite schema definitions and SQL query constants.
//!
//! Pure data, no I/O. Every statement that returns a dog selects the columns
//! in the order `conversions::row_to_dog` expects.

/// SQL statement to create all tables.
pub const CREATE_TABLES: &str = r#"
CREATE TABLE IF NOT EXISTS dogs (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    description TEXT NOT NULL,
    breed TEXT NOT NULL,
    age INTEGER NOT NULL
);
"#;

pub const SELECT_DOGS: &str = r#"
SELECT id, name, description, breed, age
FROM dogs
"#;

pub const SELECT_DOG_BY_ID: &str = r#"
SELECT id, name, description, breed, age
FROM dogs
WHERE id = ?1
"#;

pub const INSERT_DOG: &str = r#"
INSERT INTO dogs (name, description, breed, age)
VALUES (?1, ?2, ?3, ?4)
RETURNING id, name, description, breed, age
"#;

/// Only non-NULL parameters overwrite a column.
pub const UPDATE_DOG: &str = r#"
UPDATE dogs
SET name = COALESCE(?2, name),
    description = COALESCE(?3, description),
    breed = COALESCE(?4, breed),
    age = COALESCE(?5, age)
WHERE id = ?1
RETURNING id, name, description, breed, age
"#;

pub const DELETE_DOG: &str = r#"
DELETE FROM dogs
WHERE id = ?1
RETURNING id, name, description, breed, age
"#;

pub const PING: &str = "SELECT 1";
