use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use super::id::exact_integer;
use crate::storage::RepositoryError;

/// A dog as persisted by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dog {
    /// Store-generated identifier. Never changes once assigned.
    pub id: i64,
    pub name: String,
    pub description: String,
    pub breed: String,
    pub age: i64,
}

/// Fields for a dog that has passed request validation but is not stored yet.
///
/// `age` keeps the number exactly as the client sent it. Whether it fits the
/// integer column is decided by the store through [`NewDog::integer_age`].
#[derive(Debug, Clone, PartialEq)]
pub struct NewDog {
    pub name: String,
    pub description: String,
    pub breed: String,
    pub age: Number,
}

impl NewDog {
    /// Returns the age as an integer column value.
    pub fn integer_age(&self) -> Result<i64, RepositoryError> {
        integer_from_number("age", &self.age)
    }

    /// Builds the stored record for this dog under the given id.
    pub fn into_dog(self, id: i64) -> Result<Dog, RepositoryError> {
        let age = self.integer_age()?;
        Ok(Dog {
            id,
            name: self.name,
            description: self.description,
            breed: self.breed,
            age,
        })
    }
}

/// A partial update: only `Some` fields are written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DogPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub breed: Option<String>,
    pub age: Option<i64>,
}

impl DogPatch {
    /// Builds a patch from a request body whose keys were already checked.
    ///
    /// Values are checked against the column types the way a typed data
    /// layer would: text columns take strings, `age` takes an integer, and
    /// `null` is rejected everywhere since no column is nullable. Keys outside
    /// the recognized set are ignored.
    pub fn from_fields(fields: &Map<String, Value>) -> Result<Self, RepositoryError> {
        let mut patch = Self::default();

        for (key, value) in fields {
            match key.as_str() {
                "name" => patch.name = Some(text_field(key, value)?),
                "description" => patch.description = Some(text_field(key, value)?),
                "breed" => patch.breed = Some(text_field(key, value)?),
                "age" => {
                    let Value::Number(number) = value else {
                        return Err(type_mismatch(key, "Int", value));
                    };
                    patch.age = Some(integer_from_number(key, number)?);
                }
                _ => {}
            }
        }

        Ok(patch)
    }

    /// Writes the supplied fields onto `dog`, leaving the rest untouched.
    pub fn apply_to(&self, dog: &mut Dog) {
        if let Some(name) = &self.name {
            dog.name.clone_from(name);
        }
        if let Some(description) = &self.description {
            dog.description.clone_from(description);
        }
        if let Some(breed) = &self.breed {
            dog.breed.clone_from(breed);
        }
        if let Some(age) = self.age {
            dog.age = age;
        }
    }
}

fn text_field(key: &str, value: &Value) -> Result<String, RepositoryError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        other => Err(type_mismatch(key, "String", other)),
    }
}

fn integer_from_number(key: &str, number: &Number) -> Result<i64, RepositoryError> {
    number
        .as_i64()
        .or_else(|| number.as_f64().and_then(exact_integer))
        .ok_or_else(|| {
            RepositoryError::InvalidData(format!(
                "Invalid value for `{key}`: expected Int, provided Float"
            ))
        })
}

fn type_mismatch(key: &str, expected: &str, value: &Value) -> RepositoryError {
    RepositoryError::InvalidData(format!(
        "Invalid value for `{key}`: expected {expected}, provided {}",
        json_type_name(value)
    ))
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "Null",
        Value::Bool(_) => "Boolean",
        Value::Number(n) if n.is_f64() => "Float",
        Value::Number(_) => "Int",
        Value::String(_) => "String",
        Value::Array(_) => "List",
        Value::Object(_) => "Object",
    }
}
