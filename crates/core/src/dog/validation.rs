//! Request body validation for dog payloads.
//!
//! Both create and update run over the same raw JSON object. Create checks the
//! field types and scans for unknown keys; update only scans for unknown keys.
//! Unknown keys on create are reported alongside type errors but never block
//! the request on their own.

use serde::Serialize;
use serde_json::{Map, Value};

use super::order::ordered_keys;
use super::types::NewDog;

/// The only keys a dog payload may carry.
pub const RECOGNIZED_KEYS: [&str; 4] = ["name", "description", "breed", "age"];

/// Accumulated validation messages, serialized as `{"errors": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors {
    pub errors: Vec<String>,
}

/// Returns `true` for `name`, `description`, `breed` and `age`.
pub fn is_recognized_key(key: &str) -> bool {
    RECOGNIZED_KEYS.contains(&key)
}

/// One message per key that is not a recognized key.
///
/// Keys are reported in [`ordered_keys`] order, so index-like keys come first.
///
/// # Examples
///
/// ```
/// use kennel_core::dog::unknown_key_errors;
/// use serde_json::json;
///
/// let body = json!({"name": "Rex", "weight": 10, "7": 1});
/// let errors = unknown_key_errors(body.as_object().unwrap());
/// assert_eq!(
///     errors,
///     vec![
///         "'7' is not a valid key".to_string(),
///         "'weight' is not a valid key".to_string(),
///     ]
/// );
/// ```
pub fn unknown_key_errors(body: &Map<String, Value>) -> Vec<String> {
    ordered_keys(body)
        .into_iter()
        .filter(|key| !is_recognized_key(key))
        .map(|key| format!("'{key}' is not a valid key"))
        .collect()
}

/// One message per required field that is missing or has the wrong type.
///
/// Text fields must be strings and `age` must be a number.
pub fn field_type_errors(body: &Map<String, Value>) -> Vec<String> {
    let mut errors = Vec::new();

    for field in ["name", "description", "breed"] {
        if !matches!(body.get(field), Some(Value::String(_))) {
            errors.push(format!("{field} should be a string"));
        }
    }

    if !matches!(body.get("age"), Some(Value::Number(_))) {
        errors.push("age should be a number".to_string());
    }

    errors
}

/// Validates a create payload.
///
/// Type errors come first, then unknown-key errors. The payload is rejected
/// only when a type check failed; in that case every accumulated message is
/// returned. Otherwise the four fields are extracted and extra keys dropped.
pub fn validate_new_dog(body: &Map<String, Value>) -> Result<NewDog, ValidationErrors> {
    let text = |field: &str| match body.get(field) {
        Some(Value::String(s)) => Some(s.clone()),
        _ => None,
    };
    let age = match body.get("age") {
        Some(Value::Number(n)) => Some(n.clone()),
        _ => None,
    };

    if let (Some(name), Some(description), Some(breed), Some(age)) =
        (text("name"), text("description"), text("breed"), age)
    {
        return Ok(NewDog {
            name,
            description,
            breed,
            age,
        });
    }

    let mut errors = field_type_errors(body);
    errors.extend(unknown_key_errors(body));
    Err(ValidationErrors { errors })
}

/// Validates the keys of an update payload. Values are not inspected.
pub fn validate_patch_keys(body: &Map<String, Value>) -> Result<(), ValidationErrors> {
    let errors = unknown_key_errors(body);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationErrors { errors })
    }
}
