//! Pure functions for exposing repository errors over HTTP.
//!
//! Some routes hand store failures straight back to the client. This module
//! decides what that raw error looks like on the wire.

use serde_json::{json, Value};

use super::RepositoryError;

/// Serializes a [`RepositoryError`] as the raw error object sent to clients.
///
/// The shape is `{"name": "RepositoryError", "code": ..., "message": ...}`
/// where `code` is [`RepositoryError::code`] and `message` its display text.
///
/// # Examples
///
/// ```
/// use kennel_core::storage::{repository_error_body, RepositoryError};
///
/// let error = RepositoryError::NotFound {
///     entity_type: "Dog",
///     id: "7".to_string(),
/// };
/// let body = repository_error_body(&error);
/// assert_eq!(body["code"], "NOT_FOUND");
/// assert_eq!(body["message"], "Dog not found: 7");
/// ```
pub fn repository_error_body(error: &RepositoryError) -> Value {
    json!({
        "name": "RepositoryError",
        "code": error.code(),
        "message": error.to_string(),
    })
}
