//! Dog CRUD handlers.
//!
//! Each route keeps its own store-failure behavior:
//!
//! - list and get log the failure and never answer; the request stays open
//!   until the timeout layer closes it with 408
//! - create answers 200 with the raw error object
//! - update answers 400 with `{"error": <raw error>}`
//! - delete answers 204 with `Couldn't delete`
//!
//! Successful create and update echo the request body rather than the stored
//! record, written out by `echo_value`.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Map, Value};

use kennel_core::dog::{
    coerce_id, echo_value, record_id, validate_new_dog, validate_patch_keys, Dog, DogPatch,
    ValidationErrors, ID_NOT_A_NUMBER,
};
use kennel_core::storage::{repository_error_body, DogRepository, RepositoryError};

use crate::{handlers::DogBody, state::AppState};

/// Body of the delete response when nothing was deleted.
const COULD_NOT_DELETE: &str = "Couldn't delete";

/// 400 `{"message": "id should be a number"}`.
fn id_not_a_number(raw_id: &str) -> Response {
    tracing::warn!(id = %raw_id, "Rejected non-numeric id");
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "message": ID_NOT_A_NUMBER })),
    )
        .into_response()
}

/// 400 `{"errors": [...]}`.
fn validation_failed(errors: ValidationErrors) -> Response {
    tracing::warn!(errors = ?errors.errors, "Rejected dog payload");
    (StatusCode::BAD_REQUEST, Json(errors)).into_response()
}

/// Never produces a response.
///
/// Used where a store failure leaves the request unanswered. The connection is
/// released by the timeout layer or when the client goes away.
async fn unanswered() -> Response {
    std::future::pending().await
}

// ============================================================================
// List Dogs
// ============================================================================

/// List every dog (GET /dogs).
pub async fn list_dogs(State(state): State<AppState>) -> Response {
    match state.dog_repo.list_dogs().await {
        Ok(dogs) => (StatusCode::OK, Json(dogs)).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to list dogs");
            unanswered().await
        }
    }
}

// ============================================================================
// Get Dog
// ============================================================================

/// Get a single dog by ID (GET /dogs/{id}).
///
/// 204 with an empty body when the dog does not exist.
pub async fn get_dog(State(state): State<AppState>, Path(raw_id): Path<String>) -> Response {
    let id = coerce_id(&raw_id);
    if id.is_nan() {
        return id_not_a_number(&raw_id);
    }

    match find_dog(state.dog_repo.as_ref(), id).await {
        Ok(Some(dog)) => (StatusCode::OK, Json(dog)).into_response(),
        Ok(None) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => {
            tracing::error!(error = %e, id = %raw_id, "Failed to get dog");
            unanswered().await
        }
    }
}

async fn find_dog(repo: &dyn DogRepository, id: f64) -> Result<Option<Dog>, RepositoryError> {
    let id = record_id(id)?;
    repo.get_dog(id).await
}

// ============================================================================
// Create Dog
// ============================================================================

/// Create a new dog (POST /dogs).
///
/// Responds 201 with the request body as received, without the generated id.
pub async fn create_dog(State(state): State<AppState>, DogBody(body): DogBody) -> Response {
    tracing::debug!(payload = ?body, "Received create dog request");

    let new_dog = match validate_new_dog(&body) {
        Ok(new_dog) => new_dog,
        Err(errors) => return validation_failed(errors),
    };

    match state.dog_repo.create_dog(&new_dog).await {
        Ok(dog) => {
            tracing::info!(dog_id = dog.id, name = %dog.name, "Created new dog");
            (StatusCode::CREATED, Json(echo_value(Value::Object(body)))).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to create dog");
            Json(repository_error_body(&e)).into_response()
        }
    }
}

// ============================================================================
// Update Dog
// ============================================================================

/// Partially update a dog by ID (PATCH /dogs/{id}).
///
/// The id is not checked before use: a non-numeric id reaches the store as NaN
/// and fails there. Responds 201 with the request body as received.
pub async fn update_dog(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    DogBody(body): DogBody,
) -> Response {
    tracing::debug!(id = %raw_id, payload = ?body, "Received update dog request");

    let id = coerce_id(&raw_id);

    if let Err(errors) = validate_patch_keys(&body) {
        return validation_failed(errors);
    }

    match apply_patch(state.dog_repo.as_ref(), id, &body).await {
        Ok(dog) => {
            tracing::info!(dog_id = dog.id, "Updated dog");
            (StatusCode::CREATED, Json(echo_value(Value::Object(body)))).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, id = %raw_id, "Failed to update dog");
            (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": repository_error_body(&e) })),
            )
                .into_response()
        }
    }
}

async fn apply_patch(
    repo: &dyn DogRepository,
    id: f64,
    body: &Map<String, Value>,
) -> Result<Dog, RepositoryError> {
    let id = record_id(id)?;
    let patch = DogPatch::from_fields(body)?;
    repo.update_dog(id, &patch).await
}

// ============================================================================
// Delete Dog
// ============================================================================

/// Delete a dog by ID (DELETE /dogs/{id}).
///
/// Responds 200 with the deleted record. Any failure, including a missing
/// dog, is reported as 204 `Couldn't delete`.
pub async fn delete_dog(State(state): State<AppState>, Path(raw_id): Path<String>) -> Response {
    tracing::debug!(id = %raw_id, "Received delete dog request");

    let id = coerce_id(&raw_id);
    if id.is_nan() {
        return id_not_a_number(&raw_id);
    }

    match remove_dog(state.dog_repo.as_ref(), id).await {
        Ok(dog) => {
            tracing::info!(dog_id = dog.id, "Deleted dog");
            (StatusCode::OK, Json(dog)).into_response()
        }
        Err(e) => {
            tracing::warn!(error = %e, id = %raw_id, "Failed to delete dog");
            (StatusCode::NO_CONTENT, COULD_NOT_DELETE).into_response()
        }
    }
}

async fn remove_dog(repo: &dyn DogRepository, id: f64) -> Result<Dog, RepositoryError> {
    let id = record_id(id)?;
    repo.delete_dog(id).await
}
