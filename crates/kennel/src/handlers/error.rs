//! Last-resort error handling.
//!
//! A panic inside a handler is caught by `CatchPanicLayer` and turned into a
//! generic 500 response here instead of tearing down the connection.

use std::any::Any;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Builds the response for a handler that panicked.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic payload".to_string()
    };

    tracing::error!(error = %detail, "Handler panicked");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "message": format!("Something went wrong: {detail}") })),
    )
        .into_response()
}
