//! Lenient JSON body extractor for dog payloads.
//!
//! Dog handlers validate keys and types themselves, so the extractor only
//! turns the request into a JSON object:
//!
//! - no JSON content type, or a zero-length body: `{}`
//! - a JSON object: used as-is, keys in the order the client sent them
//! - a JSON array: an object keyed by element index (`"0"`, `"1"`, ...)
//! - malformed JSON or a bare scalar: rejected with 400 `{"message": ...}`

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Map, Value};

/// The request body as a JSON object.
#[derive(Debug, Clone, Default)]
pub struct DogBody(pub Map<String, Value>);

impl<S> FromRequest<S> for DogBody
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !has_json_content_type(req.headers()) {
            return Ok(Self::default());
        }

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(IntoResponse::into_response)?;

        parse_body(&bytes).map(Self).map_err(|message| {
            tracing::warn!(message = %message, "Rejected request body");
            (StatusCode::BAD_REQUEST, Json(json!({ "message": message }))).into_response()
        })
    }
}

fn has_json_content_type(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
    else {
        return false;
    };

    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim();

    essence.eq_ignore_ascii_case("application/json")
}

/// Parses raw bytes into a JSON object following the rules in the module docs.
fn parse_body(bytes: &[u8]) -> Result<Map<String, Value>, String> {
    if bytes.is_empty() {
        return Ok(Map::new());
    }

    match serde_json::from_slice::<Value>(bytes).map_err(|e| e.to_string())? {
        Value::Object(map) => Ok(map),
        Value::Array(items) => Ok(items
            .into_iter()
            .enumerate()
            .map(|(index, item)| (index.to_string(), item))
            .collect()),
        other => Err(format!(
            "JSON body must be an object or an array, found {}",
            scalar_kind(&other)
        )),
    }
}

fn scalar_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) | Value::Object(_) => "a collection",
    }
}
