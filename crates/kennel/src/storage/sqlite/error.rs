//! SQLite error mapping.
//!
//! Maps `tokio_rusqlite::Error` and `rusqlite::Error` to `RepositoryError` from `kennel_core::storage`.
//! Specific errors are mapped to semantic variants (e.g., no returned row to NotFound).

use kennel_core::storage::RepositoryError;

/// Maps a rusqlite error to a RepositoryError.
///
/// # Error Mapping
///
/// - `SQLITE_CONSTRAINT_UNIQUE` / `SQLITE_CONSTRAINT_PRIMARYKEY` → `RepositoryError::AlreadyExists`
/// - `SQLITE_CONSTRAINT_NOTNULL` / `SQLITE_CONSTRAINT_CHECK` → `RepositoryError::InvalidData`
/// - Connection errors → `RepositoryError::ConnectionFailed`
/// - Column type mismatches → `RepositoryError::Serialization`
/// - All other errors → `RepositoryError::QueryFailed`
fn map_rusqlite_error(err: &rusqlite::Error, entity_type: &'static str, id: &str) -> RepositoryError {
    match err {
        rusqlite::Error::SqliteFailure(sqlite_err, _)
            if sqlite_err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
                || sqlite_err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY =>
        {
            RepositoryError::AlreadyExists {
                entity_type,
                id: id.to_string(),
            }
        }

        rusqlite::Error::SqliteFailure(sqlite_err, _)
            if sqlite_err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_NOTNULL
                || sqlite_err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_CHECK =>
        {
            RepositoryError::InvalidData(format!("Constraint violation for {entity_type}: {err}"))
        }

        rusqlite::Error::SqliteFailure(sqlite_err, _)
            if matches!(
                sqlite_err.code,
                rusqlite::ErrorCode::CannotOpen
                    | rusqlite::ErrorCode::DatabaseBusy
                    | rusqlite::ErrorCode::DatabaseLocked
            ) =>
        {
            RepositoryError::ConnectionFailed(err.to_string())
        }

        // RETURNING produced nothing: the row does not exist
        rusqlite::Error::QueryReturnedNoRows => RepositoryError::NotFound {
            entity_type,
            id: id.to_string(),
        },

        rusqlite::Error::InvalidColumnType(..) | rusqlite::Error::FromSqlConversionFailure(..) => {
            RepositoryError::Serialization(err.to_string())
        }

        _ => RepositoryError::QueryFailed(err.to_string()),
    }
}

/// Maps a tokio_rusqlite error to a RepositoryError.
///
/// Use this when no single entity ID is involved (listing, pings, inserts).
pub fn map_tokio_rusqlite_error(err: tokio_rusqlite::Error, entity_type: &'static str) -> RepositoryError {
    map_tokio_rusqlite_error_with_id(err, entity_type, "unknown")
}

/// Maps a tokio_rusqlite error with a known ID to a RepositoryError.
///
/// This is the main entry point for error mapping in async code. It extracts
/// the inner `rusqlite::Error` if present, otherwise maps to a connection or
/// generic query failure.
pub fn map_tokio_rusqlite_error_with_id(
    err: tokio_rusqlite::Error,
    entity_type: &'static str,
    id: impl Into<String>,
) -> RepositoryError {
    let id = id.into();
    match &err {
        tokio_rusqlite::Error::Rusqlite(rusqlite_err) => {
            map_rusqlite_error(rusqlite_err, entity_type, &id)
        }
        tokio_rusqlite::Error::ConnectionClosed | tokio_rusqlite::Error::Close(_) => {
            RepositoryError::ConnectionFailed("Connection closed unexpectedly".to_string())
        }
        _ => RepositoryError::QueryFailed(err.to_string()),
    }
}
