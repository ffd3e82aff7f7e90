//! Error handling utilities for repositories

use sqlx::Error as SqlxError;
use vidshare_core::error::DomainError;
use vidshare_core::value_objects::Snowflake;

/// SQLSTATEs for serialization failure and deadlock
const RETRYABLE_STATES: [&str; 2] = ["40001", "40P01"];

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Map unique violations through `on_unique`, receiving the violated constraint name
pub fn map_unique_violation<F>(e: SqlxError, on_unique: F) -> DomainError
where
    F: FnOnce(Option<&str>) -> DomainError,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return on_unique(db_err.constraint());
        }
    }
    DomainError::DatabaseError(e.to_string())
}

/// Map errors raised inside a per-video transaction. Lock conflicts surface
/// as `ConcurrentUpdate` so the caller can retry.
pub fn map_tx_error(video_id: Snowflake) -> impl FnOnce(SqlxError) -> DomainError {
    move |e| {
        let retryable = e
            .as_database_error()
            .and_then(|db| db.code())
            .is_some_and(|code| RETRYABLE_STATES.iter().any(|state| *state == code));
        if retryable {
            DomainError::ConcurrentUpdate(video_id)
        } else {
            map_db_error(e)
        }
    }
}

pub fn user_not_found(id: Snowflake) -> DomainError {
    DomainError::UserNotFound(id)
}

pub fn video_not_found(id: Snowflake) -> DomainError {
    DomainError::VideoNotFound(id)
}

pub fn comment_not_found(id: Snowflake) -> DomainError {
    DomainError::CommentNotFound(id)
}
