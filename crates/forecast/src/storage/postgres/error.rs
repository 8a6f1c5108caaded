//! Mapping from sqlx failures onto the repository error taxonomy.

use forecast_core::storage::RepositoryError;

pub fn map_sqlx_error(error: sqlx::Error, entity_type: &'static str, id: &str) -> RepositoryError {
    match &error {
        sqlx::Error::RowNotFound => RepositoryError::NotFound {
            entity_type,
            id: id.to_string(),
        },
        sqlx::Error::Database(db) if db.is_unique_violation() => RepositoryError::AlreadyExists {
            entity_type,
            id: id.to_string(),
        },
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            RepositoryError::ConnectionFailed(error.to_string())
        }
        _ => RepositoryError::QueryFailed(error.to_string()),
    }
}
