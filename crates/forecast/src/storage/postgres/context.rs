//! Connection-pool context shared by the Postgres repository.

use forecast_core::storage::{RepositoryError, Result};
use sqlx::postgres::{PgPool, PgPoolOptions};

use super::schema;

/// Shared handle to the Postgres pool. Cloning clones the pool handle,
/// not the connections.
#[derive(Clone)]
pub struct PgContext {
    pool: PgPool,
}

impl PgContext {
    /// Open a pool against the given connection string.
    pub async fn connect(connection_string: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(connection_string)
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Ok(Self { pool })
    }

    /// Create the forecasts table if it does not exist yet.
    pub async fn init_schema(&self) -> Result<()> {
        sqlx::raw_sql(schema::CREATE_TABLES)
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}
