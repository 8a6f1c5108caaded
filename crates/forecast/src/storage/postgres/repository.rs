//! Postgres-backed forecast repository.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use forecast_core::{
    storage::{ForecastRepository, RepositoryError, Result},
    Forecast,
};
use sqlx::{postgres::PgRow, Row};
use uuid::Uuid;

use super::{context::PgContext, error::map_sqlx_error, schema};

pub struct PostgresForecastRepository {
    context: PgContext,
}

impl PostgresForecastRepository {
    pub fn new(context: PgContext) -> Self {
        Self { context }
    }
}

fn row_to_forecast(row: &PgRow) -> Result<Forecast> {
    let column = |e: sqlx::Error| RepositoryError::Serialization(e.to_string());

    Ok(Forecast {
        id: row.try_get::<Uuid, _>("id").map_err(column)?,
        date: row.try_get::<NaiveDate, _>("date").map_err(column)?,
        temperature_c: row.try_get::<i32, _>("temperature_c").map_err(column)?,
        summary: row.try_get::<Option<String>, _>("summary").map_err(column)?,
        created_at: row
            .try_get::<DateTime<Utc>, _>("created_at")
            .map_err(column)?,
        updated_at: row
            .try_get::<DateTime<Utc>, _>("updated_at")
            .map_err(column)?,
    })
}

#[async_trait]
impl ForecastRepository for PostgresForecastRepository {
    async fn get_forecast(&self, id: Uuid) -> Result<Option<Forecast>> {
        let row = sqlx::query(schema::SELECT_FORECAST_BY_ID)
            .bind(id)
            .fetch_optional(self.context.pool())
            .await
            .map_err(|e| map_sqlx_error(e, "Forecast", &id.to_string()))?;

        row.as_ref().map(row_to_forecast).transpose()
    }

    async fn list_forecasts(&self) -> Result<Vec<Forecast>> {
        let rows = sqlx::query(schema::SELECT_ALL_FORECASTS)
            .fetch_all(self.context.pool())
            .await
            .map_err(|e| map_sqlx_error(e, "Forecast", ""))?;

        rows.iter().map(row_to_forecast).collect()
    }

    async fn create_forecast(&self, forecast: &Forecast) -> Result<()> {
        sqlx::query(schema::INSERT_FORECAST)
            .bind(forecast.id)
            .bind(forecast.date)
            .bind(forecast.temperature_c)
            .bind(&forecast.summary)
            .bind(forecast.created_at)
            .bind(forecast.updated_at)
            .execute(self.context.pool())
            .await
            .map_err(|e| map_sqlx_error(e, "Forecast", &forecast.id.to_string()))?;

        Ok(())
    }

    async fn update_forecast(&self, forecast: &Forecast) -> Result<()> {
        let result = sqlx::query(schema::UPDATE_FORECAST)
            .bind(forecast.id)
            .bind(forecast.date)
            .bind(forecast.temperature_c)
            .bind(&forecast.summary)
            .bind(forecast.updated_at)
            .execute(self.context.pool())
            .await
            .map_err(|e| map_sqlx_error(e, "Forecast", &forecast.id.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound {
                entity_type: "Forecast",
                id: forecast.id.to_string(),
            });
        }

        Ok(())
    }

    async fn delete_forecast(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query(schema::DELETE_FORECAST)
            .bind(id)
            .execute(self.context.pool())
            .await
            .map_err(|e| map_sqlx_error(e, "Forecast", &id.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound {
                entity_type: "Forecast",
                id: id.to_string(),
            });
        }

        Ok(())
    }
}
