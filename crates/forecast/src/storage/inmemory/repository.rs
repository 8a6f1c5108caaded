//! In-memory forecast storage, for development and tests.

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use forecast_core::{
    storage::{ForecastRepository, RepositoryError, Result},
    Forecast,
};
use tokio::sync::RwLock;
use uuid::Uuid;

/// Process-local repository backed by a `HashMap`.
///
/// Cloning is cheap and every clone shares the same store.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    forecasts: Arc<RwLock<HashMap<Uuid, Forecast>>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ForecastRepository for InMemoryRepository {
    async fn get_forecast(&self, id: Uuid) -> Result<Option<Forecast>> {
        let forecasts = self.forecasts.read().await;
        Ok(forecasts.get(&id).cloned())
    }

    async fn list_forecasts(&self) -> Result<Vec<Forecast>> {
        let forecasts = self.forecasts.read().await;
        let mut all: Vec<Forecast> = forecasts.values().cloned().collect();
        all.sort_by_key(|forecast| forecast.date);
        Ok(all)
    }

    async fn create_forecast(&self, forecast: &Forecast) -> Result<()> {
        let mut forecasts = self.forecasts.write().await;
        if forecasts.contains_key(&forecast.id) {
            return Err(RepositoryError::AlreadyExists {
                entity_type: "Forecast",
                id: forecast.id.to_string(),
            });
        }
        forecasts.insert(forecast.id, forecast.clone());
        Ok(())
    }

    async fn update_forecast(&self, forecast: &Forecast) -> Result<()> {
        let mut forecasts = self.forecasts.write().await;
        if !forecasts.contains_key(&forecast.id) {
            return Err(RepositoryError::NotFound {
                entity_type: "Forecast",
                id: forecast.id.to_string(),
            });
        }
        forecasts.insert(forecast.id, forecast.clone());
        Ok(())
    }

    async fn delete_forecast(&self, id: Uuid) -> Result<()> {
        let mut forecasts = self.forecasts.write().await;
        if forecasts.remove(&id).is_none() {
            return Err(RepositoryError::NotFound {
                entity_type: "Forecast",
                id: id.to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn forecast_on(day: u32) -> Forecast {
        Forecast::new(
            NaiveDate::from_ymd_opt(2026, 8, day).unwrap(),
            17,
            Some("Overcast".to_string()),
        )
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let repository = InMemoryRepository::new();
        let forecast = forecast_on(1);

        repository.create_forecast(&forecast).await.unwrap();
        let fetched = repository.get_forecast(forecast.id).await.unwrap();

        assert_eq!(fetched, Some(forecast));
    }

    #[tokio::test]
    async fn test_get_missing_returns_none() {
        let repository = InMemoryRepository::new();
        let fetched = repository.get_forecast(Uuid::new_v4()).await.unwrap();
        assert_eq!(fetched, None);
    }

    #[tokio::test]
    async fn test_duplicate_create_is_rejected() {
        let repository = InMemoryRepository::new();
        let forecast = forecast_on(2);

        repository.create_forecast(&forecast).await.unwrap();
        let error = repository.create_forecast(&forecast).await.unwrap_err();

        assert!(matches!(error, RepositoryError::AlreadyExists { .. }));
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let repository = InMemoryRepository::new();
        let error = repository
            .update_forecast(&forecast_on(3))
            .await
            .unwrap_err();
        assert!(matches!(error, RepositoryError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_removes_the_forecast() {
        let repository = InMemoryRepository::new();
        let forecast = forecast_on(4);

        repository.create_forecast(&forecast).await.unwrap();
        repository.delete_forecast(forecast.id).await.unwrap();

        assert_eq!(repository.get_forecast(forecast.id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let repository = InMemoryRepository::new();
        let error = repository.delete_forecast(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(error, RepositoryError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_list_orders_by_date() {
        let repository = InMemoryRepository::new();
        for day in [20, 5, 12] {
            repository.create_forecast(&forecast_on(day)).await.unwrap();
        }

        let all = repository.list_forecasts().await.unwrap();
        let days: Vec<u32> = all
            .iter()
            .map(|f| chrono::Datelike::day(&f.date))
            .collect();

        assert_eq!(days, vec![5, 12, 20]);
    }

    #[tokio::test]
    async fn test_clones_share_the_store() {
        let repository = InMemoryRepository::new();
        let clone = repository.clone();
        let forecast = forecast_on(8);

        repository.create_forecast(&forecast).await.unwrap();

        assert_eq!(clone.get_forecast(forecast.id).await.unwrap(), Some(forecast));
    }
}
