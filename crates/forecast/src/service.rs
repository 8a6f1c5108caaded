//! Application service sitting between the HTTP handlers and storage.

use std::sync::Arc;

use forecast_core::{
    storage::{ForecastRepository, RepositoryError},
    Forecast,
};
use uuid::Uuid;

use crate::models::{CreateForecast, ForecastDto, UpdateForecast};

/// Scoped CRUD service over the active forecast repository.
pub struct ForecastService {
    repository: Arc<dyn ForecastRepository>,
}

impl ForecastService {
    pub fn new(repository: Arc<dyn ForecastRepository>) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> Result<Vec<ForecastDto>, RepositoryError> {
        let forecasts = self.repository.list_forecasts().await?;
        Ok(forecasts.iter().map(ForecastDto::from).collect())
    }

    pub async fn get(&self, id: Uuid) -> Result<ForecastDto, RepositoryError> {
        let forecast = self
            .repository
            .get_forecast(id)
            .await?
            .ok_or_else(|| not_found(id))?;
        Ok(ForecastDto::from(&forecast))
    }

    pub async fn create(&self, payload: CreateForecast) -> Result<ForecastDto, RepositoryError> {
        let forecast = payload.into_forecast();
        self.repository.create_forecast(&forecast).await?;
        Ok(ForecastDto::from(&forecast))
    }

    pub async fn update(
        &self,
        id: Uuid,
        payload: UpdateForecast,
    ) -> Result<ForecastDto, RepositoryError> {
        let mut forecast = self
            .repository
            .get_forecast(id)
            .await?
            .ok_or_else(|| not_found(id))?;
        payload.apply_to(&mut forecast);
        self.repository.update_forecast(&forecast).await?;
        Ok(ForecastDto::from(&forecast))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        self.repository.delete_forecast(id).await
    }
}

fn not_found(id: Uuid) -> RepositoryError {
    RepositoryError::NotFound {
        entity_type: "Forecast",
        id: id.to_string(),
    }
}

#[cfg(all(test, feature = "inmemory"))]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::storage::InMemoryRepository;

    fn service() -> ForecastService {
        ForecastService::new(Arc::new(InMemoryRepository::new()))
    }

    fn create_payload(day: u32) -> CreateForecast {
        CreateForecast {
            date: NaiveDate::from_ymd_opt(2026, 8, day).unwrap(),
            temperature_c: 21,
            summary: Some("Mild".to_string()),
        }
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let service = service();

        let created = service.create(create_payload(1)).await.unwrap();
        let fetched = service.get(created.id).await.unwrap();

        assert_eq!(fetched.id, created.id);
        assert_eq!(fetched.temperature_c, 21);
        assert_eq!(fetched.summary.as_deref(), Some("Mild"));
    }

    #[tokio::test]
    async fn test_get_unknown_id_is_not_found() {
        let service = service();

        let error = service.get(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(error, RepositoryError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_update_applies_partial_payload() {
        let service = service();
        let created = service.create(create_payload(2)).await.unwrap();

        let updated = service
            .update(
                created.id,
                UpdateForecast {
                    date: None,
                    temperature_c: Some(-4),
                    summary: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.temperature_c, -4);
        assert_eq!(updated.date, created.date);
        assert_eq!(updated.summary.as_deref(), Some("Mild"));
        assert!(updated.updated_at >= created.updated_at);
    }

    #[tokio::test]
    async fn test_delete_then_get_is_not_found() {
        let service = service();
        let created = service.create(create_payload(3)).await.unwrap();

        service.delete(created.id).await.unwrap();

        let error = service.get(created.id).await.unwrap_err();
        assert!(matches!(error, RepositoryError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_list_is_sorted_by_date() {
        let service = service();
        service.create(create_payload(9)).await.unwrap();
        service.create(create_payload(3)).await.unwrap();
        service.create(create_payload(6)).await.unwrap();

        let listed = service.list().await.unwrap();
        let dates: Vec<_> = listed.iter().map(|dto| dto.date).collect();
        let mut sorted = dates.clone();
        sorted.sort();

        assert_eq!(dates, sorted);
    }
}
