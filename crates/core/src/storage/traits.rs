use async_trait::async_trait;
use uuid::Uuid;

use crate::forecast::Forecast;

use super::Result;

/// Repository capability for forecast CRUD primitives.
///
/// Implementations own the persistence details; callers see only these
/// operations and the [`super::RepositoryError`] taxonomy.
#[async_trait]
pub trait ForecastRepository: Send + Sync {
    /// Gets a forecast by its ID.
    async fn get_forecast(&self, id: Uuid) -> Result<Option<Forecast>>;

    /// Gets all forecasts, ordered by date.
    async fn list_forecasts(&self) -> Result<Vec<Forecast>>;

    /// Creates a new forecast.
    async fn create_forecast(&self, forecast: &Forecast) -> Result<()>;

    /// Updates an existing forecast.
    async fn update_forecast(&self, forecast: &Forecast) -> Result<()>;

    /// Deletes a forecast by its ID.
    async fn delete_forecast(&self, id: Uuid) -> Result<()>;
}
