//! CRUD handlers for the forecast resource.
//!
//! Each handler resolves [`ForecastService`] from the request scope that
//! the scope-injection middleware attached, so services live exactly as
//! long as the request.

use axum::{
    extract::Path,
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use forecast_core::registry::RequestScope;
use uuid::Uuid;

use crate::{
    handlers::AppError,
    models::{CreateForecast, UpdateForecast},
    service::ForecastService,
};

pub async fn list_forecasts(
    Extension(scope): Extension<RequestScope>,
) -> Result<Response, AppError> {
    let service = scope.resolve::<ForecastService>()?;
    let forecasts = service.list().await?;
    Ok(Json(forecasts).into_response())
}

pub async fn get_forecast(
    Extension(scope): Extension<RequestScope>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let service = scope.resolve::<ForecastService>()?;
    let forecast = service.get(id).await?;
    Ok(Json(forecast).into_response())
}

pub async fn create_forecast(
    Extension(scope): Extension<RequestScope>,
    Json(payload): Json<CreateForecast>,
) -> Result<Response, AppError> {
    let service = scope.resolve::<ForecastService>()?;
    let forecast = service.create(payload).await?;
    tracing::info!(forecast_id = %forecast.id, date = %forecast.date, "Created forecast");
    Ok((StatusCode::CREATED, Json(forecast)).into_response())
}

pub async fn update_forecast(
    Extension(scope): Extension<RequestScope>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateForecast>,
) -> Result<Response, AppError> {
    let service = scope.resolve::<ForecastService>()?;
    let forecast = service.update(id, payload).await?;
    tracing::info!(forecast_id = %forecast.id, "Updated forecast");
    Ok(Json(forecast).into_response())
}

pub async fn delete_forecast(
    Extension(scope): Extension<RequestScope>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let service = scope.resolve::<ForecastService>()?;
    service.delete(id).await?;
    tracing::info!(forecast_id = %id, "Deleted forecast");
    Ok(StatusCode::NO_CONTENT.into_response())
}
