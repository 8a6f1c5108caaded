//! Handler error type bridging repository failures to HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use forecast_core::storage::{repository_error_to_status_code, RepositoryError};

/// Wrapper around `anyhow::Error` so handlers can use `?` freely.
pub struct AppError(anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Storage errors carry a meaningful status; anything else is a 500.
        if let Some(repository_error) = self.0.downcast_ref::<RepositoryError>() {
            let status = StatusCode::from_u16(repository_error_to_status_code(repository_error))
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            tracing::debug!(%status, "storage error: {repository_error}");
            return (status, repository_error.to_string()).into_response();
        }

        tracing::error!("internal error: {:?}", self.0);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Something went wrong: {}", self.0),
        )
            .into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
