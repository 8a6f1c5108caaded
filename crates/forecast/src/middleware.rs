//! Request middleware: secure-transport redirect, bearer authorization,
//! and per-request scope injection.

use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::state::AppState;

/// Redirect plain-HTTP requests to their HTTPS equivalent.
///
/// Behind a proxy the original scheme arrives in `x-forwarded-proto`;
/// direct connections carry no such header and pass through untouched.
pub async fn redirect_to_https(req: Request, next: Next) -> Response {
    let forwarded_proto = req
        .headers()
        .get("x-forwarded-proto")
        .and_then(|value| value.to_str().ok());

    if forwarded_proto == Some("http") {
        if let Some(host) = req
            .headers()
            .get(header::HOST)
            .and_then(|value| value.to_str().ok())
        {
            let location = format!("https://{}{}", host, req.uri());
            return (
                StatusCode::PERMANENT_REDIRECT,
                [(header::LOCATION, location)],
            )
                .into_response();
        }
    }

    next.run(req).await
}

/// Reject API requests that do not carry the configured bearer token.
pub async fn require_bearer(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));

    match token {
        Some(token) if token == state.config.api_token => next.run(req).await,
        _ => {
            tracing::debug!("rejecting request without a valid bearer token");
            (StatusCode::UNAUTHORIZED, "Missing or invalid bearer token").into_response()
        }
    }
}

/// Attach a fresh service scope to the request extensions.
///
/// Handlers resolve their services from this scope, so every request
/// gets its own scoped instances while singletons stay shared.
pub async fn inject_scope(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    let scope = state.provider.create_scope();
    req.extensions_mut().insert(scope);
    next.run(req).await
}
