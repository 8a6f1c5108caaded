//! Router assembly. The pipeline is built in the canonical stage order
//! from [`Stage::canonical`]; layers added later run earlier, so the
//! code reads inside-out.

use axum::{
    http::{header, Method, StatusCode},
    middleware::{from_fn, from_fn_with_state},
    routing::get,
    Router,
};
use tower_http::{cors::{Any, CorsLayer}, timeout::TimeoutLayer, trace::TraceLayer};

use crate::{
    handlers::{docs, forecasts, health},
    middleware::{inject_scope, redirect_to_https, require_bearer},
    pipeline::{validate_stage_order, Stage},
    state::AppState,
};

/// Build the application router around the given state.
pub fn create_app(state: AppState) -> Router {
    let stages = Stage::canonical(state.config.docs_enabled);
    debug_assert!(validate_stage_order(&stages).is_ok());

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    // Authorized API surface. Auth and scope injection go on via
    // route_layer so the router fallback stays a plain 404 instead of a
    // 401. CORS sits outermost so preflights are answered before the
    // bearer check.
    let api = Router::new()
        .route(
            "/api/forecasts",
            get(forecasts::list_forecasts).post(forecasts::create_forecast),
        )
        .route(
            "/api/forecasts/{id}",
            get(forecasts::get_forecast)
                .put(forecasts::update_forecast)
                .delete(forecasts::delete_forecast),
        )
        .route_layer(from_fn_with_state(state.clone(), inject_scope))
        .route_layer(from_fn_with_state(state.clone(), require_bearer))
        .layer(cors);

    let mut app = Router::new()
        .route("/health", get(health::health_check))
        .merge(api);

    if stages.contains(&Stage::Docs) {
        app = app
            .route("/docs", get(docs::docs_index))
            .route("/docs/openapi.json", get(docs::openapi));
    }

    app.layer(from_fn(redirect_to_https))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            state.config.request_timeout(),
        ))
}

#[cfg(all(test, feature = "inmemory"))]
mod tests {
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;

    const TOKEN: &str = "test-token";

    async fn test_app() -> Router {
        let config = Config {
            database_url: None,
            api_token: TOKEN.to_string(),
            docs_enabled: true,
            request_timeout_seconds: 10,
        };
        let state = AppState::new(&config).await.unwrap();
        create_app(state)
    }

    fn authed(request: axum::http::request::Builder) -> axum::http::request::Builder {
        request.header(header::AUTHORIZATION, format!("Bearer {TOKEN}"))
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_is_public() {
        let app = test_app().await;

        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_api_rejects_missing_token() {
        let app = test_app().await;

        let response = app
            .oneshot(Request::get("/api/forecasts").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_api_rejects_wrong_token() {
        let app = test_app().await;

        let response = app
            .oneshot(
                Request::get("/api/forecasts")
                    .header(header::AUTHORIZATION, "Bearer wrong-token")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_full_crud_roundtrip() {
        let app = test_app().await;

        // Create
        let response = app
            .clone()
            .oneshot(
                authed(Request::post("/api/forecasts"))
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        json!({
                            "date": "2026-08-24",
                            "temperature_c": 25,
                            "summary": "Sunny"
                        })
                        .to_string(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let created = body_json(response).await;
        let id = created["id"].as_str().unwrap().to_string();
        assert_eq!(created["temperature_f"], json!(77.0));

        // List
        let response = app
            .clone()
            .oneshot(
                authed(Request::get("/api/forecasts"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let listed = body_json(response).await;
        assert_eq!(listed.as_array().unwrap().len(), 1);

        // Get
        let response = app
            .clone()
            .oneshot(
                authed(Request::get(format!("/api/forecasts/{id}")))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let fetched = body_json(response).await;
        assert_eq!(fetched["summary"], json!("Sunny"));

        // Update
        let response = app
            .clone()
            .oneshot(
                authed(Request::put(format!("/api/forecasts/{id}")))
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(json!({ "temperature_c": 0 }).to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let updated = body_json(response).await;
        assert_eq!(updated["temperature_c"], json!(0));
        assert_eq!(updated["temperature_f"], json!(32.0));
        assert_eq!(updated["summary"], json!("Sunny"));

        // Delete
        let response = app
            .clone()
            .oneshot(
                authed(Request::delete(format!("/api/forecasts/{id}")))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        // Gone
        let response = app
            .oneshot(
                authed(Request::get(format!("/api/forecasts/{id}")))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_unknown_id_is_not_found() {
        let app = test_app().await;

        let response = app
            .oneshot(
                authed(Request::get(format!(
                    "/api/forecasts/{}",
                    uuid::Uuid::new_v4()
                )))
                .body(Body::empty())
                .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_unmatched_path_is_a_plain_404() {
        let app = test_app().await;

        // No token: the fallback must not sit behind the bearer check.
        let response = app
            .oneshot(
                Request::get("/api/no-such-route")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_docs_served_when_enabled() {
        let app = test_app().await;

        let response = app
            .clone()
            .oneshot(Request::get("/docs").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(Request::get("/docs/openapi.json").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let doc = body_json(response).await;
        assert_eq!(doc["openapi"], json!("3.0.3"));
    }

    #[tokio::test]
    async fn test_docs_absent_when_disabled() {
        let config = Config {
            database_url: None,
            api_token: TOKEN.to_string(),
            docs_enabled: false,
            request_timeout_seconds: 10,
        };
        let state = AppState::new(&config).await.unwrap();
        let app = create_app(state);

        let response = app
            .clone()
            .oneshot(Request::get("/docs").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        // The API itself is unaffected.
        let response = app
            .oneshot(
                authed(Request::get("/api/forecasts"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_forwarded_http_is_redirected() {
        let app = test_app().await;

        let response = app
            .oneshot(
                Request::get("/health")
                    .header("x-forwarded-proto", "http")
                    .header(header::HOST, "forecasts.example.com")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::PERMANENT_REDIRECT);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "https://forecasts.example.com/health"
        );
    }

    #[tokio::test]
    async fn test_malformed_create_body_is_a_client_error() {
        let app = test_app().await;

        let response = app
            .oneshot(
                authed(Request::post("/api/forecasts"))
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"date": "not-a-date"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert!(response.status().is_client_error());
    }

    #[tokio::test]
    async fn test_preflight_succeeds_without_token() {
        let app = test_app().await;

        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::OPTIONS)
                    .uri("/api/forecasts")
                    .header(header::ORIGIN, "https://example.com")
                    .header("access-control-request-method", "POST")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
