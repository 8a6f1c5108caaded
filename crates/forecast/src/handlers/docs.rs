//! API documentation endpoints, mounted only when docs are enabled.

use axum::{response::Html, Json};
use serde_json::{json, Value};

/// Minimal documentation page pointing at the machine-readable document.
pub async fn docs_index() -> Html<&'static str> {
    Html(
        r#"<!DOCTYPE html>
<html>
<head><title>Forecast API</title></head>
<body>
  <h1>Forecast API</h1>
  <p>CRUD over daily forecasts. All <code>/api</code> routes require a bearer token.</p>
  <p>OpenAPI document: <a href="/docs/openapi.json">/docs/openapi.json</a></p>
</body>
</html>"#,
    )
}

/// OpenAPI 3 description of the forecast endpoints.
pub async fn openapi() -> Json<Value> {
    Json(json!({
        "openapi": "3.0.3",
        "info": {
            "title": "Forecast API",
            "version": "0.1.0",
            "description": "Single-resource CRUD API for daily forecasts"
        },
        "components": {
            "securitySchemes": {
                "bearer": { "type": "http", "scheme": "bearer" }
            },
            "schemas": {
                "Forecast": {
                    "type": "object",
                    "properties": {
                        "id": { "type": "string", "format": "uuid" },
                        "date": { "type": "string", "format": "date" },
                        "temperature_c": { "type": "integer" },
                        "temperature_f": { "type": "number" },
                        "summary": { "type": "string", "nullable": true },
                        "created_at": { "type": "string", "format": "date-time" },
                        "updated_at": { "type": "string", "format": "date-time" }
                    }
                },
                "CreateForecast": {
                    "type": "object",
                    "required": ["date", "temperature_c"],
                    "properties": {
                        "date": { "type": "string", "format": "date" },
                        "temperature_c": { "type": "integer" },
                        "summary": { "type": "string", "nullable": true }
                    }
                },
                "UpdateForecast": {
                    "type": "object",
                    "properties": {
                        "date": { "type": "string", "format": "date" },
                        "temperature_c": { "type": "integer" },
                        "summary": { "type": "string", "nullable": true }
                    }
                }
            }
        },
        "security": [{ "bearer": [] }],
        "paths": {
            "/api/forecasts": {
                "get": {
                    "summary": "List forecasts ordered by date",
                    "responses": {
                        "200": {
                            "description": "All stored forecasts",
                            "content": { "application/json": { "schema": {
                                "type": "array",
                                "items": { "$ref": "#/components/schemas/Forecast" }
                            }}}
                        }
                    }
                },
                "post": {
                    "summary": "Create a forecast",
                    "requestBody": {
                        "required": true,
                        "content": { "application/json": { "schema": {
                            "$ref": "#/components/schemas/CreateForecast"
                        }}}
                    },
                    "responses": {
                        "201": { "description": "Created forecast" }
                    }
                }
            },
            "/api/forecasts/{id}": {
                "parameters": [{
                    "name": "id",
                    "in": "path",
                    "required": true,
                    "schema": { "type": "string", "format": "uuid" }
                }],
                "get": {
                    "summary": "Fetch one forecast",
                    "responses": {
                        "200": { "description": "The forecast" },
                        "404": { "description": "Unknown id" }
                    }
                },
                "put": {
                    "summary": "Update a forecast",
                    "requestBody": {
                        "content": { "application/json": { "schema": {
                            "$ref": "#/components/schemas/UpdateForecast"
                        }}}
                    },
                    "responses": {
                        "200": { "description": "Updated forecast" },
                        "404": { "description": "Unknown id" }
                    }
                },
                "delete": {
                    "summary": "Delete a forecast",
                    "responses": {
                        "204": { "description": "Deleted" },
                        "404": { "description": "Unknown id" }
                    }
                }
            },
            "/health": {
                "get": {
                    "summary": "Liveness probe",
                    "security": [],
                    "responses": { "200": { "description": "Service is up" } }
                }
            }
        }
    }))
}
