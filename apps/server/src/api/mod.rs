//! API layer - routes, handlers, and middleware

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod routes;

use crate::state::AppState;
use axum::{
    extract::{DefaultBodyLimit, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use serde_json::json;

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    let max_body_size = state.config.server.max_request_body_size;
    let cors_origins = state.config.server.cors_origins.clone();

    Router::new()
        .route("/health", get(health_check))
        .route("/", get(root))
        .route("/favicon.ico", get(favicon))
        .merge(routes::metrics_routes())
        .nest("/api", routes::api_routes())
        .fallback(not_found)
        .with_state(state)
        // Applied in reverse order: the body limit runs first.
        .layer(axum::middleware::from_fn(
            middleware::security_headers_middleware,
        ))
        .layer(axum::middleware::from_fn(middleware::request_id_middleware))
        .layer(axum::middleware::from_fn(middleware::metrics_middleware))
        .layer(middleware::compression())
        .layer(middleware::cors(&cors_origins))
        .layer(DefaultBodyLimit::max(max_body_size))
}

async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "specref-server",
        "units": state.data.catalog.units().len(),
    }))
}

async fn root(State(state): State<AppState>) -> impl IntoResponse {
    let data = &state.data;
    (
        StatusCode::OK,
        Json(json!({
            "server": "specref",
            "version": env!("CARGO_PKG_VERSION"),
            "status": "running",
            "parser": state.parser.name(),
            "data": {
                "specTypes": data.spec_types.len(),
                "units": data.catalog.units().len(),
                "unitGroups": data.catalog.groups().count(),
                "componentTypes": data.component_types.len(),
                "mappings": data.mappings.len(),
            },
            "endpoints": [
                "GET /api/specs",
                "GET /api/units",
                "GET /api/components",
                "POST /api/convert",
                "POST /api/solve",
            ],
        })),
    )
}

async fn favicon() -> impl IntoResponse {
    StatusCode::NO_CONTENT
}

async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Not found" })))
}
