//! Route table

use crate::api::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

/// Reference data and conversion endpoints, mounted under `/api`.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/specs", get(handlers::list_specs))
        .route("/units", get(handlers::list_units))
        .route("/components", get(handlers::list_components))
        .route("/convert", post(handlers::convert))
        .route("/solve", post(handlers::solve))
}

pub fn metrics_routes() -> Router<AppState> {
    Router::new().route("/metrics", get(handlers::metrics_handler))
}
