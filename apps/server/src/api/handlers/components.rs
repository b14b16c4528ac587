//! Component listing

use crate::state::AppState;
use axum::{extract::State, Json};
use serde::Serialize;
use specref_data::{component_summaries, ComponentSummary};

#[derive(Debug, Serialize)]
pub struct ComponentList {
    pub data: Vec<ComponentSummary>,
    pub total: usize,
}

/// `GET /api/components`: distinct components referenced by the mappings.
pub async fn list_components(State(state): State<AppState>) -> Json<ComponentList> {
    let data = component_summaries(&state.data.mappings);
    Json(ComponentList {
        total: data.len(),
        data,
    })
}
