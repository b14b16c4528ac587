//! Spec type listing

use crate::state::AppState;
use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use specref_data::{paginate, Page, SortKey, SortOrder, SpecQuery, SpecType};

use super::page_params;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListSpecsQuery {
    pub page: Option<String>,
    pub page_size: Option<String>,
    pub query: Option<String>,
    pub domain: Option<String>,
    pub value_type: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

/// `GET /api/specs`
pub async fn list_specs(
    State(state): State<AppState>,
    Query(q): Query<ListSpecsQuery>,
) -> Json<Page<SpecType>> {
    let (page, page_size) = page_params(q.page.as_deref(), q.page_size.as_deref());

    let spec_query = SpecQuery {
        query: q.query,
        domain: q.domain,
        value_type: q.value_type,
        sort_by: q.sort_by.as_deref().map(SortKey::parse).unwrap_or_default(),
        sort_order: q
            .sort_order
            .as_deref()
            .map(SortOrder::parse)
            .unwrap_or_default(),
    };

    let matched = spec_query.apply(&state.data.spec_types);

    Json(paginate(&matched, page, page_size).cloned())
}
