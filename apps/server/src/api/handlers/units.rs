//! Unit listing

use crate::state::AppState;
use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use specref_data::{filter_units_by_group, paginate, search_units, Page};
use specref_units::{Unit, UnitGroup};

use super::page_params;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListUnitsQuery {
    pub page: Option<String>,
    pub page_size: Option<String>,
    pub query: Option<String>,
    pub unit_group_id: Option<String>,
}

/// A page of units plus every unit group, for the group picker.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitsPage {
    #[serde(flatten)]
    pub page: Page<Unit>,
    pub unit_groups: Vec<UnitGroup>,
}

/// `GET /api/units`
pub async fn list_units(
    State(state): State<AppState>,
    Query(q): Query<ListUnitsQuery>,
) -> Json<UnitsPage> {
    let (page, page_size) = page_params(q.page.as_deref(), q.page_size.as_deref());
    let catalog = &state.data.catalog;

    let mut units: Vec<&Unit> = catalog.units().iter().collect();
    if let Some(query) = q.query.as_deref() {
        units = search_units(query, units);
    }
    units = filter_units_by_group(q.unit_group_id.as_deref(), units);

    Json(UnitsPage {
        page: paginate(&units, page, page_size).cloned(),
        unit_groups: catalog.groups().cloned().collect(),
    })
}
