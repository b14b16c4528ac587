//! Unit conversion by unit id

use crate::api::extractors::ApiJson;
use crate::error::Error;
use crate::metrics::record_conversion;
use crate::state::AppState;
use crate::Result;
use axum::{extract::State, Json};
use serde::Deserialize;
use specref_units::{ConversionResponse, Converter, InputValue};

pub const MISSING_CONVERT_FIELDS: &str = "Missing required fields: value, fromUnitId, toUnitId";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertRequest {
    pub value: Option<InputValue>,
    pub from_unit_id: Option<String>,
    pub to_unit_id: Option<String>,
}

fn present(field: Option<String>) -> Option<String> {
    field.filter(|s| !s.is_empty())
}

/// `POST /api/convert`
pub async fn convert(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<ConvertRequest>,
) -> Result<Json<ConversionResponse>> {
    let (Some(value), Some(from), Some(to)) = (
        req.value,
        present(req.from_unit_id),
        present(req.to_unit_id),
    ) else {
        return Err(Error::BadRequest(MISSING_CONVERT_FIELDS.to_string()));
    };

    let converter = Converter::new(&state.data.catalog);
    let result = converter.convert(value, &from, &to);
    record_conversion("convert", result.as_ref().map(|c| c.hops()));

    let conversion = result?;
    tracing::debug!(
        from = %from,
        to = %to,
        hops = conversion.hops(),
        "Converted value"
    );
    Ok(Json(conversion.to_response()))
}
