//! Natural-language conversion

use crate::api::extractors::ApiJson;
use crate::error::Error;
use crate::metrics::{record_conversion, ASSISTANT_REQUESTS_TOTAL};
use crate::state::AppState;
use crate::Result;
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use specref_assistant::ParsedEquation;
use specref_units::{ConversionResponse, Converter};

#[derive(Debug, Deserialize)]
pub struct SolveRequest {
    pub equation: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SolveResponse {
    pub original_equation: String,
    pub parsed: ParsedEquation,
    pub result: ConversionResponse,
}

/// `POST /api/solve`: parse free text, then convert through the path engine.
pub async fn solve(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<SolveRequest>,
) -> Result<Json<SolveResponse>> {
    let Some(equation) = req.equation.filter(|e| !e.trim().is_empty()) else {
        return Err(Error::BadRequest("Missing equation field".to_string()));
    };

    let catalog = &state.data.catalog;
    let parser_name = state.parser.name();
    let parsed = match state.parser.parse(&equation, catalog.units()).await {
        Ok(parsed) => parsed,
        Err(e) => {
            ASSISTANT_REQUESTS_TOTAL
                .with_label_values(&[parser_name, "error"])
                .inc();
            return Err(e.into());
        }
    };
    ASSISTANT_REQUESTS_TOTAL
        .with_label_values(&[parser_name, "ok"])
        .inc();

    let converter = Converter::new(catalog);
    let result = converter.convert_symbols(parsed.value, &parsed.from_unit, &parsed.to_unit);
    record_conversion("solve", result.as_ref().map(|c| c.hops()));
    let conversion = result?;

    Ok(Json(SolveResponse {
        original_equation: equation,
        result: conversion.to_response(),
        parsed,
    }))
}
