//! POST /api/solve

mod support;

use approx::assert_relative_eq;
use async_trait::async_trait;
use axum::http::StatusCode;
use serde_json::json;
use specref_assistant::{EquationParser, Error as AssistantError, ParsedEquation};
use specref_units::Unit;
use std::sync::Arc;
use support::{assert_error_contains, assert_status, TestApp};

/// Returns a fixed reply regardless of input.
struct CannedParser(fn() -> specref_assistant::Result<ParsedEquation>);

#[async_trait]
impl EquationParser for CannedParser {
    async fn parse(&self, _text: &str, _units: &[Unit]) -> specref_assistant::Result<ParsedEquation> {
        (self.0)()
    }

    fn name(&self) -> &'static str {
        "canned"
    }
}

#[tokio::test]
async fn pattern_phrasing_is_converted() -> anyhow::Result<()> {
    let app = TestApp::new()?;

    let (status, body) = app
        .post_json("/api/solve", json!({ "equation": "convert 2 tons to BTU/h" }))
        .await?;
    assert_status(status, StatusCode::OK, "solve");

    assert_eq!(body["originalEquation"], "convert 2 tons to BTU/h");
    assert_eq!(body["parsed"]["value"], 2.0);
    assert_eq!(body["parsed"]["fromUnit"], "tons");
    assert_relative_eq!(
        body["result"]["toValue"].as_f64().unwrap_or_default(),
        24000.0,
        epsilon = 1e-9
    );
    assert_eq!(body["result"]["toUnit"], "BTU/h");
    Ok(())
}

#[tokio::test]
async fn how_many_phrasing_uses_multi_hop_paths() -> anyhow::Result<()> {
    let app = TestApp::new()?;

    let (status, body) = app
        .post_json("/api/solve", json!({ "equation": "How many inches are in 2 m?" }))
        .await?;
    assert_status(status, StatusCode::OK, "how many");
    assert_relative_eq!(
        body["result"]["toValue"].as_f64().unwrap_or_default(),
        78.74016,
        epsilon = 1e-9
    );
    Ok(())
}

#[tokio::test]
async fn missing_or_blank_equation() -> anyhow::Result<()> {
    let app = TestApp::new()?;

    for body in [json!({}), json!({ "equation": "   " })] {
        let (status, response) = app.post_json("/api/solve", body).await?;
        assert_status(status, StatusCode::BAD_REQUEST, "missing equation");
        assert_eq!(response["error"], "Missing equation field");
    }
    Ok(())
}

#[tokio::test]
async fn unparseable_text_is_a_client_error() -> anyhow::Result<()> {
    let app = TestApp::new()?;

    let (status, _) = app
        .post_json("/api/solve", json!({ "equation": "what's the weather like" }))
        .await?;
    assert_status(status, StatusCode::BAD_REQUEST, "free text");
    Ok(())
}

#[tokio::test]
async fn unknown_symbol_is_not_found() -> anyhow::Result<()> {
    let app = TestApp::new()?;

    let (status, body) = app
        .post_json("/api/solve", json!({ "equation": "convert 3 furlongs to m" }))
        .await?;
    assert_status(status, StatusCode::NOT_FOUND, "unknown symbol");
    assert_error_contains(&body, "furlongs");
    Ok(())
}

#[tokio::test]
async fn upstream_failure_is_bad_gateway() -> anyhow::Result<()> {
    let app = TestApp::with_parser(Arc::new(CannedParser(|| {
        Err(AssistantError::Api {
            status: 529,
            message: "overloaded".to_string(),
        })
    })))?;

    let (status, body) = app
        .post_json("/api/solve", json!({ "equation": "10 m to ft" }))
        .await?;
    assert_status(status, StatusCode::BAD_GATEWAY, "upstream error");
    assert_error_contains(&body, "Failed to solve equation");
    Ok(())
}

#[tokio::test]
async fn missing_api_key_is_unavailable() -> anyhow::Result<()> {
    let app = TestApp::with_parser(Arc::new(CannedParser(|| Err(AssistantError::MissingApiKey))))?;

    let (status, _) = app
        .post_json("/api/solve", json!({ "equation": "10 m to ft" }))
        .await?;
    assert_status(status, StatusCode::SERVICE_UNAVAILABLE, "no key");
    Ok(())
}

#[tokio::test]
async fn parsed_units_are_resolved_by_symbol() -> anyhow::Result<()> {
    let app = TestApp::with_parser(Arc::new(CannedParser(|| {
        Ok(ParsedEquation {
            value: 100.0,
            from_unit: "°C".to_string(),
            to_unit: "degF".to_string(),
        })
    })))?;

    let (status, body) = app
        .post_json("/api/solve", json!({ "equation": "boiling point in fahrenheit" }))
        .await?;
    assert_status(status, StatusCode::OK, "canned parse");
    assert_relative_eq!(
        body["result"]["toValue"].as_f64().unwrap_or_default(),
        212.0,
        epsilon = 1e-9
    );
    assert_eq!(body["result"]["description"], "Reverse: Fahrenheit to Celsius");
    Ok(())
}
