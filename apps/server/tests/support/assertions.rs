use axum::http::StatusCode;
use serde_json::Value;

pub fn assert_status(actual: StatusCode, expected: StatusCode, context: &str) {
    assert_eq!(actual, expected, "{context}: unexpected status {actual}");
}

/// Assert an `{"error": ...}` body whose message contains `fragment`.
pub fn assert_error_contains(body: &Value, fragment: &str) {
    let message = body
        .get("error")
        .and_then(|v| v.as_str())
        .unwrap_or_else(|| panic!("expected error body, got {body}"));
    assert!(
        message.contains(fragment),
        "expected error containing {fragment:?}, got {message:?}"
    );
}

pub fn ids(page: &Value) -> Vec<String> {
    page["data"]
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item["id"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}
