//! Custom Axum extractors with JSON error bodies.

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;
use serde_json::json;

/// JSON request body.
///
/// Unlike `axum::Json`, rejections carry an `{"error": ...}` body, malformed
/// JSON is a 400 and a missing `Content-Type` is accepted.
pub struct ApiJson<T>(pub T);

pub struct ApiJsonRejection {
    status: StatusCode,
    message: String,
}

impl IntoResponse for ApiJsonRejection {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

fn is_json_content_type(value: Option<&str>) -> bool {
    let Some(value) = value else {
        return true;
    };
    let media_type = value.split(';').next().unwrap_or("").trim();
    media_type.eq_ignore_ascii_case("application/json")
        || media_type.to_ascii_lowercase().ends_with("+json")
}

#[async_trait]
impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiJsonRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok());
        if !is_json_content_type(content_type) {
            return Err(ApiJsonRejection {
                status: StatusCode::UNSUPPORTED_MEDIA_TYPE,
                message: "Expected a JSON request body".to_string(),
            });
        }

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiJsonRejection {
                status: e.status(),
                message: format!("Failed to read request body: {}", e.body_text()),
            })?;

        serde_json::from_slice(&bytes)
            .map(ApiJson)
            .map_err(|e| ApiJsonRejection {
                status: StatusCode::BAD_REQUEST,
                message: format!("Invalid JSON body: {e}"),
            })
    }
}
