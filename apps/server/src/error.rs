//! Error types for the HTTP API

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use specref_units::{ConversionError, ConversionErrorKind};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Missing or malformed request input, rejected before any conversion work.
    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Conversion(#[from] ConversionError),

    #[error(transparent)]
    Assistant(#[from] specref_assistant::Error),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    pub fn status(&self) -> StatusCode {
        match self {
            Error::BadRequest(_) => StatusCode::BAD_REQUEST,
            Error::Conversion(err) => conversion_status(err),
            Error::Assistant(err) if err.is_client_error() => StatusCode::BAD_REQUEST,
            Error::Assistant(specref_assistant::Error::MissingApiKey) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            Error::Assistant(_) => StatusCode::BAD_GATEWAY,
            Error::Internal(_) | Error::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// HTTP status for each conversion failure.
pub fn conversion_status(err: &ConversionError) -> StatusCode {
    match err.kind() {
        ConversionErrorKind::InvalidValue | ConversionErrorKind::IncompatibleUnits => {
            StatusCode::BAD_REQUEST
        }
        ConversionErrorKind::UnitNotFound
        | ConversionErrorKind::UnitGroupNotFound
        | ConversionErrorKind::NoConversionPath => StatusCode::NOT_FOUND,
        ConversionErrorKind::EquationEvaluation => StatusCode::UNPROCESSABLE_ENTITY,
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();

        let message = match &self {
            Error::Internal(_) | Error::Other(_) => {
                tracing::error!("Internal error: {}", self);
                "Internal server error".to_string()
            }
            Error::Assistant(err) if status.is_server_error() => {
                tracing::warn!(error = %err, "Assistant request failed");
                format!("Failed to solve equation: {err}")
            }
            _ => self.to_string(),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
