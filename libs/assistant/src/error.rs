//! Error types for the natural-language front end

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// The request text could not be read as a conversion.
    #[error("{0}")]
    Unparseable(String),

    #[error("Assistant API key is not configured")]
    MissingApiKey,

    #[error("Assistant API returned status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// True for failures caused by the input text rather than the upstream service.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Error::Unparseable(_))
    }
}
