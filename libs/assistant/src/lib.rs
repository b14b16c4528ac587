//! Natural-language conversion requests
//!
//! An [`EquationParser`] turns text such as "convert 150 tons to BTU/h" into a
//! value and two unit symbols. Two implementations ship here:
//!
//! - [`AnthropicParser`] asks a hosted language model.
//! - [`PatternParser`] matches a handful of fixed phrasings offline.
//!
//! [`build_parser`] picks one from [`AssistantSettings`].

#![forbid(unsafe_code)]

mod anthropic;
mod error;
mod parser;
mod pattern;

pub use anthropic::{
    AnthropicConfig, AnthropicParser, DEFAULT_BASE_URL, DEFAULT_MAX_TOKENS, DEFAULT_MODEL,
};
pub use error::{Error, Result};
pub use parser::{EquationParser, ParsedEquation};
pub use pattern::PatternParser;

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// Which parser backs the solve endpoint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// Anthropic when an API key is configured, otherwise the pattern parser.
    #[default]
    Auto,
    Anthropic,
    Pattern,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantSettings {
    pub provider: Provider,
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout_seconds: u64,
    pub max_tokens: u32,
}

impl Default for AssistantSettings {
    fn default() -> Self {
        Self {
            provider: Provider::Auto,
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_seconds: 30,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

impl AssistantSettings {
    fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|k| !k.trim().is_empty())
    }
}

/// Build the configured parser. An explicit `anthropic` provider without an
/// API key is an error.
pub fn build_parser(settings: &AssistantSettings) -> Result<Arc<dyn EquationParser>> {
    let use_anthropic = match settings.provider {
        Provider::Anthropic => true,
        Provider::Pattern => false,
        Provider::Auto => settings.api_key().is_some(),
    };

    if !use_anthropic {
        return Ok(Arc::new(PatternParser::new()));
    }

    let api_key = settings.api_key().ok_or(Error::MissingApiKey)?;
    let parser = AnthropicParser::new(AnthropicConfig {
        api_key: api_key.to_string(),
        model: settings.model.clone(),
        base_url: settings.base_url.clone(),
        max_tokens: settings.max_tokens,
        timeout: Duration::from_secs(settings.timeout_seconds),
    })?;
    Ok(Arc::new(parser))
}
