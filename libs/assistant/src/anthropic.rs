//! Anthropic Messages API parser

use crate::error::{Error, Result};
use crate::parser::{parse_reply, EquationParser, ParsedEquation};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use specref_units::Unit;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";
pub const DEFAULT_MAX_TOKENS: u32 = 1024;
const API_VERSION: &str = "2023-06-01";

/// Units listed in the prompt.
const PROMPT_UNIT_LIMIT: usize = 100;

/// Connection settings for [`AnthropicParser`].
#[derive(Clone, Debug)]
pub struct AnthropicConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub max_tokens: u32,
    pub timeout: Duration,
}

impl AnthropicConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout: Duration::from_secs(30),
        }
    }
}

/// Asks a hosted language model to pull value and units out of the text.
pub struct AnthropicParser {
    client: Client,
    config: AnthropicConfig,
}

impl AnthropicParser {
    pub fn new(config: AnthropicConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(Error::MissingApiKey);
        }
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: [Message; 1],
}

#[derive(Serialize)]
struct Message {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PromptUnit<'a> {
    symbol: &'a str,
    name: &'a str,
    abbreviations: &'a [String],
    unit_group_id: &'a str,
}

fn build_prompt(text: &str, units: &[Unit]) -> Result<String> {
    let listed: Vec<PromptUnit<'_>> = units
        .iter()
        .take(PROMPT_UNIT_LIMIT)
        .map(|u| PromptUnit {
            symbol: &u.symbol,
            name: &u.name,
            abbreviations: &u.abbreviations,
            unit_group_id: &u.unit_group_id,
        })
        .collect();
    let more = if units.len() > PROMPT_UNIT_LIMIT {
        " ... (and more)"
    } else {
        ""
    };

    Ok(format!(
        r#"You are a unit conversion equation parser. Parse the following natural language equation and extract:
1. The numeric value
2. The source unit (match it to one of the available units by symbol or abbreviation)
3. The target unit (match it to one of the available units by symbol or abbreviation)

Available units: {units}{more}

Equation: "{text}"

Respond ONLY with a JSON object in this exact format:
{{
  "value": <number>,
  "fromUnit": "<unit symbol>",
  "toUnit": "<unit symbol>"
}}

If you cannot parse the equation, respond with:
{{
  "error": "description of why it cannot be parsed"
}}"#,
        units = serde_json::to_string(&listed)?,
    ))
}

#[async_trait]
impl EquationParser for AnthropicParser {
    async fn parse(&self, text: &str, units: &[Unit]) -> Result<ParsedEquation> {
        let request = MessagesRequest {
            model: &self.config.model,
            max_tokens: self.config.max_tokens,
            messages: [Message {
                role: "user",
                content: build_prompt(text, units)?,
            }],
        };

        let url = format!("{}/v1/messages", self.config.base_url.trim_end_matches('/'));
        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "Assistant API request failed");
            return Err(Error::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: MessagesResponse = response.json().await?;
        let reply = body
            .content
            .iter()
            .find(|block| block.kind == "text")
            .map(|block| block.text.as_str())
            .unwrap_or_default();

        tracing::debug!(model = %self.config.model, reply_len = reply.len(), "Assistant replied");
        parse_reply(reply)
    }

    fn name(&self) -> &'static str {
        "anthropic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(id: usize) -> Unit {
        Unit {
            id: format!("u{id}"),
            symbol: format!("s{id}"),
            name: format!("Unit {id}"),
            abbreviations: vec![format!("a{id}")],
            unit_group_id: "g".into(),
        }
    }

    #[test]
    fn test_prompt_lists_at_most_limit_units() {
        let units: Vec<Unit> = (0..150).map(unit).collect();
        let prompt = build_prompt("convert 1 s0 to s1", &units).unwrap();

        assert!(prompt.contains(r#""symbol":"s99""#));
        assert!(!prompt.contains(r#""symbol":"s100""#));
        assert!(prompt.contains("(and more)"));
        assert!(prompt.contains(r#""unitGroupId":"g""#));
        assert!(prompt.contains(r#"Equation: "convert 1 s0 to s1""#));
    }

    #[test]
    fn test_short_catalog_has_no_ellipsis() {
        let units: Vec<Unit> = (0..3).map(unit).collect();
        let prompt = build_prompt("x", &units).unwrap();
        assert!(!prompt.contains("(and more)"));
    }

    #[test]
    fn test_missing_api_key() {
        let err = AnthropicParser::new(AnthropicConfig::new("  ")).err().unwrap();
        assert!(matches!(err, Error::MissingApiKey));
    }

    #[test]
    fn test_response_text_block() {
        let body: MessagesResponse = serde_json::from_str(
            r#"{"id":"msg_1","content":[{"type":"text","text":"{\"value\":1}"}],"stop_reason":"end_turn"}"#,
        )
        .unwrap();
        assert_eq!(body.content[0].kind, "text");
        assert_eq!(body.content[0].text, r#"{"value":1}"#);
    }
}
