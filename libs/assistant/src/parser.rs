//! The parser seam and its shared result type

use crate::error::{Error, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use specref_units::{InputValue, Unit};

/// A conversion request extracted from free text.
///
/// `from_unit` and `to_unit` are symbols or abbreviations as written; they
/// are resolved against the catalog by the caller.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedEquation {
    pub value: f64,
    pub from_unit: String,
    pub to_unit: String,
}

/// Turns a phrase such as "convert 150 tons to BTU/h" into a [`ParsedEquation`].
#[async_trait]
pub trait EquationParser: Send + Sync {
    /// `units` is the catalog the answer should be matched against.
    async fn parse(&self, text: &str, units: &[Unit]) -> Result<ParsedEquation>;

    /// Short name used in logs and the service info endpoint.
    fn name(&self) -> &'static str;
}

/// Structured reply: either the triple or an explanation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Reply {
    value: Option<InputValue>,
    from_unit: Option<String>,
    to_unit: Option<String>,
    error: Option<String>,
}

/// Read the first `{...}` object out of `text` and validate it.
pub(crate) fn parse_reply(text: &str) -> Result<ParsedEquation> {
    let json = extract_json_object(text)
        .ok_or_else(|| Error::Unparseable("Failed to parse equation".to_string()))?;
    let reply: Reply = serde_json::from_str(json)?;

    if let Some(error) = reply.error {
        return Err(Error::Unparseable(error));
    }

    let value = reply
        .value
        .ok_or_else(|| Error::Unparseable("Reply is missing the value".to_string()))?
        .to_finite()
        .map_err(|_| Error::Unparseable("Invalid numeric value".to_string()))?;

    match (reply.from_unit, reply.to_unit) {
        (Some(from_unit), Some(to_unit)) if !from_unit.is_empty() && !to_unit.is_empty() => {
            Ok(ParsedEquation {
                value,
                from_unit,
                to_unit,
            })
        }
        _ => Err(Error::Unparseable("Reply is missing a unit".to_string())),
    }
}

/// Span from the first `{` to the last `}`.
fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_wrapped_in_prose() {
        let text = "Sure! Here it is:\n{\"value\": 150, \"fromUnit\": \"ton\", \"toUnit\": \"BTU/h\", \"operation\": \"convert\"}\nDone.";
        let parsed = parse_reply(text).unwrap();
        assert_eq!(
            parsed,
            ParsedEquation {
                value: 150.0,
                from_unit: "ton".into(),
                to_unit: "BTU/h".into(),
            }
        );
    }

    #[test]
    fn test_reply_value_as_string() {
        let parsed = parse_reply(r#"{"value": "2.5", "fromUnit": "m", "toUnit": "ft"}"#).unwrap();
        assert_eq!(parsed.value, 2.5);
    }

    #[test]
    fn test_reply_error_is_unparseable() {
        let err = parse_reply(r#"{"error": "no units mentioned"}"#).unwrap_err();
        assert!(matches!(err, Error::Unparseable(ref m) if m == "no units mentioned"));
        assert!(err.is_client_error());
    }

    #[test]
    fn test_reply_without_json() {
        let err = parse_reply("I cannot help with that").unwrap_err();
        assert!(matches!(err, Error::Unparseable(_)));
    }

    #[test]
    fn test_reply_with_bad_value() {
        let err = parse_reply(r#"{"value": "lots", "fromUnit": "m", "toUnit": "ft"}"#).unwrap_err();
        assert!(matches!(err, Error::Unparseable(ref m) if m == "Invalid numeric value"));

        let err = parse_reply(r#"{"value": 1, "fromUnit": "m"}"#).unwrap_err();
        assert!(matches!(err, Error::Unparseable(_)));
    }
}
