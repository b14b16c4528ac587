//! Offline parser for common phrasings

use crate::error::{Error, Result};
use crate::parser::{EquationParser, ParsedEquation};
use async_trait::async_trait;
use regex::Regex;
use specref_units::Unit;
use std::sync::OnceLock;

const NUMBER: &str = r"[-+]?(?:\d+\.?\d*|\.\d+)(?:[eE][-+]?\d+)?";

/// Recognizes `[convert] <value> <unit> (to|in|into|as|->|=>|=) <unit>` and
/// `how many <unit> (are )?in <value> <unit>`.
///
/// When the catalog is non-empty, a candidate whose units both resolve is
/// preferred over one that does not.
#[derive(Clone, Debug, Default)]
pub struct PatternParser;

impl PatternParser {
    pub fn new() -> Self {
        Self
    }

    fn candidates(text: &str) -> Vec<(f64, String, String)> {
        static CONVERT_RE: OnceLock<Regex> = OnceLock::new();
        static HOW_MANY_RE: OnceLock<Regex> = OnceLock::new();

        let convert_re = CONVERT_RE.get_or_init(|| {
            Regex::new(&format!(
                r"(?i)^(?:convert\s+|what\s+is\s+)?(?P<value>{NUMBER})\s*(?P<from>.+?)\s+(?:to|in|into|as|->|=>|=)\s+(?P<to>.+?)$"
            ))
            .expect("convert regex must compile")
        });
        let how_many_re = HOW_MANY_RE.get_or_init(|| {
            Regex::new(&format!(
                r"(?i)^how\s+many\s+(?P<to>.+?)\s+(?:are\s+)?in\s+(?P<value>{NUMBER})\s*(?P<from>.+?)$"
            ))
            .expect("how-many regex must compile")
        });

        let text = text.trim().trim_end_matches(['?', '.', '!']).trim();
        let mut found = Vec::new();

        for re in [convert_re, how_many_re] {
            let Some(caps) = re.captures(text) else {
                continue;
            };
            let (Some(value), Some(from), Some(to)) =
                (caps.name("value"), caps.name("from"), caps.name("to"))
            else {
                continue;
            };
            let Ok(value) = value.as_str().parse::<f64>() else {
                continue;
            };
            found.push((value, from.as_str().trim().to_string(), to.as_str().trim().to_string()));
        }

        found
    }
}

fn known(units: &[Unit], text: &str) -> bool {
    units.iter().any(|u| u.matches_symbol(text))
}

#[async_trait]
impl EquationParser for PatternParser {
    async fn parse(&self, text: &str, units: &[Unit]) -> Result<ParsedEquation> {
        let candidates = Self::candidates(text);

        let chosen = candidates
            .iter()
            .find(|(_, from, to)| known(units, from) && known(units, to))
            .or_else(|| candidates.first())
            .ok_or_else(|| {
                Error::Unparseable(format!(
                    "Could not read '{text}' as a conversion; try \"convert 10 m to ft\""
                ))
            })?;

        if !chosen.0.is_finite() {
            return Err(Error::Unparseable("Invalid numeric value".to_string()));
        }

        Ok(ParsedEquation {
            value: chosen.0,
            from_unit: chosen.1.clone(),
            to_unit: chosen.2.clone(),
        })
    }

    fn name(&self) -> &'static str {
        "pattern"
    }
}
