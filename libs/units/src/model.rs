//! Catalog records: units, unit groups and conversion equations

use serde::{Deserialize, Serialize};

/// A unit of measure within one [`UnitGroup`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Unit {
    pub id: String,
    pub symbol: String,
    pub name: String,
    /// Textual forms recognized when matching free-text input.
    #[serde(default)]
    pub abbreviations: Vec<String>,
    pub unit_group_id: String,
}

impl Unit {
    /// True when `text` is this unit's symbol or one of its abbreviations.
    pub fn matches_symbol(&self, text: &str) -> bool {
        self.symbol == text || self.abbreviations.iter().any(|a| a == text)
    }
}

/// A dimensional category (length, pressure, flow rate, ...).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitGroup {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_unit_id: Option<String>,
    #[serde(default)]
    pub unit_ids: Vec<String>,
    #[serde(default)]
    pub conversions: Vec<ConversionEquation>,
}

/// One directed conversion edge.
///
/// Evaluating `equation` with `x` bound to a value in `from_unit_id` yields
/// the same quantity expressed in `to_unit_id`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionEquation {
    pub id: String,
    pub from_unit_id: String,
    pub to_unit_id: String,
    pub multiplier: f64,
    pub equation: String,
    #[serde(default)]
    pub description: String,
}

/// Direction in which a [`ConversionEquation`] is traversed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Forward,
    Reverse,
}

impl Direction {
    pub fn is_reverse(self) -> bool {
        matches!(self, Direction::Reverse)
    }
}

/// One hop of a conversion path.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConversionStep<'a> {
    pub equation: &'a ConversionEquation,
    pub direction: Direction,
    /// Position of `equation` in its group's conversion list.
    pub index: usize,
}

impl<'a> ConversionStep<'a> {
    /// Unit id the hop starts from.
    pub fn source_unit_id(&self) -> &'a str {
        match self.direction {
            Direction::Forward => &self.equation.from_unit_id,
            Direction::Reverse => &self.equation.to_unit_id,
        }
    }

    /// Unit id the hop arrives at.
    pub fn target_unit_id(&self) -> &'a str {
        match self.direction {
            Direction::Forward => &self.equation.to_unit_id,
            Direction::Reverse => &self.equation.from_unit_id,
        }
    }
}
