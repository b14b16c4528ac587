//! Conversion path engine
//!
//! A unit group's conversions form an undirected graph: each equation can be
//! walked forward (evaluate as written) or in reverse (evaluate its algebraic
//! inverse). Breadth-first search finds a minimum-hop path, then the value is
//! pushed through every hop in order.

use crate::catalog::UnitCatalog;
use crate::error::{ConversionError, Result};
use crate::model::{ConversionStep, Direction, Unit, UnitGroup};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet, VecDeque};

/// A request value: either a number or text that must parse to one.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InputValue {
    Number(f64),
    Text(String),
}

impl InputValue {
    /// Parse to a finite number.
    pub fn to_finite(&self) -> Result<f64> {
        let value = match self {
            InputValue::Number(n) => *n,
            InputValue::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| ConversionError::InvalidValue(format!("'{s}' is not a number")))?,
        };
        if value.is_finite() {
            Ok(value)
        } else {
            Err(ConversionError::InvalidValue(format!("{value} is not finite")))
        }
    }
}

impl From<f64> for InputValue {
    fn from(value: f64) -> Self {
        InputValue::Number(value)
    }
}

impl From<i32> for InputValue {
    fn from(value: i32) -> Self {
        InputValue::Number(value.into())
    }
}

impl From<&str> for InputValue {
    fn from(value: &str) -> Self {
        InputValue::Text(value.to_string())
    }
}

impl From<String> for InputValue {
    fn from(value: String) -> Self {
        InputValue::Text(value)
    }
}

/// Outcome of a successful conversion.
#[derive(Clone, Debug)]
pub struct Conversion<'a> {
    pub from_value: f64,
    pub to_value: f64,
    pub from_unit: &'a Unit,
    pub to_unit: &'a Unit,
    pub steps: Vec<ConversionStep<'a>>,
    /// Rendered expression applied at each hop, in path order.
    pub equation_trail: Vec<String>,
    pub equation: String,
    pub description: String,
}

impl Conversion<'_> {
    pub fn hops(&self) -> usize {
        self.steps.len()
    }

    pub fn to_response(&self) -> ConversionResponse {
        ConversionResponse {
            from_value: self.from_value,
            from_unit: self.from_unit.symbol.clone(),
            from_unit_name: self.from_unit.name.clone(),
            to_value: self.to_value,
            to_unit: self.to_unit.symbol.clone(),
            to_unit_name: self.to_unit.name.clone(),
            equation: self.equation.clone(),
            description: self.description.clone(),
        }
    }
}

/// Wire form of a [`Conversion`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionResponse {
    pub from_value: f64,
    pub from_unit: String,
    pub from_unit_name: String,
    pub to_value: f64,
    pub to_unit: String,
    pub to_unit_name: String,
    pub equation: String,
    pub description: String,
}

pub struct Converter<'a> {
    catalog: &'a UnitCatalog,
}

impl<'a> Converter<'a> {
    pub fn new(catalog: &'a UnitCatalog) -> Self {
        Self { catalog }
    }

    /// Convert `value` from one unit id to another.
    ///
    /// Checks run in a fixed order and the first failure wins: value, unit
    /// lookup, group compatibility, group lookup, path search, evaluation.
    pub fn convert(
        &self,
        value: impl Into<InputValue>,
        from_unit_id: &str,
        to_unit_id: &str,
    ) -> Result<Conversion<'a>> {
        let from_value = value.into().to_finite()?;

        let from_unit = self.lookup_unit(from_unit_id)?;
        let to_unit = self.lookup_unit(to_unit_id)?;
        self.convert_units(from_value, from_unit, to_unit)
    }

    /// Same as [`Converter::convert`] but resolves units by symbol or abbreviation.
    pub fn convert_symbols(
        &self,
        value: impl Into<InputValue>,
        from_symbol: &str,
        to_symbol: &str,
    ) -> Result<Conversion<'a>> {
        let from_value = value.into().to_finite()?;

        let from_unit = self.catalog.resolve_symbol(from_symbol)?;
        let to_unit = self.catalog.resolve_symbol(to_symbol)?;
        self.convert_units(from_value, from_unit, to_unit)
    }

    /// Minimum-hop path between two unit ids, without evaluating it.
    pub fn path(&self, from_unit_id: &str, to_unit_id: &str) -> Result<Vec<ConversionStep<'a>>> {
        let from_unit = self.lookup_unit(from_unit_id)?;
        let to_unit = self.lookup_unit(to_unit_id)?;
        let group = self.shared_group(from_unit, to_unit)?;
        find_path(group, &from_unit.id, &to_unit.id).ok_or_else(|| no_path(from_unit, to_unit))
    }

    fn lookup_unit(&self, id: &str) -> Result<&'a Unit> {
        self.catalog
            .unit(id)
            .ok_or_else(|| ConversionError::UnitNotFound(id.to_string()))
    }

    fn shared_group(&self, from_unit: &Unit, to_unit: &Unit) -> Result<&'a UnitGroup> {
        if from_unit.unit_group_id != to_unit.unit_group_id {
            return Err(ConversionError::IncompatibleUnits {
                from: from_unit.id.clone(),
                to: to_unit.id.clone(),
                from_group: from_unit.unit_group_id.clone(),
                to_group: to_unit.unit_group_id.clone(),
            });
        }
        self.catalog
            .group(&from_unit.unit_group_id)
            .ok_or_else(|| ConversionError::UnitGroupNotFound(from_unit.unit_group_id.clone()))
    }

    fn convert_units(
        &self,
        from_value: f64,
        from_unit: &'a Unit,
        to_unit: &'a Unit,
    ) -> Result<Conversion<'a>> {
        let group = self.shared_group(from_unit, to_unit)?;

        if from_unit.id == to_unit.id {
            return Ok(Conversion {
                from_value,
                to_value: from_value,
                from_unit,
                to_unit,
                steps: Vec::new(),
                equation_trail: Vec::new(),
                equation: "x".to_string(),
                description: "Identity".to_string(),
            });
        }

        let steps = find_path(group, &from_unit.id, &to_unit.id)
            .ok_or_else(|| no_path(from_unit, to_unit))?;

        let compiled = self
            .catalog
            .compiled_group(&group.id)
            .ok_or_else(|| ConversionError::UnitGroupNotFound(group.id.clone()))?;

        let mut value = from_value;
        let mut equation_trail = Vec::with_capacity(steps.len());
        for step in &steps {
            let expr = &compiled.expressions[step.index];
            let evaluation_error = |source| ConversionError::EquationEvaluation {
                equation_id: step.equation.id.clone(),
                source,
            };

            match step.direction {
                Direction::Forward => {
                    value = expr.eval(value).map_err(evaluation_error)?;
                    equation_trail.push(step.equation.equation.clone());
                }
                Direction::Reverse => {
                    let inverse = expr.invert().map_err(evaluation_error)?;
                    value = inverse.eval(value).map_err(evaluation_error)?;
                    equation_trail.push(inverse.to_string());
                }
            }
        }

        let equation = equation_trail.join(" then ");
        let description = describe(&steps);

        tracing::debug!(
            from = %from_unit.id,
            to = %to_unit.id,
            hops = steps.len(),
            from_value,
            to_value = value,
            "Converted value"
        );

        Ok(Conversion {
            from_value,
            to_value: value,
            from_unit,
            to_unit,
            steps,
            equation_trail,
            equation,
            description,
        })
    }
}

fn no_path(from_unit: &Unit, to_unit: &Unit) -> ConversionError {
    ConversionError::NoConversionPath {
        from: from_unit.id.clone(),
        to: to_unit.id.clone(),
    }
}

fn describe(steps: &[ConversionStep<'_>]) -> String {
    match steps {
        [] => "Identity".to_string(),
        [step] if step.direction.is_reverse() => {
            format!("Reverse: {}", step.equation.description)
        }
        [step] => step.equation.description.clone(),
        _ => format!(
            "Multi-step: {}",
            steps
                .iter()
                .map(|s| s.equation.description.as_str())
                .collect::<Vec<_>>()
                .join(" → ")
        ),
    }
}

/// Breadth-first search for a minimum-hop path inside one group.
///
/// Edges are enumerated in catalog order, forward before reverse for each
/// equation, so ties between equally short paths resolve the same way on
/// every call. Returns an empty path when `from == to`.
pub fn find_path<'g>(
    group: &'g UnitGroup,
    from: &'g str,
    to: &str,
) -> Option<Vec<ConversionStep<'g>>> {
    if from == to {
        return Some(Vec::new());
    }

    let mut graph: HashMap<&'g str, Vec<ConversionStep<'g>>> = HashMap::new();
    for (index, equation) in group.conversions.iter().enumerate() {
        graph
            .entry(equation.from_unit_id.as_str())
            .or_default()
            .push(ConversionStep {
                equation,
                direction: Direction::Forward,
                index,
            });
        graph
            .entry(equation.to_unit_id.as_str())
            .or_default()
            .push(ConversionStep {
                equation,
                direction: Direction::Reverse,
                index,
            });
    }

    let mut visited: HashSet<&'g str> = HashSet::from([from]);
    let mut parents: HashMap<&'g str, ConversionStep<'g>> = HashMap::new();
    let mut queue: VecDeque<&'g str> = VecDeque::from([from]);

    while let Some(unit_id) = queue.pop_front() {
        if unit_id == to {
            let mut path = Vec::new();
            let mut current = unit_id;
            while let Some(step) = parents.get(current) {
                path.push(*step);
                current = step.source_unit_id();
            }
            path.reverse();
            return Some(path);
        }

        for step in graph.get(unit_id).into_iter().flatten() {
            let next = step.target_unit_id();
            if visited.insert(next) {
                parents.insert(next, *step);
                queue.push_back(next);
            }
        }
    }

    None
}
