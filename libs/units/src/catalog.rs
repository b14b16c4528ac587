//! Immutable unit catalog
//!
//! Built once from loaded records, validated, then shared read-only by every
//! conversion. Equation strings are compiled at construction time so a
//! malformed equation is a load error rather than a per-request failure.

use crate::error::{CatalogError, ConversionError};
use crate::expr::{self, Expr};
use crate::model::{Unit, UnitGroup};
use std::collections::{HashMap, HashSet};

#[derive(Debug)]
pub(crate) struct CompiledGroup {
    pub(crate) group: UnitGroup,
    /// Parsed `conversions[i].equation`, index-aligned with `group.conversions`.
    pub(crate) expressions: Vec<Expr>,
}

#[derive(Debug)]
pub struct UnitCatalog {
    units: Vec<Unit>,
    unit_index: HashMap<String, usize>,
    groups: Vec<CompiledGroup>,
    group_index: HashMap<String, usize>,
}

impl UnitCatalog {
    /// Build a catalog from raw records.
    ///
    /// Raw groups sharing an id are merged first (see [`merge_groups`]).
    pub fn new(units: Vec<Unit>, groups: Vec<UnitGroup>) -> Result<Self, CatalogError> {
        let mut unit_index = HashMap::with_capacity(units.len());
        for (i, unit) in units.iter().enumerate() {
            if unit_index.insert(unit.id.clone(), i).is_some() {
                return Err(CatalogError::DuplicateUnit(unit.id.clone()));
            }
        }

        let merged = merge_groups(groups);
        let mut compiled = Vec::with_capacity(merged.len());
        let mut group_index = HashMap::with_capacity(merged.len());

        for group in merged {
            let mut expressions = Vec::with_capacity(group.conversions.len());
            for conversion in &group.conversions {
                for unit_id in [&conversion.from_unit_id, &conversion.to_unit_id] {
                    let Some(&idx) = unit_index.get(unit_id.as_str()) else {
                        return Err(CatalogError::UnknownUnitInEquation {
                            group_id: group.id.clone(),
                            equation_id: conversion.id.clone(),
                            unit_id: unit_id.clone(),
                        });
                    };
                    let unit: &Unit = &units[idx];
                    if unit.unit_group_id != group.id {
                        return Err(CatalogError::CrossGroupEquation {
                            group_id: group.id.clone(),
                            equation_id: conversion.id.clone(),
                            unit_id: unit_id.clone(),
                            unit_group_id: unit.unit_group_id.clone(),
                        });
                    }
                }

                let expr = expr::parse(&conversion.equation).map_err(|source| {
                    CatalogError::InvalidEquation {
                        equation_id: conversion.id.clone(),
                        equation: conversion.equation.clone(),
                        source,
                    }
                })?;

                if let Some(k) = expr.scale_factor() {
                    if (k - conversion.multiplier).abs() > 1e-9 * k.abs().max(1.0) {
                        tracing::warn!(
                            equation_id = %conversion.id,
                            equation = %conversion.equation,
                            multiplier = conversion.multiplier,
                            "Conversion multiplier disagrees with its scaling equation"
                        );
                    }
                }
                expressions.push(expr);
            }

            group_index.insert(group.id.clone(), compiled.len());
            compiled.push(CompiledGroup { group, expressions });
        }

        tracing::debug!(
            units = units.len(),
            unit_groups = compiled.len(),
            "Unit catalog built"
        );

        Ok(Self {
            units,
            unit_index,
            groups: compiled,
            group_index,
        })
    }

    pub fn unit(&self, id: &str) -> Option<&Unit> {
        self.unit_index.get(id).map(|&i| &self.units[i])
    }

    pub fn group(&self, id: &str) -> Option<&UnitGroup> {
        self.compiled_group(id).map(|g| &g.group)
    }

    pub(crate) fn compiled_group(&self, id: &str) -> Option<&CompiledGroup> {
        self.group_index.get(id).map(|&i| &self.groups[i])
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub fn groups(&self) -> impl Iterator<Item = &UnitGroup> + '_ {
        self.groups.iter().map(|g| &g.group)
    }

    pub fn units_in_group<'a>(&'a self, group_id: &'a str) -> impl Iterator<Item = &'a Unit> + 'a {
        self.units.iter().filter(move |u| u.unit_group_id == group_id)
    }

    /// Resolve free text to a unit by exact id, then symbol, then abbreviation.
    ///
    /// Absent and ambiguous matches both fail with `UnitNotFound`.
    pub fn resolve_symbol(&self, text: &str) -> Result<&Unit, ConversionError> {
        let text = text.trim();

        if let Some(unit) = self.unit(text) {
            return Ok(unit);
        }

        let by_symbol: Vec<&Unit> = self.units.iter().filter(|u| u.symbol == text).collect();
        match by_symbol.as_slice() {
            [unit] => return Ok(*unit),
            [] => {}
            _ => {
                return Err(ConversionError::UnitNotFound(format!(
                    "'{text}' is ambiguous ({} units share this symbol)",
                    by_symbol.len()
                )))
            }
        }

        let by_abbreviation: Vec<&Unit> = self
            .units
            .iter()
            .filter(|u| u.abbreviations.iter().any(|a| a == text))
            .collect();
        match by_abbreviation.as_slice() {
            [unit] => Ok(*unit),
            [] => Err(ConversionError::UnitNotFound(format!(
                "no unit matches '{text}'"
            ))),
            _ => Err(ConversionError::UnitNotFound(format!(
                "'{text}' is ambiguous ({} units share this abbreviation)",
                by_abbreviation.len()
            ))),
        }
    }
}

/// Merge raw group definitions that share an id.
///
/// Groups keep first-seen order. Conversions are concatenated in source order;
/// unit ids are unioned without duplicates, keeping first-seen order.
pub fn merge_groups(raw: Vec<UnitGroup>) -> Vec<UnitGroup> {
    let mut merged: Vec<UnitGroup> = Vec::with_capacity(raw.len());
    let mut index: HashMap<String, usize> = HashMap::new();

    for group in raw {
        match index.get(&group.id) {
            Some(&i) => {
                let existing = &mut merged[i];
                existing.conversions.extend(group.conversions);
                existing.unit_ids.extend(group.unit_ids);
            }
            None => {
                index.insert(group.id.clone(), merged.len());
                merged.push(group);
            }
        }
    }

    for group in &mut merged {
        let mut seen = HashSet::new();
        group.unit_ids.retain(|id| seen.insert(id.clone()));
    }

    merged
}
