//! Search, filter, sort and pagination over loaded records

use crate::model::{ComponentSpecMapping, ComponentSummary, SpecType};
use serde::Serialize;
use specref_units::Unit;
use std::cmp::Ordering;
use std::collections::HashSet;

pub const DEFAULT_PAGE_SIZE: usize = 50;
pub const MAX_PAGE_SIZE: usize = 10_000;

/// One page of results.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub data: Vec<T>,
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
}

impl<T: Clone> Page<&T> {
    /// Own the records of a page built over borrowed items.
    pub fn cloned(self) -> Page<T> {
        Page {
            data: self.data.into_iter().cloned().collect(),
            total: self.total,
            page: self.page,
            page_size: self.page_size,
            total_pages: self.total_pages,
        }
    }
}

/// Slice out page `page` (1-based). Out-of-range pages are empty.
pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> Page<T> {
    let page = page.max(1);
    let page_size = page_size.clamp(1, MAX_PAGE_SIZE);
    let total = items.len();
    let total_pages = total.div_ceil(page_size);

    let start = (page - 1).saturating_mul(page_size).min(total);
    let end = start.saturating_add(page_size).min(total);

    Page {
        data: items[start..end].to_vec(),
        total,
        page,
        page_size,
        total_pages,
    }
}

/// Case-insensitive substring match on name, alternate names, description and domain.
pub fn search_spec_types<'a>(query: &str, specs: Vec<&'a SpecType>) -> Vec<&'a SpecType> {
    let query = query.to_lowercase();
    if query.is_empty() {
        return specs;
    }
    specs
        .into_iter()
        .filter(|spec| {
            spec.primary_name.to_lowercase().contains(&query)
                || spec
                    .alternate_names
                    .iter()
                    .any(|name| name.to_lowercase().contains(&query))
                || spec.description.to_lowercase().contains(&query)
                || spec.domain.as_str().to_lowercase().contains(&query)
        })
        .collect()
}

/// `None`, empty or `ALL` keeps everything.
pub fn filter_by_domain<'a>(domain: Option<&str>, specs: Vec<&'a SpecType>) -> Vec<&'a SpecType> {
    match domain {
        None | Some("") | Some("ALL") => specs,
        Some(domain) => specs
            .into_iter()
            .filter(|spec| spec.domain.as_str() == domain)
            .collect(),
    }
}

/// `None`, empty or `ALL` keeps everything.
pub fn filter_by_value_type<'a>(
    value_type: Option<&str>,
    specs: Vec<&'a SpecType>,
) -> Vec<&'a SpecType> {
    match value_type {
        None | Some("") | Some("ALL") => specs,
        Some(value_type) => specs
            .into_iter()
            .filter(|spec| spec.value_type.as_str() == value_type)
            .collect(),
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortKey {
    #[default]
    PrimaryName,
    Id,
    Domain,
    ValueType,
    Description,
}

impl SortKey {
    /// Unknown keys fall back to `primaryName`.
    pub fn parse(s: &str) -> Self {
        match s {
            "id" => SortKey::Id,
            "domain" => SortKey::Domain,
            "valueType" => SortKey::ValueType,
            "description" => SortKey::Description,
            _ => SortKey::PrimaryName,
        }
    }

    fn key<'a>(&self, spec: &'a SpecType) -> &'a str {
        match self {
            SortKey::PrimaryName => &spec.primary_name,
            SortKey::Id => &spec.id,
            SortKey::Domain => spec.domain.as_str(),
            SortKey::ValueType => spec.value_type.as_str(),
            SortKey::Description => &spec.description,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn parse(s: &str) -> Self {
        if s.eq_ignore_ascii_case("desc") {
            SortOrder::Desc
        } else {
            SortOrder::Asc
        }
    }
}

/// Stable, case-insensitive sort.
pub fn sort_spec_types(specs: &mut [&SpecType], key: SortKey, order: SortOrder) {
    specs.sort_by(|a, b| {
        let ordering = compare_ignore_case(key.key(a), key.key(b));
        match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
}

fn compare_ignore_case(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

/// Parameters accepted by the spec type listing.
#[derive(Clone, Debug, Default)]
pub struct SpecQuery {
    pub query: Option<String>,
    pub domain: Option<String>,
    pub value_type: Option<String>,
    pub sort_by: SortKey,
    pub sort_order: SortOrder,
}

impl SpecQuery {
    pub fn apply<'a>(&self, specs: &'a [SpecType]) -> Vec<&'a SpecType> {
        let mut result: Vec<&SpecType> = specs.iter().collect();
        if let Some(query) = &self.query {
            result = search_spec_types(query, result);
        }
        result = filter_by_domain(self.domain.as_deref(), result);
        result = filter_by_value_type(self.value_type.as_deref(), result);
        sort_spec_types(&mut result, self.sort_by, self.sort_order);
        result
    }
}

/// Case-insensitive substring match on symbol, name and abbreviations.
pub fn search_units<'a>(query: &str, units: Vec<&'a Unit>) -> Vec<&'a Unit> {
    let query = query.to_lowercase();
    if query.is_empty() {
        return units;
    }
    units
        .into_iter()
        .filter(|unit| {
            unit.symbol.to_lowercase().contains(&query)
                || unit.name.to_lowercase().contains(&query)
                || unit
                    .abbreviations
                    .iter()
                    .any(|a| a.to_lowercase().contains(&query))
        })
        .collect()
}

pub fn filter_units_by_group<'a>(group_id: Option<&str>, units: Vec<&'a Unit>) -> Vec<&'a Unit> {
    match group_id {
        None | Some("") => units,
        Some(group_id) => units
            .into_iter()
            .filter(|unit| unit.unit_group_id == group_id)
            .collect(),
    }
}

/// Distinct components named by the mappings, sorted by name.
pub fn component_summaries(mappings: &[ComponentSpecMapping]) -> Vec<ComponentSummary> {
    let mut seen = HashSet::new();
    let mut components: Vec<ComponentSummary> = mappings
        .iter()
        .filter(|m| seen.insert(m.component_type_id.as_str()))
        .map(|m| ComponentSummary {
            id: m.component_type_id.clone(),
            name: m.component_type_name.clone(),
        })
        .collect();
    components.sort_by(|a, b| {
        compare_ignore_case(&a.name, &b.name).then_with(|| a.id.cmp(&b.id))
    });
    components
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ComponentSpecCategory, Domain, ValueType};

    fn spec(id: &str, name: &str, domain: Domain, value_type: ValueType) -> SpecType {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "primaryName": name,
            "alternateNames": [format!("{name} alt")],
            "description": format!("{name} description"),
            "domain": domain,
            "valueType": value_type,
        }))
        .unwrap()
    }

    fn specs() -> Vec<SpecType> {
        vec![
            spec("1", "Cooling Capacity", Domain::Hvac, ValueType::Numeric),
            spec("2", "airflow", Domain::Hvac, ValueType::Numeric),
            spec("3", "Voltage", Domain::Electrical, ValueType::Select),
            spec("4", "Pipe Material", Domain::Plumbing, ValueType::Select),
            spec("5", "Sprinkler Type", Domain::FireProtection, ValueType::MultiSelect),
        ]
    }

    #[test]
    fn test_paginate() {
        let items: Vec<u32> = (1..=7).collect();

        let page = paginate(&items, 1, 3);
        assert_eq!(page.data, vec![1, 2, 3]);
        assert_eq!(page.total, 7);
        assert_eq!(page.total_pages, 3);

        let page = paginate(&items, 3, 3);
        assert_eq!(page.data, vec![7]);

        let page = paginate(&items, 9, 3);
        assert!(page.data.is_empty());

        let page = paginate(&items, 0, 0);
        assert_eq!(page.page, 1);
        assert_eq!(page.page_size, 1);
        assert_eq!(page.data, vec![1]);

        let empty: Vec<u32> = Vec::new();
        assert_eq!(paginate(&empty, 1, 50).total_pages, 0);
    }

    #[test]
    fn test_paginate_borrowed_then_clone_page() {
        let names: Vec<String> = (1..=5).map(|i| format!("spec-{i}")).collect();
        let borrowed: Vec<&String> = names.iter().collect();

        let page = paginate(&borrowed, 2, 2).cloned();
        assert_eq!(page.data, vec!["spec-3".to_string(), "spec-4".to_string()]);
        assert_eq!(page.total, 5);
        assert_eq!(page.page, 2);
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn test_search_matches_alternate_names_and_domain() {
        let specs = specs();
        let all: Vec<&SpecType> = specs.iter().collect();

        let found = search_spec_types("VOLTAGE alt", all.clone());
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "3");

        let found = search_spec_types("fire_protection", all.clone());
        assert_eq!(found.len(), 1);

        assert_eq!(search_spec_types("", all).len(), 5);
    }

    #[test]
    fn test_filters() {
        let specs = specs();
        let all: Vec<&SpecType> = specs.iter().collect();

        assert_eq!(filter_by_domain(Some("HVAC"), all.clone()).len(), 2);
        assert_eq!(filter_by_domain(Some("ALL"), all.clone()).len(), 5);
        assert_eq!(filter_by_value_type(Some("SELECT"), all.clone()).len(), 2);
        assert_eq!(filter_by_value_type(None, all).len(), 5);
    }

    #[test]
    fn test_sort_is_case_insensitive() {
        let specs = specs();
        let query = SpecQuery::default();
        let names: Vec<&str> = query
            .apply(&specs)
            .iter()
            .map(|s| s.primary_name.as_str())
            .collect();
        assert_eq!(
            names,
            vec!["airflow", "Cooling Capacity", "Pipe Material", "Sprinkler Type", "Voltage"]
        );

        let query = SpecQuery {
            domain: Some("HVAC".into()),
            sort_order: SortOrder::parse("DESC"),
            ..Default::default()
        };
        let ids: Vec<&str> = query.apply(&specs).iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[test]
    fn test_component_summaries_are_unique_and_sorted() {
        let mapping = |id: &str, name: &str, spec: &str| ComponentSpecMapping {
            component_type_id: id.into(),
            component_type_name: name.into(),
            spec_type_id: spec.into(),
            spec_type_name: spec.into(),
            category: ComponentSpecCategory::PrimarySize,
            is_required: None,
            notes: None,
        };
        let summaries = component_summaries(&[
            mapping("c2", "Pump", "s1"),
            mapping("c1", "Chiller", "s1"),
            mapping("c2", "Pump", "s2"),
        ]);
        assert_eq!(
            summaries,
            vec![
                ComponentSummary { id: "c1".into(), name: "Chiller".into() },
                ComponentSummary { id: "c2".into(), name: "Pump".into() },
            ]
        );
    }
}
