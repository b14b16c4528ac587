//! Reference data records

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Domain {
    Hvac,
    Electrical,
    Plumbing,
    FireProtection,
}

impl Domain {
    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::Hvac => "HVAC",
            Domain::Electrical => "ELECTRICAL",
            Domain::Plumbing => "PLUMBING",
            Domain::FireProtection => "FIRE_PROTECTION",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValueType {
    Numeric,
    Select,
    MultiSelect,
    Range,
    Boolean,
}

impl ValueType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueType::Numeric => "NUMERIC",
            ValueType::Select => "SELECT",
            ValueType::MultiSelect => "MULTI_SELECT",
            ValueType::Range => "RANGE",
            ValueType::Boolean => "BOOLEAN",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComponentSpecCategory {
    #[serde(rename = "PRIMARY_SIZE")]
    PrimarySize,
    #[serde(rename = "N/A")]
    NotApplicable,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecTypeValueMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_standard: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub common_use_cases: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// One option of a SELECT / MULTI_SELECT spec type.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecTypeValue {
    pub id: String,
    pub spec_type_id: String,
    pub primary_value: String,
    #[serde(default)]
    pub alternate_names: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<SpecTypeValueMetadata>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecType {
    pub id: String,
    pub primary_name: String,
    #[serde(default)]
    pub alternate_names: Vec<String>,
    /// Similar but semantically different concepts.
    #[serde(default)]
    pub not_names: Vec<String>,
    #[serde(default)]
    pub description: String,
    pub domain: Domain,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_unit_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_unit_group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_unit_group_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternate_units: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternate_unit_ids: Option<Vec<String>>,
    pub value_type: ValueType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_options: Option<Vec<SpecTypeValue>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_value: Option<f64>,
    #[serde(default)]
    pub allows_array: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub examples: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry_standards: Option<Vec<String>>,
}

/// Row of the component types CSV.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentType {
    pub id: String,
    pub name: String,
    pub description: String,
    pub parent_type_id: String,
    pub csi_code: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentSpecMapping {
    pub component_type_id: String,
    pub component_type_name: String,
    pub spec_type_id: String,
    pub spec_type_name: String,
    pub category: ComponentSpecCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_required: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Distinct component referenced by the mappings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ComponentSummary {
    pub id: String,
    pub name: String,
}
