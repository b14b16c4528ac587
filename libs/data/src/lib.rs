//! Reference data for MEP specifications
//!
//! Loads spec types, units, component types and component/spec mappings from
//! a data directory and provides the search, filter and pagination helpers the
//! HTTP layer exposes.

#![forbid(unsafe_code)]

mod error;
mod loader;
mod model;
mod query;

pub use error::{Error, Result};
pub use loader::{
    load_component_spec_mappings, load_component_types, load_spec_types, load_unit_catalog,
    load_units, DataSources, DataStore, UnitsFile, DEFAULT_COMPONENT_TYPES_FILE,
    MAPPINGS_CHECKPOINT_FILE, MAPPINGS_FILE, SPEC_TYPES_FILE, UNITS_FILE,
};
pub use model::{
    ComponentSpecCategory, ComponentSpecMapping, ComponentSummary, ComponentType, Domain,
    SpecType, SpecTypeValue, SpecTypeValueMetadata, ValueType,
};
pub use query::{
    component_summaries, filter_by_domain, filter_by_value_type, filter_units_by_group,
    paginate, search_spec_types, search_units, sort_spec_types, Page, SortKey, SortOrder,
    SpecQuery, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE,
};
