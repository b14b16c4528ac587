//! Shared application state

use crate::config::Config;
use crate::metrics;
use anyhow::Context;
use specref_assistant::{build_parser, EquationParser};
use specref_data::DataStore;
use std::sync::Arc;

/// Read-only state shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub data: Arc<DataStore>,
    pub parser: Arc<dyn EquationParser>,
}

impl AppState {
    /// Load reference data and build the configured parser.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let sources = config.data.sources();
        let data = DataStore::load(&sources).with_context(|| {
            format!(
                "Failed to load reference data from {}",
                sources.directory.display()
            )
        })?;
        let parser = build_parser(&config.assistant).context("Failed to build equation parser")?;

        tracing::info!(parser = parser.name(), "Equation parser ready");
        Ok(Self::from_parts(config, data, parser))
    }

    pub fn from_parts(config: Config, data: DataStore, parser: Arc<dyn EquationParser>) -> Self {
        metrics::CATALOG_UNITS.set(data.catalog.units().len() as i64);
        for (dataset, count) in [
            ("spec_types", data.spec_types.len()),
            ("component_types", data.component_types.len()),
            ("mappings", data.mappings.len()),
        ] {
            metrics::DATASET_RECORDS
                .with_label_values(&[dataset])
                .set(count as i64);
        }

        Self {
            config: Arc::new(config),
            data: Arc::new(data),
            parser,
        }
    }
}
