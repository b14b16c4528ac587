//! specref server
//!
//! HTTP API over the MEP reference data:
//! - Paginated, searchable spec type and unit listings
//! - Component list derived from component/spec mappings
//! - Multi-hop unit conversion by unit id
//! - Natural-language conversion requests

pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod state;

pub use config::Config;
pub use error::{Error, Result};
pub use state::AppState;
