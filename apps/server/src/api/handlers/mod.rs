//! Request handlers for API endpoints

pub mod components;
pub mod convert;
pub mod metrics;
pub mod solve;
pub mod specs;
pub mod units;

pub use components::*;
pub use convert::*;
pub use metrics::*;
pub use solve::*;
pub use specs::*;
pub use units::*;

use specref_data::DEFAULT_PAGE_SIZE;

/// Lenient integer query parameter: unparseable values fall back to `default`.
pub(crate) fn parse_or(value: Option<&str>, default: usize) -> usize {
    value
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(default)
}

pub(crate) fn page_params(page: Option<&str>, page_size: Option<&str>) -> (usize, usize) {
    (parse_or(page, 1), parse_or(page_size, DEFAULT_PAGE_SIZE))
}
