//! Unit catalog and conversion path engine.
//!
//! ```text
//! Unit records + raw groups
//!      |
//!   UnitCatalog::new  (merge groups, validate edges, compile equations)
//!      |
//!   Converter::convert
//!      |-- BFS over forward/reverse edges -> minimum-hop path
//!      |-- evaluate each hop (inverse for reverse hops)
//!      |
//!   Conversion { value, equation trail, description }
//! ```
#![forbid(unsafe_code)]

pub mod catalog;
pub mod engine;
pub mod error;
pub mod expr;
pub mod model;

pub use catalog::{merge_groups, UnitCatalog};
pub use engine::{find_path, Conversion, ConversionResponse, Converter, InputValue};
pub use error::{CatalogError, ConversionError, ConversionErrorKind, ExprError, Result};
pub use model::{ConversionEquation, ConversionStep, Direction, Unit, UnitGroup};
