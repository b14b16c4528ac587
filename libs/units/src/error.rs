//! Error types for the unit catalog, equation language and conversion engine

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, ConversionError>;

/// Errors reported by [`crate::Converter`].
///
/// Every variant is an expected, caller-visible condition. The HTTP layer maps
/// each [`ConversionErrorKind`] to a status code.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConversionError {
    #[error("Invalid numeric value: {0}")]
    InvalidValue(String),

    #[error("Unit not found: {0}")]
    UnitNotFound(String),

    #[error("Units are not in the same unit group and cannot be converted: '{from}' ({from_group}) vs '{to}' ({to_group})")]
    IncompatibleUnits {
        from: String,
        to: String,
        from_group: String,
        to_group: String,
    },

    #[error("Unit group not found: {0}")]
    UnitGroupNotFound(String),

    #[error("No conversion path found between '{from}' and '{to}'")]
    NoConversionPath { from: String, to: String },

    #[error("Failed to evaluate equation '{equation_id}': {source}")]
    EquationEvaluation {
        equation_id: String,
        #[source]
        source: ExprError,
    },
}

/// Discriminant of [`ConversionError`] without payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConversionErrorKind {
    InvalidValue,
    UnitNotFound,
    IncompatibleUnits,
    UnitGroupNotFound,
    NoConversionPath,
    EquationEvaluation,
}

impl ConversionErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidValue => "invalid_value",
            Self::UnitNotFound => "unit_not_found",
            Self::IncompatibleUnits => "incompatible_units",
            Self::UnitGroupNotFound => "unit_group_not_found",
            Self::NoConversionPath => "no_conversion_path",
            Self::EquationEvaluation => "equation_evaluation",
        }
    }
}

impl ConversionError {
    pub fn kind(&self) -> ConversionErrorKind {
        match self {
            Self::InvalidValue(_) => ConversionErrorKind::InvalidValue,
            Self::UnitNotFound(_) => ConversionErrorKind::UnitNotFound,
            Self::IncompatibleUnits { .. } => ConversionErrorKind::IncompatibleUnits,
            Self::UnitGroupNotFound(_) => ConversionErrorKind::UnitGroupNotFound,
            Self::NoConversionPath { .. } => ConversionErrorKind::NoConversionPath,
            Self::EquationEvaluation { .. } => ConversionErrorKind::EquationEvaluation,
        }
    }
}

/// Errors from the restricted equation language.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ExprError {
    #[error("invalid equation syntax at byte {pos}: {message}")]
    Syntax { pos: usize, message: String },

    #[error("unexpected end of equation")]
    UnexpectedEnd,

    #[error("equation too deeply nested (max depth: {0})")]
    TooDeep(usize),

    #[error("division by zero")]
    DivisionByZero,

    #[error("equation produced a non-finite result")]
    NonFinite,

    #[error("equation cannot be inverted: {0}")]
    NotInvertible(&'static str),
}

/// Structural problems found while building a [`crate::UnitCatalog`].
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CatalogError {
    #[error("duplicate unit id '{0}'")]
    DuplicateUnit(String),

    #[error("conversion '{equation_id}' in group '{group_id}' references unknown unit '{unit_id}'")]
    UnknownUnitInEquation {
        group_id: String,
        equation_id: String,
        unit_id: String,
    },

    #[error("conversion '{equation_id}' in group '{group_id}' references unit '{unit_id}' of group '{unit_group_id}'")]
    CrossGroupEquation {
        group_id: String,
        equation_id: String,
        unit_id: String,
        unit_group_id: String,
    },

    #[error("conversion '{equation_id}' has an invalid equation '{equation}': {source}")]
    InvalidEquation {
        equation_id: String,
        equation: String,
        #[source]
        source: ExprError,
    },
}
