//! Conversion and registry errors

use solverhub_core::SolverError;
use thiserror::Error;

/// Error returned by a conversion request. All variants are local and
/// recoverable; the caller decides how to present them.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    #[error("unknown category: {0}")]
    UnknownCategory(String),

    #[error("unknown unit '{unit}' in category {category}")]
    UnknownUnit { category: String, unit: String },

    #[error("no {category} conversion defined from {from} to {to}")]
    UnsupportedConversion { category: String, from: String, to: String },

    #[error("invalid value: {0}")]
    InvalidValue(String),
}

impl ConversionError {
    pub(crate) fn unknown_unit(category: &str, unit: &str) -> Self {
        ConversionError::UnknownUnit {
            category: category.to_string(),
            unit: unit.to_string(),
        }
    }

    pub(crate) fn unsupported(category: &str, from: &str, to: &str) -> Self {
        ConversionError::UnsupportedConversion {
            category: category.to_string(),
            from: from.to_string(),
            to: to.to_string(),
        }
    }
}

impl From<ConversionError> for SolverError {
    fn from(err: ConversionError) -> Self {
        match err {
            ConversionError::UnknownCategory(name) => SolverError::unknown_category(&name),
            ConversionError::UnknownUnit { category, unit } => SolverError::unknown_unit(&category, &unit),
            ConversionError::UnsupportedConversion { category, from, to } => {
                SolverError::unsupported_conversion(&category, &from, &to)
            }
            ConversionError::InvalidValue(details) => SolverError::invalid_value(details),
        }
    }
}

/// Error raised while building a unit registry
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegistryError {
    #[error("registry has no categories")]
    Empty,

    #[error("duplicate category: {0}")]
    DuplicateCategory(String),

    #[error("category {0} has no units")]
    EmptyCategory(String),

    #[error("duplicate unit '{unit}' in category {category}")]
    DuplicateUnit { category: String, unit: String },

    #[error("unit '{unit}' in category {category} has invalid factor {factor}")]
    InvalidFactor { category: String, unit: String, factor: f64 },

    #[error("category {category} needs base unit '{base}' with factor 1")]
    MissingBaseUnit { category: String, base: String },

    #[error("pair {from} -> {to} in category {category} names an unknown unit")]
    UnknownPairUnit { category: String, from: String, to: String },

    #[error("pair {from} -> {to} in category {category} is defined twice")]
    DuplicatePair { category: String, from: String, to: String },

    #[error("pairs {from} -> {to} -> {from} in category {category} do not round-trip")]
    InconsistentPair { category: String, from: String, to: String },
}
