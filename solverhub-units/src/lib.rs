//! SolverHub Units - Unit conversion engine
//!
//! Converts a quantity between named units of one category. Linear
//! categories (Length, Weight, Volume) normalize through a base unit;
//! Temperature is affine and uses an explicit table of pair functions.
//!
//! The built-in registry is immutable and shared process-wide, so every
//! conversion is a pure function of its arguments.
//!
//! ```
//! use solverhub_units::{convert, format_result};
//!
//! let km = convert("Length", "Meter", "Kilometer", 1500.0).unwrap();
//! assert_eq!(km, 1.5);
//! assert_eq!(format_result("Temperature", Some(98.6)), "98.60");
//! ```

mod error;
mod rule;
mod registry;
mod units;
mod convert;
mod format;
mod state;
mod helpers;
mod functions;

pub use error::{ConversionError, RegistryError};
pub use rule::{AffinePair, ConversionRule, RuleKind};
pub use registry::{Category, CategoryKind, RegistryBuilder, UnitDefinition, UnitRegistry};
pub use units::{builtin, UNITS};
pub use convert::{convert, list_categories, list_units, to_base, Converter};
pub use format::{format_result, format_with, FormatOptions};
pub use state::ConverterState;

use solverhub_plugin::PluginRegistry;

/// Load unit functions into registry
pub fn load_units_library(registry: PluginRegistry) -> PluginRegistry {
    registry
        // Conversion (2 functions)
        .with_function(functions::Convert)
        .with_function(functions::FormatConversion)

        // Inspection (2 functions)
        .with_function(functions::ListUnits)
        .with_function(functions::ListCategories)
}
