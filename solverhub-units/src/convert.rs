//! Conversion resolver

use crate::error::ConversionError;
use crate::registry::{CategoryKind, UnitRegistry};
use crate::units::UNITS;

/// Resolves conversion requests against a registry
#[derive(Debug, Clone, Copy)]
pub struct Converter<'r> {
    registry: &'r UnitRegistry,
}

impl<'r> Converter<'r> {
    pub fn new(registry: &'r UnitRegistry) -> Self {
        Converter { registry }
    }

    pub fn registry(&self) -> &'r UnitRegistry {
        self.registry
    }

    /// Convert `value` from one unit to another within `category`.
    ///
    /// Linear categories go through the base unit; affine categories use
    /// the category's pair table. The result is not rounded.
    pub fn convert(&self, category: &str, from: &str, to: &str, value: f64) -> Result<f64, ConversionError> {
        if !value.is_finite() {
            return Err(ConversionError::InvalidValue(value.to_string()));
        }

        let cat = self.registry.require(category)?;
        let from_unit = cat.unit(from).ok_or_else(|| ConversionError::unknown_unit(category, from))?;
        let to_unit = cat.unit(to).ok_or_else(|| ConversionError::unknown_unit(category, to))?;

        if from == to {
            return Ok(value);
        }

        match cat.kind() {
            CategoryKind::Affine { .. } => cat
                .pair(from, to)
                .map(|pair| (pair.apply)(value))
                .ok_or_else(|| ConversionError::unsupported(category, from, to)),
            CategoryKind::Linear { .. } => {
                let base = from_unit.rule.to_base(value);
                base.and_then(|b| to_unit.rule.from_base(b))
                    .ok_or_else(|| ConversionError::unsupported(category, from, to))
            }
        }
    }

    /// Express `value` in the category's base unit. Affine categories
    /// have no base unit.
    pub fn to_base(&self, category: &str, unit: &str, value: f64) -> Result<f64, ConversionError> {
        let cat = self.registry.require(category)?;
        match cat.base_unit() {
            Some(base) => self.convert(category, unit, base, value),
            None => Err(ConversionError::unsupported(category, unit, "base unit")),
        }
    }
}

impl Default for Converter<'static> {
    fn default() -> Self {
        Converter::new(&UNITS)
    }
}

/// Convert using the built-in registry
pub fn convert(category: &str, from: &str, to: &str, value: f64) -> Result<f64, ConversionError> {
    Converter::default().convert(category, from, to, value)
}

/// Express a value in its category's base unit using the built-in registry
pub fn to_base(category: &str, unit: &str, value: f64) -> Result<f64, ConversionError> {
    Converter::default().to_base(category, unit, value)
}

/// Category names of the built-in registry
pub fn list_categories() -> Vec<&'static str> {
    UNITS.list_categories()
}

/// Unit names of a built-in category
pub fn list_units(category: &str) -> Result<Vec<&'static str>, ConversionError> {
    UNITS.list_units(category)
}
