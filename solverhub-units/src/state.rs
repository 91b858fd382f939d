//! Converter selection state
//!
//! Holds what a converter form holds: the selected category, the two
//! selected units and the raw text typed by the user. Switching category
//! resets the units to the category's first and second listed units.

use crate::convert::Converter;
use crate::error::ConversionError;
use crate::format::FormatOptions;
use crate::registry::UnitRegistry;
use crate::units::UNITS;

#[derive(Debug, Clone)]
pub struct ConverterState<'r> {
    registry: &'r UnitRegistry,
    category: String,
    from_unit: String,
    to_unit: String,
    input: String,
}

impl ConverterState<'static> {
    /// State over the built-in registry, first category selected
    pub fn new() -> Self {
        ConverterState::with_registry(&UNITS)
    }
}

impl Default for ConverterState<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'r> ConverterState<'r> {
    pub fn with_registry(registry: &'r UnitRegistry) -> Self {
        // A built registry has at least one non-empty category
        let first = &registry.categories()[0];
        let (from, to) = first.default_pair();
        ConverterState {
            registry,
            category: first.name().to_string(),
            from_unit: from.to_string(),
            to_unit: to.to_string(),
            input: String::new(),
        }
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn from_unit(&self) -> &str {
        &self.from_unit
    }

    pub fn to_unit(&self) -> &str {
        &self.to_unit
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Units available for the current category
    pub fn units(&self) -> Vec<&'r str> {
        self.registry.list_units(&self.category).unwrap_or_default()
    }

    /// Switch category and reset both unit selections. On error the
    /// state is left untouched.
    pub fn select_category(&mut self, name: &str) -> Result<(), ConversionError> {
        let category = self.registry.require(name)?;
        let (from, to) = category.default_pair();
        self.category = name.to_string();
        self.from_unit = from.to_string();
        self.to_unit = to.to_string();
        Ok(())
    }

    pub fn set_from_unit(&mut self, unit: &str) -> Result<(), ConversionError> {
        self.registry.get_rule(&self.category, unit)?;
        self.from_unit = unit.to_string();
        Ok(())
    }

    pub fn set_to_unit(&mut self, unit: &str) -> Result<(), ConversionError> {
        self.registry.get_rule(&self.category, unit)?;
        self.to_unit = unit.to_string();
        Ok(())
    }

    pub fn swap_units(&mut self) {
        std::mem::swap(&mut self.from_unit, &mut self.to_unit);
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// Parsed input, if it is a number
    pub fn value(&self) -> Option<f64> {
        self.input.trim().parse::<f64>().ok()
    }

    /// Convert the current input
    pub fn result(&self) -> Result<f64, ConversionError> {
        let value = self.value()
            .ok_or_else(|| ConversionError::InvalidValue(self.input.clone()))?;
        Converter::new(self.registry).convert(&self.category, &self.from_unit, &self.to_unit, value)
    }

    /// Formatted result with default options
    pub fn display(&self) -> String {
        self.display_with(&FormatOptions::default())
    }

    pub fn display_with(&self, options: &FormatOptions) -> String {
        let kind = self.registry.category(&self.category).map(|c| c.rule_kind());
        match kind {
            Some(kind) => options.format(kind, self.result().ok()),
            None => options.placeholder.clone(),
        }
    }
}
