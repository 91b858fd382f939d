//! Unit registry
//!
//! Categories own an ordered list of units. Order matters: callers use it
//! to populate selection lists and to pick default units when the
//! category changes. The registry is built once and never mutated.

use crate::error::{ConversionError, RegistryError};
use crate::rule::{AffinePair, ConversionRule, RuleKind};
use serde::Serialize;
use std::collections::HashSet;

/// Values used to check that affine pairs undo each other
const ROUND_TRIP_SAMPLES: [f64; 4] = [-40.0, 0.0, 37.5, 1000.0];
const ROUND_TRIP_TOLERANCE: f64 = 1e-9;

/// A named unit and its rule
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnitDefinition {
    pub name: String,
    pub rule: ConversionRule,
}

/// How a category converts between its units
#[derive(Debug, Clone)]
pub enum CategoryKind {
    /// Normalized through a base unit with factor 1
    Linear { base: String },
    /// Explicit table of directed pair functions
    Affine { pairs: Vec<AffinePair> },
}

/// A category of mutually convertible units
#[derive(Debug, Clone)]
pub struct Category {
    name: String,
    kind: CategoryKind,
    units: Vec<UnitDefinition>,
}

impl Category {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &CategoryKind {
        &self.kind
    }

    pub fn rule_kind(&self) -> RuleKind {
        match self.kind {
            CategoryKind::Linear { .. } => RuleKind::Linear,
            CategoryKind::Affine { .. } => RuleKind::Affine,
        }
    }

    pub fn units(&self) -> &[UnitDefinition] {
        &self.units
    }

    pub fn unit_names(&self) -> Vec<&str> {
        self.units.iter().map(|u| u.name.as_str()).collect()
    }

    pub fn unit(&self, name: &str) -> Option<&UnitDefinition> {
        self.units.iter().find(|u| u.name == name)
    }

    /// Base unit name for linear categories
    pub fn base_unit(&self) -> Option<&str> {
        match &self.kind {
            CategoryKind::Linear { base } => Some(base),
            CategoryKind::Affine { .. } => None,
        }
    }

    /// Directed pair function for affine categories
    pub fn pair(&self, from: &str, to: &str) -> Option<&AffinePair> {
        match &self.kind {
            CategoryKind::Affine { pairs } => pairs.iter().find(|p| p.matches(from, to)),
            CategoryKind::Linear { .. } => None,
        }
    }

    /// First and second listed units, used as the default selection.
    /// A single-unit category selects that unit twice.
    pub fn default_pair(&self) -> (&str, &str) {
        let first = self.units[0].name.as_str();
        let second = self.units.get(1).map_or(first, |u| u.name.as_str());
        (first, second)
    }

    fn validate(&self) -> Result<(), RegistryError> {
        if self.units.is_empty() {
            return Err(RegistryError::EmptyCategory(self.name.clone()));
        }

        let mut seen = HashSet::new();
        for unit in &self.units {
            if !seen.insert(unit.name.as_str()) {
                return Err(RegistryError::DuplicateUnit {
                    category: self.name.clone(),
                    unit: unit.name.clone(),
                });
            }
            if let ConversionRule::Linear { factor } = unit.rule {
                if !(factor.is_finite() && factor > 0.0) {
                    return Err(RegistryError::InvalidFactor {
                        category: self.name.clone(),
                        unit: unit.name.clone(),
                        factor,
                    });
                }
            }
        }

        match &self.kind {
            CategoryKind::Linear { base } => {
                let has_base = self.unit(base)
                    .map_or(false, |u| u.rule == ConversionRule::Linear { factor: 1.0 });
                if !has_base {
                    return Err(RegistryError::MissingBaseUnit {
                        category: self.name.clone(),
                        base: base.clone(),
                    });
                }
            }
            CategoryKind::Affine { pairs } => self.validate_pairs(pairs)?,
        }

        Ok(())
    }

    fn validate_pairs(&self, pairs: &[AffinePair]) -> Result<(), RegistryError> {
        let mut seen = HashSet::new();
        for pair in pairs {
            if pair.from == pair.to || self.unit(&pair.from).is_none() || self.unit(&pair.to).is_none() {
                return Err(RegistryError::UnknownPairUnit {
                    category: self.name.clone(),
                    from: pair.from.clone(),
                    to: pair.to.clone(),
                });
            }
            if !seen.insert((pair.from.as_str(), pair.to.as_str())) {
                return Err(RegistryError::DuplicatePair {
                    category: self.name.clone(),
                    from: pair.from.clone(),
                    to: pair.to.clone(),
                });
            }
        }

        for forward in pairs {
            let Some(back) = pairs.iter().find(|p| p.matches(&forward.to, &forward.from)) else {
                continue;
            };
            let consistent = ROUND_TRIP_SAMPLES.iter().all(|&v| {
                let there_and_back = (back.apply)((forward.apply)(v));
                (there_and_back - v).abs() <= ROUND_TRIP_TOLERANCE * v.abs().max(1.0)
            });
            if !consistent {
                return Err(RegistryError::InconsistentPair {
                    category: self.name.clone(),
                    from: forward.from.clone(),
                    to: forward.to.clone(),
                });
            }
        }

        Ok(())
    }
}

/// Closed, ordered set of categories
#[derive(Debug, Clone)]
pub struct UnitRegistry {
    categories: Vec<Category>,
}

impl UnitRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Category names in insertion order
    pub fn list_categories(&self) -> Vec<&str> {
        self.categories.iter().map(|c| c.name.as_str()).collect()
    }

    /// Unit names of a category in insertion order
    pub fn list_units(&self, category: &str) -> Result<Vec<&str>, ConversionError> {
        self.require(category).map(Category::unit_names)
    }

    /// Rule for a unit within a category
    pub fn get_rule(&self, category: &str, unit: &str) -> Result<&ConversionRule, ConversionError> {
        let cat = self.require(category)?;
        cat.unit(unit)
            .map(|u| &u.rule)
            .ok_or_else(|| ConversionError::unknown_unit(category, unit))
    }

    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn base_unit(&self, category: &str) -> Result<Option<&str>, ConversionError> {
        self.require(category).map(Category::base_unit)
    }

    pub(crate) fn require(&self, category: &str) -> Result<&Category, ConversionError> {
        self.category(category)
            .ok_or_else(|| ConversionError::UnknownCategory(category.to_string()))
    }
}

/// Collects categories and validates them on `build`
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    categories: Vec<Category>,
}

impl RegistryBuilder {
    /// Add a linear category. `base` must appear in `units` with factor 1.
    pub fn linear(mut self, name: &str, base: &str, units: &[(&str, f64)]) -> Self {
        self.categories.push(Category {
            name: name.to_string(),
            kind: CategoryKind::Linear { base: base.to_string() },
            units: units.iter()
                .map(|&(unit, factor)| UnitDefinition {
                    name: unit.to_string(),
                    rule: ConversionRule::Linear { factor },
                })
                .collect(),
        });
        self
    }

    /// Add an affine category converted through the given pair table
    pub fn affine(mut self, name: &str, units: &[&str], pairs: Vec<AffinePair>) -> Self {
        self.categories.push(Category {
            name: name.to_string(),
            kind: CategoryKind::Affine { pairs },
            units: units.iter()
                .map(|&unit| UnitDefinition {
                    name: unit.to_string(),
                    rule: ConversionRule::Affine,
                })
                .collect(),
        });
        self
    }

    pub fn build(self) -> Result<UnitRegistry, RegistryError> {
        if self.categories.is_empty() {
            return Err(RegistryError::Empty);
        }

        let mut seen = HashSet::new();
        for category in &self.categories {
            if !seen.insert(category.name.as_str()) {
                return Err(RegistryError::DuplicateCategory(category.name.clone()));
            }
            category.validate()?;
        }

        Ok(UnitRegistry { categories: self.categories })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::{celsius_to_kelvin, kelvin_to_celsius};

    fn small() -> UnitRegistry {
        UnitRegistry::builder()
            .linear("Length", "Meter", &[("Meter", 1.0), ("Kilometer", 1000.0), ("Foot", 0.3048)])
            .affine("Temperature", &["Celsius", "Kelvin"], vec![
                AffinePair::new("Celsius", "Kelvin", celsius_to_kelvin),
                AffinePair::new("Kelvin", "Celsius", kelvin_to_celsius),
            ])
            .build()
            .unwrap()
    }

    #[test]
    fn test_lists_preserve_insertion_order() {
        let reg = small();
        assert_eq!(reg.list_categories(), vec!["Length", "Temperature"]);
        assert_eq!(reg.list_units("Length").unwrap(), vec!["Meter", "Kilometer", "Foot"]);
    }

    #[test]
    fn test_list_units_unknown_category() {
        let reg = small();
        assert_eq!(
            reg.list_units("Money"),
            Err(ConversionError::UnknownCategory("Money".to_string()))
        );
    }

    #[test]
    fn test_get_rule() {
        let reg = small();
        assert_eq!(reg.get_rule("Length", "Foot").unwrap(), &ConversionRule::Linear { factor: 0.3048 });
        assert_eq!(reg.get_rule("Temperature", "Kelvin").unwrap(), &ConversionRule::Affine);
        assert!(matches!(
            reg.get_rule("Length", "Smoot"),
            Err(ConversionError::UnknownUnit { .. })
        ));
        assert!(matches!(
            reg.get_rule("Volume", "Liter"),
            Err(ConversionError::UnknownCategory(_))
        ));
    }

    #[test]
    fn test_lookups_are_case_sensitive() {
        let reg = small();
        assert!(reg.category("length").is_none());
        assert!(reg.get_rule("Length", "meter").is_err());
    }

    #[test]
    fn test_base_unit() {
        let reg = small();
        assert_eq!(reg.base_unit("Length").unwrap(), Some("Meter"));
        assert_eq!(reg.base_unit("Temperature").unwrap(), None);
    }

    #[test]
    fn test_default_pair() {
        let reg = small();
        assert_eq!(reg.category("Length").unwrap().default_pair(), ("Meter", "Kilometer"));
        let single = UnitRegistry::builder()
            .linear("Count", "Each", &[("Each", 1.0)])
            .build()
            .unwrap();
        assert_eq!(single.category("Count").unwrap().default_pair(), ("Each", "Each"));
    }

    #[test]
    fn test_rejects_empty_registry() {
        assert_eq!(UnitRegistry::builder().build().unwrap_err(), RegistryError::Empty);
    }

    #[test]
    fn test_rejects_duplicate_category() {
        let err = UnitRegistry::builder()
            .linear("Length", "Meter", &[("Meter", 1.0)])
            .linear("Length", "Meter", &[("Meter", 1.0)])
            .build()
            .unwrap_err();
        assert_eq!(err, RegistryError::DuplicateCategory("Length".to_string()));
    }

    #[test]
    fn test_rejects_duplicate_unit() {
        let err = UnitRegistry::builder()
            .linear("Length", "Meter", &[("Meter", 1.0), ("Meter", 1.0)])
            .build()
            .unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateUnit { .. }));
    }

    #[test]
    fn test_rejects_bad_factor() {
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err = UnitRegistry::builder()
                .linear("Length", "Meter", &[("Meter", 1.0), ("Broken", bad)])
                .build()
                .unwrap_err();
            assert!(matches!(err, RegistryError::InvalidFactor { .. }), "factor {}", bad);
        }
    }

    #[test]
    fn test_rejects_missing_base() {
        let err = UnitRegistry::builder()
            .linear("Length", "Meter", &[("Kilometer", 1000.0)])
            .build()
            .unwrap_err();
        assert!(matches!(err, RegistryError::MissingBaseUnit { .. }));

        let err = UnitRegistry::builder()
            .linear("Length", "Meter", &[("Meter", 2.0)])
            .build()
            .unwrap_err();
        assert!(matches!(err, RegistryError::MissingBaseUnit { .. }));
    }

    #[test]
    fn test_rejects_empty_category() {
        let err = UnitRegistry::builder()
            .linear("Length", "Meter", &[])
            .build()
            .unwrap_err();
        assert_eq!(err, RegistryError::EmptyCategory("Length".to_string()));
    }

    #[test]
    fn test_rejects_pair_with_unknown_unit() {
        let err = UnitRegistry::builder()
            .affine("Temperature", &["Celsius"], vec![
                AffinePair::new("Celsius", "Kelvin", celsius_to_kelvin),
            ])
            .build()
            .unwrap_err();
        assert!(matches!(err, RegistryError::UnknownPairUnit { .. }));
    }

    #[test]
    fn test_rejects_duplicate_pair() {
        let err = UnitRegistry::builder()
            .affine("Temperature", &["Celsius", "Kelvin"], vec![
                AffinePair::new("Celsius", "Kelvin", celsius_to_kelvin),
                AffinePair::new("Celsius", "Kelvin", celsius_to_kelvin),
            ])
            .build()
            .unwrap_err();
        assert!(matches!(err, RegistryError::DuplicatePair { .. }));
    }

    #[test]
    fn test_rejects_inconsistent_pair() {
        let err = UnitRegistry::builder()
            .affine("Temperature", &["Celsius", "Kelvin"], vec![
                AffinePair::new("Celsius", "Kelvin", celsius_to_kelvin),
                AffinePair::new("Kelvin", "Celsius", |k| k - 273.0),
            ])
            .build()
            .unwrap_err();
        assert!(matches!(err, RegistryError::InconsistentPair { .. }));
    }

    #[test]
    fn test_partial_pair_table_is_allowed() {
        let reg = UnitRegistry::builder()
            .affine("Temperature", &["Celsius", "Kelvin"], vec![
                AffinePair::new("Celsius", "Kelvin", celsius_to_kelvin),
            ])
            .build()
            .unwrap();
        let cat = reg.category("Temperature").unwrap();
        assert!(cat.pair("Celsius", "Kelvin").is_some());
        assert!(cat.pair("Kelvin", "Celsius").is_none());
    }
}
