//! Conversion rules
//!
//! A linear unit relates to its category's base unit by a single
//! positive factor. Affine units (temperature) relate by scale and
//! offset, so they are converted through an explicit table of ordered
//! pair functions instead.

use serde::{Deserialize, Serialize};

/// How a single unit converts within its category
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ConversionRule {
    /// `base = value * factor`, `value = base / factor`
    Linear { factor: f64 },
    /// Converted through the category's pair table
    Affine,
}

impl ConversionRule {
    pub fn kind(&self) -> RuleKind {
        match self {
            ConversionRule::Linear { .. } => RuleKind::Linear,
            ConversionRule::Affine => RuleKind::Affine,
        }
    }

    pub fn factor(&self) -> Option<f64> {
        match self {
            ConversionRule::Linear { factor } => Some(*factor),
            ConversionRule::Affine => None,
        }
    }

    /// Value expressed in the base unit
    pub fn to_base(&self, value: f64) -> Option<f64> {
        self.factor().map(|f| value * f)
    }

    /// Base-unit value expressed in this unit
    pub fn from_base(&self, base: f64) -> Option<f64> {
        self.factor().map(|f| base / f)
    }
}

/// Tag shared by every unit of a category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleKind {
    Linear,
    Affine,
}

/// One directed entry in an affine pair table
#[derive(Debug, Clone)]
pub struct AffinePair {
    pub from: String,
    pub to: String,
    pub apply: fn(f64) -> f64,
}

impl AffinePair {
    pub fn new(from: &str, to: &str, apply: fn(f64) -> f64) -> Self {
        AffinePair {
            from: from.to_string(),
            to: to.to_string(),
            apply,
        }
    }

    pub fn matches(&self, from: &str, to: &str) -> bool {
        self.from == from && self.to == to
    }
}

// Temperature pair functions

pub fn celsius_to_fahrenheit(c: f64) -> f64 {
    c * 9.0 / 5.0 + 32.0
}

pub fn fahrenheit_to_celsius(f: f64) -> f64 {
    (f - 32.0) * 5.0 / 9.0
}

pub fn celsius_to_kelvin(c: f64) -> f64 {
    c + 273.15
}

pub fn kelvin_to_celsius(k: f64) -> f64 {
    k - 273.15
}

pub fn fahrenheit_to_kelvin(f: f64) -> f64 {
    (f - 32.0) * 5.0 / 9.0 + 273.15
}

pub fn kelvin_to_fahrenheit(k: f64) -> f64 {
    (k - 273.15) * 9.0 / 5.0 + 32.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_base_round_trip() {
        let km = ConversionRule::Linear { factor: 1000.0 };
        assert_eq!(km.to_base(1.5), Some(1500.0));
        assert_eq!(km.from_base(1500.0), Some(1.5));
        assert_eq!(km.kind(), RuleKind::Linear);
    }

    #[test]
    fn test_affine_has_no_factor() {
        assert_eq!(ConversionRule::Affine.factor(), None);
        assert_eq!(ConversionRule::Affine.to_base(10.0), None);
        assert_eq!(ConversionRule::Affine.kind(), RuleKind::Affine);
    }

    #[test]
    fn test_temperature_fixed_points() {
        assert_eq!(celsius_to_fahrenheit(0.0), 32.0);
        assert_eq!(celsius_to_fahrenheit(100.0), 212.0);
        assert_eq!(celsius_to_kelvin(0.0), 273.15);
        assert_eq!(fahrenheit_to_kelvin(32.0), 273.15);
        assert_eq!(celsius_to_fahrenheit(-40.0), -40.0);
    }

    #[test]
    fn test_pair_matches_direction() {
        let pair = AffinePair::new("Celsius", "Kelvin", celsius_to_kelvin);
        assert!(pair.matches("Celsius", "Kelvin"));
        assert!(!pair.matches("Kelvin", "Celsius"));
        assert_eq!((pair.apply)(-273.15), 0.0);
    }

    #[test]
    fn test_rule_serializes_with_kind_tag() {
        let json = serde_json::to_value(ConversionRule::Linear { factor: 0.3048 }).unwrap();
        assert_eq!(json["kind"], "linear");
        assert_eq!(json["factor"], 0.3048);
        let affine = serde_json::to_value(ConversionRule::Affine).unwrap();
        assert_eq!(affine["kind"], "affine");
    }
}
