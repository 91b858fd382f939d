//! Built-in unit table

use std::sync::LazyLock;
use crate::registry::{RegistryBuilder, UnitRegistry};
use crate::rule::{
    AffinePair,
    celsius_to_fahrenheit, fahrenheit_to_celsius,
    celsius_to_kelvin, kelvin_to_celsius,
    fahrenheit_to_kelvin, kelvin_to_fahrenheit,
};

/// Global unit registry
pub static UNITS: LazyLock<UnitRegistry> = LazyLock::new(|| {
    builtin()
        .build()
        .expect("built-in unit table is valid")
});

/// Builder preloaded with the built-in categories, in display order
pub fn builtin() -> RegistryBuilder {
    let builder = UnitRegistry::builder();
    let builder = register_length_units(builder);
    let builder = register_weight_units(builder);
    let builder = register_temperature_units(builder);
    register_volume_units(builder)
}

fn register_length_units(builder: RegistryBuilder) -> RegistryBuilder {
    builder.linear("Length", "Meter", &[
        ("Meter", 1.0),
        ("Kilometer", 1000.0),
        ("Centimeter", 0.01),
        ("Millimeter", 0.001),
        ("Mile", 1609.344),
        ("Yard", 0.9144),
        ("Foot", 0.3048),
        ("Inch", 0.0254),
    ])
}

fn register_weight_units(builder: RegistryBuilder) -> RegistryBuilder {
    builder.linear("Weight", "Kilogram", &[
        ("Kilogram", 1.0),
        ("Gram", 0.001),
        ("Milligram", 0.000001),
        ("Pound", 0.45359237),
        ("Ounce", 0.028349523125),
    ])
}

fn register_temperature_units(builder: RegistryBuilder) -> RegistryBuilder {
    builder.affine("Temperature", &["Celsius", "Fahrenheit", "Kelvin"], vec![
        AffinePair::new("Celsius", "Fahrenheit", celsius_to_fahrenheit),
        AffinePair::new("Fahrenheit", "Celsius", fahrenheit_to_celsius),
        AffinePair::new("Celsius", "Kelvin", celsius_to_kelvin),
        AffinePair::new("Kelvin", "Celsius", kelvin_to_celsius),
        AffinePair::new("Fahrenheit", "Kelvin", fahrenheit_to_kelvin),
        AffinePair::new("Kelvin", "Fahrenheit", kelvin_to_fahrenheit),
    ])
}

fn register_volume_units(builder: RegistryBuilder) -> RegistryBuilder {
    // US customary liquid measures
    builder.linear("Volume", "Liter", &[
        ("Liter", 1.0),
        ("Milliliter", 0.001),
        ("Gallon", 3.785411784),
        ("Quart", 0.946352946),
        ("Pint", 0.473176473),
        ("Cup", 0.2365882365),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_builds() {
        assert!(builtin().build().is_ok());
    }

    #[test]
    fn test_categories_in_display_order() {
        assert_eq!(UNITS.list_categories(), vec!["Length", "Weight", "Temperature", "Volume"]);
    }

    #[test]
    fn test_temperature_defines_all_six_pairs() {
        let temp = UNITS.category("Temperature").unwrap();
        let names = temp.unit_names();
        let mut count = 0;
        for from in &names {
            for to in &names {
                if from != to {
                    assert!(temp.pair(from, to).is_some(), "{} -> {}", from, to);
                    count += 1;
                }
            }
        }
        assert_eq!(count, 6);
    }

    #[test]
    fn test_base_units() {
        assert_eq!(UNITS.base_unit("Length").unwrap(), Some("Meter"));
        assert_eq!(UNITS.base_unit("Weight").unwrap(), Some("Kilogram"));
        assert_eq!(UNITS.base_unit("Volume").unwrap(), Some("Liter"));
    }
}
