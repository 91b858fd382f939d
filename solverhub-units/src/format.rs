//! Display formatting for conversion results
//!
//! Formatting never fails: anything that is not a finite number renders
//! as the placeholder.

use crate::registry::UnitRegistry;
use crate::rule::RuleKind;
use crate::units::UNITS;
use std::iter;

/// Display settings
#[derive(Debug, Clone, PartialEq)]
pub struct FormatOptions {
    /// Upper bound on fraction digits for grouped (linear) results
    pub max_fraction_digits: usize,
    /// Exact fraction digits for affine (temperature) results
    pub fixed_digits: usize,
    /// Rendered in place of a missing or non-finite value
    pub placeholder: String,
}

impl Default for FormatOptions {
    fn default() -> Self {
        FormatOptions {
            max_fraction_digits: 3,
            fixed_digits: 2,
            placeholder: "...".to_string(),
        }
    }
}

impl FormatOptions {
    pub fn with_max_fraction_digits(mut self, digits: usize) -> Self {
        self.max_fraction_digits = digits;
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Render a value for a category of the given kind
    pub fn format(&self, kind: RuleKind, value: Option<f64>) -> String {
        match value {
            Some(v) if v.is_finite() => match kind {
                RuleKind::Affine => fixed(v, self.fixed_digits),
                RuleKind::Linear => grouped(v, self.max_fraction_digits),
            },
            _ => self.placeholder.clone(),
        }
    }
}

/// Format a result of `category` with default options and the built-in
/// registry. Unknown categories are formatted as linear.
pub fn format_result(category: &str, value: Option<f64>) -> String {
    format_with(&FormatOptions::default(), &UNITS, category, value)
}

pub fn format_with(options: &FormatOptions, registry: &UnitRegistry, category: &str, value: Option<f64>) -> String {
    let kind = registry.category(category)
        .map_or(RuleKind::Linear, |c| c.rule_kind());
    options.format(kind, value)
}

/// Enough fraction digits to print any `f64` exactly
const EXACT_FRACTION_DIGITS: usize = 1074;

/// Fixed number of fraction digits, no grouping. Rounds the exact binary
/// value, ties away from zero.
fn fixed(value: f64, digits: usize) -> String {
    let exact = format!("{:.*}", EXACT_FRACTION_DIGITS, value.abs());
    let (int_part, frac_part) = round_half_up(&exact, digits);

    // -0.0 prints as "0.00"; small negatives keep their sign
    let sign = if value < 0.0 { "-" } else { "" };
    if frac_part.is_empty() {
        format!("{}{}", sign, int_part)
    } else {
        format!("{}{}.{}", sign, int_part, frac_part)
    }
}

/// en-US grouping with at most `max_digits` fraction digits, trailing
/// zeros trimmed. Rounds the shortest decimal that reads back as
/// `value`, ties away from zero.
fn grouped(value: f64, max_digits: usize) -> String {
    let (int_part, frac_part) = round_half_up(&value.abs().to_string(), max_digits);
    let frac_part = frac_part.trim_end_matches('0');

    let mut out = String::with_capacity(int_part.len() + int_part.len() / 3 + frac_part.len() + 2);
    if value.is_sign_negative() {
        out.push('-');
    }
    out.push_str(&group_thousands(&int_part));
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

/// Round a plain non-negative decimal string to `places` fraction
/// digits. Returns the integer digits and exactly `places` fraction
/// digits.
fn round_half_up(decimal: &str, places: usize) -> (String, String) {
    let (int_part, frac_part) = decimal.split_once('.').unwrap_or((decimal, ""));
    let mut digits: Vec<char> = int_part.chars()
        .chain(frac_part.chars().chain(iter::repeat('0')).take(places))
        .collect();

    if frac_part.chars().nth(places).is_some_and(|d| d >= '5') {
        let mut carry = true;
        for d in digits.iter_mut().rev() {
            if *d == '9' {
                *d = '0';
            } else {
                *d = (*d as u8 + 1) as char;
                carry = false;
                break;
            }
        }
        if carry {
            digits.insert(0, '1');
        }
    }

    let frac: String = digits.split_off(digits.len() - places).into_iter().collect();
    (digits.into_iter().collect(), frac)
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temperature_fixed_two_places() {
        assert_eq!(format_result("Temperature", Some(98.6)), "98.60");
        assert_eq!(format_result("Temperature", Some(-17.7777777)), "-17.78");
        assert_eq!(format_result("Temperature", Some(273.15)), "273.15");
        assert_eq!(format_result("Temperature", Some(32.0)), "32.00");
        assert_eq!(format_result("Temperature", Some(1234.5)), "1234.50");
    }

    #[test]
    fn test_temperature_negative_zero() {
        assert_eq!(format_result("Temperature", Some(-0.0)), "0.00");
        assert_eq!(format_result("Temperature", Some(-0.001)), "-0.00");
    }

    #[test]
    fn test_linear_grouping() {
        assert_eq!(format_result("Length", Some(1609.344)), "1,609.344");
        assert_eq!(format_result("Length", Some(1609.34)), "1,609.34");
        assert_eq!(format_result("Length", Some(1.5)), "1.5");
        assert_eq!(format_result("Length", Some(1_000_000.0)), "1,000,000");
        assert_eq!(format_result("Length", Some(999.0)), "999");
        assert_eq!(format_result("Weight", Some(-12345.6789)), "-12,345.679");
    }

    #[test]
    fn test_linear_small_values() {
        assert_eq!(format_result("Length", Some(0.0)), "0");
        assert_eq!(format_result("Length", Some(0.0001)), "0");
        assert_eq!(format_result("Length", Some(-0.0001)), "-0");
        assert_eq!(format_result("Length", Some(0.0254)), "0.025");
    }

    #[test]
    fn test_ties_round_away_from_zero() {
        let c_to_f = crate::convert("Temperature", "Celsius", "Fahrenheit", 0.625).unwrap();
        assert_eq!(c_to_f, 33.125);
        assert_eq!(format_result("Temperature", Some(c_to_f)), "33.13");
        assert_eq!(format_result("Temperature", Some(0.125)), "0.13");
        assert_eq!(format_result("Temperature", Some(-0.125)), "-0.13");

        let km = crate::convert("Length", "Meter", "Kilometer", 62.5).unwrap();
        assert_eq!(km, 0.0625);
        assert_eq!(format_result("Length", Some(km)), "0.063");
        assert_eq!(format_result("Length", Some(-0.0625)), "-0.063");
    }

    #[test]
    fn test_fixed_uses_exact_binary_value() {
        // 1.005 is stored just below the tie
        assert_eq!(format_result("Temperature", Some(1.005)), "1.00");
        assert_eq!(format_result("Temperature", Some(99.995)), "100.00");
    }

    #[test]
    fn test_grouped_uses_shortest_decimal() {
        assert_eq!(format_result("Length", Some(1.0005)), "1.001");
        assert_eq!(format_result("Length", Some(999.9996)), "1,000");
    }

    #[test]
    fn test_round_half_up_carries() {
        assert_eq!(round_half_up("9.995", 2), ("10".to_string(), "00".to_string()));
        assert_eq!(round_half_up("12", 2), ("12".to_string(), "00".to_string()));
        assert_eq!(round_half_up("0.5", 0), ("1".to_string(), String::new()));
        assert_eq!(round_half_up("0.4999", 0), ("0".to_string(), String::new()));
    }

    #[test]
    fn test_placeholder() {
        assert_eq!(format_result("Length", None), "...");
        assert_eq!(format_result("Length", Some(f64::NAN)), "...");
        assert_eq!(format_result("Temperature", Some(f64::INFINITY)), "...");
    }

    #[test]
    fn test_unknown_category_formats_as_linear() {
        assert_eq!(format_result("Money", Some(1234.5)), "1,234.5");
    }

    #[test]
    fn test_custom_options() {
        let options = FormatOptions::default()
            .with_max_fraction_digits(1)
            .with_placeholder("n/a");
        assert_eq!(options.format(RuleKind::Linear, Some(1609.344)), "1,609.3");
        assert_eq!(options.format(RuleKind::Linear, None), "n/a");
        assert_eq!(options.format(RuleKind::Affine, Some(1.0)), "1.00");
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands("1"), "1");
        assert_eq!(group_thousands("1234"), "1,234");
        assert_eq!(group_thousands("123456"), "123,456");
        assert_eq!(group_thousands("1234567"), "1,234,567");
    }
}
