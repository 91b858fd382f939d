//! Server configuration from environment variables

use solverhub_plugin::EvalContext;
use std::str::FromStr;
use tracing::Level;

pub const ENV_LOG: &str = "SOLVERHUB_LOG";
pub const ENV_MAX_FRACTION_DIGITS: &str = "SOLVERHUB_MAX_FRACTION_DIGITS";
pub const ENV_PLACEHOLDER: &str = "SOLVERHUB_PLACEHOLDER";

const MAX_FRACTION_DIGITS_LIMIT: usize = 20;

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub log_level: Level,
    pub max_fraction_digits: usize,
    pub placeholder: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            log_level: Level::INFO,
            max_fraction_digits: solverhub_plugin::DEFAULT_FRACTION_DIGITS,
            placeholder: solverhub_plugin::DEFAULT_PLACEHOLDER.to_string(),
        }
    }
}

impl ServerConfig {
    /// Read configuration from the process environment. Returns the
    /// config plus warnings for values that were ignored; logging is not
    /// set up yet when this runs.
    pub fn from_env() -> (Self, Vec<String>) {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> (Self, Vec<String>)
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = ServerConfig::default();
        let mut warnings = Vec::new();

        if let Some(raw) = lookup(ENV_LOG) {
            match Level::from_str(raw.trim()) {
                Ok(level) => config.log_level = level,
                Err(_) => warnings.push(format!("{}: unknown level '{}', using {}", ENV_LOG, raw, config.log_level)),
            }
        }

        if let Some(raw) = lookup(ENV_MAX_FRACTION_DIGITS) {
            match raw.trim().parse::<usize>() {
                Ok(digits) if digits <= MAX_FRACTION_DIGITS_LIMIT => config.max_fraction_digits = digits,
                Ok(digits) => {
                    config.max_fraction_digits = MAX_FRACTION_DIGITS_LIMIT;
                    warnings.push(format!("{}: {} clamped to {}", ENV_MAX_FRACTION_DIGITS, digits, MAX_FRACTION_DIGITS_LIMIT));
                }
                Err(_) => warnings.push(format!(
                    "{}: '{}' is not a digit count, using {}",
                    ENV_MAX_FRACTION_DIGITS, raw, config.max_fraction_digits
                )),
            }
        }

        if let Some(raw) = lookup(ENV_PLACEHOLDER) {
            config.placeholder = raw;
        }

        (config, warnings)
    }

    /// Apply display settings to an evaluation context
    pub fn apply(&self, ctx: EvalContext) -> EvalContext {
        ctx.with_fraction_digits(self.max_fraction_digits)
            .with_placeholder(self.placeholder.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let (config, warnings) = ServerConfig::from_lookup(lookup(&[]));
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.max_fraction_digits, 3);
        assert_eq!(config.placeholder, "...");
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_reads_values() {
        let (config, warnings) = ServerConfig::from_lookup(lookup(&[
            (ENV_LOG, "debug"),
            (ENV_MAX_FRACTION_DIGITS, "5"),
            (ENV_PLACEHOLDER, "--"),
        ]));
        assert_eq!(config.log_level, Level::DEBUG);
        assert_eq!(config.max_fraction_digits, 5);
        assert_eq!(config.placeholder, "--");
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let (config, warnings) = ServerConfig::from_lookup(lookup(&[
            (ENV_LOG, "loud"),
            (ENV_MAX_FRACTION_DIGITS, "many"),
        ]));
        assert_eq!(config.log_level, Level::INFO);
        assert_eq!(config.max_fraction_digits, 3);
        assert_eq!(warnings.len(), 2);
    }

    #[test]
    fn test_fraction_digits_clamped() {
        let (config, warnings) = ServerConfig::from_lookup(lookup(&[(ENV_MAX_FRACTION_DIGITS, "99")]));
        assert_eq!(config.max_fraction_digits, MAX_FRACTION_DIGITS_LIMIT);
        assert_eq!(warnings.len(), 1);
    }
}
