//! Evaluation Context

use crate::PluginRegistry;
use solverhub_core::Value;
use std::sync::Arc;

/// Default upper bound on fraction digits for grouped display
pub const DEFAULT_FRACTION_DIGITS: usize = 3;

/// Default text shown when a result cannot be displayed
pub const DEFAULT_PLACEHOLDER: &str = "...";

/// Evaluation context passed to plugins
pub struct EvalContext {
    /// Maximum fraction digits used when rendering grouped numbers
    pub fraction_digits: usize,
    /// Text rendered in place of a result that is not a number
    pub placeholder: String,
    pub registry: Arc<PluginRegistry>,
}

impl EvalContext {
    pub fn new(registry: Arc<PluginRegistry>) -> Self {
        Self {
            fraction_digits: DEFAULT_FRACTION_DIGITS,
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            registry,
        }
    }

    pub fn with_fraction_digits(mut self, digits: usize) -> Self {
        self.fraction_digits = digits;
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Call another registered function by name
    pub fn call(&self, name: &str, args: &[Value]) -> Value {
        self.registry.call_function(name, args, self)
    }
}
