//! Structured errors for tool callers
//!
//! Errors never crash the system. They are values handed back to the
//! caller with a machine-readable code and, where possible, a hint on
//! how to fix the request.

use serde::{Deserialize, Serialize};

/// Standard error codes (machine-readable)
pub mod codes {
    pub const UNKNOWN_CATEGORY: &str = "UNKNOWN_CATEGORY";
    pub const UNKNOWN_UNIT: &str = "UNKNOWN_UNIT";
    pub const UNSUPPORTED_CONVERSION: &str = "UNSUPPORTED_CONVERSION";
    pub const INVALID_VALUE: &str = "INVALID_VALUE";
    pub const UNDEFINED_FUNC: &str = "UNDEFINED_FUNC";
    pub const ARG_COUNT: &str = "ARG_COUNT";
    pub const ARG_TYPE: &str = "ARG_TYPE";
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const INTERNAL: &str = "INTERNAL";
}

/// Severity level of an error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// The request failed
    Error,
    /// The service itself is in a bad state
    Fatal,
}

/// Structured error returned to callers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolverError {
    /// Machine-readable error code
    pub code: String,

    /// Human-readable error message
    pub message: String,

    /// Suggestion for fixing the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,

    /// Severity level
    pub severity: Severity,
}

impl SolverError {
    /// Create a new error
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            suggestion: None,
            severity: Severity::Error,
        }
    }

    /// Builder: add suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Builder: set severity
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    // ========== Conversion Error Constructors ==========

    pub fn unknown_category(name: &str) -> Self {
        Self::new(codes::UNKNOWN_CATEGORY, format!("Unknown category: {}", name))
            .with_suggestion("Use list_categories() to see available categories")
    }

    pub fn unknown_unit(category: &str, unit: &str) -> Self {
        Self::new(codes::UNKNOWN_UNIT, format!("Unknown unit '{}' in category {}", unit, category))
            .with_suggestion(format!("Use list_units('{}') to see available units", category))
    }

    pub fn unsupported_conversion(category: &str, from: &str, to: &str) -> Self {
        Self::new(codes::UNSUPPORTED_CONVERSION,
            format!("No {} conversion defined from {} to {}", category, from, to))
    }

    pub fn invalid_value(details: impl Into<String>) -> Self {
        Self::new(codes::INVALID_VALUE, format!("Invalid value: {}", details.into()))
            .with_suggestion("Provide a finite number")
    }

    // ========== Call Error Constructors ==========

    pub fn undefined_func(name: &str) -> Self {
        Self::new(codes::UNDEFINED_FUNC, format!("Unknown function: {}", name))
            .with_suggestion("Use help() to list available functions")
    }

    pub fn arg_count(func: &str, expected: usize, got: usize) -> Self {
        Self::new(codes::ARG_COUNT,
            format!("{}() expects {} arguments, got {}", func, expected, got))
            .with_suggestion(format!("Use help('{}') for usage", func))
    }

    pub fn arg_type(func: &str, arg: &str, expected: &str, got: &str) -> Self {
        Self::new(codes::ARG_TYPE,
            format!("{}() argument '{}': expected {}, got {}", func, arg, expected, got))
    }

    pub fn internal(details: impl Into<String>) -> Self {
        Self::new(codes::INTERNAL, format!("Internal error: {}", details.into()))
            .with_suggestion("This is a bug, please report it")
            .with_severity(Severity::Fatal)
    }
}

impl std::fmt::Display for SolverError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref suggestion) = self.suggestion {
            write!(f, " (suggestion: {})", suggestion)?;
        }
        Ok(())
    }
}

impl std::error::Error for SolverError {}
