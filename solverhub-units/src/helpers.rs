//! Argument extraction for unit functions

use solverhub_core::{SolverError, Value};
use solverhub_plugin::ArgMeta;

/// Fail when fewer than the required arguments were supplied
pub fn check_arg_count(args: &[Value], func: &str, meta: &[ArgMeta]) -> Result<(), SolverError> {
    let required = ArgMeta::required_count(meta);
    if args.len() < required {
        return Err(SolverError::arg_count(func, required, args.len()));
    }
    Ok(())
}

/// Extract a Text string from a Value
pub fn extract_text<'a>(value: &'a Value, func: &str, arg: &str) -> Result<&'a str, SolverError> {
    match value {
        Value::Text(s) => Ok(s),
        Value::Error(e) => Err(e.clone()),
        other => Err(SolverError::arg_type(func, arg, "Text", other.type_name())),
    }
}

/// Extract a number. Numeric text is accepted; text that does not parse
/// is an invalid value rather than a type error, since it is what a user
/// typed into a form.
pub fn extract_value(value: &Value, func: &str, arg: &str) -> Result<f64, SolverError> {
    match value {
        Value::Number(n) => Ok(*n),
        Value::Text(s) => value.to_number()
            .ok_or_else(|| SolverError::invalid_value(format!("'{}' is not a number", s))),
        Value::Error(e) => Err(e.clone()),
        other => Err(SolverError::arg_type(func, arg, "Number", other.type_name())),
    }
}
