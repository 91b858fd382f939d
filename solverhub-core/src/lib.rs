//! SolverHub Core - Fundamental types
//!
//! This crate provides the core types shared by the SolverHub crates:
//! - `Value`: Runtime values (numbers, text, lists, objects, errors)
//! - `SolverError`: Structured errors with machine-readable codes

mod value;
mod error;

pub use value::Value;
pub use error::{SolverError, Severity, codes};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{Value, SolverError, Severity};
    pub use crate::error::codes;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_to_number() {
        assert_eq!(Value::Text(" 12.5 ".to_string()).to_number(), Some(12.5));
        assert_eq!(Value::Text("abc".to_string()).to_number(), None);
        assert_eq!(Value::Bool(true).to_number(), None);
    }

    #[test]
    fn test_type_names() {
        assert_eq!(Value::Number(1.0).type_name(), "Number");
        assert_eq!(Value::Null.type_name(), "Null");
        assert_eq!(Value::Error(SolverError::internal("x")).type_name(), "Error");
    }

    #[test]
    fn test_nan_renders_as_json_null() {
        assert_eq!(Value::Number(f64::NAN).to_json(), json!(null));
        assert_eq!(Value::Number(1.5).to_json(), json!(1.5));
    }

    #[test]
    fn test_from_json_list() {
        let v = Value::from_json(&json!(["Meter", 3, null]));
        let list = v.as_list().unwrap();
        assert_eq!(list[0].as_text(), Some("Meter"));
        assert_eq!(list[1].as_number(), Some(3.0));
        assert!(list[2].is_null());
    }

    #[test]
    fn test_error_to_json() {
        let v = Value::Error(SolverError::unknown_unit("Length", "Smoot"));
        let json = v.to_json();
        assert_eq!(json["_error"]["code"], "UNKNOWN_UNIT");
    }

    #[test]
    fn test_list_display() {
        let v = Value::List(vec![Value::from("Celsius"), Value::from("Kelvin")]);
        assert_eq!(v.to_string(), "[Celsius, Kelvin]");
    }
}
