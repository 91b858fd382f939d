//! Unit conversion functions exposed as plugins

use solverhub_plugin::prelude::*;
use crate::convert::Converter;
use crate::format::FormatOptions;
use crate::helpers::{check_arg_count, extract_text, extract_value};
use crate::units::UNITS;

/// Shared argument list for convert-style functions
static CONVERSION_ARGS: [ArgMeta; 4] = [
    ArgMeta::required("category", "Text", "Unit category (e.g., \"Length\")"),
    ArgMeta::required("from_unit", "Text", "Source unit (e.g., \"Meter\")"),
    ArgMeta::required("to_unit", "Text", "Target unit (e.g., \"Kilometer\")"),
    ArgMeta::required("value", "Number", "Value to convert"),
];

struct ConversionRequest<'a> {
    category: &'a str,
    from: &'a str,
    to: &'a str,
    value: f64,
}

fn conversion_request<'a>(args: &'a [Value], func: &str) -> Result<ConversionRequest<'a>, SolverError> {
    check_arg_count(args, func, &CONVERSION_ARGS)?;
    Ok(ConversionRequest {
        category: extract_text(&args[0], func, "category")?,
        from: extract_text(&args[1], func, "from_unit")?,
        to: extract_text(&args[2], func, "to_unit")?,
        value: extract_value(&args[3], func, "value")?,
    })
}

// ============ convert ============

pub struct Convert;

static CONVERT_EXAMPLES: [&str; 3] = [
    "convert(\"Length\", \"Meter\", \"Kilometer\", 1500) → 1.5",
    "convert(\"Temperature\", \"Celsius\", \"Fahrenheit\", 100) → 212",
    "convert(\"Weight\", \"Pound\", \"Kilogram\", 1) → 0.45359237",
];

static CONVERT_RELATED: [&str; 3] = ["format_conversion", "list_units", "list_categories"];

impl FunctionPlugin for Convert {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "convert",
            description: "Convert a value from one unit to another within a category",
            usage: "convert(category, from_unit, to_unit, value)",
            args: &CONVERSION_ARGS,
            returns: "Number",
            examples: &CONVERT_EXAMPLES,
            category: "units",
            related: &CONVERT_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        let req = match conversion_request(args, "convert") {
            Ok(r) => r,
            Err(e) => return Value::Error(e),
        };

        match Converter::default().convert(req.category, req.from, req.to, req.value) {
            Ok(result) => Value::Number(result),
            Err(e) => Value::Error(e.into()),
        }
    }
}

// ============ format_conversion ============

pub struct FormatConversion;

static FORMAT_CONVERSION_EXAMPLES: [&str; 3] = [
    "format_conversion(\"Length\", \"Mile\", \"Meter\", 1) → \"1,609.344\"",
    "format_conversion(\"Temperature\", \"Celsius\", \"Fahrenheit\", 37) → \"98.60\"",
    "format_conversion(\"Length\", \"Meter\", \"Foot\", \"abc\") → \"...\"",
];

static FORMAT_CONVERSION_RELATED: [&str; 1] = ["convert"];

impl FunctionPlugin for FormatConversion {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "format_conversion",
            description: "Convert a value and render it for display; failures render as a placeholder",
            usage: "format_conversion(category, from_unit, to_unit, value)",
            args: &CONVERSION_ARGS,
            returns: "Text",
            examples: &FORMAT_CONVERSION_EXAMPLES,
            category: "units",
            related: &FORMAT_CONVERSION_RELATED,
        }
    }

    fn call(&self, args: &[Value], ctx: &EvalContext) -> Value {
        let options = FormatOptions::default()
            .with_max_fraction_digits(ctx.fraction_digits)
            .with_placeholder(ctx.placeholder.clone());

        let result = conversion_request(args, "format_conversion").ok()
            .and_then(|req| {
                let kind = UNITS.category(req.category)?.rule_kind();
                let value = Converter::default().convert(req.category, req.from, req.to, req.value).ok()?;
                Some(options.format(kind, Some(value)))
            });

        Value::Text(result.unwrap_or(options.placeholder))
    }
}

// ============ list_units ============

pub struct ListUnits;

static LIST_UNITS_ARGS: [ArgMeta; 1] = [
    ArgMeta::required("category", "Text", "Unit category"),
];

static LIST_UNITS_EXAMPLES: [&str; 1] = [
    "list_units(\"Temperature\") → [Celsius, Fahrenheit, Kelvin]",
];

static LIST_UNITS_RELATED: [&str; 2] = ["list_categories", "convert"];

impl FunctionPlugin for ListUnits {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "list_units",
            description: "List unit names of a category in display order",
            usage: "list_units(category)",
            args: &LIST_UNITS_ARGS,
            returns: "List<Text>",
            examples: &LIST_UNITS_EXAMPLES,
            category: "units",
            related: &LIST_UNITS_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        if let Err(e) = check_arg_count(args, "list_units", &LIST_UNITS_ARGS) {
            return Value::Error(e);
        }

        let category = match extract_text(&args[0], "list_units", "category") {
            Ok(s) => s,
            Err(e) => return Value::Error(e),
        };

        match UNITS.list_units(category) {
            Ok(units) => Value::List(units.into_iter().map(Value::from).collect()),
            Err(e) => Value::Error(e.into()),
        }
    }
}

// ============ list_categories ============

pub struct ListCategories;

static LIST_CATEGORIES_EXAMPLES: [&str; 1] = [
    "list_categories() → [Length, Weight, Temperature, Volume]",
];

static LIST_CATEGORIES_RELATED: [&str; 1] = ["list_units"];

impl FunctionPlugin for ListCategories {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "list_categories",
            description: "List unit categories in display order",
            usage: "list_categories()",
            args: &[],
            returns: "List<Text>",
            examples: &LIST_CATEGORIES_EXAMPLES,
            category: "units",
            related: &LIST_CATEGORIES_RELATED,
        }
    }

    fn call(&self, _args: &[Value], _ctx: &EvalContext) -> Value {
        Value::List(UNITS.list_categories().into_iter().map(Value::from).collect())
    }
}
