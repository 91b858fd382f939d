//! Plugin Registry

use crate::{EvalContext, FunctionMeta, FunctionPlugin};
use solverhub_core::{SolverError, Value};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Central plugin registry
pub struct PluginRegistry {
    functions: HashMap<String, Arc<dyn FunctionPlugin>>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self {
            functions: HashMap::new(),
        }
    }

    pub fn with_function<F: FunctionPlugin + 'static>(mut self, f: F) -> Self {
        let name = f.meta().name.to_lowercase();
        self.functions.insert(name, Arc::new(f));
        self
    }

    pub fn get_function(&self, name: &str) -> Option<&dyn FunctionPlugin> {
        self.functions.get(&name.to_lowercase()).map(|f| f.as_ref())
    }

    /// Sorted names of every registered function
    pub fn function_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.functions.keys().cloned().collect();
        names.sort();
        names
    }

    /// Call a function by name. Unknown names produce `UNDEFINED_FUNC`
    /// with the closest registered names as a hint.
    pub fn call_function(&self, name: &str, args: &[Value], ctx: &EvalContext) -> Value {
        if let Some(f) = self.get_function(name) {
            return f.call(args, ctx);
        }

        let err = SolverError::undefined_func(name);
        let similar = self.similar_names(name, 3);
        if similar.is_empty() {
            return Value::Error(err);
        }
        Value::Error(err.with_suggestion(format!("Similar: {}", similar.join(", "))))
    }

    /// Registered names closest to `name`, best first
    pub fn similar_names(&self, name: &str, limit: usize) -> Vec<String> {
        let query = name.to_lowercase();
        let mut scored: Vec<(usize, &String)> = self.functions.keys()
            .map(|candidate| (closeness(&query, candidate), candidate))
            .filter(|(score, _)| *score > 0)
            .collect();

        scored.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(b.1)));
        scored.into_iter().take(limit).map(|(_, n)| n.clone()).collect()
    }

    pub fn help(&self, name: Option<&str>) -> Value {
        match name {
            Some(n) => self.help_for(n),
            None => self.general_help(),
        }
    }

    fn help_for(&self, name: &str) -> Value {
        match self.functions.get(&name.to_lowercase()) {
            Some(f) => Value::Object(Self::function_to_help(f.meta())),
            None => Value::Error(SolverError::new(
                solverhub_core::codes::NOT_FOUND,
                format!("No function named '{}'", name),
            )),
        }
    }

    fn general_help(&self) -> Value {
        let mut funcs_by_cat: HashMap<String, Vec<String>> = HashMap::new();
        for name in self.function_names() {
            if let Some(f) = self.functions.get(&name) {
                funcs_by_cat.entry(f.meta().category.to_string()).or_default().push(name);
            }
        }

        let mut help = HashMap::new();
        help.insert("functions".to_string(),
            Value::Object(funcs_by_cat.into_iter()
                .map(|(k, v)| (k, Value::List(v.into_iter().map(Value::Text).collect())))
                .collect()));
        help.insert("usage".to_string(),
            Value::Text("Call help('function_name') for detailed help.".to_string()));

        Value::Object(help)
    }

    fn function_to_help(meta: FunctionMeta) -> HashMap<String, Value> {
        let mut help = HashMap::new();
        help.insert("name".to_string(), Value::Text(meta.name.to_string()));
        help.insert("description".to_string(), Value::Text(meta.description.to_string()));
        help.insert("usage".to_string(), Value::Text(meta.usage.to_string()));
        help.insert("returns".to_string(), Value::Text(meta.returns.to_string()));
        help.insert("category".to_string(), Value::Text(meta.category.to_string()));
        help.insert("args".to_string(), Value::List(
            meta.args.iter().map(|a| {
                let mut arg = HashMap::new();
                arg.insert("name".to_string(), Value::Text(a.name.to_string()));
                arg.insert("type".to_string(), Value::Text(a.typ.to_string()));
                arg.insert("description".to_string(), Value::Text(a.description.to_string()));
                arg.insert("optional".to_string(), Value::Bool(a.optional));
                Value::Object(arg)
            }).collect()
        ));
        help.insert("examples".to_string(), Value::List(
            meta.examples.iter().map(|e| Value::Text(e.to_string())).collect()
        ));
        help.insert("related".to_string(), Value::List(
            meta.related.iter().map(|r| Value::Text(r.to_string())).collect()
        ));
        help
    }
}

impl Default for PluginRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared prefix weighs more than shared letters. Zero when fewer than
/// half of the query's letters occur in the candidate.
fn closeness(query: &str, candidate: &str) -> usize {
    let letters: HashSet<char> = candidate.chars().collect();
    let shared = query.chars().filter(|c| letters.contains(c)).count();
    if shared * 2 < query.chars().count() {
        return 0;
    }

    let prefix = query.chars().zip(candidate.chars())
        .take_while(|(a, b)| a == b)
        .count();
    prefix * 10 + shared
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ArgMeta;

    struct Double;

    static DOUBLE_ARGS: [ArgMeta; 1] = [ArgMeta::required("x", "Number", "Value to double")];

    impl FunctionPlugin for Double {
        fn meta(&self) -> FunctionMeta {
            FunctionMeta {
                name: "double",
                description: "Double a number",
                usage: "double(x)",
                args: &DOUBLE_ARGS,
                returns: "Number",
                examples: &["double(2) → 4"],
                category: "test",
                related: &[],
            }
        }

        fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
            match args.first().and_then(Value::as_number) {
                Some(x) => Value::Number(x * 2.0),
                None => Value::Error(SolverError::arg_count("double", 1, args.len())),
            }
        }
    }

    fn ctx() -> EvalContext {
        EvalContext::new(Arc::new(PluginRegistry::new().with_function(Double)))
    }

    #[test]
    fn test_call_is_case_insensitive() {
        let ctx = ctx();
        assert_eq!(ctx.call("DOUBLE", &[Value::Number(2.0)]), Value::Number(4.0));
    }

    #[test]
    fn test_unknown_function_suggests_similar() {
        let ctx = ctx();
        let result = ctx.call("doubel", &[]);
        let err = result.as_error().unwrap();
        assert_eq!(err.code, solverhub_core::codes::UNDEFINED_FUNC);
        assert!(err.suggestion.as_deref().unwrap().contains("double"));
    }

    #[test]
    fn test_help_for_function() {
        let ctx = ctx();
        let help = ctx.registry.help(Some("double"));
        let obj = help.as_object().unwrap();
        assert_eq!(obj.get("usage").and_then(Value::as_text), Some("double(x)"));
        assert_eq!(obj.get("args").and_then(Value::as_list).map(|a| a.len()), Some(1));
    }

    #[test]
    fn test_help_for_missing_function() {
        let ctx = ctx();
        assert!(ctx.registry.help(Some("nope")).is_error());
    }

    #[test]
    fn test_unrelated_name_has_no_hint() {
        let ctx = ctx();
        let result = ctx.call("xyz", &[]);
        let suggestion = result.as_error().unwrap().suggestion.as_deref().unwrap();
        assert!(!suggestion.contains("Similar"));
    }

    #[test]
    fn test_closeness_prefers_shared_prefix() {
        assert!(closeness("convrt", "convert") > closeness("convrt", "format_conversion"));
        assert_eq!(closeness("xyz", "double"), 0);
    }

    #[test]
    fn test_required_count() {
        let args = [
            ArgMeta::required("a", "Number", "a"),
            ArgMeta::optional("b", "Text", "b", "x"),
        ];
        assert_eq!(ArgMeta::required_count(&args), 1);
    }
}
