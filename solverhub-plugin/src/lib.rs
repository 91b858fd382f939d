//! SolverHub Plugin System
//!
//! Tools are exposed as pure function plugins. Each plugin carries
//! metadata (arguments, examples, category) so callers can discover
//! and document them at runtime.

mod traits;
mod registry;
mod context;

pub use traits::{FunctionPlugin, FunctionMeta, ArgMeta};
pub use registry::PluginRegistry;
pub use context::{EvalContext, DEFAULT_FRACTION_DIGITS, DEFAULT_PLACEHOLDER};

/// Re-export core types for plugin authors
pub mod prelude {
    pub use crate::{
        FunctionPlugin, FunctionMeta, ArgMeta,
        PluginRegistry, EvalContext,
    };
    pub use solverhub_core::prelude::*;
}
