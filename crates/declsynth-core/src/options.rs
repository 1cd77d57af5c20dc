//! Options for building one action.

use declsynth_types::config::{env_bool_or, STRICT_TYPES_ENV};
use declsynth_types::Object;

#[derive(Debug, Clone, Default)]
pub struct ComposeOptions {
    /// Variables already declared before the first step.
    pub vars: Vec<Object>,
    /// Predefines added on top of the builder's own.
    pub predefines: Vec<Object>,
    /// Turn argument type mismatches into errors instead of diagnostics.
    pub strict_types: bool,
}

impl ComposeOptions {
    /// Defaults overridden by `DECLSYNTH_STRICT_TYPES`.
    pub fn from_env() -> Self {
        Self {
            strict_types: env_bool_or(STRICT_TYPES_ENV, false),
            ..Default::default()
        }
    }

    pub fn with_vars(mut self, vars: impl IntoIterator<Item = Object>) -> Self {
        self.vars.extend(vars);
        self
    }

    pub fn with_predefines(mut self, predefines: impl IntoIterator<Item = Object>) -> Self {
        self.predefines.extend(predefines);
        self
    }

    pub fn with_strict_types(mut self, strict: bool) -> Self {
        self.strict_types = strict;
        self
    }
}
