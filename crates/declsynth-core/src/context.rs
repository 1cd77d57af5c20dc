//! Per-action bookkeeping.

use declsynth_types::{Object, TypeDecl};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A package referenced by synthesized code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageRef {
    pub name: String,
    pub id: String,
}

/// An argument whose type did not match the parameter it was passed to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeMismatch {
    pub func: String,
    pub index: usize,
    pub arg: String,
    pub expected: String,
    pub actual: String,
}

impl fmt::Display for TypeMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "type mismatch for argument #{} ({}) of {}: expected {}, got {}",
            self.index, self.arg, self.func, self.expected, self.actual
        )
    }
}

/// Result of synthesizing an action: the code plus the symbols it declares,
/// references and needs.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CodeContext {
    pub code: String,
    pub code_lines: Vec<String>,
    /// Declared by the action's own steps.
    pub vars: BTreeMap<String, Object>,
    /// Referenced by the action: arguments, reused results and receiver
    /// instances.
    pub used: BTreeMap<String, Object>,
    pub predefines: BTreeMap<String, Object>,
    /// Receiver instances and constructed values whose type needs a fresh
    /// instance, keyed by variable name.
    pub required_new_type: BTreeMap<String, TypeDecl>,
    pub imports: BTreeMap<String, PackageRef>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<TypeMismatch>,
}

impl CodeContext {
    pub fn new(predefines: BTreeMap<String, Object>, vars: BTreeMap<String, Object>) -> Self {
        Self {
            predefines,
            vars,
            ..Default::default()
        }
    }

    /// Vars first, then predefines.
    pub fn lookup(&self, name: &str) -> Option<&Object> {
        self.vars.get(name).or_else(|| self.predefines.get(name))
    }

    pub(crate) fn push_line(&mut self, line: String) {
        if !self.code.is_empty() {
            self.code.push('\n');
        }
        self.code.push_str(&line);
        self.code_lines.push(line);
    }

    pub(crate) fn apply(&mut self, delta: ContextDelta) {
        self.vars.extend(delta.vars);
        self.used.extend(delta.used);
        self.imports.extend(delta.imports);
        self.required_new_type.extend(delta.required_new_type);
        self.diagnostics.extend(delta.diagnostics);
    }
}

/// Changes one step makes to the [`CodeContext`], applied once the step
/// has been synthesized successfully.
#[derive(Debug, Clone, Default)]
pub struct ContextDelta {
    pub vars: BTreeMap<String, Object>,
    pub used: BTreeMap<String, Object>,
    pub imports: BTreeMap<String, PackageRef>,
    pub required_new_type: BTreeMap<String, TypeDecl>,
    pub diagnostics: Vec<TypeMismatch>,
}

impl ContextDelta {
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
            && self.used.is_empty()
            && self.imports.is_empty()
            && self.required_new_type.is_empty()
            && self.diagnostics.is_empty()
    }
}
