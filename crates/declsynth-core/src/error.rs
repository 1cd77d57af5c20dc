//! Error types for resolution and statement synthesis.

use crate::context::TypeMismatch;
use crate::step::Step;
use std::fmt;

/// Failure to resolve a (possibly dotted) symbol name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    EmptyName,
    /// `segment` did not resolve; `name` is the full reference.
    NotFound { segment: String, name: String },
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveError::EmptyName => write!(f, "empty symbol name"),
            ResolveError::NotFound { segment, name } if segment == name => {
                write!(f, "symbol not found: {}", name)
            }
            ResolveError::NotFound { segment, name } => {
                write!(f, "symbol not found: {} (while resolving {})", segment, name)
            }
        }
    }
}

impl std::error::Error for ResolveError {}

/// Failure of a lookup-based query such as an interface conformance check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    InterfaceNotFound(String),
    TypeNotFound(String),
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupError::InterfaceNotFound(name) => write!(f, "interface not found: {}", name),
            LookupError::TypeNotFound(name) => write!(f, "type not found: {}", name),
        }
    }
}

impl std::error::Error for LookupError {}

/// Errors raised while configuring a builder or synthesizing a step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComposeError {
    DuplicatePredefine(String),
    DuplicateVar(String),
    UnsupportedOperation(String),
    /// An invoke operation without its function record.
    MissingFunc,
    /// A comparison without its operator symbol.
    MissingOperator,
    MissingResults {
        op: &'static str,
    },
    MissingArgs {
        op: &'static str,
    },
    ArgsLength {
        op: &'static str,
        expected: usize,
        got: usize,
    },
    ResultsLength {
        op: &'static str,
        expected: usize,
        got: usize,
    },
    FuncNotFound {
        path: String,
    },
    UnexpectedDecl {
        path: String,
        expected: &'static str,
        found: &'static str,
    },
    /// A function path too short to name its owning package.
    IllegalFuncPath {
        path: String,
    },
    TooManyArguments {
        func: String,
        params: usize,
        got: usize,
    },
    TypeMismatch(TypeMismatch),
    Resolve(ResolveError),
    /// The first failing step of an action, with the step itself.
    Step {
        index: usize,
        step: Box<Step>,
        source: Box<ComposeError>,
    },
}

impl fmt::Display for ComposeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComposeError::DuplicatePredefine(name) => {
                write!(f, "predefined object already exists: {}", name)
            }
            ComposeError::DuplicateVar(name) => write!(f, "var already exists: {}", name),
            ComposeError::UnsupportedOperation(kind) => {
                write!(f, "unsupported operation type: {}", kind)
            }
            ComposeError::MissingFunc => write!(f, "func operation without a function"),
            ComposeError::MissingOperator => write!(f, "unary symbol is empty"),
            ComposeError::MissingResults { op } => {
                write!(f, "{} operation's results must not be empty", op)
            }
            ComposeError::MissingArgs { op } => {
                write!(f, "{} operation's args must not be empty", op)
            }
            ComposeError::ArgsLength { op, expected, got } => write!(
                f,
                "{} operation's args length must be {}, got {}",
                op, expected, got
            ),
            ComposeError::ResultsLength { op, expected, got } => write!(
                f,
                "{} operation's results length must be {}, got {}",
                op, expected, got
            ),
            ComposeError::FuncNotFound { path } => write!(f, "func not found at path: {}", path),
            ComposeError::UnexpectedDecl {
                path,
                expected,
                found,
            } => write!(f, "expected {} at path {}, found {}", expected, path, found),
            ComposeError::IllegalFuncPath { path } => {
                write!(f, "illegal func path: {}", path)
            }
            ComposeError::TooManyArguments { func, params, got } => write!(
                f,
                "too many arguments for {}: {} params, got {}",
                func, params, got
            ),
            ComposeError::TypeMismatch(mismatch) => write!(f, "{}", mismatch),
            ComposeError::Resolve(e) => write!(f, "{}", e),
            ComposeError::Step {
                index,
                step,
                source,
            } => write!(f, "failed to build step #{} ({}): {}", index, step, source),
        }
    }
}

impl std::error::Error for ComposeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ComposeError::Resolve(e) => Some(e),
            ComposeError::Step { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

impl From<ResolveError> for ComposeError {
    fn from(e: ResolveError) -> Self {
        ComposeError::Resolve(e)
    }
}

impl ComposeError {
    /// The innermost error, past any step wrapper.
    pub fn root_cause(&self) -> &ComposeError {
        match self {
            ComposeError::Step { source, .. } => source.root_cause(),
            other => other,
        }
    }
}
