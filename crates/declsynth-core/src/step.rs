//! Steps and actions: the input of statement synthesis.
//!
//! An [`Action`] is an ordered list of [`Step`]s, each producing one
//! statement. JSON form of a step:
//!
//! ```json
//! {
//!   "results": [{"name": "rs"}],
//!   "operation": {"type": "func", "func": {"name": "T", "path": ["pkg", "a.go", "Person.T"]}},
//!   "args": [{"value": "a1"}, {"value": "\"literal\""}]
//! }
//! ```

use crate::error::ComposeError;
use declsynth_types::{Field, FuncDecl};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How an argument value is interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    /// A symbol reference, unless the value looks like a literal.
    #[default]
    Object,
    /// Emitted verbatim.
    Const,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// Optional explicit type of the argument.
    #[serde(rename = "type", default, skip_serializing_if = "String::is_empty")]
    pub ty: String,
    pub value: String,
    #[serde(default)]
    pub value_type: ValueType,
}

impl Param {
    pub fn object(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            ..Default::default()
        }
    }

    pub fn constant(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            value_type: ValueType::Const,
            ..Default::default()
        }
    }

    pub fn with_type(mut self, ty: impl Into<String>) -> Self {
        self.ty = ty.into();
        self
    }

    /// Whether the value is emitted verbatim rather than resolved: forced
    /// constants, string literals, booleans and plain integers.
    pub fn is_literal(&self) -> bool {
        match self.value_type {
            ValueType::Const => true,
            ValueType::Object => looks_literal(&self.value),
        }
    }
}

fn looks_literal(value: &str) -> bool {
    value.contains('"')
        || value == "true"
        || value == "false"
        || (!value.is_empty() && value.bytes().all(|b| b.is_ascii_digit()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawOperation", into = "RawOperation")]
pub enum Operation {
    /// Call a scanned function or method.
    Invoke(Box<FuncDecl>),
    Assign,
    /// Binary comparison `arg0 <symbol> arg1`.
    Compare { symbol: String },
    /// `&Type{}`; the single argument names the type.
    New,
}

impl Operation {
    pub fn invoke(func: FuncDecl) -> Self {
        Operation::Invoke(Box::new(func))
    }

    pub fn compare(symbol: impl Into<String>) -> Self {
        Operation::Compare {
            symbol: symbol.into(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Operation::Invoke(_) => "func",
            Operation::Assign => "assign",
            Operation::Compare { .. } => "unary",
            Operation::New => "new",
        }
    }
}

/// Wire form of [`Operation`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawOperation {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub func: Option<FuncDecl>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub unary_symbol: String,
}

impl TryFrom<RawOperation> for Operation {
    type Error = ComposeError;

    fn try_from(raw: RawOperation) -> Result<Self, Self::Error> {
        match raw.kind.as_str() {
            "func" => raw
                .func
                .map(Operation::invoke)
                .ok_or(ComposeError::MissingFunc),
            "assign" => Ok(Operation::Assign),
            "unary" => Ok(Operation::Compare {
                symbol: raw.unary_symbol,
            }),
            "new" => Ok(Operation::New),
            other => Err(ComposeError::UnsupportedOperation(other.to_string())),
        }
    }
}

impl From<Operation> for RawOperation {
    fn from(op: Operation) -> Self {
        let kind = op.kind().to_string();
        match op {
            Operation::Invoke(func) => RawOperation {
                kind,
                func: Some(*func),
                unary_symbol: String::new(),
            },
            Operation::Compare { symbol } => RawOperation {
                kind,
                func: None,
                unary_symbol: symbol,
            },
            Operation::Assign | Operation::New => RawOperation {
                kind,
                func: None,
                unary_symbol: String::new(),
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    #[serde(default)]
    pub results: Vec<Field>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation: Option<Operation>,
    #[serde(default)]
    pub args: Vec<Param>,
}

impl Step {
    pub fn new(operation: Operation) -> Self {
        Self {
            operation: Some(operation),
            ..Default::default()
        }
    }

    pub fn with_result(mut self, name: impl Into<String>) -> Self {
        self.results.push(Field::new(name, ""));
        self
    }

    pub fn with_arg(mut self, arg: Param) -> Self {
        self.args.push(arg);
        self
    }

    pub fn arg_names(&self) -> Vec<&str> {
        self.args.iter().map(|a| a.value.as_str()).collect()
    }

    pub fn result_names(&self) -> Vec<&str> {
        self.results.iter().map(|r| r.name.as_str()).collect()
    }

    /// No operation, no arguments and no results.
    pub fn is_empty(&self) -> bool {
        self.operation.is_none() && self.args.is_empty() && self.results.is_empty()
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = match &self.operation {
            Some(Operation::Invoke(func)) => format!("func {}", func.qualified_name()),
            Some(Operation::Compare { symbol }) => format!("unary {}", symbol),
            Some(op) => op.kind().to_string(),
            None => "assign".to_string(),
        };
        write!(
            f,
            "{}({}) -> [{}]",
            op,
            self.arg_names().join(", "),
            self.result_names().join(", ")
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    #[serde(default)]
    pub steps: Vec<Step>,
}
