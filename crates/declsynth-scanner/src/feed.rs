//! Declaration feed: the parsed form of a package handed to the scanner.
//!
//! A language front-end lowers its syntax tree into this model and
//! serializes it as JSON. Type and value expressions are tagged by `kind`:
//!
//! ```json
//! {"kind": "map", "key": {"kind": "ident", "name": "string"},
//!  "value": {"kind": "pointer", "elem": {"kind": "ident", "name": "Person"}}}
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeedPackage {
    pub name: String,
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub files: Vec<FeedFile>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeedFile {
    pub name: String,
    #[serde(default)]
    pub source: String,
    /// File-level comment lines, delimiters included.
    #[serde(default)]
    pub doc: Vec<String>,
    #[serde(default)]
    pub imports: Vec<FeedImport>,
    #[serde(default)]
    pub types: Vec<FeedTypeSpec>,
    #[serde(default)]
    pub funcs: Vec<FeedFunc>,
    #[serde(default)]
    pub values: Vec<FeedValue>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeedImport {
    #[serde(default)]
    pub name: Option<String>,
    /// Import path as written, quotes included.
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedTypeSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeExpr,
    #[serde(default)]
    pub doc: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeedFunc {
    pub name: String,
    /// Receiver list as parsed; more than one entry is malformed.
    #[serde(default)]
    pub receivers: Vec<FeedField>,
    #[serde(default)]
    pub params: Vec<FeedField>,
    #[serde(default)]
    pub results: Vec<FeedField>,
    #[serde(default)]
    pub doc: Vec<String>,
}

/// One entry of a field list. `a, b int` is a single entry with two names;
/// an embedded field has none.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedField {
    #[serde(default)]
    pub names: Vec<String>,
    #[serde(rename = "type")]
    pub ty: TypeExpr,
    #[serde(default)]
    pub doc: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeedValue {
    pub names: Vec<String>,
    #[serde(rename = "type", default)]
    pub ty: Option<TypeExpr>,
    #[serde(default)]
    pub values: Vec<ValueExpr>,
    #[serde(default)]
    pub doc: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChanDir {
    #[default]
    Both,
    Send,
    Recv,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeExpr {
    Ident {
        name: String,
    },
    Selector {
        x: Box<TypeExpr>,
        sel: String,
    },
    Pointer {
        elem: Box<TypeExpr>,
    },
    Array {
        #[serde(default)]
        len: Option<String>,
        elem: Box<TypeExpr>,
    },
    Ellipsis {
        elem: Box<TypeExpr>,
    },
    Map {
        key: Box<TypeExpr>,
        value: Box<TypeExpr>,
    },
    Chan {
        #[serde(default)]
        dir: ChanDir,
        elem: Box<TypeExpr>,
    },
    Func {
        #[serde(default)]
        params: Vec<FeedField>,
        #[serde(default)]
        results: Vec<FeedField>,
    },
    Interface {
        #[serde(default)]
        methods: Vec<FeedField>,
    },
    Struct {
        #[serde(default)]
        fields: Vec<FeedField>,
    },
    /// A node the front-end could not lower, named by its syntax kind.
    Other {
        node: String,
    },
}

impl TypeExpr {
    pub fn ident(name: impl Into<String>) -> Self {
        TypeExpr::Ident { name: name.into() }
    }

    pub fn shape(&self) -> &str {
        match self {
            TypeExpr::Ident { .. } => "ident",
            TypeExpr::Selector { .. } => "selector",
            TypeExpr::Pointer { .. } => "pointer",
            TypeExpr::Array { .. } => "array",
            TypeExpr::Ellipsis { .. } => "ellipsis",
            TypeExpr::Map { .. } => "map",
            TypeExpr::Chan { .. } => "chan",
            TypeExpr::Func { .. } => "func",
            TypeExpr::Interface { .. } => "interface",
            TypeExpr::Struct { .. } => "struct",
            TypeExpr::Other { node } => node,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LitKind {
    String,
    Int,
    Float,
    Imag,
    Char,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValueExpr {
    BasicLit {
        lit: LitKind,
        value: String,
    },
    Ident {
        name: String,
    },
    Unary {
        op: String,
        x: Box<ValueExpr>,
    },
    Composite {
        #[serde(rename = "type")]
        ty: TypeExpr,
    },
    Selector {
        x: Box<ValueExpr>,
        sel: String,
    },
    Call {
        fun: Box<ValueExpr>,
        #[serde(default)]
        args: Vec<ValueExpr>,
    },
    Other {
        node: String,
    },
}

/// Read a declaration feed from a JSON file.
pub fn read_feed(path: &Path) -> Result<FeedPackage> {
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read declaration feed: {}", path.display()))?;
    parse_feed(&data)
}

pub fn parse_feed(json: &str) -> Result<FeedPackage> {
    serde_json::from_str(json).context("Failed to parse declaration feed JSON")
}
