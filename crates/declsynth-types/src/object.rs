//! Resolved symbol references used while synthesizing statements.

use crate::decl::Field;
use crate::path::SymbolPath;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where an [`Object`] lives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectScope {
    #[default]
    Local,
    Struct,
    Package,
    /// Instance named for the receiver of a method call.
    Receiver,
}

/// A named, typed symbol visible to a step: a predefine, a variable declared
/// by an earlier step, a receiver instance, or a struct field reached through
/// a dotted name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Object {
    pub name: String,
    #[serde(rename = "type", default)]
    pub ty: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub doc: String,
    #[serde(default)]
    pub scope: ObjectScope,
    #[serde(default, skip_serializing_if = "SymbolPath::is_empty")]
    pub path: SymbolPath,
}

impl Object {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            ..Default::default()
        }
    }

    pub fn with_path(mut self, path: SymbolPath) -> Self {
        self.path = path;
        self
    }

    pub fn with_scope(mut self, scope: ObjectScope) -> Self {
        self.scope = scope;
        self
    }

    pub fn is_receiver(&self) -> bool {
        self.scope == ObjectScope::Receiver
    }

    /// Object for a struct member reached from its owner.
    pub fn from_field(field: &Field) -> Self {
        Self {
            name: field.name.clone(),
            ty: field.ty.clone(),
            doc: field.doc.clone(),
            scope: ObjectScope::Struct,
            path: field.path.clone(),
        }
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.ty)?;
        if !self.path.is_empty() {
            write!(f, " ({})", self.path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_from_field_is_struct_scoped() {
        let field = Field {
            path: SymbolPath::from_segments(["p", "a.go", "Person", "Name"]),
            name: "Name".into(),
            ty: "string".into(),
            doc: "display name".into(),
        };
        let obj = Object::from_field(&field);
        assert_eq!(obj.scope, ObjectScope::Struct);
        assert_eq!(obj.ty, "string");
        assert_eq!(obj.doc, "display name");
        assert_eq!(obj.path, field.path);
    }

    #[test]
    fn test_object_deserializes_with_defaults() {
        let obj: Object = serde_json::from_value(serde_json::json!({
            "name": "a1",
            "type": "string"
        }))
        .unwrap();
        assert_eq!(obj, Object::new("a1", "string"));
        assert_eq!(obj.to_string(), "a1 string");
    }
}
