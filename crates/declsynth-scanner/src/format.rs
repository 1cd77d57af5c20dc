//! Canonical type strings.
//!
//! The scanner stores every type as the string produced here, and the
//! synthesizer compares those strings structurally, so the rendering must be
//! stable:
//!
//! | Shape | Rendering |
//! |-------|-----------|
//! | ident / selector | `int`, `people.Person` |
//! | pointer / ellipsis | `*T`, `...T` |
//! | array | `[]T`, `[4]T` |
//! | map | `map[K]V` |
//! | chan | `chan T`, `chan<- T`, `<-chan T` |
//! | func | `func(a,b) r`, `func(a) (r1,r2)` |
//! | interface | `interface{}` |
//! | struct | `struct {\nname T\n}` |

use crate::feed::{ChanDir, FeedField, TypeExpr};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// The shape has no canonical rendering.
    UnsupportedType { shape: String },
    /// A selector whose qualifier is not a plain identifier.
    IllegalFieldType { shape: String },
    /// A parameter or result of a function type failed to format.
    IllegalFuncType {
        position: String,
        source: Box<FormatError>,
    },
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::UnsupportedType { shape } => write!(f, "unsupported type: {}", shape),
            FormatError::IllegalFieldType { shape } => {
                write!(f, "unsupported field type: {}", shape)
            }
            FormatError::IllegalFuncType { position, source } => {
                write!(f, "illegal func type at {}: {}", position, source)
            }
        }
    }
}

impl std::error::Error for FormatError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FormatError::IllegalFuncType { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

/// Renders type expressions into canonical strings.
pub trait TypeFormatter {
    fn format(&self, expr: &TypeExpr) -> Result<String, FormatError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CanonicalFormatter;

impl TypeFormatter for CanonicalFormatter {
    fn format(&self, expr: &TypeExpr) -> Result<String, FormatError> {
        format_type(expr)
    }
}

pub fn format_type(expr: &TypeExpr) -> Result<String, FormatError> {
    match expr {
        TypeExpr::Ident { name } => Ok(name.clone()),
        TypeExpr::Selector { x, sel } => match x.as_ref() {
            TypeExpr::Ident { name } => Ok(format!("{}.{}", name, sel)),
            other => Err(FormatError::IllegalFieldType {
                shape: other.shape().to_string(),
            }),
        },
        TypeExpr::Pointer { elem } => Ok(format!("*{}", format_type(elem)?)),
        TypeExpr::Ellipsis { elem } => Ok(format!("...{}", format_type(elem)?)),
        TypeExpr::Array { len, elem } => Ok(format!(
            "[{}]{}",
            len.as_deref().unwrap_or(""),
            format_type(elem)?
        )),
        TypeExpr::Map { key, value } => {
            Ok(format!("map[{}]{}", format_type(key)?, format_type(value)?))
        }
        TypeExpr::Chan { dir, elem } => {
            let elem = format_type(elem)?;
            Ok(match dir {
                ChanDir::Both => format!("chan {}", elem),
                ChanDir::Send => format!("chan<- {}", elem),
                ChanDir::Recv => format!("<-chan {}", elem),
            })
        }
        TypeExpr::Func { params, results } => format_func(params, results),
        TypeExpr::Interface { .. } => Ok("interface{}".to_string()),
        TypeExpr::Struct { fields } => {
            let mut out = String::from("struct {\n");
            for field in fields {
                let ty = format_type(&field.ty)?;
                if field.names.is_empty() {
                    out.push_str(&ty);
                } else {
                    out.push_str(&format!("{} {}", field.names.join(", "), ty));
                }
                out.push('\n');
            }
            out.push('}');
            Ok(out)
        }
        TypeExpr::Other { node } => Err(FormatError::UnsupportedType {
            shape: node.clone(),
        }),
    }
}

fn format_func(params: &[FeedField], results: &[FeedField]) -> Result<String, FormatError> {
    let params = format_list(params, "param")?;
    let results = format_list(results, "result")?;
    let tail = match results.len() {
        0 => String::new(),
        1 => format!(" {}", results[0]),
        _ => format!(" ({})", results.join(",")),
    };
    Ok(format!("func({}){}", params.join(","), tail))
}

/// Formats a field list, one entry per declared name.
fn format_list(fields: &[FeedField], label: &str) -> Result<Vec<String>, FormatError> {
    let mut out = Vec::new();
    for (i, field) in fields.iter().enumerate() {
        let ty = format_type(&field.ty).map_err(|e| FormatError::IllegalFuncType {
            position: format!("{} {}", label, i),
            source: Box::new(e),
        })?;
        let count = field.names.len().max(1);
        out.extend(std::iter::repeat(ty).take(count));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ident(name: &str) -> Box<TypeExpr> {
        Box::new(TypeExpr::ident(name))
    }

    fn field(names: &[&str], ty: TypeExpr) -> FeedField {
        FeedField {
            names: names.iter().map(|s| s.to_string()).collect(),
            ty,
            doc: vec![],
        }
    }

    #[test]
    fn test_format_composite_types() {
        let map = TypeExpr::Map {
            key: ident("string"),
            value: Box::new(TypeExpr::Pointer {
                elem: Box::new(TypeExpr::Selector {
                    x: ident("people"),
                    sel: "Person".into(),
                }),
            }),
        };
        assert_eq!(format_type(&map).unwrap(), "map[string]*people.Person");

        let slice = TypeExpr::Array {
            len: None,
            elem: ident("byte"),
        };
        assert_eq!(format_type(&slice).unwrap(), "[]byte");

        let chan = TypeExpr::Chan {
            dir: ChanDir::Recv,
            elem: ident("int"),
        };
        assert_eq!(format_type(&chan).unwrap(), "<-chan int");

        assert_eq!(
            format_type(&TypeExpr::Interface { methods: vec![] }).unwrap(),
            "interface{}"
        );
    }

    #[test]
    fn test_format_func_types() {
        let single = TypeExpr::Func {
            params: vec![field(&["a", "b"], TypeExpr::ident("int"))],
            results: vec![field(&[], TypeExpr::ident("string"))],
        };
        assert_eq!(format_type(&single).unwrap(), "func(int,int) string");

        let multi = TypeExpr::Func {
            params: vec![field(
                &["names"],
                TypeExpr::Ellipsis {
                    elem: ident("string"),
                },
            )],
            results: vec![
                field(&[], TypeExpr::ident("bool")),
                field(&[], TypeExpr::ident("error")),
            ],
        };
        assert_eq!(format_type(&multi).unwrap(), "func(...string) (bool,error)");
    }

    #[test]
    fn test_format_struct_type() {
        let st = TypeExpr::Struct {
            fields: vec![field(&["Name"], TypeExpr::ident("string"))],
        };
        assert_eq!(format_type(&st).unwrap(), "struct {\nName string\n}");
    }

    #[test]
    fn test_unsupported_shapes_fail_explicitly() {
        let other = TypeExpr::Other {
            node: "IndexExpr".into(),
        };
        assert_eq!(
            format_type(&other).unwrap_err().to_string(),
            "unsupported type: IndexExpr"
        );

        let bad_selector = TypeExpr::Selector {
            x: Box::new(TypeExpr::Pointer { elem: ident("a") }),
            sel: "B".into(),
        };
        assert!(matches!(
            format_type(&bad_selector),
            Err(FormatError::IllegalFieldType { .. })
        ));

        let bad_func = TypeExpr::Func {
            params: vec![],
            results: vec![field(&[], other)],
        };
        let err = format_type(&bad_func).unwrap_err();
        assert_eq!(
            err.to_string(),
            "illegal func type at result 0: unsupported type: IndexExpr"
        );
    }
}
