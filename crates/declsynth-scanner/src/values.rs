//! Rendering of value initializers.

use crate::feed::{LitKind, ValueExpr};
use crate::format::{FormatError, TypeFormatter};

/// Source text of a value initializer and the type it implies (empty when
/// the expression alone does not determine one).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedValue {
    pub text: String,
    pub ty: String,
}

impl RenderedValue {
    fn new(text: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ty: ty.into(),
        }
    }
}

pub fn lit_type(kind: LitKind) -> &'static str {
    match kind {
        LitKind::String => "string",
        LitKind::Int => "int",
        LitKind::Float => "float",
        LitKind::Imag => "imag",
        LitKind::Char => "char",
    }
}

pub fn render_value<F: TypeFormatter + ?Sized>(
    expr: &ValueExpr,
    formatter: &F,
) -> Result<RenderedValue, FormatError> {
    match expr {
        ValueExpr::BasicLit { lit, value } => Ok(RenderedValue::new(value.clone(), lit_type(*lit))),
        ValueExpr::Ident { name } => {
            let ty = match name.as_str() {
                "true" | "false" => "bool",
                _ => "",
            };
            Ok(RenderedValue::new(name.clone(), ty))
        }
        ValueExpr::Unary { op, x } => {
            let inner = render_value(x, formatter)?;
            let ty = if op == "&" && !inner.ty.is_empty() {
                format!("*{}", inner.ty)
            } else {
                inner.ty
            };
            Ok(RenderedValue::new(format!("{}{}", op, inner.text), ty))
        }
        ValueExpr::Composite { ty } => {
            let ty = formatter.format(ty)?;
            Ok(RenderedValue::new(format!("{}{{}}", ty), ty))
        }
        ValueExpr::Selector { x, sel } => {
            let inner = render_value(x, formatter)?;
            Ok(RenderedValue::new(format!("{}.{}", inner.text, sel), ""))
        }
        ValueExpr::Call { fun, args } => {
            let fun = render_value(fun, formatter)?;
            let args = args
                .iter()
                .map(|a| render_value(a, formatter).map(|v| v.text))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(RenderedValue::new(
                format!("{}({})", fun.text, args.join(", ")),
                "",
            ))
        }
        ValueExpr::Other { node } => Err(FormatError::UnsupportedType {
            shape: node.clone(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::TypeExpr;
    use crate::format::CanonicalFormatter;

    fn render(expr: ValueExpr) -> Result<RenderedValue, FormatError> {
        render_value(&expr, &CanonicalFormatter)
    }

    #[test]
    fn test_render_literals() {
        let v = render(ValueExpr::BasicLit {
            lit: LitKind::String,
            value: "\"hi\"".into(),
        })
        .unwrap();
        assert_eq!(v, RenderedValue::new("\"hi\"", "string"));

        let v = render(ValueExpr::Ident {
            name: "true".into(),
        })
        .unwrap();
        assert_eq!(v.ty, "bool");
    }

    #[test]
    fn test_render_address_of_composite() {
        let v = render(ValueExpr::Unary {
            op: "&".into(),
            x: Box::new(ValueExpr::Composite {
                ty: TypeExpr::Selector {
                    x: Box::new(TypeExpr::ident("strings")),
                    sel: "Builder".into(),
                },
            }),
        })
        .unwrap();
        assert_eq!(v, RenderedValue::new("&strings.Builder{}", "*strings.Builder"));
    }

    #[test]
    fn test_render_call() {
        let v = render(ValueExpr::Call {
            fun: Box::new(ValueExpr::Selector {
                x: Box::new(ValueExpr::Ident {
                    name: "errors".into(),
                }),
                sel: "New".into(),
            }),
            args: vec![ValueExpr::BasicLit {
                lit: LitKind::String,
                value: "\"not found\"".into(),
            }],
        })
        .unwrap();
        assert_eq!(v.text, "errors.New(\"not found\")");
        assert_eq!(v.ty, "");
    }

    #[test]
    fn test_render_other_is_unsupported() {
        let err = render(ValueExpr::Other {
            node: "FuncLit".into(),
        })
        .unwrap_err();
        assert_eq!(err.to_string(), "unsupported type: FuncLit");
    }
}
