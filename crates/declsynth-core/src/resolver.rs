//! # Object Resolution
//!
//! Resolves a symbol reference such as `req.Header.Host` into the chain of
//! [`Object`]s it walks through.
//!
//! ## Algorithm
//!
//! | Segment | Looked up in |
//! |---------|--------------|
//! | first | local vars, then predefines, then receiver instances |
//! | each further one | fields of the previous object's struct type |
//!
//! The previous object's struct type is found through its path when it has
//! one (a path landing on a field or value follows that record's type), and
//! through its type name otherwise. Resolution never mutates the scope; a
//! missing segment fails with [`ResolveError::NotFound`] naming it.

use crate::error::ResolveError;
use declsynth_types::{DeclRef, Object, PackageIndex, TypeDecl};

/// The symbols a step can see.
pub trait SymbolScope {
    /// Local vars first, then predefines.
    fn lookup_local(&self, name: &str) -> Option<&Object>;

    /// Symbols the action has referenced so far. Only receiver instances
    /// among them take part in resolution.
    fn lookup_used(&self, _name: &str) -> Option<&Object> {
        None
    }

    fn packages(&self) -> &[PackageIndex];
}

pub struct Resolver<'a, S: SymbolScope + ?Sized> {
    scope: &'a S,
}

impl<'a, S: SymbolScope + ?Sized> Resolver<'a, S> {
    pub fn new(scope: &'a S) -> Self {
        Self { scope }
    }

    /// Resolve `name`, returning the root object followed by one object per
    /// further segment.
    pub fn resolve(&self, name: &str) -> Result<Vec<Object>, ResolveError> {
        if name.is_empty() {
            return Err(ResolveError::EmptyName);
        }
        let segments: Vec<&str> = name.split('.').collect();
        let not_found = |segment: &str| ResolveError::NotFound {
            segment: segment.to_string(),
            name: name.to_string(),
        };

        let root = self
            .scope
            .lookup_local(segments[0])
            .or_else(|| {
                self.scope
                    .lookup_used(segments[0])
                    .filter(|obj| obj.is_receiver())
            })
            .ok_or_else(|| not_found(segments[0]))?;

        let mut chain = Vec::with_capacity(segments.len());
        chain.push(root.clone());

        for &segment in &segments[1..] {
            let field = chain
                .last()
                .and_then(|owner| self.owner_struct(owner))
                .and_then(|st| st.field(segment))
                .ok_or_else(|| not_found(segment))?;
            chain.push(Object::from_field(field));
        }

        Ok(chain)
    }

    /// Struct declaration whose fields `obj` exposes.
    pub fn owner_struct(&self, obj: &Object) -> Option<&'a TypeDecl> {
        let scope: &'a S = self.scope;
        if !obj.path.is_empty() {
            for pkg in scope.packages() {
                match pkg.find_path(&obj.path) {
                    Some(DeclRef::Type(t)) => return t.is_struct().then_some(t),
                    Some(DeclRef::Field(f)) => return self.struct_named(&f.ty),
                    Some(DeclRef::Value(v)) => return self.struct_named(&v.ty),
                    Some(_) => return None,
                    None => continue,
                }
            }
        }
        self.struct_named(&obj.ty)
    }

    fn struct_named(&self, ty: &str) -> Option<&'a TypeDecl> {
        if ty.is_empty() {
            return None;
        }
        let scope: &'a S = self.scope;
        scope
            .packages()
            .iter()
            .filter_map(|pkg| pkg.find_type(ty))
            .find(|t| t.is_struct())
    }
}
