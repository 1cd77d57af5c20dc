//! Package scanning.
//!
//! Walks a [`FeedPackage`] and builds the [`PackageIndex`] records for every
//! import, type, function and value. A declaration that fails to format is
//! skipped and reported in [`PackageIndex::errors`]; a malformed receiver
//! list aborts the scan.

use crate::docs::parse_comment;
use crate::feed::{
    FeedField, FeedFile, FeedFunc, FeedPackage, FeedTypeSpec, FeedValue, TypeExpr, ValueExpr,
};
use crate::format::{CanonicalFormatter, FormatError, TypeFormatter};
use crate::index::index_paths;
use crate::values::render_value;
use declsynth_types::config::{env_bool_or, ONLY_EXPORTED_ENV};
use declsynth_types::{
    is_exported, Field, FuncDecl, ImportDecl, PackageIndex, ScanIssue, SourceFile, TypeDecl,
    TypeKind, ValueDecl,
};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

// =============================================================================
// Options
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclKind {
    Import,
    Type,
    Func,
    Value,
}

/// Predicate deciding whether a declaration is kept.
pub type DeclFilter = Arc<dyn Fn(DeclKind, &str) -> bool + Send + Sync>;

#[derive(Clone, Default)]
pub struct ScanOptions {
    /// Skip unexported declarations, and files that export nothing.
    pub only_exported: bool,
    pub filter: Option<DeclFilter>,
}

impl ScanOptions {
    /// Defaults overridden by `DECLSYNTH_ONLY_EXPORTED`.
    pub fn from_env() -> Self {
        Self {
            only_exported: env_bool_or(ONLY_EXPORTED_ENV, false),
            filter: None,
        }
    }

    pub fn with_only_exported(mut self, only_exported: bool) -> Self {
        self.only_exported = only_exported;
        self
    }

    pub fn with_filter(
        mut self,
        filter: impl Fn(DeclKind, &str) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.filter = Some(Arc::new(filter));
        self
    }

    fn keeps(&self, kind: DeclKind, name: &str) -> bool {
        if self.only_exported && kind != DeclKind::Import && !is_exported(name) {
            return false;
        }
        self.filter.as_ref().map_or(true, |f| f(kind, name))
    }
}

impl fmt::Debug for ScanOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScanOptions")
            .field("only_exported", &self.only_exported)
            .field("filter", &self.filter.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

// =============================================================================
// Errors
// =============================================================================

/// Failures that abort a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanError {
    MalformedReceiver {
        file: String,
        func: String,
        count: usize,
    },
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanError::MalformedReceiver { file, func, count } => write!(
                f,
                "{}: func {} has {} receivers, expected at most one",
                file, func, count
            ),
        }
    }
}

impl std::error::Error for ScanError {}

// =============================================================================
// Scanner
// =============================================================================

pub struct Scanner<F: TypeFormatter = CanonicalFormatter> {
    options: ScanOptions,
    formatter: F,
}

impl Scanner {
    pub fn new(options: ScanOptions) -> Self {
        Self {
            options,
            formatter: CanonicalFormatter,
        }
    }
}

impl<F: TypeFormatter> Scanner<F> {
    pub fn with_formatter(options: ScanOptions, formatter: F) -> Self {
        Self { options, formatter }
    }

    pub fn options(&self) -> &ScanOptions {
        &self.options
    }

    pub fn scan(&self, feed: &FeedPackage) -> Result<PackageIndex, ScanError> {
        let mut pkg = PackageIndex::new(feed.name.clone(), feed.id.clone());

        for file in &feed.files {
            if self.options.only_exported && !exports_anything(file) {
                debug!(file = %file.name, "skipping file without exported declarations");
                continue;
            }
            let mut walk = FileWalk::new(self, &file.name);
            let source_file = walk.file(file)?;
            if pkg.doc.is_empty() {
                pkg.doc = parse_comment(&file.doc);
            }
            pkg.errors.extend(walk.issues);
            pkg.files.push(source_file);
        }

        index_paths(&mut pkg);

        info!(
            package = %pkg.id,
            files = pkg.files.len(),
            paths = pkg.path_count(),
            skipped = pkg.errors.len(),
            "scanned package"
        );
        Ok(pkg)
    }
}

/// Scan a feed with the canonical formatter.
pub fn scan_package(feed: &FeedPackage, options: ScanOptions) -> Result<PackageIndex, ScanError> {
    Scanner::new(options).scan(feed)
}

fn exports_anything(file: &FeedFile) -> bool {
    file.types.iter().any(|t| is_exported(&t.name))
        || file.funcs.iter().any(|f| is_exported(&f.name))
        || file
            .values
            .iter()
            .any(|v| v.names.iter().any(|n| is_exported(n)))
}

/// Per-file walk state: the scanner plus the issues collected so far.
struct FileWalk<'a, F: TypeFormatter> {
    scanner: &'a Scanner<F>,
    file_name: &'a str,
    issues: Vec<ScanIssue>,
}

impl<'a, F: TypeFormatter> FileWalk<'a, F> {
    fn new(scanner: &'a Scanner<F>, file_name: &'a str) -> Self {
        Self {
            scanner,
            file_name,
            issues: Vec::new(),
        }
    }

    fn options(&self) -> &ScanOptions {
        &self.scanner.options
    }

    fn skip(&mut self, decl: &str, err: FormatError) {
        warn!(file = %self.file_name, decl = %decl, error = %err, "skipping declaration");
        self.issues.push(ScanIssue {
            file: self.file_name.to_string(),
            decl: decl.to_string(),
            message: err.to_string(),
        });
    }

    fn file(&mut self, file: &FeedFile) -> Result<SourceFile, ScanError> {
        let mut out = SourceFile {
            name: file.name.clone(),
            source: file.source.clone(),
            ..Default::default()
        };

        for import in &file.imports {
            let decl = ImportDecl {
                name: import.name.clone().filter(|n| !n.is_empty()),
                value: import.path.clone(),
                ..Default::default()
            };
            if self.options().keeps(DeclKind::Import, decl.alias_name()) {
                out.imports.push(decl);
            }
        }

        for spec in &file.types {
            if !self.options().keeps(DeclKind::Type, &spec.name) {
                continue;
            }
            match self.type_decl(spec) {
                Ok(decl) => out.types.push(decl),
                Err(e) => self.skip(&spec.name, e),
            }
        }

        for func in &file.funcs {
            if let Some(decl) = self.func_decl(func)? {
                out.funcs.push(decl);
            }
        }

        for value in &file.values {
            self.value_decls(value, &mut out.values);
        }

        Ok(out)
    }

    fn type_decl(&self, spec: &FeedTypeSpec) -> Result<TypeDecl, FormatError> {
        let formatter = &self.scanner.formatter;
        let (kind, fields) = match &spec.ty {
            TypeExpr::Struct { fields } => {
                let mut out = self.fields(fields)?;
                if self.options().only_exported {
                    out.retain(|f| is_exported(exported_part(&f.name)));
                }
                (TypeKind::Struct, out)
            }
            TypeExpr::Interface { methods } => (TypeKind::Interface, self.fields(methods)?),
            TypeExpr::Ident { .. } | TypeExpr::Selector { .. } | TypeExpr::Pointer { .. } => {
                (TypeKind::Named(formatter.format(&spec.ty)?), Vec::new())
            }
            TypeExpr::Array { .. } => (TypeKind::Array, self.validate(&spec.ty)?),
            TypeExpr::Map { .. } => (TypeKind::Map, self.validate(&spec.ty)?),
            TypeExpr::Chan { .. } => (TypeKind::Chan, self.validate(&spec.ty)?),
            TypeExpr::Func { .. } => (TypeKind::Func, self.validate(&spec.ty)?),
            TypeExpr::Ellipsis { .. } | TypeExpr::Other { .. } => {
                return Err(FormatError::UnsupportedType {
                    shape: spec.ty.shape().to_string(),
                })
            }
        };

        Ok(TypeDecl {
            path: Default::default(),
            kind,
            name: spec.name.clone(),
            fields,
            doc: parse_comment(&spec.doc),
        })
    }

    /// Checks that a fieldless type formats; yields no fields.
    fn validate(&self, ty: &TypeExpr) -> Result<Vec<Field>, FormatError> {
        self.scanner.formatter.format(ty)?;
        Ok(Vec::new())
    }

    fn func_decl(&mut self, func: &FeedFunc) -> Result<Option<FuncDecl>, ScanError> {
        let receiver_count: usize = func.receivers.iter().map(|r| r.names.len().max(1)).sum();
        if receiver_count > 1 {
            return Err(ScanError::MalformedReceiver {
                file: self.file_name.to_string(),
                func: func.name.clone(),
                count: receiver_count,
            });
        }
        if !self.options().keeps(DeclKind::Func, &func.name) {
            return Ok(None);
        }

        let built = self.build_func(func);

        match built {
            Ok(decl) => {
                if self.options().only_exported {
                    if let Some(recv_ty) = decl.receiver_type_name() {
                        if !is_exported(exported_part(recv_ty)) {
                            return Ok(None);
                        }
                    }
                }
                Ok(Some(decl))
            }
            Err(e) => {
                self.skip(&func.name, e);
                Ok(None)
            }
        }
    }

    fn value_decls(&mut self, value: &FeedValue, out: &mut Vec<ValueDecl>) {
        for (i, name) in value.names.iter().enumerate() {
            if !self.options().keeps(DeclKind::Value, name) {
                continue;
            }
            let init = value
                .values
                .get(i)
                .or_else(|| (value.values.len() == 1).then(|| &value.values[0]));

            let built = self.build_value(value, name, init);

            match built {
                Ok(decl) => out.push(decl),
                Err(e) => self.skip(name, e),
            }
        }
    }

    fn build_func(&self, func: &FeedFunc) -> Result<FuncDecl, FormatError> {
        let receiver = match func.receivers.first() {
            Some(recv) => self.fields(std::slice::from_ref(recv))?.into_iter().next(),
            None => None,
        };
        Ok(FuncDecl {
            path: Default::default(),
            receiver,
            name: func.name.clone(),
            params: self.fields(&func.params)?,
            results: self.fields(&func.results)?,
            doc: parse_comment(&func.doc),
        })
    }

    /// A declared type wins over the one implied by the initializer.
    fn build_value(
        &self,
        value: &FeedValue,
        name: &str,
        init: Option<&ValueExpr>,
    ) -> Result<ValueDecl, FormatError> {
        let formatter = &self.scanner.formatter;
        let rendered = init.map(|v| render_value(v, formatter)).transpose()?;
        let declared = value.ty.as_ref().map(|t| formatter.format(t)).transpose()?;
        let (text, inferred) = rendered.map(|r| (r.text, r.ty)).unwrap_or_default();
        Ok(ValueDecl {
            path: Default::default(),
            name: name.to_string(),
            ty: declared.unwrap_or(inferred),
            value: text,
            doc: parse_comment(&value.doc),
        })
    }

    /// Expands a field list: one [`Field`] per name, an unnamed entry named
    /// by its type.
    fn fields(&self, fields: &[FeedField]) -> Result<Vec<Field>, FormatError> {
        let mut out = Vec::new();
        for field in fields {
            let ty = self.scanner.formatter.format(&field.ty)?;
            let doc = parse_comment(&field.doc);
            if field.names.is_empty() {
                out.push(Field {
                    path: Default::default(),
                    name: ty.clone(),
                    ty,
                    doc,
                });
                continue;
            }
            for name in &field.names {
                out.push(Field {
                    path: Default::default(),
                    name: name.clone(),
                    ty: ty.clone(),
                    doc: doc.clone(),
                });
            }
        }
        Ok(out)
    }
}

/// The part of a (possibly qualified or pointer) type name that carries
/// exportedness: `*people.Person` -> `Person`.
fn exported_part(name: &str) -> &str {
    let bare = name.trim_start_matches('*');
    bare.rsplit('.').next().unwrap_or(bare)
}
