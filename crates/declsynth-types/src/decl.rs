//! Declaration records produced by scanning one package.
//!
//! A [`PackageIndex`] owns every record. Its path map stores a
//! [`DeclLocator`] (file index plus slot) for each registered path, so a
//! lookup hands back a borrow of the record itself through [`DeclRef`].

use crate::path::SymbolPath;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// =============================================================================
// Records
// =============================================================================

/// Shape of a type declaration.
///
/// Serialized as the lowercase keyword, or as the aliased type's name for
/// [`TypeKind::Named`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TypeKind {
    Array,
    Struct,
    Func,
    Interface,
    Map,
    Chan,
    /// `type A B`: an alias of another named type.
    Named(String),
}

impl TypeKind {
    pub fn as_str(&self) -> &str {
        match self {
            TypeKind::Array => "array",
            TypeKind::Struct => "struct",
            TypeKind::Func => "func",
            TypeKind::Interface => "interface",
            TypeKind::Map => "map",
            TypeKind::Chan => "chan",
            TypeKind::Named(name) => name,
        }
    }
}

impl From<String> for TypeKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "array" => TypeKind::Array,
            "struct" => TypeKind::Struct,
            "func" => TypeKind::Func,
            "interface" => TypeKind::Interface,
            "map" => TypeKind::Map,
            "chan" => TypeKind::Chan,
            _ => TypeKind::Named(s),
        }
    }
}

impl From<TypeKind> for String {
    fn from(kind: TypeKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named, typed slot: struct field, parameter, result, receiver or
/// interface method.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    #[serde(default, skip_serializing_if = "SymbolPath::is_empty")]
    pub path: SymbolPath,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub ty: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub doc: String,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDecl {
    #[serde(default, skip_serializing_if = "SymbolPath::is_empty")]
    pub path: SymbolPath,
    #[serde(rename = "type")]
    pub kind: TypeKind,
    pub name: String,
    /// Struct fields, or interface methods typed by their signature.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<Field>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub doc: String,
}

impl TypeDecl {
    pub fn is_struct(&self) -> bool {
        self.kind == TypeKind::Struct
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FuncDecl {
    #[serde(default, skip_serializing_if = "SymbolPath::is_empty")]
    pub path: SymbolPath,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receiver: Option<Field>,
    pub name: String,
    #[serde(default)]
    pub params: Vec<Field>,
    #[serde(default)]
    pub results: Vec<Field>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub doc: String,
}

impl FuncDecl {
    /// `Receiver.name` for methods, `name` otherwise. This is the last
    /// segment of the function's path.
    pub fn qualified_name(&self) -> String {
        match &self.receiver {
            Some(recv) => format!("{}.{}", recv.ty, self.name),
            None => self.name.clone(),
        }
    }

    /// Receiver type with pointer markers removed (`*Person` -> `Person`).
    pub fn receiver_type_name(&self) -> Option<&str> {
        self.receiver
            .as_ref()
            .map(|recv| recv.ty.trim_start_matches('*'))
    }

    /// Method-set signature: `name(in1,in2) (out1,out2)`.
    pub fn signature(&self) -> String {
        let ins: Vec<&str> = self.params.iter().map(|p| p.ty.as_str()).collect();
        let outs: Vec<&str> = self.results.iter().map(|r| r.ty.as_str()).collect();
        format!("{}({}) ({})", self.name, ins.join(","), outs.join(","))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueDecl {
    #[serde(default, skip_serializing_if = "SymbolPath::is_empty")]
    pub path: SymbolPath,
    pub name: String,
    #[serde(rename = "type", default)]
    pub ty: String,
    #[serde(default)]
    pub value: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub doc: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportDecl {
    #[serde(default, skip_serializing_if = "SymbolPath::is_empty")]
    pub path: SymbolPath,
    /// Explicit alias, if the import declared one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Module reference as written, quotes included.
    pub value: String,
}

impl ImportDecl {
    /// Name the import is referenced by: the alias, otherwise the last
    /// `/` or `.` separated component of the module reference.
    pub fn alias_name(&self) -> &str {
        if let Some(name) = self.name.as_deref().filter(|n| !n.is_empty()) {
            return name;
        }
        let module = self.value.trim_matches('"');
        module.rsplit(['/', '.']).next().unwrap_or(module)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFile {
    #[serde(default, skip_serializing_if = "SymbolPath::is_empty")]
    pub path: SymbolPath,
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub source: String,
    #[serde(default)]
    pub imports: Vec<ImportDecl>,
    #[serde(default)]
    pub types: Vec<TypeDecl>,
    #[serde(default)]
    pub funcs: Vec<FuncDecl>,
    #[serde(default)]
    pub values: Vec<ValueDecl>,
}

/// A declaration that was skipped while scanning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanIssue {
    pub file: String,
    pub decl: String,
    pub message: String,
}

impl fmt::Display for ScanIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}: {}", self.file, self.decl, self.message)
    }
}

// =============================================================================
// Path map
// =============================================================================

/// Position of a record inside one [`SourceFile`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclSlot {
    Import(usize),
    Value(usize),
    Func(usize),
    Type(usize),
    Field { ty: usize, field: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeclLocator {
    pub file: usize,
    pub slot: DeclSlot,
}

/// Borrowed view of whatever a path resolves to.
#[derive(Debug, Clone, Copy)]
pub enum DeclRef<'a> {
    Package(&'a PackageIndex),
    Import(&'a ImportDecl),
    Value(&'a ValueDecl),
    Func(&'a FuncDecl),
    Type(&'a TypeDecl),
    Field(&'a Field),
}

impl DeclRef<'_> {
    pub fn kind(&self) -> &'static str {
        match self {
            DeclRef::Package(_) => "package",
            DeclRef::Import(_) => "import",
            DeclRef::Value(_) => "value",
            DeclRef::Func(_) => "func",
            DeclRef::Type(_) => "type",
            DeclRef::Field(_) => "field",
        }
    }
}

/// One scanned package: its files, the declarations skipped along the way,
/// and the path map built over them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PackageIndex {
    pub name: String,
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub doc: String,
    #[serde(default)]
    pub files: Vec<SourceFile>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ScanIssue>,
    #[serde(skip)]
    paths: BTreeMap<String, DeclLocator>,
}

impl PackageIndex {
    pub fn new(name: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
            ..Default::default()
        }
    }

    /// Root path of the package: its id as the single segment.
    pub fn root_path(&self) -> SymbolPath {
        SymbolPath::from_segments([self.id.clone()])
    }

    /// Registers `path`. Returns `false` and leaves the existing entry in
    /// place when the key is already taken.
    pub fn register(&mut self, path: &SymbolPath, locator: DeclLocator) -> bool {
        use std::collections::btree_map::Entry;
        match self.paths.entry(path.key()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(locator);
                true
            }
        }
    }

    pub fn clear_paths(&mut self) {
        self.paths.clear();
    }

    pub fn path_count(&self) -> usize {
        self.paths.len()
    }

    pub fn path_keys(&self) -> impl Iterator<Item = &str> {
        self.paths.keys().map(String::as_str)
    }

    /// Looks a declaration up by path. The package id alone resolves to the
    /// package itself.
    pub fn find_path(&self, path: &SymbolPath) -> Option<DeclRef<'_>> {
        let key = path.key();
        if key == self.id {
            return Some(DeclRef::Package(self));
        }
        self.paths.get(&key).and_then(|loc| self.locate(*loc))
    }

    pub fn locate(&self, loc: DeclLocator) -> Option<DeclRef<'_>> {
        let file = self.files.get(loc.file)?;
        let found = match loc.slot {
            DeclSlot::Import(i) => DeclRef::Import(file.imports.get(i)?),
            DeclSlot::Value(i) => DeclRef::Value(file.values.get(i)?),
            DeclSlot::Func(i) => DeclRef::Func(file.funcs.get(i)?),
            DeclSlot::Type(i) => DeclRef::Type(file.types.get(i)?),
            DeclSlot::Field { ty, field } => DeclRef::Field(file.types.get(ty)?.fields.get(field)?),
        };
        Some(found)
    }

    /// Finds a type declared in this package by name. Pointer markers are
    /// ignored; a qualified name (`people.Person`) must carry this package's
    /// name as its qualifier.
    pub fn find_type(&self, type_name: &str) -> Option<&TypeDecl> {
        let bare = type_name.trim_start_matches('*');
        let local = match bare.rsplit_once('.') {
            Some((qualifier, name)) if qualifier == self.name => name,
            Some(_) => return None,
            None => bare,
        };
        self.types().find(|t| t.name == local)
    }

    pub fn types(&self) -> impl Iterator<Item = &TypeDecl> {
        self.files.iter().flat_map(|f| f.types.iter())
    }

    pub fn funcs(&self) -> impl Iterator<Item = &FuncDecl> {
        self.files.iter().flat_map(|f| f.funcs.iter())
    }

    /// Methods declared with `type_name` (or a pointer to it) as receiver.
    pub fn methods_of<'a>(&'a self, type_name: &'a str) -> impl Iterator<Item = &'a FuncDecl> + 'a {
        self.funcs()
            .filter(move |f| f.receiver_type_name() == Some(type_name))
    }
}
