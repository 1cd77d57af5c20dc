//! Shared types for the declsynth workspace.
//!
//! This crate holds the symbol model both halves of the workspace agree on:
//!
//! - [`SymbolPath`](path::SymbolPath) - hierarchical lookup paths
//! - [`PackageIndex`](decl::PackageIndex) and the declaration records it owns
//! - [`Object`](object::Object) - resolved symbol references used during synthesis
//!
//! plus identifier, type-string and environment helpers.

pub mod config;
pub mod decl;
pub mod ident;
pub mod object;
pub mod path;
pub mod type_parsing;

pub use decl::{
    DeclLocator, DeclRef, DeclSlot, Field, FuncDecl, ImportDecl, PackageIndex, ScanIssue,
    SourceFile, TypeDecl, TypeKind, ValueDecl,
};
pub use ident::{is_exported, to_lower_camel};
pub use object::{Object, ObjectScope};
pub use path::{SymbolPath, PATH_SEPARATOR};
pub use type_parsing::check_args_type;
