//! Statement synthesis over scanned declarations.
//!
//! Given indexed packages, a set of predefined objects and an [`Action`]
//! (an ordered list of [`Step`]s), produces one line of code per step and a
//! [`CodeContext`] describing the symbols the code declares, references and
//! needs.
//!
//! ## Key Types
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`Builder`] | Owns packages and predefines; starts actions |
//! | [`ActionBuilder`] | Builds the steps of one action |
//! | [`CodeContext`] | Code plus Vars, Used, Imports and RequiredNewType |
//! | [`Resolver`] | Dotted symbol resolution through struct fields |
//!
//! ## Example
//!
//! ```ignore
//! use declsynth_core::{Builder, Codes, ComposeOptions};
//!
//! let builder = Builder::new(Codes { packages, predefines })?;
//! let ctx = builder.build_action(&action, ComposeOptions::from_env())?;
//! for line in &ctx.code_lines {
//!     println!("{line}");
//! }
//! ```

pub mod action;
pub mod builder;
pub mod context;
pub mod error;
pub mod interfaces;
pub mod naming;
pub mod options;
pub mod resolver;
pub mod step;
mod synth;

#[cfg(test)]
mod test_support;

pub use action::ActionBuilder;
pub use builder::{Builder, Codes};
pub use context::{CodeContext, ContextDelta, PackageRef, TypeMismatch};
pub use error::{ComposeError, LookupError, ResolveError};
pub use interfaces::implements;
pub use options::ComposeOptions;
pub use resolver::{Resolver, SymbolScope};
pub use step::{Action, Operation, Param, Step, ValueType};
