//! declsynth: declaration indexing and statement synthesis.
//!
//! Scans a package's declarations into an addressable index and composes
//! code statements that call into it:
//!
//! - **Scanning**: declaration feed in, [`PackageIndex`](types::PackageIndex) out
//! - **Path indexing**: one `id -> file -> Name` path per declaration
//! - **Composition**: an action of steps in, code plus its symbol bookkeeping out
//!
//! See [`compose`] for statement synthesis and [`files`] for loading the JSON
//! inputs both halves work on.

pub mod files;

pub use declsynth_core as compose;
pub use declsynth_scanner as scanner;
pub use declsynth_types as types;
