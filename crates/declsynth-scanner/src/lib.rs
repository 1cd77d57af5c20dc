//! Declaration scanner.
//!
//! Turns a declaration feed (the parsed form of one package) into a
//! [`PackageIndex`](declsynth_types::PackageIndex) whose declarations are
//! addressable by path.
//!
//! # Features
//!
//! - **Scanning**: imports, types, functions, values and fields, with docs
//! - **Type formatting**: canonical type strings for comparison
//! - **Path indexing**: one unique lookup path per declaration
//!
//! # Example
//!
//! ```ignore
//! use declsynth_scanner::{read_feed, scan_package, ScanOptions};
//!
//! let feed = read_feed(Path::new("people.feed.json"))?;
//! let pkg = scan_package(&feed, ScanOptions::from_env())?;
//! for key in pkg.path_keys() {
//!     println!("{key}");
//! }
//! ```

pub mod docs;
pub mod feed;
pub mod format;
pub mod index;
pub mod scanner;
pub mod values;

pub use feed::{parse_feed, read_feed, FeedPackage};
pub use format::{CanonicalFormatter, FormatError, TypeFormatter};
pub use index::index_paths;
pub use scanner::{scan_package, DeclKind, ScanError, ScanOptions, Scanner};
