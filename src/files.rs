//! JSON inputs and outputs shared by the CLI and library users.
//!
//! Every reader accepts `-` for stdin.

use anyhow::{Context, Result};
use declsynth_core::Action;
use declsynth_scanner::{index_paths, parse_feed, read_feed, FeedPackage};
use declsynth_types::{Object, PackageIndex};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == "-"
}

/// Read a whole input, `what` naming it in errors.
pub fn read_input(path: &Path, what: &str) -> Result<String> {
    if is_stdin(path) {
        use std::io::Read;
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .with_context(|| format!("Failed to read {} from stdin", what))?;
        return Ok(buf);
    }
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}: {}", what, path.display()))
}

pub fn read_json<T: DeserializeOwned>(path: &Path, what: &str) -> Result<T> {
    let data = read_input(path, what)?;
    serde_json::from_str(&data).with_context(|| format!("Failed to parse {} JSON", what))
}

pub fn load_feed(path: &Path) -> Result<FeedPackage> {
    if is_stdin(path) {
        return parse_feed(&read_input(path, "declaration feed")?);
    }
    read_feed(path)
}

/// Load a package index and rebuild its path map.
pub fn load_index(path: &Path) -> Result<PackageIndex> {
    let mut pkg: PackageIndex = read_json(path, "package index")?;
    index_paths(&mut pkg);
    Ok(pkg)
}

pub fn load_action(path: &Path) -> Result<Action> {
    read_json(path, "action")
}

/// A JSON array of objects (predefines or vars).
pub fn load_objects(path: &Path) -> Result<Vec<Object>> {
    read_json(path, "object list")
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize JSON")?;
    std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
}
