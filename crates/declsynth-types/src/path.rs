//! Hierarchical declaration paths.
//!
//! A [`SymbolPath`] is the ordered list of segments that locates one
//! declaration inside a scanned package:
//!
//! | Declaration | Segments |
//! |-------------|----------|
//! | file | `package-id, file-name` |
//! | import | `.., alias` |
//! | value / type | `.., name` |
//! | function | `.., [Receiver.]name` |
//! | field | `.., type-name, field-name` |
//!
//! The joined form (segments separated by [`PATH_SEPARATOR`]) is the lookup
//! key used by the package path map.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Separator placed between segments when a path is joined into a key.
pub const PATH_SEPARATOR: &str = " -> ";

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SymbolPath(Vec<String>);

impl SymbolPath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    /// Returns a new path with `segment` appended; `self` is left untouched.
    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment.into());
        Self(segments)
    }

    /// Drops the last `n` segments. Returns `None` when the path is shorter than `n`.
    pub fn trim_end(&self, n: usize) -> Option<Self> {
        if self.0.len() < n {
            return None;
        }
        Some(Self(self.0[..self.0.len() - n].to_vec()))
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn last(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Joined lookup key.
    pub fn key(&self) -> String {
        self.0.join(PATH_SEPARATOR)
    }
}

impl fmt::Display for SymbolPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

impl<S: Into<String>> FromIterator<S> for SymbolPath {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self::from_segments(iter)
    }
}
