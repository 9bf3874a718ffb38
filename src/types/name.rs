//! Fully-qualified names for catalog entities.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Dot-separated path from the root module to an entity's local name.
///
/// Wraps a `String` and implements `Ord` so maps keyed by name iterate
/// in lexicographic order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QualifiedName(String);

impl QualifiedName {
    /// Create a name from any string-like value.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the underlying string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the name is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the dot-separated segments.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('.')
    }

    /// The final segment (`pkg.mod.Class` -> `Class`).
    pub fn local_name(&self) -> &str {
        self.0.rsplit('.').next().unwrap_or_default()
    }

    /// Everything before the final segment, if there is one.
    pub fn parent(&self) -> Option<&str> {
        self.0.rsplit_once('.').map(|(parent, _)| parent)
    }

    /// Append a segment: `pkg.Class` + `method` -> `pkg.Class.method`.
    pub fn child(&self, segment: &str) -> Self {
        Self(format!("{}.{}", self.0, segment))
    }

    /// Plain string-prefix test, as used by include/exclude lists.
    pub fn starts_with(&self, prefix: &str) -> bool {
        self.0.starts_with(prefix)
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for QualifiedName {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for QualifiedName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl AsRef<str> for QualifiedName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for QualifiedName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_segments_and_local_name() {
        let name = QualifiedName::from("pkg.internal.Exposed");
        assert_eq!(name.segments().collect::<Vec<_>>(), vec!["pkg", "internal", "Exposed"]);
        assert_eq!(name.local_name(), "Exposed");
        assert_eq!(name.parent(), Some("pkg.internal"));
    }

    #[test]
    fn test_single_segment_has_no_parent() {
        let name = QualifiedName::from("pkg");
        assert_eq!(name.local_name(), "pkg");
        assert_eq!(name.parent(), None);
    }

    #[test]
    fn test_child() {
        let cls = QualifiedName::from("pkg.A");
        assert_eq!(cls.child("__init__").as_str(), "pkg.A.__init__");
    }

    #[test]
    fn test_borrowed_lookup_in_ordered_map() {
        let mut map = BTreeMap::new();
        map.insert(QualifiedName::from("pkg.b"), 2);
        map.insert(QualifiedName::from("pkg.a"), 1);

        assert_eq!(map.get("pkg.a"), Some(&1));
        let keys: Vec<_> = map.keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["pkg.a", "pkg.b"]);
    }
}
