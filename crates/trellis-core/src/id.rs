//! Stable component identifiers

use serde::{Deserialize, Serialize};
use std::fmt;

/// A component identifier assigned by the host builder.
///
/// Ids are opaque strings. The checker never generates them; it only keys its
/// per-component state by them and derives default labels from their prefix.
#[derive(Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentId(String);

impl ComponentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The first `n` characters of the id, split on a char boundary
    pub fn prefix(&self, n: usize) -> &str {
        match self.0.char_indices().nth(n) {
            Some((idx, _)) => &self.0[..idx],
            None => &self.0,
        }
    }
}

impl From<&str> for ComponentId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ComponentId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for ComponentId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ComponentId({:?})", self.0)
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_shorter_than_id() {
        let id = ComponentId::from("abcdef");
        assert_eq!(id.prefix(4), "abcd");
    }

    #[test]
    fn test_prefix_longer_than_id() {
        let id = ComponentId::from("c1");
        assert_eq!(id.prefix(4), "c1");
    }

    #[test]
    fn test_prefix_respects_char_boundaries() {
        let id = ComponentId::from("ñandú-7");
        assert_eq!(id.prefix(4), "ñand");
    }

    #[test]
    fn test_ordering_is_lexicographic() {
        let a = ComponentId::from("a");
        let b = ComponentId::from("b");
        assert!(a < b);
    }
}
