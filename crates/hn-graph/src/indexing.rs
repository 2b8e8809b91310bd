//! Stable indexing between caller-facing segment ids and arena positions.
//!
//! Callers identify segments by free-form string ids; the engine works on
//! contiguous `SegmentId`s (0..N). This map gives O(1) lookup both ways.

use std::collections::HashMap;

use hn_core::SegmentId;

use crate::error::{GraphError, GraphResult};

/// Bidirectional map between string keys and arena positions.
#[derive(Debug, Clone, Default)]
pub struct KeyIndex {
    /// Arena position -> key.
    keys: Vec<String>,

    /// Reverse lookup: key -> arena position.
    by_key: HashMap<String, SegmentId>,
}

impl KeyIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a key and return its arena position.
    ///
    /// Keys must be unique; a repeated key is reported as `DuplicateKey`.
    pub fn insert(&mut self, key: impl Into<String>) -> GraphResult<SegmentId> {
        let key = key.into();
        if self.by_key.contains_key(&key) {
            return Err(GraphError::DuplicateKey { key });
        }
        let id = SegmentId::from_usize(self.keys.len()).ok_or(GraphError::TooManySegments {
            count: self.keys.len() + 1,
        })?;
        self.by_key.insert(key.clone(), id);
        self.keys.push(key);
        Ok(id)
    }

    /// Number of registered keys.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Arena position of a key.
    pub fn id(&self, key: &str) -> GraphResult<SegmentId> {
        self.by_key
            .get(key)
            .copied()
            .ok_or_else(|| GraphError::KeyNotFound {
                key: key.to_string(),
            })
    }

    /// Key stored at an arena position, if any.
    pub fn key(&self, id: SegmentId) -> Option<&str> {
        self.keys.get(id.index()).map(String::as_str)
    }

    /// All keys in arena order.
    pub fn keys(&self) -> &[String] {
        &self.keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_index_round_trip() {
        let mut index = KeyIndex::new();
        let a = index.insert("a").unwrap();
        let b = index.insert("b").unwrap();

        assert_eq!(index.len(), 2);
        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
        assert_eq!(index.id("b").unwrap(), b);
        assert_eq!(index.key(a), Some("a"));
    }

    #[test]
    fn key_index_rejects_duplicates() {
        let mut index = KeyIndex::new();
        index.insert("a").unwrap();
        let err = index.insert("a").unwrap_err();
        assert_eq!(err, GraphError::DuplicateKey { key: "a".into() });
    }

    #[test]
    fn key_index_unknown_key() {
        let index = KeyIndex::new();
        assert!(matches!(
            index.id("ghost"),
            Err(GraphError::KeyNotFound { .. })
        ));
    }
}
