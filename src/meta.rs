//! Ordered key/value metadata attached to documents and data arrays.

use crate::deprecate;

/// An ordered string-to-string mapping.
///
/// Insertion order is preserved so serialization is deterministic. Keys are
/// unique; writing an existing key updates the value in place and keeps the
/// key's original position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataMap {
    entries: Vec<(String, String)>,
}

impl MetadataMap {
    /// A fresh, empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from name/value pairs, applying last-write-wins on duplicates.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut map = Self::new();
        for (k, v) in pairs {
            map.insert(k, v);
        }
        map
    }

    /// Insert or update a key. Returns the previous value if the key existed.
    pub fn insert<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) -> Option<String> {
        let key = key.into();
        let value = value.into();
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            return Some(std::mem::replace(&mut entry.1, value));
        }
        self.entries.push((key, value));
        None
    }

    /// Look up a value by key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Remove a key, returning its value if present.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        let pos = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(pos).1)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the map holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Entries as owned pairs, in insertion order (the `MD` serialization
    /// fragment order).
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        self.entries.clone()
    }

    /// Deprecated alias for direct map access.
    ///
    /// Identical return value; emits one deprecation signal per call.
    #[deprecated(since = "0.1.0", note = "access the map directly")]
    pub fn get_metadata(&self) -> &MetadataMap {
        deprecate::warn("MetadataMap::get_metadata", "the map itself");
        self
    }
}

impl<'a> IntoIterator for &'a MetadataMap {
    type Item = &'a (String, String);
    type IntoIter = std::slice::Iter<'a, (String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
