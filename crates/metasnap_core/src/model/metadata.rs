//! Ordered metadata snapshot.

use crate::model::scalar::ScalarValue;
use indexmap::map::{IntoIter, Iter};
use indexmap::IndexMap;
use serde::Serialize;

/// Ordered `property name -> scalar value` snapshot of one object.
///
/// Order is the property discovery order of the source type. Equality
/// compares entries regardless of order; use [`MetadataMap::keys`] when the
/// order itself matters.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct MetadataMap {
    entries: IndexMap<String, ScalarValue>,
}

impl MetadataMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: IndexMap::with_capacity(capacity),
        }
    }

    /// Inserts one entry; an existing key keeps its position and takes the new value.
    ///
    /// Extraction never relies on this replacement: it rejects repeated keys.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<ScalarValue>) {
        self.entries.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&ScalarValue> {
        self.entries.get(name)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Property names in snapshot order.
    pub fn keys(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    pub fn iter(&self) -> Iter<'_, String, ScalarValue> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a MetadataMap {
    type Item = (&'a String, &'a ScalarValue);
    type IntoIter = Iter<'a, String, ScalarValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl IntoIterator for MetadataMap {
    type Item = (String, ScalarValue);
    type IntoIter = IntoIter<String, ScalarValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::MetadataMap;
    use crate::model::scalar::ScalarValue;

    #[test]
    fn keeps_insertion_order() {
        let mut metadata = MetadataMap::new();
        metadata.insert("zeta", 1_i32);
        metadata.insert("alpha", "a");
        metadata.insert("mid", true);

        assert_eq!(metadata.keys(), vec!["zeta", "alpha", "mid"]);
        assert_eq!(metadata.len(), 3);
        assert_eq!(metadata.get("alpha"), Some(&ScalarValue::from("a")));
    }

    #[test]
    fn reinsert_replaces_value_in_place() {
        let mut metadata = MetadataMap::new();
        metadata.insert("port", 1_i32);
        metadata.insert("host", "localhost");
        metadata.insert("port", 2_i32);

        assert_eq!(metadata.keys(), vec!["port", "host"]);
        assert_eq!(metadata.get("port"), Some(&ScalarValue::I32(2)));
    }

    #[test]
    fn serialized_text_keeps_snapshot_order() {
        let mut metadata = MetadataMap::new();
        metadata.insert("zeta", 1_i32);
        metadata.insert("alpha", None::<String>);

        let text = serde_json::to_string(&metadata).expect("metadata should serialize");
        assert_eq!(text, r#"{"zeta":1,"alpha":null}"#);
    }
}
