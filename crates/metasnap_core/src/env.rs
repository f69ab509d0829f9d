//! Runtime configuration property access.
//!
//! # Responsibility
//! - Provide read-only key/value property lookup for config and endpoints.
//!
//! # Invariants
//! - Property names are listed in sorted order.

use std::collections::BTreeMap;

/// Read-only source of configuration properties.
pub trait Environment {
    fn get_property(&self, key: &str) -> Option<String>;

    /// Sorted names of every known property.
    fn property_names(&self) -> Vec<String>;

    fn contains_property(&self, key: &str) -> bool {
        self.get_property(key).is_some()
    }

    fn get_property_or(&self, key: &str, default: &str) -> String {
        self.get_property(key).unwrap_or_else(|| default.to_string())
    }
}

impl<T: Environment + ?Sized> Environment for &T {
    fn get_property(&self, key: &str) -> Option<String> {
        (**self).get_property(key)
    }

    fn property_names(&self) -> Vec<String> {
        (**self).property_names()
    }
}

/// In-memory property set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapEnvironment {
    properties: BTreeMap<String, String>,
}

impl MapEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the current process environment variables.
    ///
    /// Variables whose name or value is not valid UTF-8 are skipped.
    pub fn from_process_env() -> Self {
        std::env::vars_os()
            .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
            .collect()
    }

    /// Sets one property, returning the previous value.
    pub fn set_property(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Option<String> {
        self.properties.insert(key.into(), value.into())
    }

    /// Copies every property of `other` over this set.
    pub fn merge(&mut self, other: &MapEnvironment) {
        self.properties.extend(
            other
                .properties
                .iter()
                .map(|(key, value)| (key.clone(), value.clone())),
        );
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

impl Environment for MapEnvironment {
    fn get_property(&self, key: &str) -> Option<String> {
        self.properties.get(key).cloned()
    }

    fn property_names(&self) -> Vec<String> {
        self.properties.keys().cloned().collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapEnvironment {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            properties: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

/// Properties whose name starts with `prefix`, sorted by name.
pub fn properties_with_prefix(
    environment: &dyn Environment,
    prefix: &str,
) -> BTreeMap<String, String> {
    environment
        .property_names()
        .into_iter()
        .filter(|name| name.starts_with(prefix))
        .filter_map(|name| {
            let value = environment.get_property(&name)?;
            Some((name, value))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{properties_with_prefix, Environment, MapEnvironment};

    fn sample() -> MapEnvironment {
        [
            ("dubbo.protocol.port", "20880"),
            ("dubbo.application.name", "demo"),
            ("server.port", "8080"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn looks_up_properties_with_defaults() {
        let environment = sample();
        assert_eq!(
            environment.get_property("server.port").as_deref(),
            Some("8080")
        );
        assert!(environment.contains_property("dubbo.protocol.port"));
        assert_eq!(environment.get_property_or("missing", "fallback"), "fallback");
    }

    #[test]
    fn filters_by_prefix_in_sorted_order() {
        let environment = sample();
        let dubbo = properties_with_prefix(&environment, "dubbo.");
        assert_eq!(
            dubbo.keys().collect::<Vec<_>>(),
            vec!["dubbo.application.name", "dubbo.protocol.port"]
        );
        assert!(properties_with_prefix(&environment, "spring.").is_empty());
    }

    #[test]
    fn merge_overrides_existing_values() {
        let mut environment = sample();
        let mut overrides = MapEnvironment::new();
        overrides.set_property("server.port", "9090");
        overrides.set_property("extra", "1");

        environment.merge(&overrides);
        assert_eq!(environment.len(), 4);
        assert_eq!(
            environment.get_property("server.port").as_deref(),
            Some("9090")
        );
    }

    #[test]
    fn process_env_snapshot_contains_set_variable() {
        let key = format!("METASNAP_ENV_TEST_{}", std::process::id());
        std::env::set_var(&key, "present");
        let environment = MapEnvironment::from_process_env();
        std::env::remove_var(&key);
        assert_eq!(environment.get_property(&key).as_deref(), Some("present"));
    }
}
