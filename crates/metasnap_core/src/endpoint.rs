//! Management endpoint document assembly.
//!
//! # Responsibility
//! - Resolve descriptor snapshots per kind through an `ObjectProvider`.
//! - Expose the configuration properties under a prefix.
//! - Build JSON documents; transport concerns stay with the caller.
//!
//! # Invariants
//! - One failing instance fails the whole section; no partial sections.
//! - Sections and instance names are emitted in a stable order.

use crate::config::{SnapshotConfig, DEFAULT_PROPERTY_PREFIX};
use crate::env::{properties_with_prefix, Environment};
use crate::extract::extract_metadata;
use crate::introspect::error::IntrospectionError;
use crate::model::metadata::MetadataMap;
use crate::registry::descriptor_registry::{DescriptorKind, ObjectProvider};
use log::{debug, warn};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Section name of the configuration-properties view.
pub const PROPERTIES_SECTION: &str = "properties";

/// Endpoint resolution errors.
#[derive(Debug)]
pub enum EndpointError {
    Introspection {
        kind: DescriptorKind,
        instance: String,
        source: IntrospectionError,
    },
    Serialization(serde_json::Error),
}

impl Display for EndpointError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Introspection {
                kind,
                instance,
                source,
            } => write!(f, "failed to snapshot {kind} `{instance}`: {source}"),
            Self::Serialization(err) => write!(f, "failed to render endpoint document: {err}"),
        }
    }
}

impl Error for EndpointError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Introspection { source, .. } => Some(source),
            Self::Serialization(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for EndpointError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization(value)
    }
}

pub type EndpointResult<T> = Result<T, EndpointError>;

/// Snapshots of every instance of one kind, keyed by instance name.
pub type KindMetadata = BTreeMap<String, MetadataMap>;

/// Read-only metadata endpoint over a provider and an environment.
pub struct MetadataEndpoint<P: ObjectProvider, E: Environment> {
    provider: P,
    environment: E,
    property_prefix: String,
}

impl<P: ObjectProvider, E: Environment> MetadataEndpoint<P, E> {
    pub fn new(provider: P, environment: E) -> Self {
        Self {
            provider,
            environment,
            property_prefix: DEFAULT_PROPERTY_PREFIX.to_string(),
        }
    }

    /// Applies the configured property prefix.
    pub fn with_config(mut self, config: &SnapshotConfig) -> Self {
        self.property_prefix = config.property_prefix.clone();
        self
    }

    pub fn property_prefix(&self) -> &str {
        &self.property_prefix
    }

    /// Snapshots every instance of `kind`.
    pub fn metadata_for_kind(&self, kind: DescriptorKind) -> EndpointResult<KindMetadata> {
        let instances = self.provider.lookup_instances_by_kind(kind);
        let mut snapshots = KindMetadata::new();
        for (name, instance) in &instances {
            let metadata = extract_metadata(instance.as_ref()).map_err(|source| {
                warn!(
                    "event=endpoint_resolve module=endpoint status=error kind={} name={}",
                    kind, name
                );
                EndpointError::Introspection {
                    kind,
                    instance: name.clone(),
                    source,
                }
            })?;
            snapshots.insert(name.clone(), metadata);
        }
        debug!(
            "event=endpoint_resolve module=endpoint status=ok kind={} instances={}",
            kind,
            snapshots.len()
        );
        Ok(snapshots)
    }

    pub fn services(&self) -> EndpointResult<KindMetadata> {
        self.metadata_for_kind(DescriptorKind::Service)
    }

    pub fn references(&self) -> EndpointResult<KindMetadata> {
        self.metadata_for_kind(DescriptorKind::Reference)
    }

    pub fn protocols(&self) -> EndpointResult<KindMetadata> {
        self.metadata_for_kind(DescriptorKind::Protocol)
    }

    /// Configuration properties under the endpoint prefix, sorted by name.
    pub fn properties(&self) -> BTreeMap<String, String> {
        properties_with_prefix(&self.environment, &self.property_prefix)
    }

    /// JSON object `{ instance name: snapshot }` for one kind.
    pub fn document_for_kind(&self, kind: DescriptorKind) -> EndpointResult<Value> {
        Ok(serde_json::to_value(self.metadata_for_kind(kind)?)?)
    }

    /// Full document: one section per descriptor kind plus `properties`.
    pub fn document(&self) -> EndpointResult<Value> {
        let mut document = Map::new();
        for kind in DescriptorKind::ALL {
            document.insert(kind.section().to_string(), self.document_for_kind(kind)?);
        }
        document.insert(
            PROPERTIES_SECTION.to_string(),
            serde_json::to_value(self.properties())?,
        );
        Ok(Value::Object(document))
    }
}

#[cfg(test)]
mod tests {
    use super::{EndpointError, MetadataEndpoint, PROPERTIES_SECTION};
    use crate::config::SnapshotConfig;
    use crate::descriptors::{ProtocolConfig, ServiceConfig};
    use crate::env::MapEnvironment;
    use crate::registry::descriptor_registry::{DescriptorKind, DescriptorRegistry};
    use serde_json::json;
    use std::sync::Arc;

    fn registry() -> DescriptorRegistry {
        let mut registry = DescriptorRegistry::new();
        let mut protocol = ProtocolConfig::new("dubbo");
        protocol.port = Some(20880);
        registry
            .register(DescriptorKind::Protocol, "dubbo", Arc::new(protocol))
            .expect("protocol should register");
        registry
            .register(
                DescriptorKind::Service,
                "greeterService",
                Arc::new(ServiceConfig::new("com.example.Greeter")),
            )
            .expect("service should register");
        registry
    }

    fn environment() -> MapEnvironment {
        [
            ("dubbo.protocol.port", "20880"),
            ("custom.scan", "com.example"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn resolves_metadata_per_kind() {
        let registry = registry();
        let endpoint = MetadataEndpoint::new(&registry, environment());

        let protocols = endpoint.protocols().expect("protocols should resolve");
        assert_eq!(protocols.len(), 1);
        assert_eq!(
            protocols["dubbo"].get("port"),
            Some(&crate::model::scalar::ScalarValue::I32(20880))
        );
        assert!(endpoint.references().expect("references").is_empty());
        assert_eq!(endpoint.services().expect("services").len(), 1);
    }

    #[test]
    fn document_has_every_section_in_order() {
        let registry = registry();
        let endpoint = MetadataEndpoint::new(&registry, environment());
        let document = endpoint.document().expect("document should build");

        let sections: Vec<&str> = document
            .as_object()
            .expect("document is an object")
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(
            sections,
            vec!["services", "references", "protocols", PROPERTIES_SECTION]
        );
        assert_eq!(document["protocols"]["dubbo"]["port"], json!(20880));
        assert_eq!(
            document[PROPERTIES_SECTION],
            json!({"dubbo.protocol.port": "20880"})
        );
    }

    #[test]
    fn property_prefix_follows_config() {
        let registry = registry();
        let config = SnapshotConfig {
            property_prefix: "custom.".to_string(),
            ..SnapshotConfig::default()
        };
        let endpoint = MetadataEndpoint::new(&registry, environment()).with_config(&config);
        assert_eq!(endpoint.property_prefix(), "custom.");
        assert_eq!(
            endpoint.properties().keys().collect::<Vec<_>>(),
            vec!["custom.scan"]
        );
    }

    #[test]
    fn failing_instance_fails_the_section() {
        let mut registry = registry();
        registry
            .register(
                DescriptorKind::Protocol,
                "broken",
                Arc::new(ProtocolConfig::default()),
            )
            .expect("protocol should register");
        let endpoint = MetadataEndpoint::new(&registry, environment());

        let err = endpoint.protocols().expect_err("section must fail");
        assert!(matches!(
            err,
            EndpointError::Introspection { ref instance, kind: DescriptorKind::Protocol, .. }
                if instance == "broken"
        ));
        assert!(endpoint.document().is_err());
        assert!(endpoint.services().is_ok());
    }
}
