//! Metadata snapshots of registered descriptor objects.
//!
//! Descriptor types declare their properties through [`Introspectable`];
//! [`extract_metadata`] keeps the simple-typed ones and returns an ordered
//! [`MetadataMap`] ready for JSON rendering by a management endpoint.

pub mod config;
pub mod descriptors;
pub mod endpoint;
pub mod env;
pub mod extract;
pub mod introspect;
pub mod logging;
pub mod model;
pub mod registry;

pub use config::{ConfigError, SnapshotConfig};
pub use descriptors::{ProtocolConfig, ReferenceConfig, ServiceConfig};
pub use endpoint::{EndpointError, EndpointResult, KindMetadata, MetadataEndpoint};
pub use env::{properties_with_prefix, Environment, MapEnvironment};
pub use extract::extract_metadata;
pub use introspect::classifier::{classify, is_accepted_scalar, AcceptedType};
pub use introspect::error::{AccessorError, AccessorResult, IntrospectionError};
pub use introspect::naming::{decapitalize, property_name_for_accessor};
pub use introspect::property::{Introspectable, PropertyDescriptor, ReadMethod};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::metadata::MetadataMap;
pub use model::scalar::{ScalarKind, ScalarValue};
pub use model::type_ref::TypeRef;
pub use registry::descriptor_registry::{
    DescriptorHandle, DescriptorInstances, DescriptorKind, DescriptorRegistry, ObjectProvider,
    RegistryError,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
