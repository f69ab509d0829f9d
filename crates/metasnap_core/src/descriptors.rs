//! Built-in RPC descriptor types.
//!
//! # Responsibility
//! - Model the protocol, service and reference registrations an RPC
//!   application exposes for inspection.
//! - Declare their properties for metadata extraction.
//!
//! # Invariants
//! - Property order is the declaration order below and never changes.
//! - Collection-typed properties are declared but filtered out of snapshots.

use crate::introspect::error::IntrospectionError;
use crate::introspect::property::{Introspectable, PropertyDescriptor};
use crate::model::type_ref::TypeRef;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use url::Url;

/// Protocol binding such as `dubbo` on port 20880.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProtocolConfig {
    pub name: String,
    pub host: Option<String>,
    pub port: Option<i32>,
    pub threads: Option<i32>,
    pub serialization: Option<String>,
    pub payload: Option<i32>,
    pub register: Option<bool>,
    /// Free-form extension parameters; not part of snapshots.
    pub parameters: BTreeMap<String, String>,
}

impl ProtocolConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

impl Introspectable for ProtocolConfig {
    fn property_descriptors(&self) -> Result<Vec<PropertyDescriptor<'_>>, IntrospectionError> {
        if self.name.trim().is_empty() {
            return Err(IntrospectionError::not_introspectable(
                self.type_name(),
                "protocol name is not set",
            ));
        }

        Ok(vec![
            PropertyDescriptor::read_only("name", || self.name.clone()),
            PropertyDescriptor::read_only("host", || self.host.clone()),
            PropertyDescriptor::read_only("port", || self.port),
            PropertyDescriptor::read_only("threads", || self.threads),
            PropertyDescriptor::read_only("serialization", || self.serialization.clone()),
            PropertyDescriptor::read_only("payload", || self.payload),
            PropertyDescriptor::read_only("register", || self.register),
            PropertyDescriptor::read_only("parameters", || self.parameters.clone()),
        ])
    }
}

/// Exported service registration.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    pub interface_name: String,
    /// Rust type implementing the service, when known.
    pub interface_class: Option<TypeRef>,
    pub version: Option<String>,
    pub group: Option<String>,
    pub timeout: Option<i32>,
    pub retries: Option<i32>,
    pub weight: Option<i32>,
    pub export: Option<bool>,
    pub delay: Option<i32>,
    /// Set once the service is exported.
    pub exported_url: Option<Url>,
    pub exported_at: Option<DateTime<Utc>>,
    /// Protocol names the service is exported over; not part of snapshots.
    pub protocols: Vec<String>,
    /// Exported method names; not part of snapshots.
    pub methods: Vec<String>,
}

impl ServiceConfig {
    pub fn new(interface_name: impl Into<String>) -> Self {
        Self {
            interface_name: interface_name.into(),
            interface_class: None,
            version: None,
            group: None,
            timeout: None,
            retries: None,
            weight: None,
            export: None,
            delay: None,
            exported_url: None,
            exported_at: None,
            protocols: Vec::new(),
            methods: Vec::new(),
        }
    }

    /// Whether the service has been exported.
    pub fn is_exported(&self) -> bool {
        self.exported_url.is_some()
    }
}

impl Introspectable for ServiceConfig {
    fn property_descriptors(&self) -> Result<Vec<PropertyDescriptor<'_>>, IntrospectionError> {
        let exported = PropertyDescriptor::from_accessor("isExported", || self.is_exported())
            .ok_or_else(|| {
                IntrospectionError::not_introspectable(self.type_name(), "invalid accessor name")
            })?;
        Ok(vec![
            PropertyDescriptor::read_only("interface", || self.interface_name.clone()),
            PropertyDescriptor::read_only("interfaceClass", || self.interface_class),
            PropertyDescriptor::read_only("version", || self.version.clone()),
            PropertyDescriptor::read_only("group", || self.group.clone()),
            PropertyDescriptor::read_only("timeout", || self.timeout),
            PropertyDescriptor::read_only("retries", || self.retries),
            PropertyDescriptor::read_only("weight", || self.weight),
            PropertyDescriptor::read_only("export", || self.export),
            PropertyDescriptor::read_only("delay", || self.delay),
            exported,
            PropertyDescriptor::read_only("exportedUrl", || self.exported_url.clone()),
            PropertyDescriptor::read_only("exportedAt", || self.exported_at),
            PropertyDescriptor::read_only("protocols", || self.protocols.clone()),
            PropertyDescriptor::read_only("methods", || self.methods.clone()),
        ])
    }
}

/// Consumer-side reference to a remote service.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceConfig {
    pub interface_name: String,
    pub interface_class: Option<TypeRef>,
    pub version: Option<String>,
    pub group: Option<String>,
    /// Direct-connect URL bypassing the registry.
    pub url: Option<Url>,
    pub check: Option<bool>,
    pub lazy: Option<bool>,
    pub timeout: Option<i32>,
    pub retries: Option<i32>,
    pub generic: Option<bool>,
    /// Call parameters; not part of snapshots.
    pub parameters: BTreeMap<String, String>,
}

impl ReferenceConfig {
    pub fn new(interface_name: impl Into<String>) -> Self {
        Self {
            interface_name: interface_name.into(),
            interface_class: None,
            version: None,
            group: None,
            url: None,
            check: None,
            lazy: None,
            timeout: None,
            retries: None,
            generic: None,
            parameters: BTreeMap::new(),
        }
    }
}

impl Introspectable for ReferenceConfig {
    fn property_descriptors(&self) -> Result<Vec<PropertyDescriptor<'_>>, IntrospectionError> {
        Ok(vec![
            PropertyDescriptor::read_only("interface", || self.interface_name.clone()),
            PropertyDescriptor::read_only("interfaceClass", || self.interface_class),
            PropertyDescriptor::read_only("version", || self.version.clone()),
            PropertyDescriptor::read_only("group", || self.group.clone()),
            PropertyDescriptor::read_only("url", || self.url.clone()),
            PropertyDescriptor::read_only("check", || self.check),
            PropertyDescriptor::read_only("lazy", || self.lazy),
            PropertyDescriptor::read_only("timeout", || self.timeout),
            PropertyDescriptor::read_only("retries", || self.retries),
            PropertyDescriptor::read_only("generic", || self.generic),
            PropertyDescriptor::read_only("parameters", || self.parameters.clone()),
        ])
    }
}
