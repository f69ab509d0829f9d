//! Descriptor registry and object-provider contract.

use crate::introspect::property::Introspectable;
use log::info;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::sync::Arc;

/// Families of descriptor objects exposed through the endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DescriptorKind {
    /// Exported service registrations.
    Service,
    /// Consumer-side service references.
    Reference,
    /// Protocol bindings.
    Protocol,
}

impl DescriptorKind {
    pub const ALL: [DescriptorKind; 3] = [Self::Service, Self::Reference, Self::Protocol];

    /// Stable id used in documents and CLI flags.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Service => "service",
            Self::Reference => "reference",
            Self::Protocol => "protocol",
        }
    }

    /// Plural section name used in endpoint documents.
    pub fn section(self) -> &'static str {
        match self {
            Self::Service => "services",
            Self::Reference => "references",
            Self::Protocol => "protocols",
        }
    }

    /// Parses a kind from its stable id.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "service" => Some(Self::Service),
            "reference" => Some(Self::Reference),
            "protocol" => Some(Self::Protocol),
            _ => None,
        }
    }
}

impl Display for DescriptorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shared handle to one registered descriptor.
pub type DescriptorHandle = Arc<dyn Introspectable>;

/// Named instances of one kind, sorted by name.
pub type DescriptorInstances = BTreeMap<String, DescriptorHandle>;

/// Source of named descriptor instances.
pub trait ObjectProvider {
    /// Returns every instance of `kind`, keyed by instance name.
    fn lookup_instances_by_kind(&self, kind: DescriptorKind) -> DescriptorInstances;
}

impl<T: ObjectProvider + ?Sized> ObjectProvider for &T {
    fn lookup_instances_by_kind(&self, kind: DescriptorKind) -> DescriptorInstances {
        (**self).lookup_instances_by_kind(kind)
    }
}

impl<T: ObjectProvider + ?Sized> ObjectProvider for Arc<T> {
    fn lookup_instances_by_kind(&self, kind: DescriptorKind) -> DescriptorInstances {
        (**self).lookup_instances_by_kind(kind)
    }
}

/// Registration errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    InvalidInstanceName(String),
    DuplicateInstanceName { kind: DescriptorKind, name: String },
}

impl Display for RegistryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInstanceName(value) => {
                write!(f, "descriptor instance name is invalid: `{value}`")
            }
            Self::DuplicateInstanceName { kind, name } => {
                write!(f, "{kind} descriptor already registered: {name}")
            }
        }
    }
}

impl Error for RegistryError {}

/// Map-backed `ObjectProvider`.
#[derive(Default)]
pub struct DescriptorRegistry {
    instances: BTreeMap<DescriptorKind, DescriptorInstances>,
}

impl DescriptorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers one named instance under `kind`.
    ///
    /// Names are trimmed before validation and storage.
    pub fn register(
        &mut self,
        kind: DescriptorKind,
        name: &str,
        instance: DescriptorHandle,
    ) -> Result<(), RegistryError> {
        let name = name.trim().to_string();
        if !is_valid_instance_name(&name) {
            return Err(RegistryError::InvalidInstanceName(name));
        }

        let by_name = self.instances.entry(kind).or_default();
        if by_name.contains_key(name.as_str()) {
            return Err(RegistryError::DuplicateInstanceName { kind, name });
        }

        info!(
            "event=registry_register module=registry status=ok kind={} name={} type={}",
            kind,
            name,
            instance.type_name()
        );
        by_name.insert(name, instance);
        Ok(())
    }

    /// Removes one instance, returning it when present.
    pub fn unregister(&mut self, kind: DescriptorKind, name: &str) -> Option<DescriptorHandle> {
        let by_name = self.instances.get_mut(&kind)?;
        let removed = by_name.remove(name.trim());
        if by_name.is_empty() {
            self.instances.remove(&kind);
        }
        removed
    }

    /// Total number of registered instances across kinds.
    pub fn len(&self) -> usize {
        self.instances.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Sorted instance names of one kind.
    pub fn names(&self, kind: DescriptorKind) -> Vec<String> {
        self.instances
            .get(&kind)
            .map(|by_name| by_name.keys().cloned().collect())
            .unwrap_or_default()
    }

    pub fn get(&self, kind: DescriptorKind, name: &str) -> Option<DescriptorHandle> {
        self.instances.get(&kind)?.get(name.trim()).cloned()
    }
}

impl ObjectProvider for DescriptorRegistry {
    fn lookup_instances_by_kind(&self, kind: DescriptorKind) -> DescriptorInstances {
        self.instances.get(&kind).cloned().unwrap_or_default()
    }
}

impl Debug for DescriptorRegistry {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let names: BTreeMap<_, _> = self
            .instances
            .iter()
            .map(|(kind, by_name)| (kind.as_str(), by_name.keys().collect::<Vec<_>>()))
            .collect();
        f.debug_struct("DescriptorRegistry")
            .field("instances", &names)
            .finish()
    }
}

fn is_valid_instance_name(value: &str) -> bool {
    !value.is_empty() && !value.chars().any(|c| c.is_whitespace() || c.is_control())
}
