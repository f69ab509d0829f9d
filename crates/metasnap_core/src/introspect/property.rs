//! Property descriptors and the `Introspectable` contract.

use crate::introspect::error::{AccessorResult, IntrospectionError};
use crate::introspect::naming::property_name_for_accessor;
use crate::model::type_ref::TypeRef;
use std::any::Any;
use std::fmt::{Debug, Formatter};

/// Boxed zero-argument read accessor bound to one object.
pub type ReadMethod<'a> = Box<dyn Fn() -> AccessorResult<Box<dyn Any>> + 'a>;

/// One declared property: name, declared type, optional read accessor.
///
/// A descriptor without a read accessor is write-only and never exposed.
/// A descriptor without a declared type models an untyped property and is
/// never exposed either.
pub struct PropertyDescriptor<'a> {
    name: String,
    property_type: Option<TypeRef>,
    read_method: Option<ReadMethod<'a>>,
}

impl<'a> PropertyDescriptor<'a> {
    /// Readable property backed by an infallible accessor.
    ///
    /// The declared type is the accessor's return type.
    pub fn read_only<V, F>(name: impl Into<String>, read: F) -> Self
    where
        V: Any,
        F: Fn() -> V + 'a,
    {
        Self::try_read_only(name, move || Ok(read()))
    }

    /// Readable property backed by an accessor that may fail.
    pub fn try_read_only<V, F>(name: impl Into<String>, read: F) -> Self
    where
        V: Any,
        F: Fn() -> AccessorResult<V> + 'a,
    {
        Self {
            name: name.into(),
            property_type: Some(TypeRef::of::<V>()),
            read_method: Some(Box::new(move || {
                read().map(|value| Box::new(value) as Box<dyn Any>)
            })),
        }
    }

    /// Readable property named after a `getX` / `isX` accessor identifier.
    ///
    /// Returns `None` when `accessor` is not a read accessor name.
    pub fn from_accessor<V, F>(accessor: &str, read: F) -> Option<Self>
    where
        V: Any,
        F: Fn() -> V + 'a,
    {
        property_name_for_accessor(accessor).map(|name| Self::read_only(name, read))
    }

    /// Property of type `V` that can be set but not read.
    pub fn write_only<V: Any>(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            property_type: Some(TypeRef::of::<V>()),
            read_method: None,
        }
    }

    /// Property whose type cannot be named.
    pub fn untyped(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            property_type: None,
            read_method: None,
        }
    }

    /// Replaces the raw accessor, keeping name and declared type.
    ///
    /// The accessor is trusted to return the declared type; extraction
    /// reports a mismatch instead of guessing.
    pub fn with_read_method(mut self, read: ReadMethod<'a>) -> Self {
        self.read_method = Some(read);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn property_type(&self) -> Option<TypeRef> {
        self.property_type
    }

    pub fn is_readable(&self) -> bool {
        self.read_method.is_some()
    }

    pub fn read_method(&self) -> Option<&ReadMethod<'a>> {
        self.read_method.as_ref()
    }
}

impl Debug for PropertyDescriptor<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PropertyDescriptor")
            .field("name", &self.name)
            .field("property_type", &self.property_type.map(|t| t.name()))
            .field("readable", &self.is_readable())
            .finish()
    }
}

/// Object that can describe its own properties.
///
/// Implementations return descriptors in a fixed order per type; accessors
/// borrow `self` and read the current value when invoked.
pub trait Introspectable: Send + Sync {
    /// Diagnostic name of the concrete type.
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Ordered property descriptors of this object.
    ///
    /// # Errors
    /// - Returns `IntrospectionError::NotIntrospectable` when the object is
    ///   in a state that cannot be described.
    fn property_descriptors(&self) -> Result<Vec<PropertyDescriptor<'_>>, IntrospectionError>;
}
