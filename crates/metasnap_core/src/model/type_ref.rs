//! Runtime type references.

use serde::{Serialize, Serializer};
use std::any::{Any, TypeId};
use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};

/// Names a Rust type without holding an instance of it.
///
/// Used both as the declared type of a property and as a scalar value in its
/// own right (a property whose value is "which type handles this").
#[derive(Debug, Clone, Copy)]
pub struct TypeRef {
    id: TypeId,
    name: &'static str,
}

impl TypeRef {
    /// Returns the reference for `T`.
    pub fn of<T: ?Sized + Any>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// Full type path as reported by the compiler, e.g. `alloc::string::String`.
    ///
    /// Diagnostic only; the exact text is not stable across compiler versions.
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn type_id(&self) -> TypeId {
        self.id
    }

    /// Returns whether this reference names exactly `T`.
    pub fn is<T: ?Sized + Any>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

// Identity is the `TypeId`; the name is informational.
impl PartialEq for TypeRef {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeRef {}

impl Hash for TypeRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl Display for TypeRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name)
    }
}

impl Serialize for TypeRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name)
    }
}
