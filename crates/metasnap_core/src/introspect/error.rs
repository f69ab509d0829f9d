//! Introspection and accessor errors.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Failure raised by one property read accessor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessorError {
    message: String,
}

impl AccessorError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for AccessorError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl Error for AccessorError {}

impl From<String> for AccessorError {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for AccessorError {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

pub type AccessorResult<T> = Result<T, AccessorError>;

/// Fatal extraction failure for one object.
///
/// Every variant aborts the whole extraction; no partial snapshot is ever
/// returned alongside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntrospectionError {
    /// The object's type could not describe its properties.
    NotIntrospectable {
        type_name: &'static str,
        reason: String,
    },
    /// A read accessor failed while building the snapshot.
    AccessorFailed {
        type_name: &'static str,
        property: String,
        source: AccessorError,
    },
    /// A read accessor produced a value that is not its declared type.
    ValueTypeMismatch {
        type_name: &'static str,
        property: String,
        declared: &'static str,
    },
    /// Two readable properties normalize to the same key.
    DuplicateProperty {
        type_name: &'static str,
        property: String,
    },
}

impl IntrospectionError {
    pub fn not_introspectable(type_name: &'static str, reason: impl Into<String>) -> Self {
        Self::NotIntrospectable {
            type_name,
            reason: reason.into(),
        }
    }

    /// Type whose extraction failed.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::NotIntrospectable { type_name, .. }
            | Self::AccessorFailed { type_name, .. }
            | Self::ValueTypeMismatch { type_name, .. }
            | Self::DuplicateProperty { type_name, .. } => type_name,
        }
    }
}

impl Display for IntrospectionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotIntrospectable { type_name, reason } => {
                write!(f, "cannot introspect `{type_name}`: {reason}")
            }
            Self::AccessorFailed {
                type_name,
                property,
                source,
            } => write!(
                f,
                "failed to read property `{property}` of `{type_name}`: {source}"
            ),
            Self::ValueTypeMismatch {
                type_name,
                property,
                declared,
            } => write!(
                f,
                "property `{property}` of `{type_name}` did not produce its declared type `{declared}`"
            ),
            Self::DuplicateProperty {
                type_name,
                property,
            } => write!(f, "`{type_name}` exposes property `{property}` more than once"),
        }
    }
}

impl Error for IntrospectionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::AccessorFailed { source, .. } => Some(source),
            Self::NotIntrospectable { .. }
            | Self::ValueTypeMismatch { .. }
            | Self::DuplicateProperty { .. } => None,
        }
    }
}
