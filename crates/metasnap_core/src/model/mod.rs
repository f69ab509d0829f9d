//! Snapshot value model.
//!
//! # Responsibility
//! - Define the closed set of scalar kinds a metadata snapshot may carry.
//! - Define the ordered `MetadataMap` handed to endpoint callers.
//!
//! # Invariants
//! - `ScalarValue` never wraps a collection or nested object.
//! - `MetadataMap` preserves insertion order when serialized.

pub mod metadata;
pub mod scalar;
pub mod type_ref;
