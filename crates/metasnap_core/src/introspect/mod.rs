//! Property introspection contracts.
//!
//! # Responsibility
//! - Let descriptor types declare their readable properties explicitly.
//! - Classify declared property types against the accepted scalar kinds.
//!
//! # Invariants
//! - Classification is by exact type identity; no subtype or trait matching.
//! - Descriptor order returned by one type is stable across instances.

pub mod classifier;
pub mod error;
pub mod naming;
pub mod property;
