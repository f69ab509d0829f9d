//! In-process descriptor lookup.
//!
//! # Responsibility
//! - Hold named descriptor instances grouped by descriptor kind.
//! - Serve them to the endpoint layer through the `ObjectProvider` contract.
//!
//! # Invariants
//! - Instance names are unique per kind.
//! - Lookups return names in sorted order.

pub mod descriptor_registry;
