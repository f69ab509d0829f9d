//! Metadata extraction.
//!
//! # Responsibility
//! - Turn one `Introspectable` object into an ordered `MetadataMap`.
//!
//! # Invariants
//! - Only readable properties with an accepted declared type are exposed.
//! - Extraction is all-or-nothing: any failure discards collected entries.
//! - Exposed keys are unique per object; a repeat fails the extraction.
//! - The extractor holds no state; concurrent calls need no coordination.

use crate::introspect::classifier::classify;
use crate::introspect::error::IntrospectionError;
use crate::introspect::naming::decapitalize;
use crate::introspect::property::Introspectable;
use crate::model::metadata::MetadataMap;
use crate::model::scalar::ScalarKind;
use log::{debug, trace, warn};

/// Snapshots the simple-typed properties of `source`.
///
/// Keys are normalized with [`decapitalize`] and appear in the order the
/// source type declares its properties.
///
/// # Errors
/// - `NotIntrospectable` when `source` cannot describe its properties.
/// - `AccessorFailed` when any exposed property's accessor fails.
/// - `ValueTypeMismatch` when an accessor returns a value that is not its
///   declared type.
/// - `DuplicateProperty` when two exposed properties share a key after
///   normalization.
pub fn extract_metadata(source: &dyn Introspectable) -> Result<MetadataMap, IntrospectionError> {
    let type_name = source.type_name();
    let result = collect(source);
    match &result {
        Ok(metadata) => debug!(
            "event=metadata_extract module=extract status=ok type={} properties={}",
            type_name,
            metadata.len()
        ),
        Err(err) => warn!(
            "event=metadata_extract module=extract status=error type={} error={}",
            type_name, err
        ),
    }
    result
}

fn collect(source: &dyn Introspectable) -> Result<MetadataMap, IntrospectionError> {
    let type_name = source.type_name();
    let descriptors = source.property_descriptors()?;
    let mut metadata = MetadataMap::with_capacity(descriptors.len());

    for descriptor in &descriptors {
        let Some(read) = descriptor.read_method() else {
            continue;
        };
        let Some(property_type) = descriptor.property_type() else {
            continue;
        };
        let Some(accepted) = classify(&property_type) else {
            continue;
        };

        let key = decapitalize(descriptor.name());
        if metadata.contains_key(&key) {
            return Err(IntrospectionError::DuplicateProperty {
                type_name,
                property: key,
            });
        }

        let raw = read().map_err(|source| IntrospectionError::AccessorFailed {
            type_name,
            property: descriptor.name().to_string(),
            source,
        })?;
        let value = accepted.read_scalar(raw).ok_or_else(|| {
            IntrospectionError::ValueTypeMismatch {
                type_name,
                property: descriptor.name().to_string(),
                declared: property_type.name(),
            }
        })?;

        trace!(
            "event=property_read module=extract type={} property={} kind={}",
            type_name,
            key,
            value.kind().map_or("null", ScalarKind::as_str)
        );
        metadata.insert(key, value);
    }

    Ok(metadata)
}
