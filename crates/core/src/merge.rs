//! Folds intermediate member names into canonical names.
//!
//! Each merge consumes its intermediate table and returns a fresh one; the
//! old per-class maps are discarded rather than patched.

use crate::error::{MappingError, Result};
use crate::metadata::{ClassMetadata, ClassMetadataReader};
use crate::model::{FieldKey, FieldNames, MethodNames};
use crate::parser::{CanonicalNames, FieldTable, MethodTable};
use std::collections::BTreeMap;

/// origin class -> (origin field, descriptor) -> canonical name
pub type MergedFields = BTreeMap<String, FieldNames>;
/// origin class -> origin method key -> canonical name
pub type MergedMethods = BTreeMap<String, MethodNames>;

/// Re-keys every field by origin name and type descriptor.
///
/// Descriptors come from the program's own class metadata, so a field (or
/// class) the reader cannot find means the mappings do not describe this
/// program and the merge fails.
pub fn merge_fields(
    fields: FieldTable,
    names: &CanonicalNames,
    reader: &dyn ClassMetadataReader,
) -> Result<MergedFields> {
    let mut merged = MergedFields::new();
    let mut total = 0usize;

    for (class, entries) in fields {
        if entries.is_empty() {
            continue;
        }

        let metadata = reader
            .read_class(&class)?
            .ok_or_else(|| MappingError::missing_class(&class))?;

        let mut renamed = FieldNames::new();
        for (intermediate, origin) in entries {
            let descriptor = unique_descriptor(&class, &metadata, &origin)?;
            let canonical = names.resolve(&intermediate).to_string();
            renamed.insert(FieldKey::new(origin, descriptor), canonical);
        }

        total += renamed.len();
        merged.insert(class, renamed);
    }

    tracing::info!("Merged {} field names across {} classes", total, merged.len());
    Ok(merged)
}

/// The descriptor of the only field named `field`; a name carried by two
/// fields of the class cannot be keyed to either.
fn unique_descriptor<'m>(class: &str, metadata: &'m ClassMetadata, field: &str) -> Result<&'m str> {
    let mut matches = metadata
        .fields
        .iter()
        .filter(|(name, _)| name == field)
        .map(|(_, descriptor)| descriptor.as_str());

    let descriptor = matches
        .next()
        .ok_or_else(|| MappingError::missing_member(class, field))?;
    if let Some(other) = matches.next() {
        return Err(MappingError::DuplicateMapping {
            class: class.to_string(),
            member: field.to_string(),
            detail: format!("class metadata declares the field as both {descriptor} and {other}"),
        });
    }
    Ok(descriptor)
}

pub fn merge_methods(methods: MethodTable, names: &CanonicalNames) -> MergedMethods {
    let merged: MergedMethods = methods
        .into_iter()
        .filter(|(_, entries)| !entries.is_empty())
        .map(|(class, entries)| {
            let renamed: MethodNames = entries
                .into_iter()
                .map(|(key, intermediate)| {
                    let canonical = names.resolve(&intermediate).to_string();
                    (key, canonical)
                })
                .collect();
            (class, renamed)
        })
        .collect();

    tracing::info!(
        "Merged {} method names across {} classes",
        merged.values().map(|m| m.len()).sum::<usize>(),
        merged.len()
    );
    merged
}
