//! The finished, immutable mapping table.
//!
//! A `MappingTable` owns every [`NameRecord`] keyed by origin class name and a
//! canonical→origin bridge derived once at construction. Nothing mutates a
//! table after it is built.

use super::record::NameRecord;
use crate::error::{MappingError, Result};
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingTable {
    records: BTreeMap<String, NameRecord>,
    bridge: HashMap<String, String>,
}

/// Flat rename entries in the shape a bytecode remapper consumes.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RenameEntries {
    /// origin class -> canonical class
    pub classes: BTreeMap<String, String>,
    /// `origin/name` -> `canonical/name`, name carries the descriptor
    pub methods: BTreeMap<String, String>,
    /// `origin/name:descriptor` -> `canonical/name`
    pub fields: BTreeMap<String, String>,
}

impl MappingTable {
    /// Freezes `records` into a table.
    ///
    /// Fails if two records share a canonical name: the reverse bridge relies
    /// on canonical names being unique.
    pub fn new(records: impl IntoIterator<Item = NameRecord>) -> Result<Self> {
        let records: BTreeMap<String, NameRecord> = records
            .into_iter()
            .map(|record| (record.origin_name.clone(), record))
            .collect();

        let mut bridge: HashMap<String, String> = HashMap::with_capacity(records.len());
        for (origin, record) in &records {
            if let Some(first) = bridge.insert(record.canonical_name.clone(), origin.clone()) {
                return Err(MappingError::DuplicateCanonicalName {
                    canonical: record.canonical_name.clone(),
                    first,
                    second: origin.clone(),
                });
            }
        }

        Ok(Self { records, bridge })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, origin: &str) -> Option<&NameRecord> {
        self.records.get(origin)
    }

    pub fn origin_of(&self, canonical: &str) -> Option<&str> {
        self.bridge.get(canonical).map(String::as_str)
    }

    pub fn by_canonical(&self, canonical: &str) -> Option<&NameRecord> {
        self.origin_of(canonical)
            .and_then(|origin| self.records.get(origin))
    }

    /// Records in origin-name order.
    pub fn iter(&self) -> impl Iterator<Item = &NameRecord> {
        self.records.values()
    }

    pub fn rename_entries(&self) -> RenameEntries {
        let mut entries = RenameEntries::default();
        for record in self.records.values() {
            let origin = &record.origin_name;
            let canonical = &record.canonical_name;
            entries.classes.insert(origin.clone(), canonical.clone());

            for (key, name) in &record.methods {
                entries
                    .methods
                    .insert(format!("{origin}/{key}"), format!("{canonical}/{name}"));
            }
            for (key, name) in &record.fields {
                entries
                    .fields
                    .insert(format!("{origin}/{key}"), format!("{canonical}/{name}"));
            }
        }
        entries
    }
}
