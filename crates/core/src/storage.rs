//! Persisted form of a [`MappingTable`].
//!
//! Records are flattened into plain storage structs, encoded as MessagePack
//! and compressed with zstd. The canonical bridge is not stored; it is
//! rebuilt (and its uniqueness re-checked) on load.

use crate::error::{MappingError, Result};
use crate::model::{FieldKey, MappingTable, MethodKey, NameRecord};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const CURRENT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
pub struct StorageTable {
    pub version: u32,
    pub records: Vec<StorageRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StorageRecord {
    pub origin: String,
    pub canonical: String,
    pub constructors: Vec<String>,
    pub methods: Vec<StorageMember>,
    pub fields: Vec<StorageMember>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StorageMember {
    pub name: String,
    pub descriptor: String,
    pub canonical: String,
}

pub fn to_storage(table: &MappingTable) -> StorageTable {
    let records = table
        .iter()
        .map(|record| StorageRecord {
            origin: record.origin_name.clone(),
            canonical: record.canonical_name.clone(),
            constructors: record.constructors.iter().cloned().collect(),
            methods: record
                .methods
                .iter()
                .map(|(key, canonical)| StorageMember {
                    name: key.name.clone(),
                    descriptor: key.descriptor.clone(),
                    canonical: canonical.clone(),
                })
                .collect(),
            fields: record
                .fields
                .iter()
                .map(|(key, canonical)| StorageMember {
                    name: key.name.clone(),
                    descriptor: key.descriptor.clone(),
                    canonical: canonical.clone(),
                })
                .collect(),
        })
        .collect();

    StorageTable {
        version: CURRENT_VERSION,
        records,
    }
}

pub fn from_storage(storage: StorageTable) -> Result<MappingTable> {
    if storage.version != CURRENT_VERSION {
        return Err(MappingError::Codec(format!(
            "unsupported mapping table version {} (expected {})",
            storage.version, CURRENT_VERSION
        )));
    }

    let records = storage.records.into_iter().map(|stored| {
        let mut record = NameRecord::new(stored.origin, stored.canonical);
        record.constructors.extend(stored.constructors);
        record.methods.extend(
            stored
                .methods
                .into_iter()
                .map(|m| (MethodKey::new(m.name, m.descriptor), m.canonical)),
        );
        record.fields.extend(
            stored
                .fields
                .into_iter()
                .map(|f| (FieldKey::new(f.name, f.descriptor), f.canonical)),
        );
        record
    });

    MappingTable::new(records)
}

impl MappingTable {
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let storage = to_storage(self);
        let bytes = rmp_serde::to_vec(&storage)
            .map_err(|e| MappingError::Codec(format!("MSGPACK error: {}", e)))?;

        zstd::encode_all(&bytes[..], 0)
            .map_err(|e| MappingError::Codec(format!("Zstd compression failed: {}", e)))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let decompressed = zstd::decode_all(bytes)
            .map_err(|e| MappingError::Codec(format!("Zstd decompression failed: {}", e)))?;

        let storage: StorageTable = rmp_serde::from_slice(&decompressed)
            .map_err(|e| MappingError::Codec(format!("MSGPACK error: {}", e)))?;

        from_storage(storage)
    }

    /// Writes the table to `path` atomically (temp file, then rename).
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let bytes = self.to_bytes()?;
        let temp_path = path.with_extension("tmp");
        std::fs::write(&temp_path, bytes)?;
        std::fs::rename(temp_path, path)?;

        tracing::info!("Saved {} class mappings to {}", self.len(), path.display());
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        let table = Self::from_bytes(&bytes)?;
        tracing::info!("Loaded {} class mappings from {}", table.len(), path.display());
        Ok(table)
    }

    /// Save the table as JSON (for debugging)
    pub fn save_to_json(&self, path: &Path) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, &to_storage(self))
            .map_err(|e| MappingError::Codec(e.to_string()))?;
        Ok(())
    }
}
