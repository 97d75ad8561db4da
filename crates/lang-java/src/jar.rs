use crate::classfile::decode_class;
use dashmap::DashMap;
use namebridge_core::metadata::internal_name;
use namebridge_core::{ClassMetadata, ClassMetadataReader, MappingError, Result};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use zip::ZipArchive;
use zip::result::ZipError;

/// Class metadata read straight out of a jar of compiled classes.
///
/// Archive access is serialised; decoding happens outside the lock and
/// decoded classes are cached, since the field merge and the graph builder
/// ask for many of the same classes.
pub struct JarClassReader {
    path: PathBuf,
    archive: Mutex<ZipArchive<File>>,
    cache: DashMap<String, Option<ClassMetadata>>,
}

impl JarClassReader {
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let archive = ZipArchive::new(file).map_err(|e| {
            MappingError::Metadata(format!("Failed to open jar {}: {e}", path.display()))
        })?;

        tracing::info!("Reading classes from {} ({} entries)", path.display(), archive.len());
        Ok(Self {
            path: path.to_path_buf(),
            archive: Mutex::new(archive),
            cache: DashMap::new(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn class_bytes(&self, origin_name: &str) -> Result<Option<Vec<u8>>> {
        let entry_name = format!("{}.class", internal_name(origin_name));
        let mut archive = self
            .archive
            .lock()
            .map_err(|_| MappingError::Metadata("jar archive lock poisoned".to_string()))?;

        let mut entry = match archive.by_name(&entry_name) {
            Ok(entry) => entry,
            Err(ZipError::FileNotFound) => return Ok(None),
            Err(e) => {
                return Err(MappingError::Metadata(format!(
                    "Failed to read {} from {}: {e}",
                    entry_name,
                    self.path.display()
                )));
            }
        };

        let mut bytes = Vec::with_capacity(entry.size() as usize);
        entry.read_to_end(&mut bytes)?;
        Ok(Some(bytes))
    }
}

impl ClassMetadataReader for JarClassReader {
    fn read_class(&self, origin_name: &str) -> Result<Option<ClassMetadata>> {
        if let Some(cached) = self.cache.get(origin_name) {
            return Ok(cached.value().clone());
        }

        let metadata = match self.class_bytes(origin_name)? {
            Some(bytes) => Some(decode_class(bytes).map_err(|e| match e {
                MappingError::Metadata(reason) => {
                    MappingError::Metadata(format!("{origin_name}: {reason}"))
                }
                other => other,
            })?),
            None => None,
        };

        self.cache
            .insert(origin_name.to_string(), metadata.clone());
        Ok(metadata)
    }
}
