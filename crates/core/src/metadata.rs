//! Structural class metadata of the program being mapped.

use crate::error::Result;
use std::collections::HashMap;

/// What the loader needs to know about one origin class.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassMetadata {
    /// Origin-named superclass, `None` for a root such as `java/lang/Object`.
    pub super_name: Option<String>,
    /// Origin-named interfaces in declaration order.
    pub interfaces: Vec<String>,
    /// `(field name, type descriptor)` in declaration order.
    pub fields: Vec<(String, String)>,
}

impl ClassMetadata {
    pub fn field_descriptor(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, descriptor)| descriptor.as_str())
    }

    /// Supertypes in precedence order: superclass first, then interfaces.
    pub fn supertypes(&self) -> impl Iterator<Item = &str> {
        self.super_name
            .iter()
            .chain(self.interfaces.iter())
            .map(String::as_str)
    }
}

/// Reads class metadata by origin class name.
///
/// Implementations are shared between the field merge and the graph builder
/// and must tolerate concurrent calls. `Ok(None)` means the class does not
/// exist in the program; errors are reserved for unreadable input.
pub trait ClassMetadataReader: Send + Sync {
    fn read_class(&self, origin_name: &str) -> Result<Option<ClassMetadata>>;
}

/// Class metadata held in memory, keyed by origin name.
#[derive(Debug, Default, Clone)]
pub struct MemoryClassReader {
    classes: HashMap<String, ClassMetadata>,
}

impl MemoryClassReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_class(mut self, origin_name: &str, metadata: ClassMetadata) -> Self {
        self.insert(origin_name, metadata);
        self
    }

    pub fn insert(&mut self, origin_name: &str, metadata: ClassMetadata) {
        self.classes.insert(origin_name.to_string(), metadata);
    }
}

impl ClassMetadataReader for MemoryClassReader {
    fn read_class(&self, origin_name: &str) -> Result<Option<ClassMetadata>> {
        Ok(self.classes.get(origin_name).cloned())
    }
}

/// Normalises a binary name to internal form (`java.lang.Object` -> `java/lang/Object`).
pub fn internal_name(name: &str) -> String {
    name.replace('.', "/")
}
