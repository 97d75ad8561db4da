use namebridge_core::{ClassMetadata, MappingError, Result};
use ristretto_classfile::ClassFile;
use std::io::Cursor;

/// Reads the superclass, interfaces and fields out of raw class file bytes.
pub fn decode_class(bytes: Vec<u8>) -> Result<ClassMetadata> {
    let class = ClassFile::from_bytes(&mut Cursor::new(bytes))
        .map_err(|e| MappingError::Metadata(format!("Failed to parse class: {e:?}")))?;
    let pool = &class.constant_pool;

    let super_name = if class.super_class == 0 {
        None
    } else {
        let name = pool
            .try_get_class(class.super_class)
            .map_err(|e| MappingError::Metadata(format!("Failed to parse superclass: {e:?}")))?;
        Some(name.to_string())
    };

    let interfaces = class
        .interfaces
        .iter()
        .map(|&index| {
            pool.try_get_class(index)
                .map(|name| name.to_string())
                .map_err(|e| MappingError::Metadata(format!("Failed to parse interface: {e:?}")))
        })
        .collect::<Result<Vec<_>>>()?;

    let fields = class
        .fields
        .iter()
        .map(|field| {
            let name = pool
                .try_get_utf8(field.name_index)
                .map_err(|e| MappingError::Metadata(format!("Failed to parse field name: {e:?}")))?;
            let descriptor = pool.try_get_utf8(field.descriptor_index).map_err(|e| {
                MappingError::Metadata(format!("Failed to parse field descriptor: {e:?}"))
            })?;
            Ok((name.to_string(), descriptor.to_string()))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(ClassMetadata {
        super_name,
        interfaces,
        fields,
    })
}
