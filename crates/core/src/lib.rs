pub mod config;
pub mod error;
pub mod hierarchy;
pub mod logging;
pub mod merge;
pub mod metadata;
pub mod model;
pub mod parser;
pub mod pipeline;
pub mod source;
pub mod storage;

pub use config::{LoaderConfig, SourceSet, TextSources};
pub use error::{MappingError, Result};
pub use metadata::{ClassMetadata, ClassMetadataReader, MemoryClassReader};
pub use model::{FieldKey, MappingTable, MethodKey, NameRecord};
pub use pipeline::{LoadOutcome, MappingLoader};
pub use source::SourceSupplier;
