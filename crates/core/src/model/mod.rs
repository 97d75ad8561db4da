pub mod record;
pub mod table;

pub use record::{CONSTRUCTOR_MARKER, FieldKey, FieldNames, MethodKey, MethodNames, NameRecord};
pub use table::{MappingTable, RenameEntries};
