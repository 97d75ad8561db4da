use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Marker prefixed to every stored constructor descriptor.
pub const CONSTRUCTOR_MARKER: &str = "<init> ";

/// A method slot: origin name plus its origin-named descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MethodKey {
    pub name: String,
    pub descriptor: String,
}

impl MethodKey {
    pub fn new(name: impl Into<String>, descriptor: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            descriptor: descriptor.into(),
        }
    }
}

impl fmt::Display for MethodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.name, self.descriptor)
    }
}

/// A field slot. Fields are keyed by name and type because two origin
/// members may collide on name alone once inherited.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldKey {
    pub name: String,
    pub descriptor: String,
}

impl FieldKey {
    pub fn new(name: impl Into<String>, descriptor: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            descriptor: descriptor.into(),
        }
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.descriptor)
    }
}

pub type MethodNames = BTreeMap<MethodKey, String>;
pub type FieldNames = BTreeMap<FieldKey, String>;

/// The finished renames for one origin class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameRecord {
    pub origin_name: String,
    pub canonical_name: String,
    /// `<init> (...)V` descriptors with origin-named parameter types.
    pub constructors: BTreeSet<String>,
    pub methods: MethodNames,
    pub fields: FieldNames,
}

impl NameRecord {
    pub fn new(origin_name: impl Into<String>, canonical_name: impl Into<String>) -> Self {
        Self {
            origin_name: origin_name.into(),
            canonical_name: canonical_name.into(),
            constructors: BTreeSet::new(),
            methods: BTreeMap::new(),
            fields: BTreeMap::new(),
        }
    }

    pub fn method(&self, name: &str, descriptor: &str) -> Option<&str> {
        self.methods
            .get(&MethodKey::new(name, descriptor))
            .map(String::as_str)
    }

    pub fn field(&self, name: &str, descriptor: &str) -> Option<&str> {
        self.fields
            .get(&FieldKey::new(name, descriptor))
            .map(String::as_str)
    }
}
