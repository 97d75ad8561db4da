use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MappingError {
    #[error("malformed input in {source_name} at line {line}: {reason}")]
    MalformedInput {
        source_name: String,
        line: usize,
        reason: String,
    },
    #[error("duplicate mapping for {member} in {class}: {detail}")]
    DuplicateMapping {
        class: String,
        member: String,
        detail: String,
    },
    #[error("canonical class name {canonical} is claimed by both {first} and {second}")]
    DuplicateCanonicalName {
        canonical: String,
        first: String,
        second: String,
    },
    #[error("{}", missing_metadata_message(.class, .member))]
    MissingMetadata {
        class: String,
        member: Option<String>,
    },
    #[error("missing {what} at {}", .path.display())]
    MissingSource { what: &'static str, path: PathBuf },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("class metadata error: {0}")]
    Metadata(String),
    #[error("mapping table codec error: {0}")]
    Codec(String),
    #[error("{stage} failed: {source}")]
    Stage {
        stage: &'static str,
        #[source]
        source: Box<MappingError>,
    },
}

fn missing_metadata_message(class: &str, member: &Option<String>) -> String {
    match member {
        Some(member) => format!("unable to find {class}/{member} in the class metadata"),
        None => format!("unable to find class {class} in the class metadata"),
    }
}

impl MappingError {
    pub fn malformed(source_name: &str, line: usize, reason: impl Into<String>) -> Self {
        MappingError::MalformedInput {
            source_name: source_name.to_string(),
            line,
            reason: reason.into(),
        }
    }

    pub fn missing_class(class: &str) -> Self {
        MappingError::MissingMetadata {
            class: class.to_string(),
            member: None,
        }
    }

    pub fn missing_member(class: &str, member: &str) -> Self {
        MappingError::MissingMetadata {
            class: class.to_string(),
            member: Some(member.to_string()),
        }
    }

    pub fn in_stage(self, stage: &'static str) -> Self {
        MappingError::Stage {
            stage,
            source: Box::new(self),
        }
    }

    /// Unwraps any number of `Stage` layers to the error that caused them.
    pub fn root_cause(&self) -> &MappingError {
        match self {
            MappingError::Stage { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, MappingError>;
