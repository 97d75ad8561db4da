//! Intermediate -> canonical name tables (`methods.csv`, `fields.csv`).
//!
//! Comma separated, first line is a header. Only the first two columns are
//! read; anything after them (side, comment) is ignored.

use super::for_each_line;
use crate::error::{MappingError, Result};
use std::collections::HashMap;
use std::io::BufRead;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CanonicalNames {
    names: HashMap<String, String>,
}

impl CanonicalNames {
    pub fn get(&self, intermediate: &str) -> Option<&str> {
        self.names.get(intermediate).map(String::as_str)
    }

    /// The canonical name, falling back to the intermediate name itself.
    pub fn resolve<'a>(&'a self, intermediate: &'a str) -> &'a str {
        self.get(intermediate).unwrap_or(intermediate)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl FromIterator<(String, String)> for CanonicalNames {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self {
            names: iter.into_iter().collect(),
        }
    }
}

pub fn parse_canonical_names<R: BufRead>(reader: R, source_name: &str) -> Result<CanonicalNames> {
    let mut names = HashMap::new();

    for_each_line(reader, |line_no, line| {
        if line_no == 1 || line.is_empty() {
            return Ok(());
        }

        let mut columns = line.splitn(3, ',');
        let intermediate = columns.next().unwrap_or_default();
        let canonical = columns.next().ok_or_else(|| {
            MappingError::malformed(source_name, line_no, format!("no delimiter in {line}"))
        })?;

        names.insert(intermediate.to_string(), canonical.to_string());
        Ok(())
    })?;

    tracing::debug!("Read {} canonical names from {}", names.len(), source_name);
    Ok(CanonicalNames { names })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn parse(text: &str) -> Result<CanonicalNames> {
        parse_canonical_names(Cursor::new(text.as_bytes()), "fields.csv")
    }

    #[test]
    fn test_header_is_skipped_and_extra_columns_ignored() {
        let names = parse(
            "searge,name,side,desc\n\
             field_1_a,maxHealth,2,The entity's health\n\
             func_2_b,tick,0,\n",
        )
        .unwrap();

        assert_eq!(names.len(), 2);
        assert_eq!(names.get("field_1_a"), Some("maxHealth"));
        assert_eq!(names.get("searge"), None);
        assert_eq!(names.resolve("func_2_b"), "tick");
    }

    #[test]
    fn test_unmapped_names_resolve_to_themselves() {
        let names = parse("searge,name,side,desc\n").unwrap();
        assert!(names.is_empty());
        assert_eq!(names.resolve("field_9_z"), "field_9_z");
    }

    #[test]
    fn test_two_column_rows_are_accepted() {
        let names = parse("searge,name\nfield_1_a,health\n").unwrap();
        assert_eq!(names.get("field_1_a"), Some("health"));
    }

    #[test]
    fn test_missing_delimiter_is_fatal() {
        let err = parse("searge,name,side,desc\nfield_1_a\n").unwrap_err();
        match err {
            MappingError::MalformedInput {
                source_name, line, ..
            } => {
                assert_eq!(source_name, "fields.csv");
                assert_eq!(line, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
