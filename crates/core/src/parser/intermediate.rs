//! Origin -> intermediate mappings.
//!
//! One record per line, introduced by a two letter tag:
//!
//! ```text
//! PK: ./ net/minecraft/src
//! CL: a net/minecraft/util/Alpha
//! FD: a/b net/minecraft/util/Alpha/field_1_b
//! MD: a/c (I)V net/minecraft/util/Alpha/func_2_c (I)V
//! ```
//!
//! The colon after the tag is optional. Blank lines and `#` comments are
//! skipped.

use super::{for_each_line, simple_name, split_member};
use crate::error::{MappingError, Result};
use crate::model::{MethodKey, MethodNames};
use std::collections::{BTreeMap, HashSet};
use std::io::BufRead;

/// origin class -> canonical class. Canonical starts out as the intermediate name.
pub type ClassNames = BTreeMap<String, String>;
/// origin class -> (intermediate field -> origin field)
pub type FieldTable = BTreeMap<String, BTreeMap<String, String>>;
/// origin class -> (origin method key -> intermediate method)
pub type MethodTable = BTreeMap<String, MethodNames>;

/// Result of the first pass over the intermediate mappings.
///
/// Class names, field renames and method renames are kept in separate
/// tables so each later stage can take ownership of exactly the part it
/// rewrites.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ParsedClasses {
    pub classes: ClassNames,
    pub fields: FieldTable,
    pub methods: MethodTable,
}

impl ParsedClasses {
    pub fn into_parts(self) -> (ClassNames, FieldTable, MethodTable) {
        (self.classes, self.fields, self.methods)
    }
}

#[derive(Default)]
struct IntermediateParser<'a> {
    source_name: &'a str,
    parsed: ParsedClasses,
    seen_fields: HashSet<(String, String)>,
}

impl<'a> IntermediateParser<'a> {
    fn new(source_name: &'a str) -> Self {
        Self {
            source_name,
            ..Default::default()
        }
    }

    fn line(&mut self, line_no: usize, line: &str) -> Result<()> {
        if line.is_empty() || line.starts_with('#') {
            return Ok(());
        }

        let (tag, rest) = match (line.get(..2), line.get(2..)) {
            (Some(tag), Some(rest)) => (tag, rest),
            _ => return Err(self.malformed(line_no, format!("truncated record: {line}"))),
        };
        let rest = rest.strip_prefix(':').unwrap_or(rest);
        let rest = rest.strip_prefix(' ').unwrap_or(rest);
        let args: Vec<&str> = rest.split(' ').collect();

        match tag {
            "PK" => Ok(()),
            "CL" => self.class(line_no, &args),
            "FD" => self.field(line_no, &args),
            "MD" => self.method(line_no, &args),
            other => Err(self.malformed(
                line_no,
                format!("unexpected line type {other} from {line}"),
            )),
        }
    }

    fn class(&mut self, line_no: usize, args: &[&str]) -> Result<()> {
        let [origin, intermediate, ..] = args else {
            return Err(self.malformed(line_no, "class record needs two names"));
        };
        self.parsed
            .classes
            .insert(origin.to_string(), intermediate.to_string());
        Ok(())
    }

    fn field(&mut self, line_no: usize, args: &[&str]) -> Result<()> {
        let [origin, intermediate, ..] = args else {
            return Err(self.malformed(line_no, "field record needs two names"));
        };
        let (owner, field) = self.owned_member(line_no, origin)?;
        let intermediate = simple_name(intermediate);

        if !self.seen_fields.insert((owner.to_string(), field.to_string())) {
            return Err(MappingError::DuplicateMapping {
                class: owner.to_string(),
                member: field.to_string(),
                detail: format!("origin field mapped twice, second time to {intermediate}"),
            });
        }

        let fields = self.parsed.fields.entry(owner.to_string()).or_default();
        if let Some(previous) = fields.insert(intermediate.to_string(), field.to_string()) {
            return Err(MappingError::DuplicateMapping {
                class: owner.to_string(),
                member: intermediate.to_string(),
                detail: format!("intermediate field claimed by both {previous} and {field}"),
            });
        }
        Ok(())
    }

    fn method(&mut self, line_no: usize, args: &[&str]) -> Result<()> {
        let [origin, descriptor, intermediate, ..] = args else {
            return Err(self.malformed(line_no, "method record needs a name, descriptor and target"));
        };
        let (owner, method) = self.owned_member(line_no, origin)?;
        let intermediate = simple_name(intermediate);

        // Methods that keep their name (overrides of library methods, mostly) need no entry
        if method == intermediate {
            return Ok(());
        }

        let key = MethodKey::new(method, *descriptor);
        let methods = self.parsed.methods.entry(owner.to_string()).or_default();
        if let Some(previous) = methods.insert(key.clone(), intermediate.to_string()) {
            return Err(MappingError::DuplicateMapping {
                class: owner.to_string(),
                member: key.to_string(),
                detail: format!("{previous} => {intermediate}"),
            });
        }
        Ok(())
    }

    /// Splits `owner/member` and checks the owner was declared by a `CL` record.
    fn owned_member<'l>(&self, line_no: usize, path: &'l str) -> Result<(&'l str, &'l str)> {
        let (owner, member) = split_member(path)
            .ok_or_else(|| self.malformed(line_no, format!("{path} has no owner class")))?;
        if !self.parsed.classes.contains_key(owner) {
            return Err(self.malformed(
                line_no,
                format!("{path} belongs to undeclared class {owner}"),
            ));
        }
        Ok((owner, member))
    }

    fn malformed(&self, line_no: usize, reason: impl Into<String>) -> MappingError {
        MappingError::malformed(self.source_name, line_no, reason)
    }
}

pub fn parse_intermediate<R: BufRead>(reader: R, source_name: &str) -> Result<ParsedClasses> {
    let mut parser = IntermediateParser::new(source_name);
    for_each_line(reader, |line_no, line| parser.line(line_no, line))?;

    tracing::info!(
        "Parsed {} classes, {} field and {} method mappings from {}",
        parser.parsed.classes.len(),
        parser.parsed.fields.values().map(|f| f.len()).sum::<usize>(),
        parser.parsed.methods.values().map(|m| m.len()).sum::<usize>(),
        source_name
    );
    Ok(parser.parsed)
}
