//! Constructor signatures.
//!
//! Each line is `<id> <intermediateClass> <descriptor>`, with the descriptor
//! written in intermediate names. Owners and embedded `L...;` types are
//! translated back to origin names through the class table.

use super::{ClassNames, for_each_line};
use crate::error::{MappingError, Result};
use crate::model::CONSTRUCTOR_MARKER;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::io::BufRead;

/// origin class -> `<init> (...)V` descriptors in origin names
pub type ConstructorTable = BTreeMap<String, BTreeSet<String>>;

static REFERENCE_TYPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"L([^;]+);").expect("reference type pattern is valid"));

pub fn resolve_constructors<R: BufRead>(
    reader: R,
    source_name: &str,
    classes: &ClassNames,
) -> Result<ConstructorTable> {
    let backwards: HashMap<&str, &str> = classes
        .iter()
        .map(|(origin, intermediate)| (intermediate.as_str(), origin.as_str()))
        .collect();

    let mut constructors = ConstructorTable::new();
    let mut skipped = 0usize;

    for_each_line(reader, |line_no, line| {
        if line.is_empty() || line.starts_with('#') {
            return Ok(());
        }

        let parts: Vec<&str> = line.split(' ').collect();
        let [_, owner, descriptor] = parts.as_slice() else {
            return Err(MappingError::malformed(
                source_name,
                line_no,
                format!("expected 3 columns, found {} in {line}", parts.len()),
            ));
        };

        let Some(origin) = backwards.get(owner) else {
            // Anonymous and synthetic classes routinely have no class mapping
            tracing::debug!("No class mapping for constructor owner {}", owner);
            skipped += 1;
            return Ok(());
        };

        let rewritten = REFERENCE_TYPE.replace_all(descriptor, |caps: &Captures| {
            let name = &caps[1];
            format!("L{};", backwards.get(name).copied().unwrap_or(name))
        });

        constructors
            .entry(origin.to_string())
            .or_default()
            .insert(format!("{CONSTRUCTOR_MARKER}{rewritten}"));
        Ok(())
    })?;

    tracing::info!(
        "Resolved constructors for {} classes ({} lines without an owner mapping)",
        constructors.len(),
        skipped
    );
    Ok(constructors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn classes() -> ClassNames {
        [
            ("a", "net/minecraft/util/Alpha"),
            ("b", "net/minecraft/util/Beta"),
        ]
        .into_iter()
        .map(|(o, i)| (o.to_string(), i.to_string()))
        .collect()
    }

    fn resolve(text: &str) -> Result<ConstructorTable> {
        resolve_constructors(Cursor::new(text.as_bytes()), "constructors.txt", &classes())
    }

    #[test]
    fn test_descriptor_types_are_translated_to_origin_names() {
        let table = resolve(
            "1 net/minecraft/util/Alpha (Lnet/minecraft/util/Beta;ILjava/lang/String;)V\n",
        )
        .unwrap();

        let ctors = &table["a"];
        assert_eq!(ctors.len(), 1);
        assert!(ctors.contains("<init> (Lb;ILjava/lang/String;)V"));
    }

    #[test]
    fn test_array_and_primitive_parameters_survive() {
        let table = resolve("7 net/minecraft/util/Beta ([Lnet/minecraft/util/Alpha;[[IZ)V\n").unwrap();
        assert!(table["b"].contains("<init> ([La;[[IZ)V"));
    }

    #[test]
    fn test_unknown_owner_is_skipped_silently() {
        let table = resolve(
            "# header\n\
             2 net/minecraft/util/Alpha$1 ()V\n\
             3 net/minecraft/util/Alpha ()V\n",
        )
        .unwrap();

        assert_eq!(table.len(), 1);
        assert!(table["a"].contains("<init> ()V"));
    }

    #[test]
    fn test_identical_signatures_collapse() {
        let table = resolve(
            "1 net/minecraft/util/Alpha (I)V\n4 net/minecraft/util/Alpha (I)V\n",
        )
        .unwrap();
        assert_eq!(table["a"].len(), 1);
    }

    #[test]
    fn test_wrong_column_count_is_malformed() {
        let err = resolve("1 net/minecraft/util/Alpha\n").unwrap_err();
        assert!(matches!(err, MappingError::MalformedInput { line: 1, .. }));
    }
}
