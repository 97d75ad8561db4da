//! Readers for the textual mapping inputs.

pub mod canonical;
pub mod constructors;
pub mod intermediate;

pub use canonical::{CanonicalNames, parse_canonical_names};
pub use constructors::{ConstructorTable, resolve_constructors};
pub use intermediate::{ClassNames, FieldTable, MethodTable, ParsedClasses, parse_intermediate};

use crate::error::Result;
use std::io::BufRead;

/// Feeds every line of `reader` to `handle` with its 1-based line number.
pub(crate) fn for_each_line<R, F>(reader: R, mut handle: F) -> Result<()>
where
    R: BufRead,
    F: FnMut(usize, &str) -> Result<()>,
{
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        handle(index + 1, line.trim_end_matches('\r'))?;
    }
    Ok(())
}

/// Splits `owner/member` at the last slash.
pub(crate) fn split_member(path: &str) -> Option<(&str, &str)> {
    let end = path.rfind('/')?;
    Some((&path[..end], &path[end + 1..]))
}

/// The simple name after the last slash, or the whole string.
pub(crate) fn simple_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}
