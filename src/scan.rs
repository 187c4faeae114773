//! Automatic file-set discovery: group the files of a directory by their
//! inferred naming pattern.

use std::collections::BTreeMap;
use std::rc::Rc;
use tracing::debug;

use crate::errors::{FileSetError, Result};
use crate::fsio::FileOps;
use crate::pattern::{file_type_of, Pattern};
use crate::set::FileSet;

/// Strip the extension (everything after the first non-leading dot).
fn plain_name(file_name: &str) -> &str {
    let file_type = file_type_of(file_name);
    if file_type.is_empty() {
        file_name
    } else {
        &file_name[..file_name.len() - file_type.len() - 1]
    }
}

/// Split `name` around its last run of digits, which is taken as the running
/// index. Returns `None` for names without any digit.
fn split_on_last_number(name: &str) -> Option<(&str, &str)> {
    let last_digit = name.rfind(|c: char| c.is_ascii_digit())?;
    let run_start = name[..=last_digit]
        .rfind(|c: char| !c.is_ascii_digit())
        .map_or(0, |i| i + 1);
    Some((&name[..run_start], &name[last_digit + 1..]))
}

/// Detect the file sets present in the adapter's directory. Only names whose
/// running index is the last integer in their extension-less form are
/// considered; everything else is skipped.
pub fn detect_file_sets(fs: Rc<dyn FileOps>) -> Result<Vec<FileSet>> {
    let names = fs
        .list_files()
        .map_err(|source| FileSetError::Scan { source })?;

    let mut grouped: BTreeMap<(String, String), Vec<String>> = BTreeMap::new();
    for name in names {
        let plain = plain_name(&name);
        match split_on_last_number(plain) {
            Some((prefix, suffix)) => grouped
                .entry((prefix.to_string(), suffix.to_string()))
                .or_default()
                .push(name),
            None => debug!(%name, "no running index, skipped"),
        }
    }

    Ok(grouped
        .into_iter()
        .map(|((prefix, suffix), files)| {
            FileSet::from_names(Pattern::new(prefix, suffix), files, Rc::clone(&fs))
        })
        .collect())
}
