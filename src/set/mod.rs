//! The file set engine.
//!
//! A [`FileSet`] unites the files following one naming pattern and keeps the
//! logical index→types mapping and the physical on-disk names consistent
//! through every mutation. The engine is layered: the `relocate` module holds
//! the single-index primitive and the rolling-back range shift, `insert`
//! builds set-level insertion on top of them, and `remove`, `reorder` and
//! `flaws` are expressed in terms of those.

mod flaws;
mod insert;
mod relocate;
mod remove;
mod reorder;

pub use flaws::{Flaws, FLAW_SCAN_LIMIT};

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;
use tracing::debug;

use crate::errors::{FileSetError, Result};
use crate::fsio::FileOps;
use crate::pattern::Pattern;

/// Pattern of the set that `remove_files` extracts into by default.
pub const DEFAULT_REMOVE_PREFIX: &str = "removed";

/// An ordered collection of files sharing one naming pattern, addressed by
/// their running index. Gaps and multi-assigned indexes are expected states.
pub struct FileSet {
    pattern: Pattern,
    files: BTreeMap<i64, Vec<String>>,
    max_index: i64,
    fs: Rc<dyn FileOps>,
}

impl FileSet {
    /// Create an empty set.
    pub fn new(pattern: Pattern, fs: Rc<dyn FileOps>) -> Self {
        Self {
            pattern,
            files: BTreeMap::new(),
            max_index: -1,
            fs,
        }
    }

    /// Compile a set from a list of file names. Names that do not fit the
    /// pattern are skipped.
    pub fn from_names<S: AsRef<str>>(
        pattern: Pattern,
        names: impl IntoIterator<Item = S>,
        fs: Rc<dyn FileOps>,
    ) -> Self {
        let mut set = Self::new(pattern, fs);
        for name in names {
            let name = name.as_ref();
            match set.pattern.match_name(name) {
                Some((index, file_type)) => set.add_logically(index, &file_type),
                None => debug!(name, pattern = %set.pattern, "name does not fit pattern, skipped"),
            }
        }
        set
    }

    /// Adopt an already-compiled mapping.
    pub fn from_compiled(
        pattern: Pattern,
        files: BTreeMap<i64, Vec<String>>,
        fs: Rc<dyn FileOps>,
    ) -> Self {
        let mut set = Self {
            pattern,
            files,
            max_index: -1,
            fs,
        };
        set.files.retain(|_, types| !types.is_empty());
        set.max_index = set.recompute_max();
        set
    }

    /// Detect the set's files in the adapter's directory.
    pub fn detect(pattern: Pattern, fs: Rc<dyn FileOps>) -> Result<Self> {
        let names = fs
            .list_files()
            .map_err(|source| FileSetError::Scan { source })?;
        Ok(Self::from_names(pattern, names, fs))
    }

    /// A fresh, empty staging set whose pattern collides with no file the
    /// adapter currently sees. Used to hold files mid-operation.
    pub(crate) fn staging(fs: Rc<dyn FileOps>) -> Result<Self> {
        let names = fs
            .list_files()
            .map_err(|source| FileSetError::Scan { source })?;
        let mut n = 0u32;
        let prefix = loop {
            let candidate = format!("tmp{n}_");
            if !names.iter().any(|name| name.starts_with(&candidate)) {
                break candidate;
            }
            n += 1;
        };
        Ok(Self::new(Pattern::new(prefix, ""), fs))
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn files(&self) -> &BTreeMap<i64, Vec<String>> {
        &self.files
    }

    /// Highest assigned index, or -1 for an empty set.
    pub fn max_index(&self) -> i64 {
        self.max_index
    }

    /// Number of files in the set (multi-assigned indexes count once per type).
    pub fn len(&self) -> usize {
        self.files.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Whether `file_name` currently belongs to this set, along with its
    /// index. The index is reported even for fitting names that are not
    /// members; `None` means the name does not fit the pattern at all.
    pub fn file_in_set(&self, file_name: &str) -> (bool, Option<i64>) {
        match self.pattern.match_name(file_name) {
            Some((index, file_type)) => {
                let present = self
                    .files
                    .get(&index)
                    .is_some_and(|types| types.contains(&file_type));
                (present, Some(index))
            }
            None => (false, None),
        }
    }

    /// File names in ascending index order, ties broken alphabetically by
    /// type.
    pub fn get_files_list(&self) -> Vec<String> {
        let mut names = Vec::with_capacity(self.len());
        for (&index, types) in &self.files {
            let mut types = types.clone();
            types.sort();
            for file_type in &types {
                names.push(self.name(index, file_type));
            }
        }
        names
    }

    /// Rename every tracked file to follow `new_pattern`.
    pub fn change_pattern(&mut self, new_pattern: Pattern) -> Result<()> {
        for (&index, types) in &self.files {
            for file_type in types {
                let old_name = self.pattern.name(index, file_type);
                let new_name = new_pattern.name(index, file_type);
                self.fs
                    .rename(&old_name, &new_name)
                    .map_err(|source| FileSetError::Rename {
                        from: old_name.clone(),
                        to: new_name.clone(),
                        source,
                    })?;
            }
        }
        self.pattern = new_pattern;
        Ok(())
    }

    /// Re-read the adapter's directory and rebuild the mapping, e.g. after
    /// another program physically added or deleted files of the set.
    pub fn update(&mut self) -> Result<()> {
        let refreshed = Self::detect(self.pattern.clone(), Rc::clone(&self.fs))?;
        self.files = refreshed.files;
        self.max_index = refreshed.max_index;
        Ok(())
    }

    pub(crate) fn fs(&self) -> Rc<dyn FileOps> {
        Rc::clone(&self.fs)
    }

    pub(crate) fn name(&self, index: i64, file_type: &str) -> String {
        self.pattern.name(index, file_type)
    }

    pub(crate) fn do_rename(&self, from: &str, to: &str) -> Result<()> {
        self.fs
            .rename(from, to)
            .map_err(|source| FileSetError::Rename {
                from: from.to_string(),
                to: to.to_string(),
                source,
            })
    }

    pub(crate) fn recompute_max(&self) -> i64 {
        self.files.keys().next_back().copied().unwrap_or(-1)
    }

    /// Record a file at `index` without touching the filesystem.
    pub(crate) fn add_logically(&mut self, index: i64, file_type: &str) {
        self.files
            .entry(index)
            .or_default()
            .push(file_type.to_string());
        if index > self.max_index {
            self.max_index = index;
        }
    }

    /// Forget a file at `index` without touching the filesystem. An index
    /// whose last type is removed disappears entirely.
    pub(crate) fn remove_logically(&mut self, index: i64, file_type: &str) -> Result<()> {
        let types = self
            .files
            .get_mut(&index)
            .ok_or(FileSetError::IndexUnassigned { index })?;
        if types.len() == 1 {
            self.files.remove(&index);
            if index == self.max_index {
                self.max_index = self.recompute_max();
            }
        } else if let Some(pos) = types.iter().position(|t| t == file_type) {
            types.remove(pos);
        }
        Ok(())
    }
}

impl fmt::Display for FileSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.pattern)
    }
}

impl fmt::Debug for FileSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileSet")
            .field("pattern", &self.pattern.to_string())
            .field("files", &self.files)
            .field("max_index", &self.max_index)
            .finish()
    }
}
