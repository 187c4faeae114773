//! Filesystem access behind a trait, so the engine can be driven against a
//! real directory or an in-memory stand-in (tests, dry runs).

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::trace;

/// The engine's view of the filesystem. Works on plain file names; an
/// implementation decides where those names live.
pub trait FileOps {
    /// Rename `old` to `new`. Must fail if `old` does not exist or `new`
    /// already exists.
    fn rename(&self, old: &str, new: &str) -> io::Result<()>;

    /// Whether `name` currently exists as a regular file.
    fn is_file(&self, name: &str) -> bool;

    /// Names of all regular files visible to this adapter.
    fn list_files(&self) -> io::Result<Vec<String>>;
}

/// Real filesystem adapter rooted at one directory.
#[derive(Debug, Clone)]
pub struct DirFs {
    root: PathBuf,
}

impl DirFs {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn current_dir() -> io::Result<Self> {
        Ok(Self::new(std::env::current_dir()?))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}

impl FileOps for DirFs {
    fn rename(&self, old: &str, new: &str) -> io::Result<()> {
        let from = self.resolve(old);
        let to = self.resolve(new);
        if !from.is_file() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{old} does not exist"),
            ));
        }
        if to.exists() {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("{new} already exists"),
            ));
        }
        trace!(%old, %new, "rename");
        fs::rename(from, to)
    }

    fn is_file(&self, name: &str) -> bool {
        self.resolve(name).is_file()
    }

    fn list_files(&self) -> io::Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                if let Ok(name) = entry.file_name().into_string() {
                    names.push(name);
                }
            }
        }
        Ok(names)
    }
}

/// In-memory adapter holding a flat set of file names. Records every rename
/// it performs, which doubles as the plan shown for dry runs and as the
/// assertion surface in tests.
#[derive(Debug, Default)]
pub struct MemFs {
    entries: RefCell<BTreeSet<String>>,
    log: RefCell<Vec<(String, String)>>,
}

impl MemFs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seeded(names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        let fs = Self::new();
        fs.entries
            .borrow_mut()
            .extend(names.into_iter().map(Into::into));
        fs
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.borrow().contains(name)
    }

    pub fn names(&self) -> Vec<String> {
        self.entries.borrow().iter().cloned().collect()
    }

    /// Every rename performed so far, in order.
    pub fn renames(&self) -> Vec<(String, String)> {
        self.log.borrow().clone()
    }

    pub fn rename_count(&self) -> usize {
        self.log.borrow().len()
    }
}

impl FileOps for MemFs {
    fn rename(&self, old: &str, new: &str) -> io::Result<()> {
        let mut entries = self.entries.borrow_mut();
        if !entries.contains(old) {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{old} does not exist"),
            ));
        }
        if entries.contains(new) {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("{new} already exists"),
            ));
        }
        entries.remove(old);
        entries.insert(new.to_string());
        self.log
            .borrow_mut()
            .push((old.to_string(), new.to_string()));
        Ok(())
    }

    fn is_file(&self, name: &str) -> bool {
        self.contains(name)
    }

    fn list_files(&self) -> io::Result<Vec<String>> {
        Ok(self.names())
    }
}
