//! Removal, expressed as insertion in reverse: extracted files are moved into
//! a destination set instead of being deleted, so nothing is ever lost.

use std::rc::Rc;
use tracing::debug;

use super::{FileSet, DEFAULT_REMOVE_PREFIX};
use crate::errors::{FileSetError, Result};
use crate::pattern::Pattern;
use crate::span::{GapPolicy, Selection, Spot};

impl FileSet {
    /// Extract the selected indexes into `into` (or a freshly detected
    /// `removed*` set), appending after its current maximum.
    ///
    /// Unless `keep_gaps` is set, this set is afterwards fully compacted:
    /// surviving indexes are relabeled 0..n-1 in ascending order, closing
    /// every gap including pre-existing ones.
    ///
    /// Returns the destination set and the number of slots extracted
    /// (preserved-gap placeholders included under `GapPolicy::Preserve`).
    pub fn remove_files(
        &mut self,
        selection: Selection,
        into: Option<FileSet>,
        policy: GapPolicy,
        keep_gaps: bool,
    ) -> Result<(FileSet, usize)> {
        let mut removed_set = match into {
            Some(set) => set,
            None => FileSet::detect(
                Pattern::new(DEFAULT_REMOVE_PREFIX, ""),
                Rc::clone(&self.fs),
            )?,
        };

        let spot = Spot::after(removed_set.max_index);
        let removed = removed_set.add_file_set(self, spot, selection, policy)?;
        debug!(set = %self.pattern, into = %removed_set.pattern, removed, "files removed");

        if !keep_gaps {
            self.compact()?;
        }
        Ok((removed_set, removed))
    }

    /// Extract the single file (or multi-assigned file group) at `index`.
    pub fn remove_file(&mut self, index: i64, into: Option<FileSet>) -> Result<(FileSet, usize)> {
        if !self.files.contains_key(&index) {
            return Err(FileSetError::IndexUnassigned { index });
        }
        self.remove_files(Selection::Indexes(vec![index]), into, GapPolicy::Fail, false)
    }

    /// Relabel every assigned index to 0..n-1 in ascending order, closing all
    /// gaps. Already-compact sets perform no renames.
    pub(crate) fn compact(&mut self) -> Result<()> {
        let keys: Vec<i64> = self.files.keys().copied().collect();
        for (position, key) in keys.into_iter().enumerate() {
            self.change_index(key, position as i64, None)?;
        }
        Ok(())
    }
}
