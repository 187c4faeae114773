//! Set-level insertion: the workhorse every higher-level mutation is
//! expressed through.

use tracing::{debug, trace};

use super::FileSet;
use crate::errors::{FileSetError, Result};
use crate::pattern::file_type_of;
use crate::span::{GapPolicy, IndexRange, Selection, Spot};

/// One destination slot of a resolved selection: a source index, or a
/// preserved-gap placeholder that consumes the slot but renames nothing.
enum Slot {
    File(i64),
    Gap,
}

fn resolve_selection(
    source: &FileSet,
    selection: &Selection,
    policy: GapPolicy,
) -> Result<Vec<Slot>> {
    match selection {
        Selection::All => Ok(source.files.keys().map(|&i| Slot::File(i)).collect()),
        Selection::Indexes(indexes) => {
            let mut slots = Vec::with_capacity(indexes.len());
            for &index in indexes {
                if source.files.contains_key(&index) {
                    slots.push(Slot::File(index));
                } else {
                    match policy {
                        GapPolicy::Fail => {
                            return Err(FileSetError::IndexUnassigned { index });
                        }
                        GapPolicy::Strip => trace!(index, "gap stripped"),
                        GapPolicy::Preserve => slots.push(Slot::Gap),
                    }
                }
            }
            Ok(slots)
        }
    }
}

impl FileSet {
    /// Move the selected indexes of `source` into this set, starting at
    /// `spot` and following the selection's order. Multi-assigned source
    /// indexes stay multi-assigned at their destination slot.
    ///
    /// Occupied indexes inside the destination window are first shifted out
    /// of the way, from the window's lowest occupied index through
    /// `max_index`, making exactly enough room.
    ///
    /// Returns the number of destination slots consumed (files plus
    /// preserved-gap placeholders).
    pub fn add_file_set(
        &mut self,
        source: &mut FileSet,
        spot: Spot,
        selection: Selection,
        policy: GapPolicy,
    ) -> Result<usize> {
        let slots = resolve_selection(source, &selection, policy)?;
        if slots.is_empty() {
            return Ok(0);
        }

        let new_pos = spot.right();
        self.make_room(new_pos, new_pos + slots.len() as i64 - 1)?;

        let mut consumed = 0;
        for (offset, slot) in slots.iter().enumerate() {
            let new_index = new_pos + offset as i64;
            match *slot {
                Slot::Gap => consumed += 1,
                Slot::File(old_index) => {
                    let types = source
                        .files
                        .get(&old_index)
                        .cloned()
                        .unwrap_or_default();
                    for file_type in &types {
                        let old_name = source.name(old_index, file_type);
                        let new_name = self.name(new_index, file_type);
                        self.do_rename(&old_name, &new_name)?;
                        self.add_logically(new_index, file_type);
                        source.remove_logically(old_index, file_type)?;
                    }
                    consumed += 1;
                }
            }
        }
        debug!(source = %source.pattern, dest = %self.pattern, consumed, "added file set");
        Ok(consumed)
    }

    /// Move the selected indexes of this set itself into the window starting
    /// at `spot`, following the selection's order.
    ///
    /// Precondition: the destination window is unoccupied and disjoint from
    /// the selected indexes — free space must exist before the call. A
    /// violation surfaces as [`FileSetError::IndexAssigned`] from the
    /// underlying relocation.
    pub fn relocate_within(
        &mut self,
        spot: Spot,
        selection: Selection,
        policy: GapPolicy,
    ) -> Result<usize> {
        let slots = resolve_selection(self, &selection, policy)?;
        let new_pos = spot.right();

        let mut consumed = 0;
        for (offset, slot) in slots.iter().enumerate() {
            match *slot {
                Slot::Gap => consumed += 1,
                Slot::File(old_index) => {
                    self.change_index(old_index, new_pos + offset as i64, None)?;
                    consumed += 1;
                }
            }
        }
        Ok(consumed)
    }

    /// Insert one untracked file at `spot`. See [`FileSet::add_files`].
    pub fn add_file(&mut self, file_name: &str, spot: Spot) -> Result<()> {
        self.add_files(&[file_name], spot, false)?;
        Ok(())
    }

    /// Insert a list of plain, untracked file names starting at `spot`, in
    /// the given order. If one of the files belongs to another set, that set
    /// is not updated; use [`FileSet::add_file_set`] for tracked files.
    ///
    /// Missing files fail with `FileNotFound` unless `ignore_unfound` is set,
    /// in which case they are skipped and consume no destination slot.
    pub fn add_files<S: AsRef<str>>(
        &mut self,
        file_names: &[S],
        spot: Spot,
        ignore_unfound: bool,
    ) -> Result<usize> {
        let mut to_add: Vec<&str> = Vec::with_capacity(file_names.len());
        for name in file_names {
            let name = name.as_ref();
            if self.fs.is_file(name) {
                to_add.push(name);
            } else if ignore_unfound {
                debug!(name, "unfound file skipped");
            } else {
                return Err(FileSetError::FileNotFound {
                    name: name.to_string(),
                });
            }
        }
        if to_add.is_empty() {
            return Ok(0);
        }

        let new_pos = spot.right();
        self.make_room(new_pos, new_pos + to_add.len() as i64 - 1)?;

        for (offset, file) in to_add.iter().enumerate() {
            let index = new_pos + offset as i64;
            let file_type = file_type_of(file).to_string();
            self.do_rename(file, &self.name(index, &file_type))?;
            self.add_logically(index, &file_type);
        }
        Ok(to_add.len())
    }

    /// Shift occupied indexes out of the destination window `[left, right]`,
    /// starting at the window's lowest occupied index and reaching through
    /// `max_index`, so the window ends up free.
    fn make_room(&mut self, left: i64, right: i64) -> Result<()> {
        let lowest_occupied = self.files.range(left..=right).next().map(|(&k, _)| k);
        if let Some(lowest) = lowest_occupied {
            self.move_range(IndexRange::new(lowest, self.max_index)?, right + 1)?;
        }
        Ok(())
    }
}
