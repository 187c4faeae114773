//! Single-index relocation and the rolling-back range shift. Everything else
//! in the engine is built on these two.

use tracing::debug;

use super::FileSet;
use crate::errors::{FileSetError, Result};
use crate::span::IndexRange;

impl FileSet {
    /// Move the file(s) at `old` to `new`.
    ///
    /// With `file_type` given, only that type leaves `old`; the remaining
    /// types stay behind. Without it, every type at `old` moves. A no-op when
    /// `old == new`.
    pub fn change_index(&mut self, old: i64, new: i64, file_type: Option<&str>) -> Result<()> {
        if old == new {
            return Ok(());
        }

        let mut types = self
            .files
            .remove(&old)
            .ok_or(FileSetError::IndexUnassigned { index: old })?;
        if self.files.contains_key(&new) {
            self.files.insert(old, types);
            return Err(FileSetError::IndexAssigned { index: new, from: old });
        }

        let moving = match file_type {
            Some(wanted) => {
                let Some(pos) = types.iter().position(|t| t == wanted) else {
                    self.files.insert(old, types);
                    return Err(FileSetError::TypeUnassigned {
                        index: old,
                        file_type: wanted.to_string(),
                    });
                };
                let moved = types.remove(pos);
                if !types.is_empty() {
                    self.files.insert(old, types);
                }
                vec![moved]
            }
            None => types,
        };

        for t in &moving {
            self.do_rename(&self.name(old, t), &self.name(new, t))?;
        }
        self.files.insert(new, moving);

        if new > self.max_index {
            self.max_index = new;
        } else if old == self.max_index {
            self.max_index = self.recompute_max();
        }
        Ok(())
    }

    /// Shift every assigned index in `range` by `new_start - range.low`,
    /// leaving gaps untouched.
    ///
    /// Walk direction follows the shift direction so the range never collides
    /// with itself. A genuine collision with a file outside the range undoes
    /// every completed sub-move in reverse order and surfaces
    /// [`FileSetError::FileCollision`]; the mapping is then exactly as it was
    /// before the call.
    pub fn move_range(&mut self, range: IndexRange, new_start: i64) -> Result<()> {
        let (low, high) = range.bounds();
        let amount = new_start - low;
        if amount == 0 {
            return Ok(());
        }

        let order: Vec<i64> = if amount > 0 {
            (low..=high).rev().collect()
        } else {
            (low..=high).collect()
        };

        let mut change_log: Vec<(i64, i64)> = Vec::new();
        for from in order {
            let to = from + amount;
            match self.change_index(from, to, None) {
                Ok(()) => change_log.push((from, to)),
                // Gaps in the range simply produce no rename.
                Err(FileSetError::IndexUnassigned { .. }) => {}
                Err(FileSetError::IndexAssigned { index, from }) => {
                    debug!(from, to = index, moved = change_log.len(), "collision, rolling back");
                    for &(f, t) in change_log.iter().rev() {
                        self.change_index(t, f, None)?;
                    }
                    return Err(FileSetError::FileCollision { from, to: index });
                }
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }
}
