//! Diagnostics and repair: gap and multi-assignment detection, and the
//! auto-fix built on relabeling plus range shifts.

use tracing::{debug, info};

use super::FileSet;
use crate::errors::{FileSetError, Result};
use crate::span::IndexRange;

/// Upper bound on the index space `find_flaws` is willing to walk.
pub const FLAW_SCAN_LIMIT: i64 = 1000;

/// Result of a flaw scan.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Flaws {
    /// Contiguous runs of unassigned indexes below `max_index`, inclusive.
    pub gaps: Vec<(i64, i64)>,
    /// Indexes carrying more than one type, with their types.
    pub multi_assigned: Vec<(i64, Vec<String>)>,
}

impl Flaws {
    pub fn is_clean(&self) -> bool {
        self.gaps.is_empty() && self.multi_assigned.is_empty()
    }
}

impl FileSet {
    /// Scan indexes `0..=max_index` for gaps and multi-assigned indexes.
    pub fn find_flaws(&self) -> Result<Flaws> {
        if self.max_index > FLAW_SCAN_LIMIT {
            return Err(FileSetError::TooManyFiles {
                max_index: self.max_index,
                limit: FLAW_SCAN_LIMIT,
            });
        }

        let mut flaws = Flaws::default();
        let mut gap_start = None;
        for i in 0..=self.max_index {
            match self.files.get(&i) {
                None => {
                    gap_start.get_or_insert(i);
                }
                Some(types) => {
                    if let Some(start) = gap_start.take() {
                        flaws.gaps.push((start, i - 1));
                    }
                    if types.len() > 1 {
                        flaws.multi_assigned.push((i, types.clone()));
                    }
                }
            }
        }
        Ok(flaws)
    }

    /// Close every gap by relabeling the assigned indexes 0..n-1 in
    /// ascending order; with `fix_multi`, additionally expand multi-assigned
    /// indexes so each type ends up on its own index, in alphabetical order.
    ///
    /// Gap closing is attempted even when the flaw scan refuses an oversized
    /// set, since it operates purely on assigned keys; `fix_multi` on such a
    /// set fails with `TooManyFiles`.
    pub fn fix(&mut self, fix_multi: bool) -> Result<()> {
        let (gaps_present, mut multi_assigned, scan_refused) = match self.find_flaws() {
            Ok(flaws) => (!flaws.gaps.is_empty(), flaws.multi_assigned, false),
            Err(FileSetError::TooManyFiles { .. }) => (true, Vec::new(), true),
            Err(e) => return Err(e),
        };

        if gaps_present {
            let keys: Vec<i64> = self.files.keys().copied().collect();
            for (position, key) in keys.into_iter().enumerate() {
                let target = position as i64;
                self.change_index(key, target, None)?;
                // Keep the multi-assignment positions in step with the
                // relabeling so the expansion below targets the right slots.
                for entry in multi_assigned.iter_mut() {
                    if entry.0 == key {
                        entry.0 = target;
                    }
                }
            }
            info!(set = %self.pattern, "gaps closed");
        }

        if fix_multi {
            if scan_refused {
                if self.max_index > FLAW_SCAN_LIMIT {
                    return Err(FileSetError::TooManyFiles {
                        max_index: self.max_index,
                        limit: FLAW_SCAN_LIMIT,
                    });
                }
                multi_assigned = self.find_flaws()?.multi_assigned;
            }

            // Highest first, so earlier expansions don't shift later targets.
            for (index, mut types) in multi_assigned.into_iter().rev() {
                if index != self.max_index {
                    let extra = types.len() as i64 - 1;
                    self.move_range(
                        IndexRange::new(index + 1, self.max_index)?,
                        index + 1 + extra,
                    )?;
                }
                types.sort();
                debug!(index, ?types, "expanding multi-assigned index");
                for (offset, file_type) in types.iter().enumerate() {
                    self.change_index(index, index + offset as i64, Some(file_type))?;
                }
            }
        }
        Ok(())
    }
}
