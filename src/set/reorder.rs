//! Moving and swapping whole ranges. Both operations stage files in a
//! disposable, uniquely-patterned set mid-flight, then stitch the remaining
//! blocks back together with `move_range`.

use tracing::debug;

use super::FileSet;
use crate::errors::{FileSetError, Result};
use crate::span::{GapPolicy, IndexRange, Selection, Spot};

impl FileSet {
    /// Move one index (or multi-assigned index group) to `spot`. With
    /// `allow_gap`, an unassigned index moves as a placeholder instead of
    /// failing.
    pub fn move_file(&mut self, index: i64, spot: Spot, allow_gap: bool) -> Result<()> {
        let policy = if allow_gap {
            GapPolicy::Preserve
        } else {
            GapPolicy::Fail
        };
        self.move_files(IndexRange::new(index, index)?, spot, policy)
    }

    /// Move a whole range of indexes to `spot`.
    ///
    /// A spot touching the range itself is a no-op (the files already are in
    /// place). Otherwise the range is extracted into staging, the intervening
    /// block is shifted to open exactly fitting space, the staged files are
    /// reinserted, and leftover space from stripped gaps is closed — unless
    /// the move ends at the very end of the set, where no trailing compaction
    /// is needed.
    pub fn move_files(&mut self, range: IndexRange, spot: Spot, policy: GapPolicy) -> Result<()> {
        if range.contains(spot.left()) || range.contains(spot.right()) {
            return Ok(());
        }

        let mut staged = FileSet::staging(self.fs())?;
        let staged_start = staged.max_index + 1;
        let count = staged.add_file_set(
            self,
            Spot::after(staged_start - 1),
            Selection::from(range),
            policy,
        )? as i64;
        let staged_sel: Vec<i64> = (staged_start..staged_start + count).collect();
        debug!(set = %self.pattern, ?range, staged = count, "range staged for move");

        let (low, high) = range.bounds();
        if high < spot.left() {
            // Moving up: close the hole by shifting the in-between block down,
            // then reinsert right after it.
            self.move_range(IndexRange::new(high + 1, spot.left())?, low)?;
            let readd_pos = low + (spot.left() - high);
            self.add_file_set(
                &mut staged,
                Spot::after(readd_pos - 1),
                Selection::Indexes(staged_sel),
                GapPolicy::Preserve,
            )?;
            if spot.right() <= self.max_index {
                self.move_range(
                    IndexRange::new(spot.right(), self.max_index)?,
                    readd_pos + count,
                )?;
            }
        } else {
            // Moving down: open exactly fitting space above the spot, then
            // reinsert directly after it.
            let shifted_to = spot.left() + count + 1;
            self.move_range(IndexRange::new(spot.right(), low - 1)?, shifted_to)?;
            let readd_pos = spot.left() + 1;
            self.add_file_set(
                &mut staged,
                Spot::after(readd_pos - 1),
                Selection::Indexes(staged_sel),
                GapPolicy::Preserve,
            )?;
            if high < self.max_index {
                self.move_range(
                    IndexRange::new(high + 1, self.max_index)?,
                    shifted_to + (low - spot.right()),
                )?;
            }
        }
        Ok(())
    }

    /// Swap the files at two single indexes. With `allow_gaps`, unassigned
    /// indexes take part as placeholders.
    pub fn switch_files(&mut self, index1: i64, index2: i64, allow_gaps: bool) -> Result<()> {
        let policy = if allow_gaps {
            GapPolicy::Preserve
        } else {
            GapPolicy::Fail
        };
        self.switch_file_ranges(
            IndexRange::new(index1, index1)?,
            IndexRange::new(index2, index2)?,
            policy,
        )
    }

    /// Swap the positions of two file ranges, which need not be equal in
    /// size. The block between them shifts to absorb the size difference.
    pub fn switch_file_ranges(
        &mut self,
        range1: IndexRange,
        range2: IndexRange,
        policy: GapPolicy,
    ) -> Result<()> {
        if range1.overlaps(&range2) {
            return Err(FileSetError::OverlappingRanges {
                first: range1.bounds(),
                second: range2.bounds(),
            });
        }

        let original_max = self.max_index;
        let (leftmost, rightmost) = if range1.low() < range2.low() {
            (range1, range2)
        } else {
            (range2, range1)
        };
        // Ties count the second range as the greater one.
        let (greater, smaller) = if range1.len() > range2.len() {
            (range1, range2)
        } else {
            (range2, range1)
        };
        let in_between = if leftmost.high() + 1 <= rightmost.low() - 1 {
            Some(IndexRange::new(leftmost.high() + 1, rightmost.low() - 1)?)
        } else {
            None
        };
        let in_between_width = in_between.map_or(0, |r| r.len());

        // Extract the greater range into staging first; it leaves the larger
        // hole for the rest of the shuffle to work in.
        let mut staged = FileSet::staging(self.fs())?;
        let greater_start = staged.max_index + 1;
        let amount = staged.add_file_set(
            self,
            Spot::after(greater_start - 1),
            Selection::from(greater),
            policy,
        )? as i64;
        let greater_sel: Vec<i64> = (greater_start..greater_start + amount).collect();
        debug!(set = %self.pattern, ?greater, staged = amount, "greater range staged for switch");

        let next_index;
        if greater.low() == leftmost.low() {
            // Greater range sat on the left: pull the smaller one down into
            // the hole, close up with the in-between block, reinsert staged
            // files after it.
            let moved = self.relocate_within(
                Spot::after(leftmost.low() - 1),
                Selection::from(smaller),
                policy,
            )? as i64;
            let mut next_unassigned = leftmost.low() + moved;
            if let Some(between) = in_between {
                self.move_range(between, next_unassigned)?;
                next_unassigned += in_between_width;
            }
            let readded = self.add_file_set(
                &mut staged,
                Spot::after(next_unassigned - 1),
                Selection::Indexes(greater_sel),
                GapPolicy::Preserve,
            )? as i64;
            next_index = next_unassigned + readded;
        } else if amount >= smaller.len() {
            // Greater range sat on the right: shift the in-between block up
            // into the hole, relocate the smaller range after it, reinsert
            // the staged files where the smaller range sat.
            let next_unassigned = if let Some(between) = in_between {
                let shifted_to = leftmost.low() + amount;
                self.move_range(between, shifted_to)?;
                shifted_to + in_between_width
            } else {
                leftmost.low() + amount
            };
            let moved = self.relocate_within(
                Spot::after(next_unassigned - 1),
                Selection::from(smaller),
                policy,
            )? as i64;
            self.add_file_set(
                &mut staged,
                Spot::after(leftmost.low() - 1),
                Selection::Indexes(greater_sel),
                GapPolicy::Preserve,
            )?;
            next_index = next_unassigned + moved;
        } else {
            // Stripping left fewer staged files than the "smaller" range is
            // wide; relocating the smaller range in place would collide with
            // its own old indexes (or the in-between block), so stage it as
            // well.
            let smaller_start = greater_start + amount;
            let amount_smaller = staged.add_file_set(
                self,
                Spot::after(smaller_start - 1),
                Selection::from(smaller),
                policy,
            )? as i64;
            let smaller_sel: Vec<i64> = (smaller_start..smaller_start + amount_smaller).collect();

            let next_unassigned = if let Some(between) = in_between {
                let shifted_to = leftmost.low() + amount;
                self.move_range(between, shifted_to)?;
                shifted_to + in_between_width
            } else {
                leftmost.low() + amount
            };

            self.add_file_set(
                &mut staged,
                Spot::after(leftmost.low() - 1),
                Selection::Indexes(greater_sel),
                GapPolicy::Preserve,
            )?;
            let moved = self.add_file_set(
                &mut staged,
                Spot::after(next_unassigned - 1),
                Selection::Indexes(smaller_sel),
                GapPolicy::Preserve,
            )? as i64;
            next_index = next_unassigned + moved;
        }

        // Close leftover space from stripped gaps; a switch reaching the old
        // end of the set needs no trailing compaction.
        if rightmost.high() < original_max && next_index < rightmost.high() + 1 {
            self.move_range(
                IndexRange::new(rightmost.high() + 1, self.max_index)?,
                next_index,
            )?;
        }
        Ok(())
    }
}
