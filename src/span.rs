//! Index-space coordinates: spots, ranges, gap policies and selections.

use std::str::FromStr;

use crate::errors::{FileSetError, Result};

/// Insertion point between two adjacent indexes. `left` may be -1, meaning
/// "before everything".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spot {
    left: i64,
    right: i64,
}

impl Spot {
    /// Build a spot from its two indexes, in either order.
    pub fn new(a: i64, b: i64) -> Result<Self> {
        let (left, right) = if a <= b { (a, b) } else { (b, a) };
        if left < -1 || right - left != 1 {
            return Err(FileSetError::InvalidSpot { left: a, right: b });
        }
        Ok(Self { left, right })
    }

    /// The spot immediately after `index` (use -1 for the very front).
    pub fn after(index: i64) -> Self {
        Self {
            left: index,
            right: index + 1,
        }
    }

    pub fn left(&self) -> i64 {
        self.left
    }

    pub fn right(&self) -> i64 {
        self.right
    }
}

/// Inclusive index range; input order of the bounds does not matter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexRange {
    low: i64,
    high: i64,
}

impl IndexRange {
    pub fn new(a: i64, b: i64) -> Result<Self> {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        if low < 0 {
            return Err(FileSetError::NegativeIndex { index: low });
        }
        Ok(Self { low, high })
    }

    pub fn low(&self) -> i64 {
        self.low
    }

    pub fn high(&self) -> i64 {
        self.high
    }

    pub fn len(&self) -> i64 {
        self.high - self.low + 1
    }

    pub fn contains(&self, index: i64) -> bool {
        self.low <= index && index <= self.high
    }

    pub fn overlaps(&self, other: &IndexRange) -> bool {
        self.low <= other.high && other.low <= self.high
    }

    pub fn indexes(&self) -> impl Iterator<Item = i64> {
        self.low..=self.high
    }

    pub fn bounds(&self) -> (i64, i64) {
        (self.low, self.high)
    }
}

/// How an operation treats unassigned indexes inside its input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GapPolicy {
    /// Error out with `IndexUnassigned` on the first gap.
    #[default]
    Fail,
    /// Drop gaps; only existing files take part in the operation.
    Strip,
    /// Keep gaps as placeholders that consume a destination slot.
    Preserve,
}

impl FromStr for GapPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fail" => Ok(GapPolicy::Fail),
            "strip" => Ok(GapPolicy::Strip),
            "preserve" | "keep" => Ok(GapPolicy::Preserve),
            _ => Err(format!("invalid gap policy: '{s}'")),
        }
    }
}

/// Which indexes of a source set an operation covers.
#[derive(Debug, Clone)]
pub enum Selection {
    /// Every key currently present, in ascending order.
    All,
    /// An explicit sequence; its order is followed, not sorted.
    Indexes(Vec<i64>),
}

impl From<IndexRange> for Selection {
    fn from(range: IndexRange) -> Self {
        Selection::Indexes(range.indexes().collect())
    }
}

impl From<Vec<i64>> for Selection {
    fn from(indexes: Vec<i64>) -> Self {
        Selection::Indexes(indexes)
    }
}
