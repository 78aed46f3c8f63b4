use std::iter::FusedIterator;
use std::ops::{Not, Sub};

use serde::{Deserialize, Serialize};

use super::Cell;

/// A compact set of [`Cell`]s, one bit per cell.
///
/// `!set` is the complement within the board and `a - b` the difference.
/// Also implements [`IntoIterator`], which yields the cells in row-major order.
///
/// ```
/// use brandubh::{cell, CellSet};
/// let mut set = CellSet::new();
/// // This is an immutable data type, so functions like `insert` return a new `CellSet`.
/// set = set.insert(cell!("(3, 1)"));
/// set = set.insert(cell!("(3, 1)"));  // Inserting a second time has no effect
/// set = set.insert(cell!("(0, 5)"));
/// assert_eq!(Vec::from_iter(set), vec![cell!("(0, 5)"), cell!("(3, 1)")]);
/// ```
///
/// Serializes as a list of cells.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "Vec<Cell>", from = "Vec<Cell>")]
pub struct CellSet {
    // Only the low 49 bits are used.
    bits: u64,
}

const VALID_BITS: u64 = 0x1ffffffffffff;

impl CellSet {
    /// Creates a new, empty set.
    pub fn new() -> Self {
        Self { bits: 0 }
    }

    pub fn len(self) -> u32 {
        self.bits.count_ones()
    }

    pub fn contains(self, cell: Cell) -> bool {
        (self.bits & (1u64 << cell.to_index())) != 0
    }

    pub fn is_empty(self) -> bool {
        self.bits == 0
    }

    /// The only element, if the set has exactly one.
    pub fn single(self) -> Option<Cell> {
        if self.len() == 1 {
            self.into_iter().next()
        } else {
            None
        }
    }

    #[must_use] // Because users might expect this to be a mutating method
    pub fn insert(self, cell: Cell) -> Self {
        Self {
            bits: self.bits | (1u64 << cell.to_index()),
        }
    }

    /// Keeps only the cells for which `predicate` returns true.
    #[must_use]
    pub fn filter(self, mut predicate: impl FnMut(Cell) -> bool) -> Self {
        self.into_iter().filter(|&cell| predicate(cell)).collect()
    }
}

impl Not for CellSet {
    type Output = Self;

    fn not(self) -> Self::Output {
        Self {
            bits: !self.bits & VALID_BITS,
        }
    }
}

impl Sub for CellSet {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self {
            bits: self.bits & !rhs.bits,
        }
    }
}

impl FromIterator<Cell> for CellSet {
    fn from_iter<T: IntoIterator<Item = Cell>>(iter: T) -> Self {
        let mut bits = 0;
        for cell in iter {
            bits |= 1u64 << cell.to_index();
        }
        Self { bits }
    }
}

impl From<Vec<Cell>> for CellSet {
    fn from(cells: Vec<Cell>) -> Self {
        Self::from_iter(cells)
    }
}

impl From<CellSet> for Vec<Cell> {
    fn from(set: CellSet) -> Self {
        Vec::from_iter(set)
    }
}

impl IntoIterator for CellSet {
    type Item = Cell;

    type IntoIter = CellSetIter;

    fn into_iter(self) -> Self::IntoIter {
        CellSetIter { bits: self.bits }
    }
}

/// Iterator for a [`CellSet`] that returns cells in row-major order.
#[derive(Clone, Copy, Debug)]
pub struct CellSetIter {
    bits: u64,
}

impl Iterator for CellSetIter {
    type Item = Cell;

    fn next(&mut self) -> Option<Self::Item> {
        if self.bits == 0 {
            None
        } else {
            // The number of trailing zeros is the cell index, at most 48 here
            let idx = self.bits.trailing_zeros() as u8;
            // Clear the flag corresponding to this cell
            self.bits ^= 1u64 << idx;

            Some(Cell::from_index(idx))
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let size = self.bits.count_ones() as usize;
        (size, Some(size))
    }
}

impl ExactSizeIterator for CellSetIter {
    fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }
}

impl FusedIterator for CellSetIter {}

#[cfg(test)]
mod tests {
    use quickcheck::quickcheck;

    use super::*;

    quickcheck! {
        fn complement_and_difference(cells: Vec<Cell>, other: Vec<Cell>) -> bool {
            let set = CellSet::from_iter(cells);
            let other = CellSet::from_iter(other);
            set.len() + (!set).len() == 49
                && (set - !set) == set
                && (set - other).into_iter().all(|c| set.contains(c) && !other.contains(c))
        }

        fn iteration_is_sorted(cells: Vec<Cell>) -> bool {
            let collected: Vec<Cell> = CellSet::from_iter(cells.iter().copied()).into_iter().collect();
            collected.windows(2).all(|w| w[0] < w[1])
                && cells.iter().all(|c| collected.contains(c))
        }
    }

    #[test]
    fn single() {
        let a = Cell::new(1, 2);
        let b = Cell::new(6, 0);
        assert_eq!(CellSet::new().single(), None);
        assert_eq!(CellSet::new().insert(a).single(), Some(a));
        assert_eq!(CellSet::new().insert(a).insert(b).single(), None);
    }

    #[test]
    fn serializes_as_list() {
        let set = CellSet::from_iter([Cell::new(2, 2), Cell::new(0, 1)]);
        assert_eq!(serde_json::to_string(&set).unwrap(), "[[0,1],[2,2]]");
    }
}
