use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::BOARD_SIZE;

/// A position on the board.
///
/// Rows are counted from the top, columns from the left, both starting at 0.
/// A `Cell` is always on the board; constructors reject anything else.
///
/// Serializes as a `[row, col]` pair.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "[u8; 2]", try_from = "[u8; 2]")]
pub struct Cell {
    row: u8,
    col: u8,
}

impl Cell {
    /// Creates a cell, panicking if it is not on the board.
    ///
    /// Use [`Cell::try_new()`] for coordinates that come from outside.
    pub fn new(row: u8, col: u8) -> Self {
        Self::try_new(row, col)
            .unwrap_or_else(|| panic!("Cell ({}, {}) is not on the board", row, col))
    }

    pub fn try_new(row: u8, col: u8) -> Option<Self> {
        if usize::from(row) < BOARD_SIZE && usize::from(col) < BOARD_SIZE {
            Some(Self { row, col })
        } else {
            None
        }
    }

    pub fn row(self) -> u8 {
        self.row
    }

    pub fn col(self) -> u8 {
        self.col
    }

    /// All cells in row-major order.
    pub fn all() -> impl Iterator<Item = Cell> {
        (0..(BOARD_SIZE * BOARD_SIZE) as u8).map(Cell::from_index)
    }

    /// Row-major index in `0..49`.
    pub(crate) fn to_index(self) -> u8 {
        self.row * BOARD_SIZE as u8 + self.col
    }

    pub(crate) fn from_index(idx: u8) -> Self {
        debug_assert!(usize::from(idx) < BOARD_SIZE * BOARD_SIZE);
        Self {
            row: idx / BOARD_SIZE as u8,
            col: idx % BOARD_SIZE as u8,
        }
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<Cell> for [u8; 2] {
    fn from(cell: Cell) -> Self {
        [cell.row, cell.col]
    }
}

impl TryFrom<[u8; 2]> for Cell {
    type Error = CellFromStrErr;

    fn try_from([row, col]: [u8; 2]) -> Result<Self, Self::Error> {
        Cell::try_new(row, col).ok_or(CellFromStrErr::OutOfRange { row, col })
    }
}

/// The error type for the [`FromStr`] instance of [`Cell`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellFromStrErr {
    NotAPair,
    InvalidNumber,
    OutOfRange { row: u8, col: u8 },
}

impl std::error::Error for CellFromStrErr {}

impl std::fmt::Display for CellFromStrErr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CellFromStrErr::NotAPair => write!(f, "Expected a coordinate pair like '(2, 3)'"),
            CellFromStrErr::InvalidNumber => {
                write!(f, "Coordinates must be non-negative integers")
            }
            CellFromStrErr::OutOfRange { row, col } => {
                write!(f, "Cell ({}, {}) is not on the 7x7 board", row, col)
            }
        }
    }
}

/// Parses the key format used by the game logs, `"(row, col)"`.
///
/// Whitespace around the numbers and the parentheses themselves are optional.
impl FromStr for Cell {
    type Err = CellFromStrErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let inner = s
            .strip_prefix('(')
            .and_then(|rest| rest.strip_suffix(')'))
            .unwrap_or(s);
        let (row, col) = inner.split_once(',').ok_or(CellFromStrErr::NotAPair)?;
        let row: u8 = row
            .trim()
            .parse()
            .map_err(|_| CellFromStrErr::InvalidNumber)?;
        let col: u8 = col
            .trim()
            .parse()
            .map_err(|_| CellFromStrErr::InvalidNumber)?;
        Cell::try_from([row, col])
    }
}

/// Shorthand for creating cells from a `"(row, col)"` string.
///
/// This macro is just calling the [`FromStr`] instance of [`Cell`].
/// ```
/// # use brandubh::{cell, Cell};
/// assert_eq!(cell!("(2, 3)"), Cell::new(2, 3));
/// ```
#[macro_export]
macro_rules! cell {
    ($rc:literal) => {
        <$crate::Cell as std::str::FromStr>::from_str($rc)
            .expect("Invalid cell given to cell! macro")
    };
}
#[allow(unused_imports)]
pub(crate) use cell;
