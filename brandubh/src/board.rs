mod cell;
mod cell_set;

use std::ops::Index;

pub use cell::*;
pub use cell_set::*;

use crate::PieceKind;

pub const BOARD_SIZE: usize = 7;

/// One snapshot of the 7x7 board.
///
/// Every cell holds exactly one [`PieceKind`]. A grid is a plain value: it
/// is [`Copy`], and its only "mutating" method, [`BoardGrid::with()`],
/// returns a new grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct BoardGrid {
    cells: [[PieceKind; BOARD_SIZE]; BOARD_SIZE],
}

/// Number of pieces of each kind on a board.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct PieceCounts {
    pub attackers: u32,
    pub defenders: u32,
    pub kings: u32,
}

impl BoardGrid {
    /// A board without any pieces on it.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a board from the occupied cells. Unlisted cells are empty.
    ///
    /// If a cell is listed twice, the last entry wins.
    pub fn from_pieces<I: IntoIterator<Item = (Cell, PieceKind)>>(pieces: I) -> Self {
        let mut cells = [[PieceKind::Empty; BOARD_SIZE]; BOARD_SIZE];
        for (cell, kind) in pieces {
            cells[usize::from(cell.row())][usize::from(cell.col())] = kind;
        }
        Self { cells }
    }

    /// The opening position of 7x7 Brandubh: eight attackers in a cross
    /// around four defenders, with the king on the central throne.
    pub fn starting_position() -> Self {
        let attackers = [
            (0, 3),
            (1, 3),
            (3, 0),
            (3, 1),
            (3, 5),
            (3, 6),
            (5, 3),
            (6, 3),
        ];
        let defenders = [(2, 3), (3, 2), (3, 4), (4, 3)];
        Self::from_pieces(
            attackers
                .into_iter()
                .map(|(i, j)| (Cell::new(i, j), PieceKind::Attacker))
                .chain(
                    defenders
                        .into_iter()
                        .map(|(i, j)| (Cell::new(i, j), PieceKind::Defender)),
                )
                .chain([(Cell::new(3, 3), PieceKind::King)]),
        )
    }

    pub fn get(&self, cell: Cell) -> PieceKind {
        self.cells[usize::from(cell.row())][usize::from(cell.col())]
    }

    /// Returns a copy of this board with `cell` set to `kind`.
    #[must_use]
    pub fn with(mut self, cell: Cell, kind: PieceKind) -> Self {
        self.cells[usize::from(cell.row())][usize::from(cell.col())] = kind;
        self
    }

    /// All cells together with their contents, in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Cell, PieceKind)> + '_ {
        Cell::all().map(|cell| (cell, self.get(cell)))
    }

    /// The cells holding a piece of the given kind.
    pub fn cells_with(&self, kind: PieceKind) -> CellSet {
        self.iter()
            .filter(|&(_, k)| k == kind)
            .map(|(cell, _)| cell)
            .collect()
    }

    /// The cells holding any piece.
    pub fn occupied(&self) -> CellSet {
        !self.cells_with(PieceKind::Empty)
    }

    /// Where the king stands, if it is on the board.
    ///
    /// There is exactly one king in a game, so this returns the first one found.
    pub fn king(&self) -> Option<Cell> {
        self.iter()
            .find(|&(_, kind)| kind == PieceKind::King)
            .map(|(cell, _)| cell)
    }

    pub fn count_pieces(&self) -> PieceCounts {
        let mut counts = PieceCounts::default();
        for row in &self.cells {
            for kind in row {
                match kind {
                    PieceKind::Attacker => counts.attackers += 1,
                    PieceKind::Defender => counts.defenders += 1,
                    PieceKind::King => counts.kings += 1,
                    PieceKind::Empty => {}
                }
            }
        }
        counts
    }

    pub fn rows(&self) -> &[[PieceKind; BOARD_SIZE]; BOARD_SIZE] {
        &self.cells
    }
}

impl Index<Cell> for BoardGrid {
    type Output = PieceKind;

    fn index(&self, cell: Cell) -> &Self::Output {
        &self.cells[usize::from(cell.row())][usize::from(cell.col())]
    }
}

impl std::fmt::Display for BoardGrid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", crate::visualize_grid(self))
    }
}

impl PieceCounts {
    /// The count for one kind. Empty cells are not counted, so this is 0 for
    /// [`PieceKind::Empty`].
    pub fn of(&self, kind: PieceKind) -> u32 {
        match kind {
            PieceKind::Attacker => self.attackers,
            PieceKind::Defender => self.defenders,
            PieceKind::King => self.kings,
            PieceKind::Empty => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use quickcheck::quickcheck;

    use super::*;

    quickcheck! {
        fn counts_match_cells_with(grid: BoardGrid) -> bool {
            let counts = grid.count_pieces();
            PieceKind::PIECES
                .iter()
                .all(|&kind| counts.of(kind) == grid.cells_with(kind).len())
        }

        fn with_changes_one_cell(grid: BoardGrid, cell: Cell, kind: PieceKind) -> bool {
            let changed = grid.with(cell, kind);
            changed[cell] == kind
                && Cell::all().filter(|&c| c != cell).all(|c| changed[c] == grid[c])
        }
    }

    #[test]
    fn starting_position() {
        let grid = BoardGrid::starting_position();
        assert_eq!(
            grid.count_pieces(),
            PieceCounts {
                attackers: 8,
                defenders: 4,
                kings: 1
            }
        );
        assert_eq!(grid.king(), Some(Cell::new(3, 3)));
        assert_eq!(grid[Cell::new(0, 3)], PieceKind::Attacker);
        assert_eq!(grid[Cell::new(2, 3)], PieceKind::Defender);
        assert_eq!(grid[Cell::new(0, 0)], PieceKind::Empty);
    }

    #[test]
    fn empty_board_has_no_king() {
        assert_eq!(BoardGrid::empty().king(), None);
        assert_eq!(BoardGrid::empty().count_pieces(), PieceCounts::default());
    }
}
