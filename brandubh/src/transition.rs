//! Reconstructs what happened between two consecutive snapshots of a game.
//!
//! A transition is expected to consist of at most one piece moving, followed
//! by zero or more pieces being captured. Both a move's origin and a captured
//! piece show up as a cell that went from occupied to empty, so a
//! cell-by-cell diff alone cannot tell them apart. The piece counts of both
//! boards can: a move leaves the number of pieces of its kind unchanged, a
//! capture decreases it.

use serde::Serialize;

use crate::{Anomaly, BoardGrid, Cell, CellSet, PieceCounts, PieceKind};

/// Where a moved piece came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    Resolved(Cell),
    /// The transition does not determine the origin. `candidates` are the
    /// vacated cells that could have been it, possibly none.
    Unresolved { candidates: CellSet },
}

/// One piece relocating between two consecutive snapshots.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct MoveEvent {
    pub piece: PieceKind,
    pub origin: Origin,
    pub destination: Cell,
}

/// One piece removed between two consecutive snapshots, at the cell it vacated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct CaptureEvent {
    /// Always [`PieceKind::Attacker`] or [`PieceKind::Defender`].
    pub piece: PieceKind,
    pub cell: Cell,
}

/// The result of [`infer_move()`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveInference {
    /// No piece appeared anywhere.
    NoMove,
    Move(MoveEvent),
    /// Several pieces appeared at once, which a single move cannot explain.
    MultipleDestinations(CellSet),
}

/// Everything inferred from one pair of consecutive snapshots.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transition {
    /// Index of the later snapshot in the log, starting at 1.
    pub index: usize,
    pub move_event: Option<MoveEvent>,
    pub captures: Vec<CaptureEvent>,
    pub anomaly: Option<Anomaly>,
}

impl MoveEvent {
    pub fn origin_cell(&self) -> Option<Cell> {
        match self.origin {
            Origin::Resolved(cell) => Some(cell),
            Origin::Unresolved { .. } => None,
        }
    }
}

/// Cells that went from occupied to empty, and cells that went from empty to occupied.
///
/// Cells where one piece kind was replaced by another are in neither set.
pub fn vacated_and_occupied(before: &BoardGrid, after: &BoardGrid) -> (CellSet, CellSet) {
    let was_occupied = before.occupied();
    let is_occupied = after.occupied();
    (was_occupied - is_occupied, is_occupied - was_occupied)
}

/// Determines the single piece relocation explaining the difference between two boards.
///
/// The newly occupied cell is the destination, and its contents in `after`
/// are the moved piece. If exactly one cell was vacated, it is the origin.
/// If there are several, for instance because the move also captured a
/// piece, only vacated cells that held the moved piece's kind are
/// considered. When that still leaves zero or several candidates, the
/// origin is [`Origin::Unresolved`].
pub fn infer_move(before: &BoardGrid, after: &BoardGrid) -> MoveInference {
    let (vacated, occupied) = vacated_and_occupied(before, after);

    let destination = match occupied.single() {
        Some(cell) => cell,
        None if occupied.is_empty() => return MoveInference::NoMove,
        None => return MoveInference::MultipleDestinations(occupied),
    };
    let piece = after[destination];

    let origin = match vacated.single() {
        Some(cell) => Origin::Resolved(cell),
        None => {
            let same_kind = vacated.filter(|cell| before[cell] == piece);
            match same_kind.single() {
                Some(cell) => Origin::Resolved(cell),
                None => Origin::Unresolved {
                    candidates: if same_kind.is_empty() {
                        vacated
                    } else {
                        same_kind
                    },
                },
            }
        }
    };

    MoveInference::Move(MoveEvent {
        piece,
        origin,
        destination,
    })
}

/// Finds the cells whose piece was captured.
///
/// A vacated cell that held an attacker or defender counts as a capture only
/// if there are strictly fewer pieces of that kind in `after` than in
/// `before`. Otherwise the piece just moved away.
pub fn detect_captures(
    before: &BoardGrid,
    after: &BoardGrid,
    before_counts: &PieceCounts,
    after_counts: &PieceCounts,
) -> Vec<CaptureEvent> {
    let mut captures = Vec::new();
    for cell in Cell::all() {
        let piece = before[cell];
        if piece.is_capturable()
            && after[cell].is_empty()
            && before_counts.of(piece) > after_counts.of(piece)
        {
            captures.push(CaptureEvent { piece, cell });
        }
    }
    captures
}

/// Runs move inference and capture detection on one pair of consecutive snapshots.
pub fn analyze_transition(index: usize, before: &BoardGrid, after: &BoardGrid) -> Transition {
    let (move_event, anomaly) = match infer_move(before, after) {
        MoveInference::NoMove => (None, None),
        MoveInference::Move(move_event) => {
            let anomaly = match move_event.origin {
                Origin::Resolved(_) => None,
                Origin::Unresolved { candidates } => Some(Anomaly::AmbiguousOrigin {
                    transition: index,
                    destination: move_event.destination,
                    candidates,
                }),
            };
            (Some(move_event), anomaly)
        }
        MoveInference::MultipleDestinations(destinations) => (
            None,
            Some(Anomaly::MultipleDestinations {
                transition: index,
                destinations,
            }),
        ),
    };

    let captures = detect_captures(
        before,
        after,
        &before.count_pieces(),
        &after.count_pieces(),
    );

    Transition {
        index,
        move_event,
        captures,
        anomaly,
    }
}
