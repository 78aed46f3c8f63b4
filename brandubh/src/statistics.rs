use std::collections::BTreeMap;
use std::ops::Index;

use serde::Serialize;

use crate::{Cell, GameEvents, Outcome, PieceKind, BOARD_SIZE};

/// Per-cell counts over the 7x7 board.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CaptureMatrix {
    counts: [[u32; BOARD_SIZE]; BOARD_SIZE],
}

/// How many games ended which way.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct OutcomeTally {
    pub attacker_wins: u32,
    pub defender_wins: u32,
    pub draws: u32,
    pub unknown: u32,
}

/// Move trails and capture heatmaps accumulated over many games.
///
/// Built by folding [`GameEvents`] into it with [`AggregateStatistics::merge()`],
/// and combined with other aggregates by [`AggregateStatistics::combine()`].
/// Both operations take and return the aggregate by value.
///
/// All counters are independent of the order in which games are merged. The
/// move trails are concatenated in merge order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct AggregateStatistics {
    games: u32,
    transitions: u64,
    outcomes: OutcomeTally,
    /// (origin, destination) of every resolved move, per piece kind.
    move_trails: BTreeMap<PieceKind, Vec<(Cell, Cell)>>,
    /// Moves whose origin could not be determined, per piece kind.
    unresolved_moves: BTreeMap<PieceKind, u32>,
    /// Where attackers were captured.
    attacker_captures: CaptureMatrix,
    /// Where defenders were captured.
    defender_captures: CaptureMatrix,
    /// Where the king was when the attackers won.
    king_captures: CaptureMatrix,
    /// Number of games by number of inferred moves.
    moves_per_game: BTreeMap<usize, u32>,
    anomalies: u32,
}

impl CaptureMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, cell: Cell) {
        self.counts[usize::from(cell.row())][usize::from(cell.col())] += 1;
    }

    pub fn total(&self) -> u32 {
        self.counts.iter().flatten().sum()
    }

    /// The largest single-cell count.
    pub fn max(&self) -> u32 {
        self.counts.iter().flatten().copied().max().unwrap_or(0)
    }

    pub fn rows(&self) -> &[[u32; BOARD_SIZE]; BOARD_SIZE] {
        &self.counts
    }

    fn add(&mut self, other: &CaptureMatrix) {
        for (row, other_row) in self.counts.iter_mut().zip(other.counts.iter()) {
            for (count, other_count) in row.iter_mut().zip(other_row.iter()) {
                *count += other_count;
            }
        }
    }
}

impl Index<Cell> for CaptureMatrix {
    type Output = u32;

    fn index(&self, cell: Cell) -> &Self::Output {
        &self.counts[usize::from(cell.row())][usize::from(cell.col())]
    }
}

impl OutcomeTally {
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Attacker => self.attacker_wins += 1,
            Outcome::Defender => self.defender_wins += 1,
            Outcome::Draw => self.draws += 1,
            Outcome::Unknown => self.unknown += 1,
        }
    }

    pub fn total(&self) -> u32 {
        self.attacker_wins + self.defender_wins + self.draws + self.unknown
    }

    fn add(&mut self, other: &OutcomeTally) {
        self.attacker_wins += other.attacker_wins;
        self.defender_wins += other.defender_wins;
        self.draws += other.draws;
        self.unknown += other.unknown;
    }
}

impl AggregateStatistics {
    /// An aggregate over zero games.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the events of one game.
    #[must_use]
    pub fn merge(mut self, events: &GameEvents) -> Self {
        self.games += 1;
        self.transitions += events.transitions as u64;
        self.outcomes.record(events.outcome);
        *self.moves_per_game.entry(events.moves.len()).or_insert(0) += 1;
        self.anomalies += events.anomalies.len() as u32;

        for move_event in &events.moves {
            match move_event.origin_cell() {
                Some(origin) => self
                    .move_trails
                    .entry(move_event.piece)
                    .or_default()
                    .push((origin, move_event.destination)),
                None => *self.unresolved_moves.entry(move_event.piece).or_insert(0) += 1,
            }
        }

        for capture in &events.captures {
            match capture.piece {
                PieceKind::Attacker => self.attacker_captures.increment(capture.cell),
                PieceKind::Defender => self.defender_captures.increment(capture.cell),
                // Only attackers and defenders are ever captured
                PieceKind::King | PieceKind::Empty => {}
            }
        }

        if let Some(king_capture) = events.king_capture {
            self.king_captures.increment(king_capture.cell);
        }

        self
    }

    /// Combines two aggregates. The move trails of `other` are appended to ours.
    #[must_use]
    pub fn combine(mut self, other: AggregateStatistics) -> Self {
        self.games += other.games;
        self.transitions += other.transitions;
        self.outcomes.add(&other.outcomes);
        for (piece, trail) in other.move_trails {
            self.move_trails.entry(piece).or_default().extend(trail);
        }
        for (piece, count) in other.unresolved_moves {
            *self.unresolved_moves.entry(piece).or_insert(0) += count;
        }
        self.attacker_captures.add(&other.attacker_captures);
        self.defender_captures.add(&other.defender_captures);
        self.king_captures.add(&other.king_captures);
        for (moves, games) in other.moves_per_game {
            *self.moves_per_game.entry(moves).or_insert(0) += games;
        }
        self.anomalies += other.anomalies;
        self
    }

    pub fn games(&self) -> u32 {
        self.games
    }

    pub fn transitions(&self) -> u64 {
        self.transitions
    }

    pub fn outcomes(&self) -> &OutcomeTally {
        &self.outcomes
    }

    pub fn anomalies(&self) -> u32 {
        self.anomalies
    }

    /// The (origin, destination) pairs of all resolved moves of one piece kind.
    pub fn moves(&self, piece: PieceKind) -> &[(Cell, Cell)] {
        self.move_trails
            .get(&piece)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn unresolved_moves(&self, piece: PieceKind) -> u32 {
        self.unresolved_moves.get(&piece).copied().unwrap_or(0)
    }

    /// How often each distinct (origin, destination) pair was played.
    pub fn move_frequencies(&self, piece: PieceKind) -> BTreeMap<(Cell, Cell), u32> {
        let mut frequencies = BTreeMap::new();
        for &trail in self.moves(piece) {
            *frequencies.entry(trail).or_insert(0) += 1;
        }
        frequencies
    }

    pub fn attacker_captures(&self) -> &CaptureMatrix {
        &self.attacker_captures
    }

    pub fn defender_captures(&self) -> &CaptureMatrix {
        &self.defender_captures
    }

    pub fn king_captures(&self) -> &CaptureMatrix {
        &self.king_captures
    }

    pub fn moves_per_game(&self) -> &BTreeMap<usize, u32> {
        &self.moves_per_game
    }
}
