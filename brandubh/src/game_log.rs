use serde::Serialize;

use crate::{
    analyze_transition, Anomaly, BoardGrid, CaptureEvent, Cell, MoveEvent, Outcome, Transition,
};

/// The snapshots of one game, oldest first, and how it ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameLog {
    pub snapshots: Vec<BoardGrid>,
    pub outcome: Outcome,
}

/// The position of the king on the final board of a game the attackers won.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct KingCaptureEvent {
    pub cell: Cell,
}

/// Everything inferred from one [`GameLog`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GameEvents {
    pub outcome: Outcome,
    /// Number of consecutive snapshot pairs that were compared.
    pub transitions: usize,
    pub moves: Vec<MoveEvent>,
    pub captures: Vec<CaptureEvent>,
    pub king_capture: Option<KingCaptureEvent>,
    pub anomalies: Vec<Anomaly>,
}

impl GameLog {
    pub fn new(snapshots: Vec<BoardGrid>, outcome: Outcome) -> Self {
        Self { snapshots, outcome }
    }

    /// Analyzes every pair of consecutive snapshots, in order.
    pub fn transitions(&self) -> impl Iterator<Item = Transition> + '_ {
        self.snapshots
            .windows(2)
            .enumerate()
            .map(|(idx, pair)| analyze_transition(idx + 1, &pair[0], &pair[1]))
    }

    /// Turns the log into move, capture and king capture events.
    pub fn process(&self) -> GameEvents {
        let mut events = GameEvents {
            outcome: self.outcome,
            transitions: 0,
            moves: Vec::new(),
            captures: Vec::new(),
            king_capture: None,
            anomalies: Vec::new(),
        };

        for transition in self.transitions() {
            events.transitions += 1;
            events.moves.extend(transition.move_event);
            events.captures.extend(transition.captures);
            events.anomalies.extend(transition.anomaly);
        }

        match resolve_king_capture(&self.snapshots, self.outcome) {
            Ok(king_capture) => events.king_capture = king_capture,
            Err(anomaly) => events.anomalies.push(anomaly),
        }

        events
    }
}

/// Finds where the king was captured, if the attackers won.
///
/// Returns `Ok(None)` for any other outcome and for a log without snapshots.
/// An attacker win without a king on the final board is reported as
/// [`Anomaly::KingMissing`].
pub fn resolve_king_capture(
    snapshots: &[BoardGrid],
    outcome: Outcome,
) -> Result<Option<KingCaptureEvent>, Anomaly> {
    if outcome != Outcome::Attacker {
        return Ok(None);
    }
    let Some(final_grid) = snapshots.last() else {
        return Ok(None);
    };
    final_grid
        .king()
        .map(|cell| Some(KingCaptureEvent { cell }))
        .ok_or(Anomaly::KingMissing)
}
