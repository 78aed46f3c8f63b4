use crate::{Cell, CellFromStrErr, CellSet};

/// The error type for [`parse_snapshot()`](crate::parse_snapshot), i.e. for one board-state line.
#[derive(Debug)]
pub enum MalformedRecord {
    /// The line is not JSON, or does not have the shape `{"board": {...}}`,
    /// or names a piece kind that does not exist.
    Json(serde_json::Error),
    /// A key of the board mapping is not a `(row, col)` pair on the board.
    InvalidCoordinate { key: String, err: CellFromStrErr },
}

impl std::error::Error for MalformedRecord {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MalformedRecord::Json(err) => Some(err),
            MalformedRecord::InvalidCoordinate { err, .. } => Some(err),
        }
    }
}

impl std::fmt::Display for MalformedRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MalformedRecord::Json(_) => write!(f, "Board state is not a valid JSON record"),
            MalformedRecord::InvalidCoordinate { key, .. } => {
                write!(f, "Board state contains an invalid cell key '{}'", key)
            }
        }
    }
}

impl From<serde_json::Error> for MalformedRecord {
    fn from(err: serde_json::Error) -> Self {
        MalformedRecord::Json(err)
    }
}

/// The error type for [`parse_terminal()`](crate::parse_terminal).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MalformedTerminal {
    /// The log does not end with a `Winner:` line.
    Missing,
    /// The value after `Winner:` is not Attacker, Defender or Empty.
    UnknownWinner(String),
}

impl std::error::Error for MalformedTerminal {}

impl std::fmt::Display for MalformedTerminal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MalformedTerminal::Missing => write!(f, "Log does not end with a winner line"),
            MalformedTerminal::UnknownWinner(value) => {
                write!(f, "Invalid winner data in last line: '{}'", value)
            }
        }
    }
}

/// Something odd about a game log that does not stop it from being processed.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub enum Anomaly {
    /// A piece appeared at `destination`, but it is unclear which of the
    /// vacated cells it came from.
    AmbiguousOrigin {
        transition: usize,
        destination: Cell,
        candidates: CellSet,
    },
    /// More than one piece appeared in a single transition, so no move was inferred.
    MultipleDestinations {
        transition: usize,
        destinations: CellSet,
    },
    /// The attackers won, but there is no king on the final board.
    KingMissing,
}

impl std::error::Error for Anomaly {}

impl std::fmt::Display for Anomaly {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Anomaly::AmbiguousOrigin {
                transition,
                destination,
                candidates,
            } => write!(
                f,
                "Transition {}: cannot tell where the piece at {} came from ({} candidates)",
                transition,
                destination,
                candidates.len()
            ),
            Anomaly::MultipleDestinations {
                transition,
                destinations,
            } => write!(
                f,
                "Transition {}: {} pieces appeared at once, no move inferred",
                transition,
                destinations.len()
            ),
            Anomaly::KingMissing => {
                write!(f, "Attacker won, but the final board has no king")
            }
        }
    }
}
