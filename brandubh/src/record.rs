use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{BoardGrid, Cell, MalformedRecord, MalformedTerminal, Outcome, PieceKind};

/// Every game log ends with a line starting with this marker, followed by the winner.
pub const TERMINAL_PREFIX: &str = "Winner:";

/// One board-state line of a game log, as written by the game server.
///
/// ```json
/// {"board": {"(0, 3)": "Attacker", "(3, 3)": "King", "(0, 0)": "Empty", ...}}
/// ```
///
/// Keys are `(row, col)` pairs in string form. The server writes all 49
/// cells, but cells that are left out are read as empty.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotRecord {
    pub board: BTreeMap<String, PieceKind>,
}

impl SnapshotRecord {
    /// The record the server would write for this board.
    pub fn from_grid(grid: &BoardGrid) -> Self {
        Self {
            board: grid
                .iter()
                .map(|(cell, kind)| (cell.to_string(), kind))
                .collect(),
        }
    }

    pub fn to_grid(&self) -> Result<BoardGrid, MalformedRecord> {
        let pieces = self
            .board
            .iter()
            .map(|(key, &kind)| {
                let cell = key
                    .parse::<Cell>()
                    .map_err(|err| MalformedRecord::InvalidCoordinate {
                        key: key.clone(),
                        err,
                    })?;
                Ok((cell, kind))
            })
            .collect::<Result<Vec<_>, MalformedRecord>>()?;
        Ok(BoardGrid::from_pieces(pieces))
    }
}

/// Parses one board-state line into a grid.
pub fn parse_snapshot(line: &str) -> Result<BoardGrid, MalformedRecord> {
    let record: SnapshotRecord = serde_json::from_str(line)?;
    record.to_grid()
}

pub fn is_terminal_line(line: &str) -> bool {
    line.trim_start().starts_with(TERMINAL_PREFIX)
}

/// Parses the last line of a log, e.g. `Winner: Attacker`.
pub fn parse_terminal(line: &str) -> Result<Outcome, MalformedTerminal> {
    let value = line
        .trim()
        .strip_prefix(TERMINAL_PREFIX)
        .ok_or(MalformedTerminal::Missing)?;
    value.parse()
}
