use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::MalformedTerminal;

/// What occupies a single cell of the board.
///
/// The serialized names are the ones the game server writes into its logs.
#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[repr(u8)]
pub enum PieceKind {
    #[default]
    Empty,
    Attacker,
    Defender,
    King,
}

/// How a game ended, as declared by the last line of its log.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// The attackers captured the king.
    Attacker,
    /// The king escaped, or the attackers ran out of moves.
    Defender,
    /// The move limit was reached. Logged as `Winner: Empty`.
    Draw,
    /// The terminal line was missing or unreadable.
    Unknown,
}

impl PieceKind {
    /// The three kinds that are actual pieces, i.e. everything except [`PieceKind::Empty`].
    pub const PIECES: [PieceKind; 3] = [PieceKind::Attacker, PieceKind::Defender, PieceKind::King];

    pub fn is_empty(self) -> bool {
        self == PieceKind::Empty
    }

    /// Pieces that can be removed from the board by being surrounded.
    ///
    /// The king is not among them: capturing the king ends the game and is
    /// recorded separately.
    pub fn is_capturable(self) -> bool {
        matches!(self, PieceKind::Attacker | PieceKind::Defender)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PieceKind::Empty => "Empty",
            PieceKind::Attacker => "Attacker",
            PieceKind::Defender => "Defender",
            PieceKind::King => "King",
        }
    }

    /// Single character used when drawing boards.
    pub fn symbol(self) -> char {
        match self {
            PieceKind::Empty => '·',
            PieceKind::Attacker => 'A',
            PieceKind::Defender => 'D',
            PieceKind::King => 'K',
        }
    }
}

impl std::fmt::Display for PieceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The error type for the [`FromStr`] instance of [`PieceKind`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownPieceKind(pub String);

impl std::error::Error for UnknownPieceKind {}

impl std::fmt::Display for UnknownPieceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "'{}' is not one of Empty, Attacker, Defender or King",
            self.0
        )
    }
}

impl FromStr for PieceKind {
    type Err = UnknownPieceKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Empty" => Ok(PieceKind::Empty),
            "Attacker" => Ok(PieceKind::Attacker),
            "Defender" => Ok(PieceKind::Defender),
            "King" => Ok(PieceKind::King),
            _ => Err(UnknownPieceKind(String::from(s))),
        }
    }
}

impl Outcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Attacker => "attacker",
            Outcome::Defender => "defender",
            Outcome::Draw => "draw",
            Outcome::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parses the value that follows `Winner:` in a log.
///
/// A draw is written by the server as the winning "cell type" `Empty`.
impl FromStr for Outcome {
    type Err = MalformedTerminal;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Attacker" => Ok(Outcome::Attacker),
            "Defender" => Ok(Outcome::Defender),
            "Empty" => Ok(Outcome::Draw),
            other => Err(MalformedTerminal::UnknownWinner(String::from(other))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn piece_kind_names_match_serde() {
        for kind in [
            PieceKind::Empty,
            PieceKind::Attacker,
            PieceKind::Defender,
            PieceKind::King,
        ] {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind));
            assert_eq!(kind.as_str().parse::<PieceKind>(), Ok(kind));
        }
    }

    #[test]
    fn unknown_piece_kind() {
        assert_eq!(
            "Knight".parse::<PieceKind>(),
            Err(UnknownPieceKind(String::from("Knight")))
        );
        assert!(serde_json::from_str::<PieceKind>("\"attacker\"").is_err());
    }

    #[test]
    fn outcome_from_winner_value() {
        assert_eq!(" Attacker".parse::<Outcome>(), Ok(Outcome::Attacker));
        assert_eq!("Defender ".parse::<Outcome>(), Ok(Outcome::Defender));
        assert_eq!("Empty".parse::<Outcome>(), Ok(Outcome::Draw));
        assert_eq!(
            "King".parse::<Outcome>(),
            Err(MalformedTerminal::UnknownWinner(String::from("King")))
        );
    }
}
