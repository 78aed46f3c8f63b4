//! Reconstructs moves and captures from the board snapshots that the 7x7
//! Brandubh game server writes for every game, and aggregates them over many
//! games into move trails and capture heatmaps.
pub use board::*;
pub use errors::*;
pub use game_log::*;
pub use piece::*;
pub use record::*;
pub use statistics::*;
pub use transition::*;
pub use visualization::*;

#[cfg(test)]
mod arbitrary;
mod board;
mod errors;
mod game_log;
mod piece;
mod record;
mod statistics;
mod transition;
mod visualization;
