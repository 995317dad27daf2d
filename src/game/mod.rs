//! Turn sequencing, special-move bookkeeping and game status.
//!
//! The free functions here are the operations a front end or a network layer
//! needs; they are thin wrappers over `GameState` methods.

pub mod error;
pub mod session;
pub mod state;

#[cfg(test)]
mod tests;

pub use error::GameError;
pub use session::{GamePhase, GameSession};
pub use state::GameState;

use crate::board::position::Position;
use crate::chess_move::Move;

/// Destinations for the piece on `position`, for highlighting. Never fails:
/// an empty square, an opponent's piece or a finished game yield nothing.
pub fn legal_moves(state: &GameState, position: Position) -> Vec<Position> {
    state.legal_destinations(position)
}

pub fn apply(state: &GameState, chess_move: &Move) -> Result<GameState, GameError> {
    state.apply(chess_move)
}

/// Whether the side to move is in check.
pub fn is_in_check(state: &GameState) -> bool {
    state.is_in_check()
}

pub fn is_checkmate(state: &GameState) -> bool {
    state.is_checkmate()
}

pub fn is_stalemate(state: &GameState) -> bool {
    state.is_stalemate()
}

/// Perft: leaf positions `depth` plies below `state`.
pub fn count_positions(state: &GameState, depth: u8) -> usize {
    state.count_positions(depth)
}
