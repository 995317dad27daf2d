use thiserror::Error;

use crate::board::color::Color;
use crate::board::error::BoardError;
use crate::chess_move::Move;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("Invalid move: {chess_move}")]
    InvalidMove { chess_move: Move },
    #[error("Out of turn: it is {expected}'s move, not {actual}'s")]
    OutOfTurn { expected: Color, actual: Color },
    #[error("The game has already ended")]
    GameAlreadyEnded,
    #[error("The game has not been started")]
    GameNotStarted,
    #[error("No {color} king on the board")]
    KingNotFound { color: Color },
    #[error("Invalid position: {reason}")]
    InvalidPosition { reason: String },
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Board error: {0}")]
    Board(#[from] BoardError),
}
