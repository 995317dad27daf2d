use thiserror::Error;

use super::color::Color;
use super::position::Position;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("Cannot put a piece on {position}, the square is already occupied")]
    SquareOccupied { position: Position },
    #[error("Cannot apply move, there is no piece on {position}")]
    EmptySquare { position: Position },
    #[error("Cannot apply move, the expected capture on {position} is not what is on the board")]
    UnexpectedCapture { position: Position },
    #[error("Invalid castle state: {msg:?}")]
    InvalidCastleState { msg: &'static str },
    #[error("({row},{col}) is not a square on the board")]
    OffBoard { row: u8, col: u8 },
    #[error("No {color} king on the board")]
    KingNotFound { color: Color },
}
