//! Common types re-exported for convenience.

pub use crate::board::color::Color;
pub use crate::board::piece::{Piece, PieceKind};
pub use crate::board::position::Position;
pub use crate::board::Board;
pub use crate::chess_move::{Move, MoveKind};
pub use crate::chess_search::{SearchConfig, SearchEngine};
pub use crate::game::{GameError, GamePhase, GameSession, GameState};
