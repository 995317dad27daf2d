//! Check detection and the "does this move leave my king in check" filter.

#[cfg(feature = "instrumentation")]
use tracing::instrument;

use crate::board::color::Color;
use crate::board::position::Position;
use crate::board::Board;
use crate::chess_move::Move;

use super::targets::attacks_square;

/// True if any piece of color `by` attacks `target`.
#[cfg_attr(feature = "instrumentation", instrument(skip_all))]
pub fn is_square_attacked(board: &Board, target: Position, by: Color) -> bool {
    board
        .pieces(by)
        .any(|(from, piece)| attacks_square(board, from, piece, target))
}

/// True if `color`'s king is attacked.
///
/// Panics if `color` has no king: every public entry point validates king
/// presence, so a missing king here means the board was corrupted upstream.
#[cfg_attr(feature = "instrumentation", instrument(skip_all))]
pub fn is_in_check(board: &Board, color: Color) -> bool {
    let king = board
        .king_position(color)
        .unwrap_or_else(|err| panic!("check detection on a corrupt board: {}", err));
    is_square_attacked(board, king, color.opposite())
}

/// Simulates `chess_move` on a scratch board and reports whether the mover's
/// king is safe afterwards. A move that cannot be applied is never safe.
pub fn leaves_king_safe(board: &Board, chess_move: &Move) -> bool {
    match board.with_move(chess_move) {
        Ok(next) => !is_in_check(&next, chess_move.piece.color),
        Err(_) => false,
    }
}
