//! Turns per-piece destinations into full `Move` values and filters them down
//! to the legal set.
//!
//! Moves are produced in a fixed order (pieces row-major, then destinations
//! in generation order) so that search and tests see the same list for the
//! same position.

use smallvec::SmallVec;
#[cfg(feature = "instrumentation")]
use tracing::instrument;

use crate::board::castle_rights::CastleRights;
use crate::board::color::Color;
use crate::board::piece::{Piece, PieceKind};
use crate::board::position::Position;
use crate::board::Board;
use crate::chess_move::castle::{rights_after_move, CastleSide, KING_HOME_COL};
use crate::chess_move::Move;

use super::legality::{is_square_attacked, leaves_king_safe};
use super::targets::{destinations, wizard_attack_targets, wizard_teleport_targets};

/// Promotion choices, in the order they are generated. Queen first.
pub const PAWN_PROMOTIONS: [PieceKind; 5] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Wizard,
];

/// A list of moves that is optimized for small sizes.
pub type MoveList = SmallVec<[Move; 64]>;

/// Every pseudo-legal move for `color`, including castling.
#[cfg_attr(feature = "instrumentation", instrument(skip_all))]
pub fn pseudo_legal_moves(board: &Board, rights: CastleRights, color: Color) -> MoveList {
    let mut moves = MoveList::new();
    for (from, _) in board.pieces(color) {
        push_moves_from(&mut moves, board, rights, from);
    }
    moves
}

/// Every legal move for `color`.
#[cfg_attr(feature = "instrumentation", instrument(skip_all))]
pub fn legal_moves(board: &Board, rights: CastleRights, color: Color) -> MoveList {
    let mut moves = pseudo_legal_moves(board, rights, color);
    moves.retain(|chess_move| leaves_king_safe(board, chess_move));
    moves
}

/// Legal moves for whatever piece stands on `from`, regardless of whose
/// turn it is. Empty for an empty square.
pub fn legal_moves_from(board: &Board, rights: CastleRights, from: Position) -> MoveList {
    let mut moves = MoveList::new();
    push_moves_from(&mut moves, board, rights, from);
    moves.retain(|chess_move| leaves_king_safe(board, chess_move));
    moves
}

/// Short-circuiting form of `!legal_moves(..).is_empty()`.
#[cfg_attr(feature = "instrumentation", instrument(skip_all))]
pub fn has_legal_move(board: &Board, rights: CastleRights, color: Color) -> bool {
    let mut moves = MoveList::new();
    for (from, _) in board.pieces(color) {
        moves.clear();
        push_moves_from(&mut moves, board, rights, from);
        if moves.iter().any(|chess_move| leaves_king_safe(board, chess_move)) {
            return true;
        }
    }
    false
}

/// Number of leaf positions reachable in exactly `depth` plies.
pub fn count_positions(board: &Board, rights: CastleRights, color: Color, depth: u8) -> usize {
    if depth == 0 {
        return 1;
    }

    let moves = legal_moves(board, rights, color);
    if depth == 1 {
        return moves.len();
    }

    moves
        .iter()
        .map(|chess_move| {
            let next = board
                .with_move(chess_move)
                .expect("legal move should apply in position counting");
            let next_rights = rights_after_move(rights, chess_move);
            count_positions(&next, next_rights, color.opposite(), depth - 1)
        })
        .sum()
}

fn push_moves_from(moves: &mut MoveList, board: &Board, rights: CastleRights, from: Position) {
    let piece = match board.get(from) {
        Some(piece) => piece,
        None => return,
    };

    match piece.kind {
        PieceKind::Wizard => push_wizard_moves(moves, board, from, piece),
        PieceKind::Pawn => push_pawn_moves(moves, board, from, piece),
        PieceKind::King => {
            push_plain_moves(moves, board, from, piece);
            push_castle_moves(moves, board, rights, from, piece);
        }
        _ => push_plain_moves(moves, board, from, piece),
    }
}

fn push_plain_moves(moves: &mut MoveList, board: &Board, from: Position, piece: Piece) {
    for to in destinations(board, from) {
        moves.push(Move::plain(from, to, piece, board.get(to)));
    }
}

fn push_pawn_moves(moves: &mut MoveList, board: &Board, from: Position, pawn: Piece) {
    let promotion_row = pawn.color.promotion_row();
    for to in destinations(board, from) {
        let captured = board.get(to);
        if to.row == promotion_row {
            for promote_to in PAWN_PROMOTIONS {
                moves.push(Move::promotion(from, to, pawn, captured, promote_to));
            }
        } else {
            moves.push(Move::plain(from, to, pawn, captured));
        }
    }
}

fn push_wizard_moves(moves: &mut MoveList, board: &Board, from: Position, wizard: Piece) {
    for to in wizard_teleport_targets(board, from) {
        moves.push(Move::teleport(from, to, wizard));
    }
    for target in wizard_attack_targets(board, from, wizard.color) {
        if let Some(victim) = board.get(target) {
            moves.push(Move::ranged_attack(from, target, wizard, victim));
        }
    }
}

#[cfg_attr(feature = "instrumentation", instrument(skip_all))]
fn push_castle_moves(
    moves: &mut MoveList,
    board: &Board,
    rights: CastleRights,
    from: Position,
    king: Piece,
) {
    let color = king.color;
    let home = Position::new(color.home_row(), KING_HOME_COL);
    if king.has_moved || from != home {
        return;
    }

    // Early exit before any attack scan.
    if (rights & CastleRights::for_color(color)).is_empty() {
        return;
    }

    let opponent = color.opposite();
    if is_square_attacked(board, home, opponent) {
        return;
    }

    for side in CastleSide::ALL {
        if !rights.contains(side.rights(color)) {
            continue;
        }

        let rook_from = Position::new(color.home_row(), side.rook_from_col());
        match board.get(rook_from) {
            Some(rook) if rook.is(PieceKind::Rook, color) && !rook.has_moved => {}
            _ => continue,
        }

        if side.between(color).iter().any(|&square| board.is_occupied(square)) {
            continue;
        }

        let [_, crossed, landing] = side.king_path(color);
        if is_square_attacked(board, crossed, opponent)
            || is_square_attacked(board, landing, opponent)
        {
            continue;
        }

        let rook_to = Position::new(color.home_row(), side.rook_to_col());
        moves.push(Move::castle(home, landing, king, rook_from, rook_to));
    }
}
