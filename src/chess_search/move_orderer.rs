//! Chess-specific move ordering for improved alpha-beta pruning.

use std::cmp::Reverse;

use crate::alpha_beta_searcher::MoveOrderer;
use crate::board::piece::PieceKind;
use crate::chess_move::Move;
use crate::evaluate::piece_values::material_value;
use crate::game::GameState;
use crate::move_generator::is_in_check;

use super::implementation::SearchNode;

/// Orders captures first (most valuable victim, least valuable attacker),
/// then queen promotions, then moves that give check, then everything else.
/// The sort is stable, so equal moves keep their generation order.
#[derive(Clone, Copy, Default, Debug)]
pub struct ChessMoveOrderer;

impl MoveOrderer<SearchNode, Move> for ChessMoveOrderer {
    #[inline]
    fn order_moves(&self, moves: &mut [Move], node: &SearchNode) {
        let state = node.state();
        moves.sort_by_cached_key(|chess_move| Reverse(move_priority(chess_move, state)));
    }
}

const CAPTURE_PRIORITY: i32 = 100_000;
const PROMOTION_PRIORITY: i32 = 50_000;
const CHECK_PRIORITY: i32 = 10_000;

fn move_priority(chess_move: &Move, state: &GameState) -> i32 {
    if let Some(victim) = chess_move.captured {
        return CAPTURE_PRIORITY + mvv_lva(victim.kind, chess_move.piece.kind);
    }
    if chess_move.promotion_kind() == Some(PieceKind::Queen) {
        return PROMOTION_PRIORITY;
    }
    if gives_check(chess_move, state) {
        return CHECK_PRIORITY;
    }
    0
}

/// Victim value dominates; among equal victims the cheaper attacker wins.
fn mvv_lva(victim: PieceKind, attacker: PieceKind) -> i32 {
    material_value(victim) as i32 * 100 - material_value(attacker) as i32
}

fn gives_check(chess_move: &Move, state: &GameState) -> bool {
    match state.board().with_move(chess_move) {
        Ok(next) => is_in_check(&next, chess_move.piece.color.opposite()),
        Err(_) => false,
    }
}
