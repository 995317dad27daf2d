//! Static evaluation: material, positional bonuses, king safety, mobility and
//! the wizard's reach.

use crate::board::castle_rights::CastleRights;
use crate::board::color::Color;
use crate::board::piece::{Piece, PieceKind};
use crate::board::position::Position;
use crate::board::Board;
use crate::game::GameState;
use crate::move_generator::legal_moves;
use crate::move_generator::targets::{
    diagonal_reach, wizard_attack_targets, wizard_teleport_targets,
};

pub mod piece_values;
pub mod weights;

use piece_values::material_value;
pub use weights::EvaluationWeights;

/// Score of a decided game. Larger than any material sum.
pub const MATE_SCORE: i16 = 10000;

/// Non-terminal scores are clamped inside this bound so they never collide
/// with a mate score found at any ply.
pub const MAX_POSITIONAL_SCORE: i16 = MATE_SCORE - u8::MAX as i16 - 1;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEnding {
    Checkmate,
    Stalemate,
    Resignation,
}

/// Returns the game ending state if the game has ended, otherwise returns None.
pub fn game_ending(state: &GameState) -> Option<GameEnding> {
    if state.resigned().is_some() {
        Some(GameEnding::Resignation)
    } else if state.is_checkmate() {
        Some(GameEnding::Checkmate)
    } else if state.is_stalemate() {
        Some(GameEnding::Stalemate)
    } else {
        None
    }
}

/// Score of `state` from `perspective`'s point of view. Positive is good for
/// `perspective`.
pub fn evaluate(state: &GameState, perspective: Color, weights: &EvaluationWeights) -> i16 {
    match game_ending(state) {
        Some(GameEnding::Stalemate) => 0,
        Some(GameEnding::Checkmate) | Some(GameEnding::Resignation) => {
            if state.winner() == Some(perspective) {
                MATE_SCORE
            } else {
                -MATE_SCORE
            }
        }
        None => score(
            state.board(),
            state.castling_rights(),
            perspective,
            weights,
        ),
    }
}

/// Non-terminal score of a board from `perspective`'s point of view.
pub fn score(
    board: &Board,
    rights: CastleRights,
    perspective: Color,
    weights: &EvaluationWeights,
) -> i16 {
    let mut total: i32 = 0;

    for (position, piece) in board.occupied() {
        let value =
            material_value(piece.kind) as i32 + positional_bonus(board, position, piece, weights);
        total += signed(value, piece.color, perspective);
    }

    for color in Color::ALL {
        if let Ok(king) = board.king_position(color) {
            total += signed(king_safety(board, king, color, weights), color, perspective);
        }
    }

    if weights.mobility != 0 {
        let own = legal_moves(board, rights, perspective).len() as i32;
        let theirs = legal_moves(board, rights, perspective.opposite()).len() as i32;
        total += (own - theirs) * weights.mobility;
    }

    let bound = MAX_POSITIONAL_SCORE as i32;
    total.clamp(-bound, bound) as i16
}

fn signed(value: i32, owner: Color, perspective: Color) -> i32 {
    if owner == perspective {
        value
    } else {
        -value
    }
}

fn positional_bonus(
    board: &Board,
    position: Position,
    piece: Piece,
    weights: &EvaluationWeights,
) -> i32 {
    let mut bonus = center_bonus(position, piece.kind, weights);

    match piece.kind {
        PieceKind::Knight => {
            bonus += (9 - center_distance(position)) * weights.knight_centralization;
        }
        PieceKind::Bishop => {
            bonus += diagonal_reach(board, position) as i32 * weights.bishop_reach;
        }
        PieceKind::Pawn => {
            let progress = (position.row as i32 - piece.color.pawn_row() as i32).abs();
            bonus += progress * weights.pawn_advancement;
        }
        PieceKind::Wizard => {
            let teleports = wizard_teleport_targets(board, position).len() as i32;
            let threats = wizard_attack_targets(board, position, piece.color).len() as i32;
            bonus += teleports * weights.wizard_teleport + threats * weights.wizard_threat;
        }
        _ => {}
    }

    bonus
}

fn center_bonus(position: Position, kind: PieceKind, weights: &EvaluationWeights) -> i32 {
    let in_center = |lo: u8, hi: u8| {
        (lo..=hi).contains(&position.row) && (lo..=hi).contains(&position.col)
    };
    let is_pawn = kind == PieceKind::Pawn;

    if in_center(4, 5) {
        if is_pawn {
            weights.center_pawn
        } else {
            weights.center_piece
        }
    } else if in_center(3, 6) {
        if is_pawn {
            weights.extended_center_pawn
        } else {
            weights.extended_center_piece
        }
    } else {
        0
    }
}

/// Manhattan distance to the middle of the board, 1 on the central squares
/// and 9 in the corners.
fn center_distance(position: Position) -> i32 {
    let row = (2 * position.row as i32 - 9).abs();
    let col = (2 * position.col as i32 - 9).abs();
    (row + col) / 2
}

fn king_safety(board: &Board, king: Position, color: Color, weights: &EvaluationWeights) -> i32 {
    let exposure = king.edge_distance() as i32 * weights.king_exposure;

    let shelter = (-1..=1)
        .flat_map(|dr| (-1..=1).map(move |dc| (dr, dc)))
        .filter(|&offset| offset != (0, 0))
        .filter_map(|(dr, dc)| king.offset(dr, dc))
        .filter(|&square| match board.get(square) {
            Some(piece) => piece.color == color && piece.kind != PieceKind::King,
            None => false,
        })
        .count() as i32;

    shelter * weights.king_shelter - exposure
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board_position;

    fn state(board: Board, to_move: Color) -> GameState {
        GameState::from_board(board, to_move).unwrap()
    }

    #[test]
    fn test_starting_position_is_balanced() {
        let initial = GameState::new();
        let weights = EvaluationWeights::default();
        assert_eq!(evaluate(&initial, Color::White, &weights), 0);
        assert_eq!(evaluate(&initial, Color::Black, &weights), 0);
    }

    #[test]
    fn test_material_advantage() {
        let board = board_position! {
            .....k....
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            Q....K....
        };
        let weights = EvaluationWeights::material_only();
        let position = state(board, Color::White);
        assert_eq!(evaluate(&position, Color::White, &weights), 90);
        assert_eq!(evaluate(&position, Color::Black, &weights), -90);
    }

    #[test]
    fn test_checkmate_is_terminal_score() {
        let board = board_position! {
            R....k....
            ....ppp...
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            .........K
        };
        let mated = state(board, Color::Black);
        assert_eq!(game_ending(&mated), Some(GameEnding::Checkmate));
        let weights = EvaluationWeights::default();
        assert_eq!(evaluate(&mated, Color::White, &weights), MATE_SCORE);
        assert_eq!(evaluate(&mated, Color::Black, &weights), -MATE_SCORE);
    }

    #[test]
    fn test_stalemate_scores_zero() {
        let board = board_position! {
            k.........
            ..Q.......
            .K........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
        };
        let stalemate = state(board, Color::Black);
        assert_eq!(game_ending(&stalemate), Some(GameEnding::Stalemate));
        assert_eq!(
            evaluate(&stalemate, Color::White, &EvaluationWeights::default()),
            0
        );
    }

    #[test]
    fn test_wizard_threat_counts() {
        let quiet = board_position! {
            .....k....
            ..........
            ..........
            ..........
            ..........
            ....W.....
            ..........
            ..........
            ..........
            .....K...n
        };
        let threatening = board_position! {
            .....k....
            ..........
            ..........
            ..........
            ..........
            ....W.....
            .....n....
            ..........
            ..........
            .....K....
        };
        let weights = EvaluationWeights {
            wizard_threat: 3,
            wizard_teleport: 0,
            ..EvaluationWeights::material_only()
        };
        let quiet_score = score(&quiet, CastleRights::none(), Color::White, &weights);
        let threat_score = score(&threatening, CastleRights::none(), Color::White, &weights);
        assert_eq!(threat_score - quiet_score, 3);
    }

    #[test]
    fn test_center_distance() {
        assert_eq!(center_distance(Position::new(4, 4)), 1);
        assert_eq!(center_distance(Position::new(5, 5)), 1);
        assert_eq!(center_distance(Position::new(0, 0)), 9);
        assert_eq!(center_distance(Position::new(9, 0)), 9);
    }

    #[test]
    fn test_exposed_king_is_penalised() {
        let sheltered = board_position! {
            .....k....
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            .....K....
        };
        let exposed = board_position! {
            .....k....
            ..........
            ..........
            ..........
            .....K....
            ..........
            ..........
            ..........
            ..........
            ..........
        };
        let weights = EvaluationWeights {
            king_exposure: 3,
            ..EvaluationWeights::material_only()
        };
        assert_eq!(
            score(&sheltered, CastleRights::none(), Color::White, &weights)
                - score(&exposed, CastleRights::none(), Color::White, &weights),
            12
        );
    }
}
