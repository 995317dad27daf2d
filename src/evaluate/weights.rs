use serde::{Deserialize, Serialize};

/// Tunable weights for the positional terms of the evaluation. Material
/// values are fixed; everything here is heuristic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EvaluationWeights {
    /// Non-pawn piece on one of the four central squares.
    pub center_piece: i32,
    pub center_pawn: i32,
    /// Piece on the 4x4 ring around the center.
    pub extended_center_piece: i32,
    pub extended_center_pawn: i32,
    /// Per step closer to the middle of the board.
    pub knight_centralization: i32,
    /// Per empty square on the bishop's diagonals.
    pub bishop_reach: i32,
    /// Per row advanced from the starting row.
    pub pawn_advancement: i32,
    /// Per empty square the wizard can teleport to.
    pub wizard_teleport: i32,
    /// Per enemy piece inside the wizard's diamond.
    pub wizard_threat: i32,
    /// Penalty per row/column of distance between the king and the nearest edge.
    pub king_exposure: i32,
    /// Per friendly piece adjacent to the king.
    pub king_shelter: i32,
    /// Per legal move more than the opponent. Zero skips move generation.
    pub mobility: i32,
}

impl Default for EvaluationWeights {
    fn default() -> Self {
        Self {
            center_piece: 3,
            center_pawn: 2,
            extended_center_piece: 1,
            extended_center_pawn: 1,
            knight_centralization: 1,
            bishop_reach: 1,
            pawn_advancement: 1,
            wizard_teleport: 1,
            wizard_threat: 3,
            king_exposure: 3,
            king_shelter: 2,
            mobility: 1,
        }
    }
}

impl EvaluationWeights {
    /// Material only.
    pub fn material_only() -> Self {
        Self {
            center_piece: 0,
            center_pawn: 0,
            extended_center_piece: 0,
            extended_center_pawn: 0,
            knight_centralization: 0,
            bishop_reach: 0,
            pawn_advancement: 0,
            wizard_teleport: 0,
            wizard_threat: 0,
            king_exposure: 0,
            king_shelter: 0,
            mobility: 0,
        }
    }
}
