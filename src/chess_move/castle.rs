use crate::board::castle_rights::CastleRights;
use crate::board::color::Color;
use crate::board::piece::PieceKind;
use crate::board::position::Position;

use super::chess_move::Move;

/// Column of both kings in the initial setup.
pub const KING_HOME_COL: u8 = 5;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum CastleSide {
    Kingside,
    Queenside,
}

impl CastleSide {
    pub const ALL: [CastleSide; 2] = [CastleSide::Kingside, CastleSide::Queenside];

    pub fn rook_from_col(&self) -> u8 {
        match self {
            CastleSide::Kingside => 9,
            CastleSide::Queenside => 0,
        }
    }

    pub fn king_to_col(&self) -> u8 {
        match self {
            CastleSide::Kingside => KING_HOME_COL + 2,
            CastleSide::Queenside => KING_HOME_COL - 2,
        }
    }

    /// The rook lands on the square the king crosses.
    pub fn rook_to_col(&self) -> u8 {
        match self {
            CastleSide::Kingside => KING_HOME_COL + 1,
            CastleSide::Queenside => KING_HOME_COL - 1,
        }
    }

    pub fn rights(&self, color: Color) -> CastleRights {
        match self {
            CastleSide::Kingside => CastleRights::kingside(color),
            CastleSide::Queenside => CastleRights::queenside(color),
        }
    }

    /// Squares strictly between king and rook, all of which must be empty.
    pub fn between(&self, color: Color) -> Vec<Position> {
        let row = color.home_row();
        let (lo, hi) = match self {
            CastleSide::Kingside => (KING_HOME_COL + 1, self.rook_from_col()),
            CastleSide::Queenside => (self.rook_from_col() + 1, KING_HOME_COL),
        };
        (lo..hi).map(|col| Position::new(row, col)).collect()
    }

    /// The king's path: home square, crossed square, destination. None of
    /// them may be attacked.
    pub fn king_path(&self, color: Color) -> [Position; 3] {
        let row = color.home_row();
        [
            Position::new(row, KING_HOME_COL),
            Position::new(row, self.rook_to_col()),
            Position::new(row, self.king_to_col()),
        ]
    }

    /// Which side a rook in a home-row corner belongs to.
    pub fn for_rook_square(position: Position, color: Color) -> Option<CastleSide> {
        if position.row != color.home_row() {
            return None;
        }
        CastleSide::ALL
            .iter()
            .copied()
            .find(|side| side.rook_from_col() == position.col)
    }
}

/// Castling rights that survive `chess_move`. A king move drops both of its
/// color's rights, a rook leaving its corner drops that side, and any capture
/// on a corner (including a ranged attack) drops the victim's right there.
pub fn rights_after_move(rights: CastleRights, chess_move: &Move) -> CastleRights {
    let mover = chess_move.piece;
    let mut rights = rights;

    match mover.kind {
        PieceKind::King => rights = rights.without(CastleRights::for_color(mover.color)),
        PieceKind::Rook => {
            if let Some(side) = CastleSide::for_rook_square(chess_move.from, mover.color) {
                rights = rights.without(side.rights(mover.color));
            }
        }
        _ => {}
    }

    if let Some(victim) = chess_move.captured {
        if let Some(side) = CastleSide::for_rook_square(chess_move.to, victim.color) {
            rights = rights.without(side.rights(victim.color));
        }
    }

    rights
}
