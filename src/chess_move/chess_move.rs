use core::fmt;

use serde::{Deserialize, Serialize};

use crate::board::error::BoardError;
use crate::board::piece::{Piece, PieceKind};
use crate::board::position::Position;
use crate::board::Board;

/// What a move does beyond relocating `piece` from `from` to `to`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum MoveKind {
    /// An ordinary move or capture.
    Plain,
    /// A wizard jump to an empty square within its diamond.
    Teleport,
    /// A wizard removes the enemy piece on `to` and stays on `from`.
    RangedAttack,
    /// The king moves two squares and the rook lands on the square it crossed.
    #[serde(rename_all = "camelCase")]
    Castle {
        rook_from: Position,
        rook_to: Position,
    },
    /// A pawn reaches its last row and becomes `promote_to`.
    #[serde(rename_all = "camelCase")]
    Promotion { promote_to: PieceKind },
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Move {
    pub from: Position,
    pub to: Position,
    /// The moving piece as it stood before the move.
    pub piece: Piece,
    pub captured: Option<Piece>,
    pub kind: MoveKind,
}

impl Move {
    pub fn plain(from: Position, to: Position, piece: Piece, captured: Option<Piece>) -> Self {
        Self {
            from,
            to,
            piece,
            captured,
            kind: MoveKind::Plain,
        }
    }

    pub fn teleport(from: Position, to: Position, wizard: Piece) -> Self {
        Self {
            from,
            to,
            piece: wizard,
            captured: None,
            kind: MoveKind::Teleport,
        }
    }

    pub fn ranged_attack(from: Position, target: Position, wizard: Piece, victim: Piece) -> Self {
        Self {
            from,
            to: target,
            piece: wizard,
            captured: Some(victim),
            kind: MoveKind::RangedAttack,
        }
    }

    pub fn castle(
        king_from: Position,
        king_to: Position,
        king: Piece,
        rook_from: Position,
        rook_to: Position,
    ) -> Self {
        Self {
            from: king_from,
            to: king_to,
            piece: king,
            captured: None,
            kind: MoveKind::Castle { rook_from, rook_to },
        }
    }

    pub fn promotion(
        from: Position,
        to: Position,
        pawn: Piece,
        captured: Option<Piece>,
        promote_to: PieceKind,
    ) -> Self {
        Self {
            from,
            to,
            piece: pawn,
            captured,
            kind: MoveKind::Promotion { promote_to },
        }
    }

    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    pub fn is_wizard_teleport(&self) -> bool {
        self.kind == MoveKind::Teleport
    }

    pub fn is_wizard_attack(&self) -> bool {
        self.kind == MoveKind::RangedAttack
    }

    pub fn is_castling(&self) -> bool {
        matches!(self.kind, MoveKind::Castle { .. })
    }

    pub fn promotion_kind(&self) -> Option<PieceKind> {
        match self.kind {
            MoveKind::Promotion { promote_to } => Some(promote_to),
            _ => None,
        }
    }

    pub fn rook_move(&self) -> Option<(Position, Position)> {
        match self.kind {
            MoveKind::Castle { rook_from, rook_to } => Some((rook_from, rook_to)),
            _ => None,
        }
    }

    /// The square the moving piece ends up on. A ranged attack leaves the
    /// wizard where it was.
    pub fn landing_square(&self) -> Position {
        match self.kind {
            MoveKind::RangedAttack => self.from,
            _ => self.to,
        }
    }

    #[must_use = "move application may fail"]
    pub fn apply(&self, board: &mut Board) -> Result<(), BoardError> {
        match self.kind {
            MoveKind::Plain => {
                self.take_mover(board)?;
                self.take_capture(board)?;
                board.put(self.to, self.piece.moved())
            }
            MoveKind::Teleport => {
                self.take_mover(board)?;
                board.put(self.to, self.piece.moved())
            }
            MoveKind::RangedAttack => {
                if board.get(self.from) != Some(self.piece) {
                    return Err(BoardError::EmptySquare {
                        position: self.from,
                    });
                }
                if self.captured.is_none() {
                    return Err(BoardError::UnexpectedCapture { position: self.to });
                }
                self.take_capture(board)
            }
            MoveKind::Castle { rook_from, rook_to } => {
                let rook = match board.get(rook_from) {
                    Some(rook)
                        if rook.kind == PieceKind::Rook && rook.color == self.piece.color =>
                    {
                        rook
                    }
                    _ => {
                        return Err(BoardError::InvalidCastleState {
                            msg: "rook_from is not a rook of the castling color",
                        })
                    }
                };
                if board.is_occupied(self.to) || board.is_occupied(rook_to) {
                    return Err(BoardError::InvalidCastleState {
                        msg: "castling destination is not empty",
                    });
                }
                self.take_mover(board)?;
                board.remove(rook_from);
                board.put(self.to, self.piece.moved())?;
                board.put(rook_to, rook.moved())
            }
            MoveKind::Promotion { promote_to } => {
                self.take_mover(board)?;
                self.take_capture(board)?;
                let promoted = Piece {
                    kind: promote_to,
                    color: self.piece.color,
                    has_moved: true,
                };
                board.put(self.to, promoted)
            }
        }
    }

    fn take_mover(&self, board: &mut Board) -> Result<(), BoardError> {
        match board.get(self.from) {
            Some(piece) if piece == self.piece => {
                board.remove(self.from);
                Ok(())
            }
            _ => Err(BoardError::EmptySquare {
                position: self.from,
            }),
        }
    }

    fn take_capture(&self, board: &mut Board) -> Result<(), BoardError> {
        if board.get(self.to) != self.captured {
            return Err(BoardError::UnexpectedCapture { position: self.to });
        }
        board.remove(self.to);
        Ok(())
    }

    /// Coordinate notation, e.g. `f1f3`, with a trailing promotion letter.
    pub fn to_algebraic(&self) -> String {
        let promotion = self
            .promotion_kind()
            .map(|kind| kind.to_char().to_string())
            .unwrap_or_default();
        format!(
            "{}{}{}",
            self.from.to_algebraic(),
            self.to.to_algebraic(),
            promotion
        )
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let move_type = match self.kind {
            MoveKind::Plain => "Move".to_string(),
            MoveKind::Teleport => "Teleport".to_string(),
            MoveKind::RangedAttack => "Ranged attack".to_string(),
            MoveKind::Castle { .. } => "Castle".to_string(),
            MoveKind::Promotion { promote_to } => format!("Promote to {}", promote_to),
        };
        let capture = match self.captured {
            Some(piece) => format!(" capturing {}", piece.kind),
            None => "".to_string(),
        };
        write!(
            f,
            "{} {}{}{}",
            move_type,
            self.from.to_algebraic(),
            self.to.to_algebraic(),
            capture
        )
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        format!("{}", self).fmt(f)
    }
}
