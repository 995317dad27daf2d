pub mod castle_rights;
pub mod color;
pub mod error;
pub mod piece;
pub mod position;
pub mod zobrist;

mod display;

use serde::{Deserialize, Serialize};

use crate::chess_move::Move;
use castle_rights::CastleRights;
use color::Color;
use error::BoardError;
use piece::{Piece, PieceKind};
use position::{Position, BOARD_SIZE};

type Cells = [[Option<Piece>; BOARD_SIZE]; BOARD_SIZE];

const BACK_RANK: [PieceKind; BOARD_SIZE] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Wizard,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Wizard,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// A 10x10 grid of optional pieces. The board is a value: search and the game
/// state machine clone it before applying a move, so a board shared by a live
/// game is never mutated underneath it.
///
/// Alongside the cells the board keeps the zobrist hash of its pieces and the
/// location of each king, both updated by `put` and `remove`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Cells", into = "Cells")]
pub struct Board {
    cells: Cells,
    hash: u64,
    kings: [Option<Position>; 2],
}

impl Default for Board {
    fn default() -> Self {
        Self {
            cells: [[None; BOARD_SIZE]; BOARD_SIZE],
            hash: 0,
            kings: [None, None],
        }
    }
}

impl From<Cells> for Board {
    fn from(cells: Cells) -> Self {
        let mut board = Board::new();
        for position in Position::all() {
            if let Some(piece) = cells[position.row as usize][position.col as usize] {
                board.place(position, piece);
            }
        }
        board
    }
}

impl From<Board> for Cells {
    fn from(board: Board) -> Self {
        board.cells
    }
}

impl Board {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn starting_position() -> Self {
        let mut board = Board::new();
        for color in Color::ALL {
            for (col, &kind) in BACK_RANK.iter().enumerate() {
                board.place(Position::new(color.home_row(), col as u8), Piece::new(kind, color));
            }
            for col in 0..BOARD_SIZE as u8 {
                board.place(
                    Position::new(color.pawn_row(), col),
                    Piece::new(PieceKind::Pawn, color),
                );
            }
        }
        board
    }

    /// The piece on `position`, or `None` for an empty or off-board square.
    pub fn get(&self, position: Position) -> Option<Piece> {
        self.cells
            .get(position.row as usize)
            .and_then(|row| row.get(position.col as usize))
            .copied()
            .flatten()
    }

    pub fn is_occupied(&self, position: Position) -> bool {
        self.get(position).is_some()
    }

    /// True if `position` holds a piece of the opposite color to `color`.
    pub fn is_enemy(&self, position: Position, color: Color) -> bool {
        matches!(self.get(position), Some(piece) if piece.color != color)
    }

    pub fn put(&mut self, position: Position, piece: Piece) -> Result<(), BoardError> {
        if !position.is_on_board() {
            return Err(BoardError::OffBoard {
                row: position.row,
                col: position.col,
            });
        }
        if self.is_occupied(position) {
            return Err(BoardError::SquareOccupied { position });
        }
        self.place(position, piece);
        Ok(())
    }

    pub fn remove(&mut self, position: Position) -> Option<Piece> {
        let piece = self
            .cells
            .get_mut(position.row as usize)?
            .get_mut(position.col as usize)?
            .take()?;
        self.hash ^= zobrist::piece_key(piece, position);
        if piece.kind == PieceKind::King && self.kings[piece.color.index()] == Some(position) {
            self.kings[piece.color.index()] = None;
        }
        Some(piece)
    }

    fn place(&mut self, position: Position, piece: Piece) {
        self.cells[position.row as usize][position.col as usize] = Some(piece);
        self.hash ^= zobrist::piece_key(piece, position);
        if piece.kind == PieceKind::King {
            self.kings[piece.color.index()] = Some(position);
        }
    }

    /// Returns a new board with `chess_move` applied; `self` is left untouched.
    pub fn with_move(&self, chess_move: &Move) -> Result<Board, BoardError> {
        let mut next = self.clone();
        chess_move.apply(&mut next)?;
        Ok(next)
    }

    pub fn king_position(&self, color: Color) -> Result<Position, BoardError> {
        self.kings[color.index()].ok_or(BoardError::KingNotFound { color })
    }

    /// All pieces of `color` in row-major order.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = (Position, Piece)> + '_ {
        self.occupied()
            .filter(move |(_, piece)| piece.color == color)
    }

    /// All pieces in row-major order.
    pub fn occupied(&self) -> impl Iterator<Item = (Position, Piece)> + '_ {
        Position::all()
            .filter_map(move |position| self.get(position).map(|piece| (position, piece)))
    }

    pub fn count(&self, kind: PieceKind, color: Color) -> usize {
        self.pieces(color).filter(|(_, piece)| piece.kind == kind).count()
    }

    /// Zobrist hash of the pieces alone; side to move and castling rights are
    /// folded in by the game state.
    pub fn piece_hash(&self) -> u64 {
        self.hash
    }

    /// Castling rights implied by the pieces: an unmoved king on its home
    /// square plus an unmoved rook in the matching corner.
    pub fn implied_castle_rights(&self) -> CastleRights {
        let mut rights = CastleRights::none();
        for color in Color::ALL {
            let row = color.home_row();
            let king = self.get(Position::new(row, crate::chess_move::castle::KING_HOME_COL));
            if !matches!(king, Some(k) if k.is(PieceKind::King, color) && !k.has_moved) {
                continue;
            }
            for side in crate::chess_move::castle::CastleSide::ALL {
                let rook = self.get(Position::new(row, side.rook_from_col()));
                if matches!(rook, Some(r) if r.is(PieceKind::Rook, color) && !r.has_moved) {
                    rights = rights | side.rights(color);
                }
            }
        }
        rights
    }
}
