use log::debug;
use serde::{Deserialize, Serialize};

use crate::board::castle_rights::CastleRights;
use crate::board::color::Color;
use crate::board::error::BoardError;
use crate::board::piece::PieceKind;
use crate::board::position::Position;
use crate::board::zobrist;
use crate::board::Board;
use crate::chess_move::castle::rights_after_move;
use crate::chess_move::Move;
use crate::move_generator::{self, MoveList};

use super::error::GameError;

/// One snapshot of a game. A `GameState` is never changed after it is built:
/// `apply` and `resign` return the next state and leave `self` as it was.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    board: Board,
    current_player: Color,
    move_history: Vec<Move>,
    is_in_check: bool,
    is_checkmate: bool,
    is_stalemate: bool,
    winner: Option<Color>,
    castling_rights: CastleRights,
    #[serde(default)]
    resigned: Option<Color>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// The initial setup, white to move.
    pub fn new() -> Self {
        let board = Board::starting_position();
        let castling_rights = board.implied_castle_rights();
        Self {
            board,
            current_player: Color::White,
            move_history: Vec::new(),
            is_in_check: false,
            is_checkmate: false,
            is_stalemate: false,
            winner: None,
            castling_rights,
            resigned: None,
        }
    }

    /// Builds a state for an arbitrary position. The board must hold exactly
    /// one king per color and the side that just moved must not be in check.
    /// Castling rights are derived from unmoved kings and rooks on their home
    /// squares.
    pub fn from_board(board: Board, current_player: Color) -> Result<Self, GameError> {
        let castling_rights = board.implied_castle_rights();
        let mut state = Self {
            board,
            current_player,
            move_history: Vec::new(),
            is_in_check: false,
            is_checkmate: false,
            is_stalemate: false,
            winner: None,
            castling_rights,
            resigned: None,
        };
        state.validate()?;
        state.refresh_status();
        Ok(state)
    }

    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let mut state: GameState = serde_json::from_str(json)?;
        state.validate()?;
        state.castling_rights = state.castling_rights & state.board.implied_castle_rights();
        state.refresh_status();
        Ok(state)
    }

    pub fn to_json(&self) -> Result<String, GameError> {
        Ok(serde_json::to_string(self)?)
    }

    fn validate(&self) -> Result<(), GameError> {
        for color in Color::ALL {
            match self.board.count(PieceKind::King, color) {
                0 => return Err(GameError::KingNotFound { color }),
                1 => {}
                n => {
                    return Err(GameError::InvalidPosition {
                        reason: format!("{} has {} kings", color, n),
                    })
                }
            }
        }

        let waiting = self.current_player.opposite();
        if move_generator::is_in_check(&self.board, waiting) {
            return Err(GameError::InvalidPosition {
                reason: format!("{} is in check but it is {}'s move", waiting, self.current_player),
            });
        }

        Ok(())
    }

    fn refresh_status(&mut self) {
        let in_check = move_generator::is_in_check(&self.board, self.current_player);
        let can_move = self.resigned.is_none()
            && move_generator::has_legal_move(
                &self.board,
                self.castling_rights,
                self.current_player,
            );

        self.is_in_check = in_check;
        self.is_checkmate = self.resigned.is_none() && in_check && !can_move;
        self.is_stalemate = self.resigned.is_none() && !in_check && !can_move;
        self.winner = if let Some(loser) = self.resigned {
            Some(loser.opposite())
        } else if self.is_checkmate {
            Some(self.current_player.opposite())
        } else {
            None
        };
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_player(&self) -> Color {
        self.current_player
    }

    pub fn move_history(&self) -> &[Move] {
        &self.move_history
    }

    pub fn last_move(&self) -> Option<&Move> {
        self.move_history.last()
    }

    pub fn is_in_check(&self) -> bool {
        self.is_in_check
    }

    pub fn is_checkmate(&self) -> bool {
        self.is_checkmate
    }

    pub fn is_stalemate(&self) -> bool {
        self.is_stalemate
    }

    pub fn winner(&self) -> Option<Color> {
        self.winner
    }

    pub fn castling_rights(&self) -> CastleRights {
        self.castling_rights
    }

    /// The color that resigned, if the game ended that way.
    pub fn resigned(&self) -> Option<Color> {
        self.resigned
    }

    /// Checkmate, stalemate or resignation. No further moves are accepted.
    pub fn is_terminal(&self) -> bool {
        self.is_checkmate || self.is_stalemate || self.resigned.is_some()
    }

    /// Zobrist hash of pieces, side to move and castling rights.
    pub fn position_hash(&self) -> u64 {
        self.board.piece_hash()
            ^ zobrist::side_to_move_key(self.current_player)
            ^ zobrist::castle_rights_key(self.castling_rights)
    }

    /// Every legal move for the side to move. Empty once the game has ended.
    pub fn legal_moves(&self) -> MoveList {
        if self.resigned.is_some() {
            return MoveList::new();
        }
        move_generator::legal_moves(&self.board, self.castling_rights, self.current_player)
    }

    /// Legal moves for the piece on `position`. Empty for an empty square, an
    /// opponent's piece, or a finished game.
    pub fn legal_moves_from(&self, position: Position) -> MoveList {
        match self.board.get(position) {
            Some(piece) if piece.color == self.current_player && !self.is_terminal() => {
                move_generator::legal_moves_from(&self.board, self.castling_rights, position)
            }
            _ => MoveList::new(),
        }
    }

    /// Squares the piece on `position` may move to or attack, in generation
    /// order and without repeats.
    pub fn legal_destinations(&self, position: Position) -> Vec<Position> {
        let mut destinations: Vec<Position> = Vec::new();
        for chess_move in self.legal_moves_from(position) {
            if !destinations.contains(&chess_move.to) {
                destinations.push(chess_move.to);
            }
        }
        destinations
    }

    /// Resolves a from/to pick into a legal move. A promotion without an
    /// explicit piece becomes a queen.
    pub fn find_move(
        &self,
        from: Position,
        to: Position,
        promotion: Option<PieceKind>,
    ) -> Option<Move> {
        let wanted = promotion.unwrap_or(PieceKind::Queen);
        self.legal_moves_from(from)
            .into_iter()
            .filter(|chess_move| chess_move.to == to)
            .find(|chess_move| match chess_move.promotion_kind() {
                Some(kind) => kind == wanted,
                None => promotion.is_none(),
            })
    }

    /// Validates `chess_move` against the legal-move set and returns the
    /// resulting state. `self` is unchanged whether or not this succeeds.
    pub fn apply(&self, chess_move: &Move) -> Result<GameState, GameError> {
        if self.is_terminal() {
            return Err(GameError::GameAlreadyEnded);
        }

        if chess_move.piece.color != self.current_player {
            return Err(GameError::OutOfTurn {
                expected: self.current_player,
                actual: chess_move.piece.color,
            });
        }

        let legal = self.legal_moves_from(chess_move.from);
        if !legal.contains(chess_move) {
            debug!("rejected move {} (not in the legal set)", chess_move);
            return Err(GameError::InvalidMove {
                chess_move: *chess_move,
            });
        }

        let mut move_history = Vec::with_capacity(self.move_history.len() + 1);
        move_history.extend_from_slice(&self.move_history);
        move_history.push(*chess_move);
        Ok(self.successor(chess_move, move_history)?)
    }

    /// Applies a move already known to be legal, without recording it in the
    /// history. Only search calls this, on moves it generated from `self`.
    pub(crate) fn apply_unchecked(&self, chess_move: &Move) -> Result<GameState, BoardError> {
        self.successor(chess_move, Vec::new())
    }

    /// A copy of this state with an empty move history.
    pub(crate) fn without_history(&self) -> GameState {
        Self {
            board: self.board.clone(),
            move_history: Vec::new(),
            ..*self
        }
    }

    fn successor(
        &self,
        chess_move: &Move,
        move_history: Vec<Move>,
    ) -> Result<GameState, BoardError> {
        let board = self.board.with_move(chess_move)?;
        let mut next = Self {
            board,
            current_player: self.current_player.opposite(),
            move_history,
            is_in_check: false,
            is_checkmate: false,
            is_stalemate: false,
            winner: None,
            castling_rights: rights_after_move(self.castling_rights, chess_move),
            resigned: None,
        };
        next.refresh_status();
        Ok(next)
    }

    /// Ends the game with `color`'s opponent as the winner.
    pub fn resign(&self, color: Color) -> Result<GameState, GameError> {
        if self.is_terminal() {
            return Err(GameError::GameAlreadyEnded);
        }
        let mut next = self.clone();
        next.resigned = Some(color);
        next.refresh_status();
        Ok(next)
    }

    /// Number of leaf positions `depth` plies below this one.
    pub fn count_positions(&self, depth: u8) -> usize {
        if self.is_terminal() {
            return if depth == 0 { 1 } else { 0 };
        }
        move_generator::count_positions(
            &self.board,
            self.castling_rights,
            self.current_player,
            depth,
        )
    }
}
