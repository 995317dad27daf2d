use log::info;

use crate::board::color::Color;
use crate::chess_move::Move;
use crate::chess_search::SearchEngine;

use super::error::GameError;
use super::state::GameState;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GamePhase {
    Menu,
    Playing,
    Ended,
}

/// One game from setup to result. The session is the only writer of its
/// authoritative `GameState` and owns the search engine (and so the
/// transposition table) used for this game alone.
pub struct GameSession {
    phase: GamePhase,
    state: GameState,
    engine: SearchEngine,
}

impl GameSession {
    pub fn new(engine: SearchEngine) -> Self {
        Self::from_state(GameState::new(), engine)
    }

    /// A session that will start from `state` rather than the initial setup.
    pub fn from_state(state: GameState, engine: SearchEngine) -> Self {
        Self {
            phase: GamePhase::Menu,
            state,
            engine,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn engine(&self) -> &SearchEngine {
        &self.engine
    }

    /// Menu to Playing. Starting a game that is already playing does nothing;
    /// a position that is already decided goes straight to Ended.
    pub fn start(&mut self) -> Result<(), GameError> {
        match self.phase {
            GamePhase::Ended => Err(GameError::GameAlreadyEnded),
            GamePhase::Playing => Ok(()),
            GamePhase::Menu => {
                self.phase = if self.state.is_terminal() {
                    GamePhase::Ended
                } else {
                    GamePhase::Playing
                };
                info!("game started, {} to move", self.state.current_player());
                Ok(())
            }
        }
    }

    fn ensure_playing(&self) -> Result<(), GameError> {
        match self.phase {
            GamePhase::Menu => Err(GameError::GameNotStarted),
            GamePhase::Ended => Err(GameError::GameAlreadyEnded),
            GamePhase::Playing => Ok(()),
        }
    }

    /// Validates and commits `chess_move`. On error the state is unchanged.
    pub fn submit_move(&mut self, chess_move: &Move) -> Result<&GameState, GameError> {
        self.ensure_playing()?;
        let next = self.state.apply(chess_move)?;
        info!("{} played {}", chess_move.piece.color, chess_move);
        self.commit(next);
        Ok(&self.state)
    }

    pub fn resign(&mut self, color: Color) -> Result<&GameState, GameError> {
        self.ensure_playing()?;
        let next = self.state.resign(color)?;
        info!("{} resigned", color);
        self.commit(next);
        Ok(&self.state)
    }

    /// Lets the engine choose a move for the side to move and commits it.
    /// Returns `None` if the engine found no move.
    pub fn play_engine_move(&mut self) -> Result<Option<Move>, GameError> {
        self.ensure_playing()?;
        let color = self.state.current_player();
        let chess_move = match self.engine.get_best_move(&self.state, color) {
            Some(chess_move) => chess_move,
            None => return Ok(None),
        };
        self.submit_move(&chess_move)?;
        Ok(Some(chess_move))
    }

    fn commit(&mut self, next: GameState) {
        self.state = next;
        if self.state.is_terminal() {
            self.phase = GamePhase::Ended;
            match self.state.winner() {
                Some(winner) => info!("game over, {} wins", winner),
                None => info!("game over, draw by stalemate"),
            }
        }
    }
}
