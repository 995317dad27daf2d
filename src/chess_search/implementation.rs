//! Chess-specific trait implementations for the alpha-beta search.

#[cfg(feature = "instrumentation")]
use tracing::instrument;

use crate::alpha_beta_searcher::{
    alpha_beta_search, Evaluator, GameMove, MoveGenerator, SearchContext, SearchError,
    SearchOutcome, SearchState,
};
use crate::board::error::BoardError;
use crate::chess_move::Move;
use crate::evaluate::{self, EvaluationWeights, MATE_SCORE, MAX_POSITIONAL_SCORE};
use crate::game::GameState;
use crate::move_generator::MoveList;

use super::move_orderer::ChessMoveOrderer;

/// A position inside the search tree.
///
/// Nodes are only built by the search from a validated `GameState`, and only
/// advanced by moves generated from them, so stepping a node skips the
/// checks `GameState::apply` makes. Outside this crate a move cannot be
/// played through the search traits:
///
/// ```compile_fail
/// use wizard_chess::alpha_beta_searcher::GameMove;
/// use wizard_chess::game::GameState;
///
/// let state = GameState::new();
/// let chess_move = state.legal_moves()[0];
/// let _ = GameMove::apply(&chess_move, &state);
/// ```
///
/// Nodes carry no move history.
#[derive(Clone, Debug)]
pub struct SearchNode {
    state: GameState,
}

impl SearchNode {
    pub(crate) fn root(state: &GameState) -> Self {
        Self {
            state: state.without_history(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }
}

impl SearchState for SearchNode {
    #[inline]
    fn position_hash(&self) -> u64 {
        self.state.position_hash()
    }
}

impl GameMove for Move {
    type State = SearchNode;
    type Error = BoardError;

    #[inline]
    fn apply(&self, node: &SearchNode) -> Result<SearchNode, BoardError> {
        Ok(SearchNode {
            state: node.state.apply_unchecked(self)?,
        })
    }
}

#[derive(Clone, Copy, Default, Debug)]
pub struct ChessMoveGenerator;

impl MoveGenerator<SearchNode> for ChessMoveGenerator {
    type Move = Move;
    type MoveList = MoveList;

    #[inline]
    fn generate_moves(&self, node: &SearchNode) -> MoveList {
        if node.state.is_terminal() {
            return MoveList::new();
        }
        node.state.legal_moves()
    }
}

#[derive(Clone, Default, Debug)]
pub struct ChessEvaluator {
    weights: EvaluationWeights,
}

impl ChessEvaluator {
    pub fn new(weights: EvaluationWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &EvaluationWeights {
        &self.weights
    }
}

impl Evaluator<SearchNode> for ChessEvaluator {
    /// Side-to-move perspective. Being mated scores `-(MATE_SCORE - ply)` so
    /// the search prefers the quickest mate and the slowest loss.
    #[inline]
    #[cfg_attr(feature = "instrumentation", instrument(skip_all))]
    fn evaluate(&self, node: &SearchNode, ply: u8) -> i16 {
        let state = &node.state;
        if state.is_checkmate() {
            return -(MATE_SCORE - ply as i16);
        }
        if state.is_stalemate() {
            return 0;
        }
        evaluate::evaluate(state, state.current_player(), &self.weights)
    }

    /// Positional scores are clamped below this, so anything beyond it is a
    /// mate.
    #[inline]
    fn mate_threshold(&self) -> i16 {
        MAX_POSITIONAL_SCORE + 1
    }
}

/// Searches for the best chess move from the given position.
#[must_use = "search returns the best move found"]
pub fn search_best_move(
    context: &mut SearchContext<Move>,
    state: &GameState,
    evaluator: &ChessEvaluator,
) -> Result<SearchOutcome<Move>, SearchError> {
    alpha_beta_search(
        context,
        &SearchNode::root(state),
        &ChessMoveGenerator,
        evaluator,
        &ChessMoveOrderer,
    )
}
