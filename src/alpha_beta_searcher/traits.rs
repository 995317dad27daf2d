//! Core traits for generic alpha-beta search.
//!
//! States are values: a move produces a new state and the parent is left
//! untouched, so a search branch can simply drop its scratch states.

use std::fmt::Debug;

use smallvec::SmallVec;

/// A position in a two-player zero-sum game.
pub trait SearchState: Clone {
    /// Returns a hash of the position, including the side to move, for
    /// transposition table lookups.
    fn position_hash(&self) -> u64;
}

/// An action that turns one state into the next.
pub trait GameMove: Clone + PartialEq + Debug {
    type State: SearchState;
    type Error: Debug;

    /// Returns the state after this move. `state` is not modified.
    fn apply(&self, state: &Self::State) -> Result<Self::State, Self::Error>;
}

/// Generates all legal moves from a given game state.
pub trait MoveGenerator<S: SearchState> {
    type Move: GameMove<State = S>;
    type MoveList: MoveCollection<Self::Move>;

    /// Generates all legal moves for the side to move. An empty list means the
    /// game is over in this state.
    fn generate_moves(&self, state: &S) -> Self::MoveList;
}

/// Evaluates a game position from the point of view of the side to move.
pub trait Evaluator<S: SearchState> {
    /// `ply` is the distance from the search root, so that terminal scores
    /// can prefer shorter wins and longer losses.
    fn evaluate(&self, state: &S, ply: u8) -> i16;

    /// Scores whose magnitude reaches this value encode a distance to the end
    /// of the game counted from the root. The transposition table re-bases
    /// them on store and probe so a position reached at another ply reports
    /// its own distance. The default treats no score that way.
    fn mate_threshold(&self) -> i16 {
        i16::MAX
    }
}

/// Orders moves to improve alpha-beta pruning efficiency.
pub trait MoveOrderer<S: SearchState, M> {
    /// Sorts moves in-place, placing "better" moves first. Must be stable so
    /// that search results stay deterministic.
    fn order_moves(&self, moves: &mut [M], state: &S);
}

/// A no-op move orderer for games without move ordering heuristics.
#[derive(Clone, Copy, Default, Debug)]
pub struct NoOpMoveOrderer;

impl<S: SearchState, M> MoveOrderer<S, M> for NoOpMoveOrderer {
    #[inline(always)]
    fn order_moves(&self, _moves: &mut [M], _state: &S) {}
}

/// Abstraction over move collections (Vec, SmallVec, etc.)
pub trait MoveCollection<M>: AsRef<[M]> + AsMut<[M]> {
    #[inline]
    fn is_empty(&self) -> bool {
        self.as_ref().is_empty()
    }

    #[inline]
    fn len(&self) -> usize {
        self.as_ref().len()
    }
}

impl<M> MoveCollection<M> for Vec<M> {}

impl<A: smallvec::Array> MoveCollection<A::Item> for SmallVec<A> {}
