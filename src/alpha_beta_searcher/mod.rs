//! Domain-agnostic alpha-beta search.
//!
//! The searcher only knows about the traits in `traits`; chess plugs in
//! through `crate::chess_search`.

mod search;
mod traits;
mod transposition_table;


pub use search::{alpha_beta_search, SearchContext, SearchError, SearchOutcome, INF};
pub use traits::{
    Evaluator, GameMove, MoveCollection, MoveGenerator, MoveOrderer, NoOpMoveOrderer, SearchState,
};
pub use transposition_table::{BoundType, TTEntry, TranspositionTable, DEFAULT_TABLE_CAPACITY};
