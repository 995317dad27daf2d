//! Chess-specific implementation of the alpha-beta search traits, and the
//! per-game `SearchEngine` built on them.

pub mod implementation;
mod move_orderer;
mod search_engine;


pub use implementation::{search_best_move, ChessEvaluator, ChessMoveGenerator, SearchNode};
pub use move_orderer::ChessMoveOrderer;
pub use search_engine::{SearchConfig, SearchEngine, SearchReport};
