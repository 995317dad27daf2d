//! Move generation: per-piece targets, the legality filter and full move lists.

pub mod generator;
pub mod legality;
pub mod targets;

pub use generator::{
    count_positions, has_legal_move, legal_moves, legal_moves_from, pseudo_legal_moves, MoveList,
    PAWN_PROMOTIONS,
};
pub use legality::{is_in_check, is_square_attacked};
