//! Parsing of moves and commands typed by a human player.

mod input;

pub use input::{read_move_input, InputError, MoveInput};
