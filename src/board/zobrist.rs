//! Zobrist keys for incremental position hashing.
//!
//! * One number per (piece kind, color, moved flag, square): 7 * 2 * 2 * 100
//! * One number for black to move
//! * One number per castling right
//!
//! The hash of a position is the xor of the numbers for every feature present,
//! so putting or removing a piece is a single xor.

use once_cell::sync::Lazy;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::castle_rights::CastleRights;
use super::color::Color;
use super::piece::Piece;
use super::position::{Position, BOARD_SIZE};

const PIECE_KIND_COUNT: usize = 7;
const SQUARE_COUNT: usize = BOARD_SIZE * BOARD_SIZE;
const PIECE_KEY_COUNT: usize = PIECE_KIND_COUNT * 2 * 2 * SQUARE_COUNT;

// Fixed so hashes are reproducible across runs.
const ZOBRIST_SEED: u64 = 0x5749_5a41_5244_0a0a;

pub struct ZobristKeys {
    pieces: Vec<u64>,
    black_to_move: u64,
    castle_rights: [u64; 4],
}

static ZOBRIST_KEYS: Lazy<ZobristKeys> = Lazy::new(|| ZobristKeys::generate(ZOBRIST_SEED));

impl ZobristKeys {
    fn generate(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let pieces = (0..PIECE_KEY_COUNT).map(|_| rng.gen()).collect();
        let black_to_move = rng.gen();
        let castle_rights = [rng.gen(), rng.gen(), rng.gen(), rng.gen()];

        Self {
            pieces,
            black_to_move,
            castle_rights,
        }
    }
}

fn piece_index(piece: Piece, position: Position) -> usize {
    // (kind, color, moved, square) flattened into one array
    let moved = piece.has_moved as usize;
    ((piece.kind.index() * 2 + piece.color.index()) * 2 + moved) * SQUARE_COUNT + position.index()
}

pub fn piece_key(piece: Piece, position: Position) -> u64 {
    ZOBRIST_KEYS.pieces[piece_index(piece, position)]
}

pub fn side_to_move_key(color: Color) -> u64 {
    match color {
        Color::White => 0,
        Color::Black => ZOBRIST_KEYS.black_to_move,
    }
}

pub fn castle_rights_key(rights: CastleRights) -> u64 {
    let all = [
        CastleRights::white_kingside(),
        CastleRights::black_kingside(),
        CastleRights::white_queenside(),
        CastleRights::black_queenside(),
    ];

    all.iter()
        .zip(ZOBRIST_KEYS.castle_rights.iter())
        .filter(|(right, _)| rights.contains(**right))
        .fold(0, |hash, (_, key)| hash ^ key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::piece::{PieceKind, ALL_PIECE_KINDS};
    use std::collections::HashSet;

    #[test]
    fn test_piece_keys_are_distinct() {
        let mut seen = HashSet::new();
        for kind in ALL_PIECE_KINDS {
            for color in Color::ALL {
                for moved in [false, true] {
                    let mut piece = Piece::new(kind, color);
                    piece.has_moved = moved;
                    for position in Position::all() {
                        assert!(seen.insert(piece_key(piece, position)));
                    }
                }
            }
        }
        assert_eq!(seen.len(), PIECE_KEY_COUNT);
    }

    #[test]
    fn test_moved_flag_changes_key() {
        let pawn = Piece::new(PieceKind::Pawn, Color::White);
        let square = Position::new(8, 3);
        assert_ne!(piece_key(pawn, square), piece_key(pawn.moved(), square));
    }

    #[test]
    fn test_castle_rights_key_is_xor_of_parts() {
        let white = castle_rights_key(CastleRights::for_color(Color::White));
        let black = castle_rights_key(CastleRights::for_color(Color::Black));
        assert_eq!(white ^ black, castle_rights_key(CastleRights::all()));
        assert_eq!(castle_rights_key(CastleRights::none()), 0);
    }

    #[test]
    fn test_white_to_move_has_no_key() {
        assert_eq!(side_to_move_key(Color::White), 0);
        assert_ne!(side_to_move_key(Color::Black), 0);
    }
}
