//! Pseudo-legal destinations for each piece type. Nothing here looks at
//! whose turn it is or whether the mover's king is left in check.

use smallvec::SmallVec;

use crate::board::color::Color;
use crate::board::piece::{Piece, PieceKind};
use crate::board::position::Position;
use crate::board::Board;

pub type TargetList = SmallVec<[Position; 32]>;

pub const ROOK_DIRS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
pub const BISHOP_DIRS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Every (dr, dc) with |dr| + |dc| <= 2, excluding (0, 0).
pub const WIZARD_DIAMOND: [(i8, i8); 12] = [
    (-2, 0),
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -2),
    (0, -1),
    (0, 1),
    (0, 2),
    (1, -1),
    (1, 0),
    (1, 1),
    (2, 0),
];

/// The wizard's reach, measured as Manhattan distance.
pub const WIZARD_RADIUS: u8 = 2;

/// Pseudo-legal destinations for the piece on `from`. Castling is not
/// included since it depends on castling rights held by the game state.
pub fn destinations(board: &Board, from: Position) -> TargetList {
    let piece = match board.get(from) {
        Some(piece) => piece,
        None => return TargetList::new(),
    };

    match piece.kind {
        PieceKind::Pawn => pawn_targets(board, from, piece),
        PieceKind::Knight => step_targets(board, from, piece.color, &KNIGHT_OFFSETS),
        PieceKind::King => step_targets(board, from, piece.color, &KING_OFFSETS),
        PieceKind::Bishop => ray_targets(board, from, piece.color, &BISHOP_DIRS),
        PieceKind::Rook => ray_targets(board, from, piece.color, &ROOK_DIRS),
        PieceKind::Queen => {
            let mut targets = ray_targets(board, from, piece.color, &ROOK_DIRS);
            targets.extend(ray_targets(board, from, piece.color, &BISHOP_DIRS));
            targets
        }
        PieceKind::Wizard => {
            let mut targets = wizard_teleport_targets(board, from);
            targets.extend(wizard_attack_targets(board, from, piece.color));
            targets
        }
    }
}

fn pawn_targets(board: &Board, from: Position, pawn: Piece) -> TargetList {
    let mut targets = TargetList::new();
    let forward = pawn.color.forward();

    if let Some(one_step) = from.offset(forward, 0) {
        if !board.is_occupied(one_step) {
            targets.push(one_step);

            let on_start_row = from.row == pawn.color.pawn_row();
            if !pawn.has_moved && on_start_row {
                if let Some(two_step) = from.offset(2 * forward, 0) {
                    if !board.is_occupied(two_step) {
                        targets.push(two_step);
                    }
                }
            }
        }
    }

    for dc in [-1, 1] {
        if let Some(diagonal) = from.offset(forward, dc) {
            if board.is_enemy(diagonal, pawn.color) {
                targets.push(diagonal);
            }
        }
    }

    targets
}

fn step_targets(board: &Board, from: Position, color: Color, offsets: &[(i8, i8)]) -> TargetList {
    offsets
        .iter()
        .filter_map(|&(dr, dc)| from.offset(dr, dc))
        .filter(|&to| !matches!(board.get(to), Some(piece) if piece.color == color))
        .collect()
}

fn ray_targets(board: &Board, from: Position, color: Color, dirs: &[(i8, i8)]) -> TargetList {
    let mut targets = TargetList::new();
    for &(dr, dc) in dirs {
        let mut current = from;
        while let Some(next) = current.offset(dr, dc) {
            match board.get(next) {
                None => targets.push(next),
                Some(piece) => {
                    if piece.color != color {
                        targets.push(next);
                    }
                    break;
                }
            }
            current = next;
        }
    }
    targets
}

/// Empty squares the wizard on `from` can jump to.
pub fn wizard_teleport_targets(board: &Board, from: Position) -> TargetList {
    WIZARD_DIAMOND
        .iter()
        .filter_map(|&(dr, dc)| from.offset(dr, dc))
        .filter(|&to| !board.is_occupied(to))
        .collect()
}

/// Enemy-occupied squares the wizard on `from` can strike. Intervening pieces
/// do not block the attack.
pub fn wizard_attack_targets(board: &Board, from: Position, color: Color) -> TargetList {
    WIZARD_DIAMOND
        .iter()
        .filter_map(|&(dr, dc)| from.offset(dr, dc))
        .filter(|&to| board.is_enemy(to, color))
        .collect()
}

/// Number of empty squares reachable along diagonals before the first blocker.
pub fn diagonal_reach(board: &Board, from: Position) -> usize {
    BISHOP_DIRS
        .iter()
        .map(|&(dr, dc)| {
            let mut reach = 0;
            let mut current = from;
            while let Some(next) = current.offset(dr, dc) {
                if board.is_occupied(next) {
                    break;
                }
                reach += 1;
                current = next;
            }
            reach
        })
        .sum()
}

/// True if `piece` standing on `from` would capture an enemy piece placed on
/// `target`. This is the attack relation used for check detection and castling
/// transit; pawn pushes are excluded and the wizard covers its whole diamond.
pub fn attacks_square(board: &Board, from: Position, piece: Piece, target: Position) -> bool {
    if from == target {
        return false;
    }

    let dr = target.row as i8 - from.row as i8;
    let dc = target.col as i8 - from.col as i8;

    match piece.kind {
        PieceKind::Pawn => dr == piece.color.forward() && dc.abs() == 1,
        PieceKind::Knight => matches!((dr.abs(), dc.abs()), (1, 2) | (2, 1)),
        PieceKind::King => dr.abs() <= 1 && dc.abs() <= 1,
        PieceKind::Wizard => from.manhattan_distance(target) <= WIZARD_RADIUS,
        PieceKind::Bishop => dr.abs() == dc.abs() && path_is_clear(board, from, target),
        PieceKind::Rook => (dr == 0 || dc == 0) && path_is_clear(board, from, target),
        PieceKind::Queen => {
            (dr == 0 || dc == 0 || dr.abs() == dc.abs()) && path_is_clear(board, from, target)
        }
    }
}

/// Squares strictly between two aligned squares are all empty.
fn path_is_clear(board: &Board, from: Position, to: Position) -> bool {
    let step_r = (to.row as i8 - from.row as i8).signum();
    let step_c = (to.col as i8 - from.col as i8).signum();
    let mut current = from;
    loop {
        current = match current.offset(step_r, step_c) {
            Some(next) => next,
            None => return false,
        };
        if current == to {
            return true;
        }
        if board.is_occupied(current) {
            return false;
        }
    }
}
