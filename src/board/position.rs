use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::BoardError;

/// Number of rows and columns on the board.
pub const BOARD_SIZE: usize = 10;

/// A square on the 10x10 board. Row 0 is black's back rank, row 9 is white's.
///
/// Deserialisation rejects coordinates outside the board, so a move or a
/// state read from JSON only ever names real squares.
#[derive(Clone, Copy, PartialEq, Debug, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawPosition")]
pub struct Position {
    pub row: u8,
    pub col: u8,
}

#[derive(Deserialize)]
struct RawPosition {
    row: u8,
    col: u8,
}

impl TryFrom<RawPosition> for Position {
    type Error = BoardError;

    fn try_from(raw: RawPosition) -> Result<Self, Self::Error> {
        Position::try_new(raw.row as i16, raw.col as i16).ok_or(BoardError::OffBoard {
            row: raw.row,
            col: raw.col,
        })
    }
}

const FILES: [char; BOARD_SIZE] = ['a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j'];

impl Position {
    /// Callers must pass coordinates in `0..10`; use `try_new` or `offset` for
    /// anything derived from arithmetic.
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    pub fn try_new(row: i16, col: i16) -> Option<Self> {
        let size = BOARD_SIZE as i16;
        if (0..size).contains(&row) && (0..size).contains(&col) {
            Some(Self::new(row as u8, col as u8))
        } else {
            None
        }
    }

    pub fn is_on_board(&self) -> bool {
        (self.row as usize) < BOARD_SIZE && (self.col as usize) < BOARD_SIZE
    }

    pub fn offset(&self, dr: i8, dc: i8) -> Option<Self> {
        Self::try_new(self.row as i16 + dr as i16, self.col as i16 + dc as i16)
    }

    /// Flat index in `0..100`, row-major.
    pub fn index(&self) -> usize {
        self.row as usize * BOARD_SIZE + self.col as usize
    }

    pub fn manhattan_distance(&self, other: Position) -> u8 {
        ((self.row as i16 - other.row as i16).abs() + (self.col as i16 - other.col as i16).abs())
            as u8
    }

    /// Distance to the closest board edge, 0 on the rim and 4 in the center.
    pub fn edge_distance(&self) -> u8 {
        let last = (BOARD_SIZE - 1) as u8;
        self.row
            .min(last - self.row)
            .min(self.col)
            .min(last - self.col)
    }

    /// All 100 squares in row-major order.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..BOARD_SIZE as u8)
            .flat_map(|row| (0..BOARD_SIZE as u8).map(move |col| Position::new(row, col)))
    }

    /// Files `a`..`j` map to columns 0..9; rank 1 is row 9 (white's back rank).
    /// A square off the board prints as its raw coordinates.
    pub fn to_algebraic(&self) -> String {
        if !self.is_on_board() {
            return format!("({},{})", self.row, self.col);
        }
        format!(
            "{}{}",
            FILES[self.col as usize],
            BOARD_SIZE - self.row as usize
        )
    }

    pub fn from_algebraic(algebraic: &str) -> Option<Self> {
        let algebraic = algebraic.trim().to_ascii_lowercase();
        let mut chars = algebraic.chars();
        let file = chars.next()?;
        let col = FILES.iter().position(|&f| f == file)?;
        let rank: usize = chars.as_str().parse().ok()?;
        if !(1..=BOARD_SIZE).contains(&rank) {
            return None;
        }
        Some(Self::new((BOARD_SIZE - rank) as u8, col as u8))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_algebraic())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_stays_on_board() {
        let corner = Position::new(0, 0);
        assert_eq!(corner.offset(-1, 0), None);
        assert_eq!(corner.offset(0, -1), None);
        assert_eq!(corner.offset(9, 9), Some(Position::new(9, 9)));
        assert_eq!(corner.offset(10, 0), None);
    }

    #[test]
    fn test_algebraic() {
        assert_eq!(Position::new(9, 0).to_algebraic(), "a1");
        assert_eq!(Position::new(0, 9).to_algebraic(), "j10");
        assert_eq!(Position::new(9, 5).to_algebraic(), "f1");
        assert_eq!(Position::from_algebraic("f3"), Some(Position::new(7, 5)));
        assert_eq!(Position::from_algebraic("J10"), Some(Position::new(0, 9)));
        assert_eq!(Position::from_algebraic("k1"), None);
        assert_eq!(Position::from_algebraic("a11"), None);
        assert_eq!(Position::from_algebraic("a0"), None);
    }

    #[test]
    fn test_edge_distance() {
        assert_eq!(Position::new(0, 5).edge_distance(), 0);
        assert_eq!(Position::new(4, 5).edge_distance(), 4);
        assert_eq!(Position::new(8, 2).edge_distance(), 1);
    }

    #[test]
    fn test_deserialize_rejects_off_board_squares() {
        let on_board: Position = serde_json::from_str(r#"{"row":9,"col":0}"#).unwrap();
        assert_eq!(on_board, Position::new(9, 0));

        assert!(serde_json::from_str::<Position>(r#"{"row":12,"col":3}"#).is_err());
        assert!(serde_json::from_str::<Position>(r#"{"row":0,"col":10}"#).is_err());
    }

    #[test]
    fn test_off_board_square_prints_without_panicking() {
        let off_board = Position::new(40, 40);
        assert!(!off_board.is_on_board());
        assert_eq!(off_board.to_algebraic(), "(40,40)");
        assert!(Position::new(9, 9).is_on_board());
    }

    #[test]
    fn test_all_is_row_major() {
        let squares: Vec<_> = Position::all().collect();
        assert_eq!(squares.len(), 100);
        assert_eq!(squares[11], Position::new(1, 1));
        assert!(squares.iter().enumerate().all(|(i, sq)| sq.index() == i));
    }
}
