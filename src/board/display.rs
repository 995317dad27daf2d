use super::position::{Position, BOARD_SIZE};
use super::Board;
use std::fmt;

impl Board {
    /// Renders the board from white's side: rank 10 on top, rank 1 at the bottom.
    pub fn to_ascii(&self) -> String {
        let divider = format!("   {}+\n", "+---".repeat(BOARD_SIZE));
        let mut out = String::new();
        for row in 0..BOARD_SIZE as u8 {
            out.push_str(&divider);
            let cells: Vec<String> = (0..BOARD_SIZE as u8)
                .map(|col| match self.get(Position::new(row, col)) {
                    Some(piece) => piece.to_char().to_string(),
                    None => " ".to_string(),
                })
                .collect();
            out.push_str(&format!(
                "{:>2} | {} |\n",
                BOARD_SIZE - row as usize,
                cells.join(" | ")
            ));
        }
        out.push_str(&divider);
        out.push_str("     a   b   c   d   e   f   g   h   i   j\n");
        out
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_ascii())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\n{}", self.to_ascii())
    }
}

/// Builds a `Board` from a 10x10 ASCII picture. The first character is row 0
/// (black's back rank); `.` is an empty square, uppercase letters are white.
/// Every piece starts with `has_moved = false`.
#[macro_export]
macro_rules! board_position {
    ($($piece:tt)*) => {{
        let mut board = $crate::board::Board::new();
        // Convert all input tokens to a string and filter out whitespace characters.
        let pieces: Vec<_> = stringify!($($piece)*)
            .chars()
            .filter(|&c| !c.is_whitespace())
            .collect();
        assert_eq!(pieces.len(), 100, "Invalid number of squares. Expected 100, got {}", pieces.len());
        for (i, &c) in pieces.iter().enumerate() {
            if c != '.' {
                let piece = $crate::board::piece::Piece::from_char(c)
                    .expect("Invalid character in board position");
                let position = $crate::board::position::Position::new((i / 10) as u8, (i % 10) as u8);
                board.put(position, piece).expect("square should be empty");
            }
        }
        board
    }};
}

#[cfg(test)]
mod tests {
    use crate::board::color::Color;
    use crate::board::piece::{Piece, PieceKind};
    use crate::board::position::Position;
    use crate::board::Board;

    #[test]
    fn test_macro_places_row_zero_first() {
        let board = crate::board_position! {
            r........k
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            W....K...R
        };
        assert_eq!(
            board.get(Position::new(0, 0)),
            Some(Piece::new(PieceKind::Rook, Color::Black))
        );
        assert_eq!(
            board.get(Position::new(9, 0)),
            Some(Piece::new(PieceKind::Wizard, Color::White))
        );
        assert_eq!(board.king_position(Color::White), Ok(Position::new(9, 5)));
    }

    #[test]
    fn test_ascii_labels() {
        let ascii = Board::starting_position().to_ascii();
        let lines: Vec<&str> = ascii.lines().collect();
        assert!(lines[1].starts_with("10 | r | n | b | w | q | k"));
        assert!(lines[19].starts_with(" 1 | R | N | B | W | Q | K"));
        assert!(lines.last().unwrap().contains("j"));
    }
}
