use std::io::BufRead;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::board::piece::PieceKind;
use crate::board::position::Position;

static COORD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new("^([a-j](?:10|[1-9]))([a-j](?:10|[1-9]))([qrbnw])?$")
        .expect("COORD_RE regex should be valid")
});

#[derive(Error, Debug, PartialEq, Eq)]
pub enum InputError {
    #[error("io error: {error:?}")]
    IOError { error: String },
    #[error("invalid input: {input:?}")]
    InvalidInput { input: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveInput {
    /// `f1f3`, or `e9e10q` with a promotion piece. For a wizard's ranged
    /// attack the destination is the victim's square.
    Coordinate {
        from: Position,
        to: Position,
        promotion: Option<PieceKind>,
    },
    Resign,
    Quit,
}

impl FromStr for MoveInput {
    type Err = InputError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let normalized = input.trim().to_lowercase();

        match normalized.as_str() {
            "resign" => return Ok(MoveInput::Resign),
            "quit" | "q" | "exit" => return Ok(MoveInput::Quit),
            _ => {}
        }

        let invalid = || InputError::InvalidInput {
            input: input.to_string(),
        };

        let caps = COORD_RE.captures(&normalized).ok_or_else(invalid)?;
        let from = Position::from_algebraic(&caps[1]).ok_or_else(invalid)?;
        let to = Position::from_algebraic(&caps[2]).ok_or_else(invalid)?;
        let promotion = match caps.get(3) {
            Some(letter) => {
                let c = letter.as_str().chars().next().ok_or_else(invalid)?;
                Some(PieceKind::from_char(c).ok_or_else(invalid)?)
            }
            None => None,
        };

        Ok(MoveInput::Coordinate {
            from,
            to,
            promotion,
        })
    }
}

/// Reads one line from `reader` and parses it. End of input reads as `Quit`.
pub fn read_move_input<R: BufRead>(reader: &mut R) -> Result<MoveInput, InputError> {
    let mut line = String::new();
    let read = reader
        .read_line(&mut line)
        .map_err(|error| InputError::IOError {
            error: error.to_string(),
        })?;

    if read == 0 {
        return Ok(MoveInput::Quit);
    }
    line.parse()
}
