use serde::{Deserialize, Serialize};

use super::color::Color;

/// Bitmask of the four castling rights. Serialised as the raw bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CastleRights(u8);

impl CastleRights {
    pub const fn white_kingside() -> Self {
        Self(0b1000)
    }

    pub const fn black_kingside() -> Self {
        Self(0b0100)
    }

    pub const fn white_queenside() -> Self {
        Self(0b0010)
    }

    pub const fn black_queenside() -> Self {
        Self(0b0001)
    }

    pub const fn all() -> Self {
        Self(
            Self::white_kingside().0
                | Self::black_kingside().0
                | Self::white_queenside().0
                | Self::black_queenside().0,
        )
    }

    pub const fn none() -> Self {
        Self(0)
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn contains(self, other: CastleRights) -> bool {
        (self.0 & other.0) == other.0
    }

    pub const fn without(self, other: CastleRights) -> CastleRights {
        CastleRights(self.0 & !other.0)
    }

    pub fn kingside(color: Color) -> Self {
        match color {
            Color::White => Self::white_kingside(),
            Color::Black => Self::black_kingside(),
        }
    }

    pub fn queenside(color: Color) -> Self {
        match color {
            Color::White => Self::white_queenside(),
            Color::Black => Self::black_queenside(),
        }
    }

    pub fn for_color(color: Color) -> Self {
        Self::kingside(color) | Self::queenside(color)
    }
}

impl std::ops::BitOr for CastleRights {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl std::ops::BitAnd for CastleRights {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        Self(self.0 & rhs.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_color_is_both_sides() {
        let white = CastleRights::for_color(Color::White);
        assert!(white.contains(CastleRights::white_kingside()));
        assert!(white.contains(CastleRights::white_queenside()));
        assert!(!white.contains(CastleRights::black_kingside()));
    }

    #[test]
    fn test_without() {
        let rights = CastleRights::all().without(CastleRights::for_color(Color::Black));
        assert_eq!(rights, CastleRights::for_color(Color::White));
        assert!(rights.without(rights).is_empty());
    }
}
