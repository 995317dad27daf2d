use crate::board::piece::PieceKind;

/// Material value of each piece kind, in the same units as every other
/// evaluation term.
pub const fn material_value(kind: PieceKind) -> i16 {
    match kind {
        PieceKind::Pawn => 10,
        PieceKind::Knight => 30,
        PieceKind::Bishop => 30,
        PieceKind::Rook => 50,
        PieceKind::Queen => 90,
        PieceKind::Wizard => 35,
        PieceKind::King => 900,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wizard_is_worth_more_than_minor_pieces() {
        assert!(material_value(PieceKind::Wizard) > material_value(PieceKind::Knight));
        assert!(material_value(PieceKind::Wizard) > material_value(PieceKind::Bishop));
        assert!(material_value(PieceKind::Wizard) < material_value(PieceKind::Rook));
    }
}
