use crate::bitboard::Bitboard;
use crate::bitboard_consts;
use crate::types::{Color, File};

#[inline]
pub fn advance_forward(c: Color, b: Bitboard) -> Bitboard {
    match c {
        Color::White => b.shl(8),
        Color::Black => b.shr(8),
    }
}

#[inline]
pub fn advance_left(c: Color, b: Bitboard) -> Bitboard {
    let b = b & !bitboard_consts::file(File::A);
    match c {
        Color::White => b.shl(7),
        Color::Black => b.shr(9),
    }
}

#[inline]
pub fn advance_right(c: Color, b: Bitboard) -> Bitboard {
    let b = b & !bitboard_consts::file(File::H);
    match c {
        Color::White => b.shl(9),
        Color::Black => b.shr(7),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Rank, Square};

    #[test]
    fn test_advance() {
        let e2 = Bitboard::from_square(Square::from_parts(File::E, Rank::R2));
        assert_eq!(
            advance_forward(Color::White, e2),
            Bitboard::from_square(Square::from_parts(File::E, Rank::R3))
        );
        assert_eq!(
            advance_left(Color::White, e2),
            Bitboard::from_square(Square::from_parts(File::D, Rank::R3))
        );
        assert_eq!(
            advance_right(Color::White, e2),
            Bitboard::from_square(Square::from_parts(File::F, Rank::R3))
        );

        let e7 = Bitboard::from_square(Square::from_parts(File::E, Rank::R7));
        assert_eq!(
            advance_forward(Color::Black, e7),
            Bitboard::from_square(Square::from_parts(File::E, Rank::R6))
        );
        assert_eq!(
            advance_left(Color::Black, e7),
            Bitboard::from_square(Square::from_parts(File::D, Rank::R6))
        );
        assert_eq!(
            advance_right(Color::Black, e7),
            Bitboard::from_square(Square::from_parts(File::F, Rank::R6))
        );

        let a2 = Bitboard::from_square(Square::from_parts(File::A, Rank::R2));
        assert_eq!(advance_left(Color::White, a2), Bitboard::EMPTY);
        let h7 = Bitboard::from_square(Square::from_parts(File::H, Rank::R7));
        assert_eq!(advance_right(Color::Black, h7), Bitboard::EMPTY);
    }
}
