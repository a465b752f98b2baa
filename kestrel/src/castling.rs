use crate::bitboard::Bitboard;
use crate::types::{CastlingSide, Color};

#[inline]
pub const fn offset(c: Color) -> usize {
    match c {
        Color::White => 0,
        Color::Black => 56,
    }
}

/// Initial squares of the king and the rook taking part in the castling
#[inline]
pub const fn srcs(c: Color, s: CastlingSide) -> Bitboard {
    let x: u64 = match s {
        CastlingSide::King => 0x90,
        CastlingSide::Queen => 0x11,
    };
    Bitboard::from_raw(x << offset(c))
}

pub const ALL_SRCS: Bitboard = Bitboard::from_raw(0x91 | (0x91 << 56));
