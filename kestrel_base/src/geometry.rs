use crate::types::{Color, Rank};

#[inline]
pub const fn castling_rank(c: Color) -> Rank {
    match c {
        Color::White => Rank::R1,
        Color::Black => Rank::R8,
    }
}

#[inline]
pub const fn double_move_src_rank(c: Color) -> Rank {
    match c {
        Color::White => Rank::R2,
        Color::Black => Rank::R7,
    }
}

#[inline]
pub const fn double_move_dst_rank(c: Color) -> Rank {
    match c {
        Color::White => Rank::R4,
        Color::Black => Rank::R5,
    }
}

/// Rank of the intermediate square of a double pawn push, i. e. the rank a
/// single push from the home rank lands on
#[inline]
pub const fn double_move_mid_rank(c: Color) -> Rank {
    match c {
        Color::White => Rank::R3,
        Color::Black => Rank::R6,
    }
}

#[inline]
pub const fn promote_src_rank(c: Color) -> Rank {
    match c {
        Color::White => Rank::R7,
        Color::Black => Rank::R2,
    }
}

#[inline]
pub const fn promote_dst_rank(c: Color) -> Rank {
    match c {
        Color::White => Rank::R8,
        Color::Black => Rank::R1,
    }
}

/// Rank of the en passant target square for side to move `c`
#[inline]
pub const fn enpassant_dst_rank(c: Color) -> Rank {
    match c {
        Color::White => Rank::R6,
        Color::Black => Rank::R3,
    }
}

#[inline]
pub const fn pawn_forward_delta(c: Color) -> isize {
    match c {
        Color::White => 8,
        Color::Black => -8,
    }
}

/// Index delta of a pawn capture towards file A
#[inline]
pub const fn pawn_left_delta(c: Color) -> isize {
    match c {
        Color::White => 7,
        Color::Black => -9,
    }
}

/// Index delta of a pawn capture towards file H
#[inline]
pub const fn pawn_right_delta(c: Color) -> isize {
    match c {
        Color::White => 9,
        Color::Black => -7,
    }
}
