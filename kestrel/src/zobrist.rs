use crate::types::{CastlingRights, CastlingSide, Cell, Color, Square};

include!(concat!(env!("OUT_DIR"), "/zobrist.rs"));

#[inline]
pub fn pieces(c: Cell, sq: Square) -> u64 {
    unsafe {
        *PIECES
            .get_unchecked(c.index())
            .get_unchecked(sq.index())
    }
}

#[inline]
pub fn castling(c: CastlingRights) -> u64 {
    unsafe { *CASTLING.get_unchecked(c.index()) }
}

#[inline]
pub fn enpassant(sq: Square) -> u64 {
    unsafe { *ENPASSANT.get_unchecked(sq.index()) }
}

/// Combined piece hash delta of the king and rook movement during castling
#[inline]
pub fn castling_delta(c: Color, s: CastlingSide) -> u64 {
    match s {
        CastlingSide::King => CASTLING_KINGSIDE[c as usize],
        CastlingSide::Queen => CASTLING_QUEENSIDE[c as usize],
    }
}
