//! Legality test for pseudo-legal moves
//!
//! The generators produce pseudo-legal moves; the functions here decide
//! whether such a move leaves the own king attacked. They must not be called
//! while in check: the evasion generator produces legal moves directly.

use crate::bitboard::Bitboard;
use crate::board::Board;
use crate::moves::{Move, MoveKind};
use crate::types::{Color, Piece, Square};
use crate::{attack, between, geometry};

pub(crate) fn is_attacked_with_occ(b: &Board, sq: Square, by: Color, occ: Bitboard) -> bool {
    let pawn_attacks = attack::pawn(by.inv(), sq);
    if (b.piece2(by, Piece::Pawn) & pawn_attacks).is_nonempty()
        || (b.piece2(by, Piece::King) & attack::king(sq)).is_nonempty()
        || (b.piece2(by, Piece::Knight) & attack::knight(sq)).is_nonempty()
    {
        return true;
    }
    (attack::bishop(sq, occ) & b.piece_diag(by)).is_nonempty()
        || (attack::rook(sq, occ) & b.piece_line(by)).is_nonempty()
}

/// Returns `true` if the pseudo-legal move `mv` doesn't leave the own king
/// under attack
///
/// `pinned` must be the pinned set of the side to move. The side to move must
/// not be in check.
pub fn is_move_legal(b: &Board, mv: Move, pinned: Bitboard) -> bool {
    debug_assert!(!b.is_check());

    let us = b.side();
    let them = us.inv();
    let ksq = b.king_pos(us);

    match mv.kind() {
        // Castling legality is fully verified during generation
        MoveKind::Castle => true,
        MoveKind::Enpassant => {
            // The capture removes two pawns from the king's lines at once, so
            // test the sliders against the resulting occupancy directly
            let victim =
                unsafe { mv.dst().add_unchecked(-geometry::pawn_forward_delta(us)) };
            let occ = (b.occupied()
                ^ Bitboard::from_square(mv.src())
                ^ Bitboard::from_square(victim))
                | Bitboard::from_square(mv.dst());
            (attack::bishop(ksq, occ) & b.piece_diag(them)).is_empty()
                && (attack::rook(ksq, occ) & b.piece_line(them)).is_empty()
        }
        _ => {
            if mv.src() == ksq {
                let occ = b.occupied() ^ Bitboard::from_square(mv.src());
                return !is_attacked_with_occ(b, mv.dst(), them, occ);
            }
            // A pinned piece may only move along the line through the king
            !pinned.has(mv.src()) || between::line(ksq, mv.src()).has(mv.dst())
        }
    }
}

/// Same as [`is_move_legal`], but computes the pinned set itself
#[inline]
pub fn is_move_legal_simple(b: &Board, mv: Move) -> bool {
    is_move_legal(b, mv, b.pinned(b.side()))
}
