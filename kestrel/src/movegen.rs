//! Move generation
//!
//! The generator produces pseudo-legal moves partitioned by purpose:
//!
//! - [`captures`] — captures and queen promotions (including the quiet ones);
//! - [`noncaptures`] — quiet moves, underpromotions and castling;
//! - [`checks`] — quiet non-promoting moves that give check, castling excluded;
//! - [`evasions`] — fully *legal* moves resolving a check;
//! - [`legal`] — the complete legal move list;
//! - [`move_if_legal`] — legality verdict for a single arbitrary move.
//!
//! For any position which is not in check, the union of [`captures`] and
//! [`noncaptures`] is exactly the pseudo-legal move set, and the two lists
//! never share a move. Callers filter pseudo-legal moves through
//! [`legal::is_move_legal`](crate::legal::is_move_legal).
//!
//! The first three generators must not be called while in check, and
//! [`evasions`] must only be called while in check. Violating this is a
//! programming error and trips a debug assertion.

use crate::bitboard::Bitboard;
use crate::board::Board;
use crate::moves::{Move, MoveKind};
use crate::types::{CastlingSide, Color, File, Piece, Square};
use crate::{attack, between, bitboard_consts, generic, geometry, legal as legality, pawns};

use std::marker::PhantomData;
use std::ops::{Deref, DerefMut};

use arrayvec::ArrayVec;

fn do_is_square_attacked<C: generic::Color>(b: &Board, sq: Square) -> bool {
    // The attack map is used backwards here: we trace the attack from the
    // destination square, so the pawn pattern is the one of the opposite color
    let pawn_attacks = attack::pawn(C::COLOR.inv(), sq);

    // Near attacks
    if (b.piece2(C::COLOR, Piece::Pawn) & pawn_attacks).is_nonempty()
        || (b.piece2(C::COLOR, Piece::King) & attack::king(sq)).is_nonempty()
        || (b.piece2(C::COLOR, Piece::Knight) & attack::knight(sq)).is_nonempty()
    {
        return true;
    }

    // Far attacks
    (attack::bishop(sq, b.occupied()) & b.piece_diag(C::COLOR)).is_nonempty()
        || (attack::rook(sq, b.occupied()) & b.piece_line(C::COLOR)).is_nonempty()
}

fn do_square_attackers<C: generic::Color>(b: &Board, sq: Square) -> Bitboard {
    let pawn_attacks = attack::pawn(C::COLOR.inv(), sq);
    (b.piece2(C::COLOR, Piece::Pawn) & pawn_attacks)
        | (b.piece2(C::COLOR, Piece::King) & attack::king(sq))
        | (b.piece2(C::COLOR, Piece::Knight) & attack::knight(sq))
        | (attack::bishop(sq, b.occupied()) & b.piece_diag(C::COLOR))
        | (attack::rook(sq, b.occupied()) & b.piece_line(C::COLOR))
}

/// Returns `true` if square `sq` is attacked by any piece of color `color`
pub fn is_square_attacked(b: &Board, sq: Square, color: Color) -> bool {
    match color {
        Color::White => do_is_square_attacked::<generic::White>(b, sq),
        Color::Black => do_is_square_attacked::<generic::Black>(b, sq),
    }
}

/// Returns all the pieces of color `color` attacking square `sq`
pub fn square_attackers(b: &Board, sq: Square, color: Color) -> Bitboard {
    match color {
        Color::White => do_square_attackers::<generic::White>(b, sq),
        Color::Black => do_square_attackers::<generic::Black>(b, sq),
    }
}

/// Bounded move buffer
///
/// 256 entries are enough to hold all the moves in any legal chess position.
#[derive(Default, Debug, Clone, Eq, PartialEq)]
pub struct MoveList(ArrayVec<Move, 256>);

impl Deref for MoveList {
    type Target = ArrayVec<Move, 256>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for MoveList {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl MoveList {
    pub fn new() -> MoveList {
        MoveList(ArrayVec::new())
    }
}

/// Sink for generated moves
pub trait MovePush {
    fn push(&mut self, m: Move);
}

impl<const N: usize> MovePush for ArrayVec<Move, N> {
    fn push(&mut self, m: Move) {
        self.push(m);
    }
}

impl MovePush for Vec<Move> {
    fn push(&mut self, m: Move) {
        self.push(m);
    }
}

// The generators never overflow a 256-entry list on a valid board, so the
// bounds check can be skipped for the owned-list entry points
struct UnsafeMoveList(MoveList);

impl MovePush for UnsafeMoveList {
    fn push(&mut self, m: Move) {
        unsafe {
            self.0.push_unchecked(m);
        }
    }
}

fn do_castle_path_free<C: generic::Color>(b: &Board, side: CastlingSide) -> bool {
    let us = C::COLOR;
    let them = us.inv();
    let ksq = b.king_pos(us);
    let rank = geometry::castling_rank(us);
    let (rsq, kdst, rdst) = match side {
        CastlingSide::King => (
            b.initial_kr_square(us),
            Square::from_parts(File::G, rank),
            Square::from_parts(File::F, rank),
        ),
        CastlingSide::Queen => (
            b.initial_qr_square(us),
            Square::from_parts(File::C, rank),
            Square::from_parts(File::D, rank),
        ),
    };

    // The king's path must be free of other pieces and of enemy attacks
    let (lo, hi) = (ksq.index().min(kdst.index()), ksq.index().max(kdst.index()));
    for idx in lo..=hi {
        let s = Square::from_index(idx);
        if (s != ksq && s != rsq && b.get(s).is_occupied()) || b.is_attacked(s, them) {
            return false;
        }
    }

    // The rook's path must be free, but may pass through attacked squares
    let (lo, hi) = (rsq.index().min(rdst.index()), rsq.index().max(rdst.index()));
    for idx in lo..=hi {
        let s = Square::from_index(idx);
        if s != ksq && s != rsq && b.get(s).is_occupied() {
            return false;
        }
    }

    // With the castling rook starting on file B, the long-castle rook path
    // has one more potential obstruction to the west
    if side == CastlingSide::Queen && rsq.file() == File::B {
        let west = unsafe { rsq.add_unchecked(-1) };
        let cell = b.get(west);
        if cell.color() == Some(them)
            && matches!(cell.piece(), Some(Piece::Rook) | Some(Piece::Queen))
        {
            return false;
        }
    }

    true
}

struct MoveGenImpl<'a, C, P> {
    board: &'a Board,
    dst: &'a mut P,
    _c: PhantomData<C>,
}

impl<'a, C: generic::Color, P: MovePush> MoveGenImpl<'a, C, P> {
    fn new(board: &'a Board, dst: &'a mut P, _c: C) -> Self {
        MoveGenImpl {
            board,
            dst,
            _c: PhantomData,
        }
    }

    #[inline]
    fn add(&mut self, kind: MoveKind, src: Square, dst: Square) {
        self.dst.push(Move::new(kind, src, dst));
    }

    fn gen_pawn_captures(&mut self) {
        let pawns = self.board.piece2(C::COLOR, Piece::Pawn);
        let enemy = self.board.color(C::COLOR.inv());
        let promote_rank = bitboard_consts::rank(geometry::promote_dst_rank(C::COLOR));

        for (delta, shifted) in [
            (
                geometry::pawn_left_delta(C::COLOR),
                pawns::advance_left(C::COLOR, pawns),
            ),
            (
                geometry::pawn_right_delta(C::COLOR),
                pawns::advance_right(C::COLOR, pawns),
            ),
        ] {
            let b1 = shifted & enemy;
            // Promotions other than to a queen are generated among the
            // noncaptures
            for to in b1 & promote_rank {
                let from = unsafe { to.add_unchecked(-delta) };
                self.add(MoveKind::PromoteQueen, from, to);
            }
            for to in b1 & !promote_rank {
                let from = unsafe { to.add_unchecked(-delta) };
                self.add(MoveKind::Normal, from, to);
            }
        }

        // Non-capturing queen promotions
        let forward = geometry::pawn_forward_delta(C::COLOR);
        let b1 =
            pawns::advance_forward(C::COLOR, pawns) & self.board.empty_squares() & promote_rank;
        for to in b1 {
            let from = unsafe { to.add_unchecked(-forward) };
            self.add(MoveKind::PromoteQueen, from, to);
        }

        // En passant captures
        if let Some(ep) = self.board.ep_square() {
            let b1 = pawns & attack::pawn(C::COLOR.inv(), ep);
            for from in b1 {
                self.add(MoveKind::Enpassant, from, ep);
            }
        }
    }

    fn gen_pawn_noncaptures(&mut self) {
        let pawns = self.board.piece2(C::COLOR, Piece::Pawn);
        let enemy = self.board.color(C::COLOR.inv());
        let empty = self.board.empty_squares();
        let promote_rank = bitboard_consts::rank(geometry::promote_dst_rank(C::COLOR));
        let mid_rank = bitboard_consts::rank(geometry::double_move_mid_rank(C::COLOR));
        let forward = geometry::pawn_forward_delta(C::COLOR);

        // Underpromotion captures
        for (delta, shifted) in [
            (
                geometry::pawn_left_delta(C::COLOR),
                pawns::advance_left(C::COLOR, pawns),
            ),
            (
                geometry::pawn_right_delta(C::COLOR),
                pawns::advance_right(C::COLOR, pawns),
            ),
        ] {
            for to in shifted & enemy & promote_rank {
                let from = unsafe { to.add_unchecked(-delta) };
                self.add(MoveKind::PromoteRook, from, to);
                self.add(MoveKind::PromoteBishop, from, to);
                self.add(MoveKind::PromoteKnight, from, to);
            }
        }

        // Single pushes, with underpromotions on the last rank
        let b1 = pawns::advance_forward(C::COLOR, pawns) & empty;
        for to in b1 & promote_rank {
            let from = unsafe { to.add_unchecked(-forward) };
            self.add(MoveKind::PromoteRook, from, to);
            self.add(MoveKind::PromoteBishop, from, to);
            self.add(MoveKind::PromoteKnight, from, to);
        }
        for to in b1 & !promote_rank {
            let from = unsafe { to.add_unchecked(-forward) };
            self.add(MoveKind::Normal, from, to);
        }

        // Double pushes
        let b2 = pawns::advance_forward(C::COLOR, b1 & mid_rank) & empty;
        for to in b2 {
            let from = unsafe { to.add_unchecked(-2 * forward) };
            self.add(MoveKind::Normal, from, to);
        }
    }

    fn gen_piece_moves(&mut self, p: Piece, target: Bitboard) {
        for from in self.board.piece2(C::COLOR, p) {
            let att = match p {
                Piece::Knight => attack::knight(from),
                Piece::Bishop => attack::bishop(from, self.board.occupied()),
                Piece::Rook => attack::rook(from, self.board.occupied()),
                Piece::Queen => attack::queen(from, self.board.occupied()),
                _ => unreachable!(),
            };
            for to in att & target {
                self.add(MoveKind::Normal, from, to);
            }
        }
    }

    fn gen_king_moves(&mut self, target: Bitboard) {
        let from = self.board.king_pos(C::COLOR);
        for to in attack::king(from) & target {
            self.add(MoveKind::Normal, from, to);
        }
    }

    fn gen_castling(&mut self) {
        let us = C::COLOR;
        if !self.board.can_castle(us) {
            return;
        }
        let ksq = self.board.king_pos(us);
        if self.board.can_castle_kingside(us)
            && do_castle_path_free::<C>(self.board, CastlingSide::King)
        {
            let rsq = self.board.initial_kr_square(us);
            self.add(MoveKind::Castle, ksq, rsq);
        }
        if self.board.can_castle_queenside(us)
            && do_castle_path_free::<C>(self.board, CastlingSide::Queen)
        {
            let rsq = self.board.initial_qr_square(us);
            self.add(MoveKind::Castle, ksq, rsq);
        }
    }

    /// Pseudo-legal captures and queen promotions
    fn gen_captures(&mut self) {
        debug_assert!(self.board.is_ok());
        debug_assert!(!self.board.is_check());

        let target = self.board.color(C::COLOR.inv());
        self.gen_pawn_captures();
        for p in [Piece::Knight, Piece::Bishop, Piece::Rook, Piece::Queen] {
            self.gen_piece_moves(p, target);
        }
        self.gen_king_moves(target);
    }

    /// Pseudo-legal non-captures, underpromotions and castling
    fn gen_noncaptures(&mut self) {
        debug_assert!(self.board.is_ok());
        debug_assert!(!self.board.is_check());

        let target = self.board.empty_squares();
        self.gen_pawn_noncaptures();
        for p in [Piece::Knight, Piece::Bishop, Piece::Rook, Piece::Queen] {
            self.gen_piece_moves(p, target);
        }
        self.gen_king_moves(target);
        self.gen_castling();
    }

    fn gen_pawn_checks(&mut self, dc: Bitboard, ksq: Square) {
        let empty = self.board.empty_squares();
        let forward = geometry::pawn_forward_delta(C::COLOR);
        let promote_rank = bitboard_consts::rank(geometry::promote_dst_rank(C::COLOR));
        let mid_rank = bitboard_consts::rank(geometry::double_move_mid_rank(C::COLOR));

        // Pawns on the king's file can't give a discovered check with a push,
        // and captures are not generated here
        let b1 = self.board.piece2(C::COLOR, Piece::Pawn)
            & !bitboard_consts::file(ksq.file());

        // Discovered checks, single and double pushes; pushes onto the last
        // rank are promotions and are excluded
        let b2 = pawns::advance_forward(C::COLOR, b1 & dc) & !promote_rank & empty;
        for to in b2 {
            let from = unsafe { to.add_unchecked(-forward) };
            self.add(MoveKind::Normal, from, to);
        }
        let b3 = pawns::advance_forward(C::COLOR, b2 & mid_rank) & empty;
        for to in b3 {
            let from = unsafe { to.add_unchecked(-2 * forward) };
            self.add(MoveKind::Normal, from, to);
        }

        // Direct checks are only possible from the files adjacent to the
        // king's one. The enemy pawn pattern from the king's square is exactly
        // the set of squares our pawns check the king from.
        let b1 = b1 & !dc & bitboard_consts::adjacent_files(ksq);
        let pattern = attack::pawn(C::COLOR.inv(), ksq);
        let b2 = pawns::advance_forward(C::COLOR, b1) & empty;
        for to in b2 & pattern {
            let from = unsafe { to.add_unchecked(-forward) };
            self.add(MoveKind::Normal, from, to);
        }
        let b3 = pawns::advance_forward(C::COLOR, b2 & mid_rank) & empty & pattern;
        for to in b3 {
            let from = unsafe { to.add_unchecked(-2 * forward) };
            self.add(MoveKind::Normal, from, to);
        }
    }

    /// Pseudo-legal quiet non-promoting moves giving check
    ///
    /// Castling moves that give check are not generated.
    fn gen_checks(&mut self) {
        debug_assert!(self.board.is_ok());
        debug_assert!(!self.board.is_check());

        let b = self.board;
        let ksq = b.king_pos(C::COLOR.inv());
        let dc = b.discovered_check_candidates(C::COLOR);
        let empty = b.empty_squares();
        let occ = b.occupied();

        self.gen_pawn_checks(dc, ksq);

        // Knight moves: any quiet move of a discovered-check candidate, or a
        // quiet move onto a square attacking the enemy king
        let knights = b.piece2(C::COLOR, Piece::Knight);
        for from in knights & dc {
            for to in attack::knight(from) & empty {
                self.add(MoveKind::Normal, from, to);
            }
        }
        let check_sqs = attack::knight(ksq) & empty;
        for from in knights & !dc {
            for to in attack::knight(from) & check_sqs {
                self.add(MoveKind::Normal, from, to);
            }
        }

        // Bishop moves
        let bishops = b.piece2(C::COLOR, Piece::Bishop);
        for from in bishops & dc {
            for to in attack::bishop(from, occ) & empty {
                self.add(MoveKind::Normal, from, to);
            }
        }
        let check_sqs = attack::bishop(ksq, occ) & empty;
        for from in bishops & !dc {
            for to in attack::bishop(from, occ) & check_sqs {
                self.add(MoveKind::Normal, from, to);
            }
        }

        // Rook moves
        let rooks = b.piece2(C::COLOR, Piece::Rook);
        for from in rooks & dc {
            for to in attack::rook(from, occ) & empty {
                self.add(MoveKind::Normal, from, to);
            }
        }
        let check_sqs = attack::rook(ksq, occ) & empty;
        for from in rooks & !dc {
            for to in attack::rook(from, occ) & check_sqs {
                self.add(MoveKind::Normal, from, to);
            }
        }

        // Queen moves. A queen can't give a discovered check: it would
        // already be checking on the line it is supposed to unblock.
        let check_sqs = attack::queen(ksq, occ) & empty;
        for from in b.piece2(C::COLOR, Piece::Queen) {
            for to in attack::queen(from, occ) & check_sqs {
                self.add(MoveKind::Normal, from, to);
            }
        }

        // King moves give check only by discovery, and only when the king
        // leaves every line through the enemy king
        let from = b.king_pos(C::COLOR);
        if dc.has(from) {
            for to in attack::king(from) & empty & !attack::queen_pseudo(ksq) {
                self.add(MoveKind::Normal, from, to);
            }
        }
    }

    /// Legal moves resolving a check
    fn gen_evasions(&mut self) {
        debug_assert!(self.board.is_ok());
        debug_assert!(self.board.is_check());

        let b = self.board;
        let us = C::COLOR;
        let them = us.inv();
        let ksq = b.king_pos(us);
        let checkers = b.checkers();

        // King evasions. The king is removed from the occupancy for the
        // slider tests, so that stepping along the checking ray is rejected.
        let occ_no_king = b.occupied() ^ Bitboard::from_square(ksq);
        for to in attack::king(ksq) & !b.color(us) {
            if (attack::pawn(us, to) & b.piece2(them, Piece::Pawn)).is_empty()
                && (attack::knight(to) & b.piece2(them, Piece::Knight)).is_empty()
                && (attack::king(to) & b.piece2(them, Piece::King)).is_empty()
                && (attack::bishop(to, occ_no_king) & b.piece_diag(them)).is_empty()
                && (attack::rook(to, occ_no_king) & b.piece_line(them)).is_empty()
            {
                self.add(MoveKind::Normal, ksq, to);
            }
        }

        // Only king moves can evade a double check
        if checkers.len() > 1 {
            return;
        }

        let checksq = checkers.first();
        let pinned = b.pinned(us);

        // Captures of the checking piece
        let b1 = attack::pawn(them, checksq) & b.piece2(us, Piece::Pawn) & !pinned;
        for from in b1 {
            if checksq.rank() == geometry::promote_dst_rank(us) {
                self.add(MoveKind::PromoteQueen, from, checksq);
                self.add(MoveKind::PromoteRook, from, checksq);
                self.add(MoveKind::PromoteBishop, from, checksq);
                self.add(MoveKind::PromoteKnight, from, checksq);
            } else {
                self.add(MoveKind::Normal, from, checksq);
            }
        }
        for from in attack::knight(checksq) & b.piece2(us, Piece::Knight) & !pinned {
            self.add(MoveKind::Normal, from, checksq);
        }
        for from in attack::bishop(checksq, b.occupied()) & b.piece_diag(us) & !pinned {
            self.add(MoveKind::Normal, from, checksq);
        }
        for from in attack::rook(checksq, b.occupied()) & b.piece_line(us) & !pinned {
            self.add(MoveKind::Normal, from, checksq);
        }

        // Interpositions are possible only when the checker is a slider
        if (checkers & b.sliders()).is_nonempty() {
            let block = between::between(checksq, ksq);
            let forward = geometry::pawn_forward_delta(us);
            let mid_rank = bitboard_consts::rank(geometry::double_move_mid_rank(us));

            // Pawn pushes into the blocking squares. The blocking squares are
            // always empty, so single pushes need no masking.
            let free_pawns = b.piece2(us, Piece::Pawn) & !pinned;
            let b1 = pawns::advance_forward(us, free_pawns);
            for to in b1 & block {
                let from = unsafe { to.add_unchecked(-forward) };
                if to.rank() == geometry::promote_dst_rank(us) {
                    self.add(MoveKind::PromoteQueen, from, to);
                    self.add(MoveKind::PromoteRook, from, to);
                    self.add(MoveKind::PromoteBishop, from, to);
                    self.add(MoveKind::PromoteKnight, from, to);
                } else {
                    self.add(MoveKind::Normal, from, to);
                }
            }
            let b2 =
                pawns::advance_forward(us, b1 & b.empty_squares() & mid_rank) & block;
            for to in b2 {
                let from = unsafe { to.add_unchecked(-2 * forward) };
                self.add(MoveKind::Normal, from, to);
            }

            for from in b.piece2(us, Piece::Knight) & !pinned {
                for to in attack::knight(from) & block {
                    self.add(MoveKind::Normal, from, to);
                }
            }
            for from in b.piece2(us, Piece::Bishop) & !pinned {
                for to in attack::bishop(from, b.occupied()) & block {
                    self.add(MoveKind::Normal, from, to);
                }
            }
            for from in b.piece2(us, Piece::Rook) & !pinned {
                for to in attack::rook(from, b.occupied()) & block {
                    self.add(MoveKind::Normal, from, to);
                }
            }
            for from in b.piece2(us, Piece::Queen) & !pinned {
                for to in attack::queen(from, b.occupied()) & block {
                    self.add(MoveKind::Normal, from, to);
                }
            }
        }

        // En passant evasions: when the checker is the pawn which has just
        // made a double move, it can be captured en passant. The two pawns
        // leaving their squares at once may uncover a new sliding attack, so
        // the sliders are tested against the modified occupancy.
        if let Some(ep) = b.ep_square() {
            if (checkers & b.piece2(them, Piece::Pawn)).is_nonempty() {
                let b1 = attack::pawn(them, ep) & b.piece2(us, Piece::Pawn) & !pinned;
                for from in b1 {
                    let occ = b.occupied()
                        ^ Bitboard::from_square(from)
                        ^ Bitboard::from_square(checksq);
                    if (attack::bishop(ksq, occ) & b.piece_diag(them)).is_empty()
                        && (attack::rook(ksq, occ) & b.piece_line(them)).is_empty()
                    {
                        self.add(MoveKind::Enpassant, from, ep);
                    }
                }
            }
        }
    }
}

fn do_move_if_legal<C: generic::Color>(b: &Board, mv: Move, pinned: Bitboard) -> Option<Move> {
    let us = C::COLOR;
    let them = us.inv();
    let from = mv.src();
    let pc = b.get(from);

    // The source square must hold a piece of the side to move
    if pc.color() != Some(us) {
        return None;
    }

    let to = mv.dst();

    match mv.kind() {
        MoveKind::Null => None,
        MoveKind::Enpassant => {
            if pc.piece() != Some(Piece::Pawn) || b.ep_square() != Some(to) {
                return None;
            }
            legality::is_move_legal(b, mv, pinned).then_some(mv)
        }
        MoveKind::Castle => {
            if pc.piece() != Some(Piece::King) {
                return None;
            }
            let side = if to == b.initial_kr_square(us) {
                CastlingSide::King
            } else if to == b.initial_qr_square(us) {
                CastlingSide::Queen
            } else {
                return None;
            };
            let allowed = match side {
                CastlingSide::King => b.can_castle_kingside(us),
                CastlingSide::Queen => b.can_castle_queenside(us),
            };
            if !allowed {
                return None;
            }
            do_castle_path_free::<C>(b, side).then_some(mv)
        }
        kind => {
            if b.get(to).color() == Some(us) {
                return None;
            }
            if pc.piece() == Some(Piece::Pawn) {
                // A pawn arriving on the last rank must promote
                if to.rank() == geometry::promote_dst_rank(us) && !kind.is_promote() {
                    return None;
                }
                let delta = to.index() as isize - from.index() as isize;
                match delta {
                    7 | 9 | -7 | -9 => {
                        // Capture; en passant was handled above
                        if b.get(to).color() != Some(them) {
                            return None;
                        }
                    }
                    8 | -8 => {
                        if b.get(to).is_occupied() {
                            return None;
                        }
                    }
                    16 => {
                        if to.rank() != geometry::double_move_dst_rank(Color::White)
                            || b.get(to).is_occupied()
                            || b.get(unsafe { from.add_unchecked(8) }).is_occupied()
                        {
                            return None;
                        }
                    }
                    -16 => {
                        if to.rank() != geometry::double_move_dst_rank(Color::Black)
                            || b.get(to).is_occupied()
                            || b.get(unsafe { from.add_unchecked(-8) }).is_occupied()
                        {
                            return None;
                        }
                    }
                    _ => return None,
                }
                legality::is_move_legal(b, mv, pinned).then_some(mv)
            } else {
                (b.piece_attacks_square(from, to)
                    && legality::is_move_legal(b, mv, pinned)
                    && !kind.is_promote())
                .then_some(mv)
            }
        }
    }
}

macro_rules! do_impl {
    ($($(#[$attr:meta])* $method:ident => $name:ident, $name_into:ident;)*) => {
        $(
            /// Same as the list-returning variant, but appends the moves to `dst`
            pub fn $name_into<P: MovePush>(b: &Board, dst: &mut P) {
                match b.side() {
                    Color::White => MoveGenImpl::new(b, dst, generic::White).$method(),
                    Color::Black => MoveGenImpl::new(b, dst, generic::Black).$method(),
                }
            }

            $(#[$attr])*
            pub fn $name(b: &Board) -> MoveList {
                let mut res = UnsafeMoveList(MoveList::new());
                $name_into(b, &mut res);
                res.0
            }
        )*
    }
}

do_impl! {
    /// Generates pseudo-legal captures and queen promotions
    ///
    /// Must not be called when the side to move is in check.
    gen_captures => captures, captures_into;

    /// Generates pseudo-legal non-captures, underpromotions and castling
    ///
    /// Must not be called when the side to move is in check.
    gen_noncaptures => noncaptures, noncaptures_into;

    /// Generates pseudo-legal quiet non-promoting moves which give check
    ///
    /// Castling moves are never generated here, even when they give check.
    /// Must not be called when the side to move is in check.
    gen_checks => checks, checks_into;

    /// Generates all the legal moves resolving a check
    ///
    /// Must only be called when the side to move is in check.
    gen_evasions => evasions, evasions_into;
}

/// Generates the complete list of legal moves
///
/// Unlike the other generators, this function can be called regardless of
/// whether the side to move is in check.
pub fn legal(b: &Board) -> MoveList {
    if b.is_check() {
        return evasions(b);
    }
    let mut res = captures(b);
    {
        let list: &mut ArrayVec<Move, 256> = &mut res;
        noncaptures_into(b, list);
    }
    let pinned = b.pinned(b.side());
    res.retain(|&mut mv| legality::is_move_legal(b, mv, pinned));
    res
}

/// Tests a single, not necessarily pseudo-legal, move for legality
///
/// Returns `Some(mv)` when the move is legal, and `None` otherwise. `pinned`
/// must be the pinned set of the side to move. The side to move must not be
/// in check; when in check, generate the evasions and look the move up there.
pub fn move_if_legal(b: &Board, mv: Move, pinned: Bitboard) -> Option<Move> {
    debug_assert!(b.is_ok());
    debug_assert!(!b.is_check());

    match b.side() {
        Color::White => do_move_if_legal::<generic::White>(b, mv, pinned),
        Color::Black => do_move_if_legal::<generic::Black>(b, mv, pinned),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves;
    use std::collections::HashSet;

    const FENS: [&str; 7] = [
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
        "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
        "1rq1r1k1/1p3ppp/pB3n2/3ppP2/Pbb1P3/1PN2B2/2P2QPP/R1R4K w - - 1 21",
        "4k3/pppppppp/8/8/8/8/PPPPPPPP/4K3 w - - 0 1",
    ];

    fn union(b: &Board) -> Vec<Move> {
        let mut res: Vec<Move> = captures(b).iter().copied().collect();
        res.extend(noncaptures(b).iter().copied());
        res
    }

    fn is_legal_by_make(b: &Board, mv: Move) -> bool {
        let mut b = b.clone();
        let u = unsafe { moves::make_move_unchecked(&mut b, mv) };
        let ok = !b.is_opponent_king_attacked();
        unsafe { moves::unmake_move_unchecked(&mut b, mv, u) };
        ok
    }

    #[test]
    fn test_initial() {
        let b = Board::initial();
        assert_eq!(captures(&b).len(), 0);
        assert_eq!(noncaptures(&b).len(), 20);
        assert_eq!(checks(&b).len(), 0);
        assert_eq!(legal(&b).len(), 20);
    }

    #[test]
    fn test_partition() {
        for fen in FENS {
            let b = Board::from_fen(fen).unwrap();
            let caps = captures(&b);
            let quiets = noncaptures(&b);

            // No move appears twice or lands in both lists
            let mut seen = HashSet::new();
            for mv in caps.iter().chain(quiets.iter()) {
                assert!(seen.insert(*mv), "duplicate move {} in {}", mv, fen);
            }

            // Queen promotions and en passant go with the captures,
            // underpromotions and castling with the noncaptures
            for mv in caps.iter() {
                assert!(
                    b.get(mv.dst()).is_occupied()
                        || mv.kind() == MoveKind::Enpassant
                        || mv.kind() == MoveKind::PromoteQueen,
                    "unexpected capture {} in {}",
                    mv,
                    fen
                );
                assert!(mv.kind() != MoveKind::Castle);
            }
            for mv in quiets.iter() {
                match mv.kind() {
                    MoveKind::Castle => {}
                    MoveKind::PromoteRook | MoveKind::PromoteBishop | MoveKind::PromoteKnight => {}
                    MoveKind::Normal => {
                        assert!(b.get(mv.dst()).is_free(), "capture {} in quiets, {}", mv, fen)
                    }
                    k => panic!("unexpected kind {:?} in quiets, {}", k, fen),
                }
            }
        }
    }

    #[test]
    fn test_legal_filter_identity() {
        for fen in FENS {
            let b = Board::from_fen(fen).unwrap();
            let pinned = b.pinned(b.side());
            let mut expected: Vec<Move> = union(&b)
                .into_iter()
                .filter(|&mv| is_legal_by_make(&b, mv))
                .collect();
            let mut got: Vec<Move> = legal(&b).iter().copied().collect();
            expected.sort_by_key(|m| (m.src().index(), m.dst().index(), m.kind() as u8));
            got.sort_by_key(|m| (m.src().index(), m.dst().index(), m.kind() as u8));
            assert_eq!(expected, got, "legal mismatch in {}", fen);

            // The single-move verifier agrees with the list
            for mv in union(&b) {
                assert_eq!(
                    move_if_legal(&b, mv, pinned).is_some(),
                    is_legal_by_make(&b, mv),
                    "move_if_legal mismatch for {} in {}",
                    mv,
                    fen
                );
            }
        }
    }

    #[test]
    fn test_checks_are_quiet_checks() {
        for fen in FENS {
            let b = Board::from_fen(fen).unwrap();
            let quiets: HashSet<Move> = noncaptures(&b).iter().copied().collect();
            for mv in checks(&b).iter().copied() {
                assert!(quiets.contains(&mv), "check {} not in quiets, {}", mv, fen);
                assert_eq!(mv.kind(), MoveKind::Normal);
                // A legal checking move must leave the opponent in check
                if is_legal_by_make(&b, mv) {
                    let mut b2 = b.clone();
                    let u = unsafe { moves::make_move_unchecked(&mut b2, mv) };
                    assert!(b2.is_check(), "move {} gives no check in {}", mv, fen);
                    unsafe { moves::unmake_move_unchecked(&mut b2, mv, u) };
                }
            }
        }
    }

    #[test]
    fn test_simple_checks() {
        // Rook on d2 can check from e2 or d8
        let b = Board::from_fen("4k3/8/8/8/8/8/3R4/4K3 w - - 0 1").unwrap();
        let got: HashSet<String> = checks(&b).iter().map(|m| m.to_string()).collect();
        let expected: HashSet<String> = ["d2e2", "d2d8"].iter().map(|s| s.to_string()).collect();
        assert_eq!(got, expected);

        // The e3 knight unblocks the e1 rook with any quiet move
        let b = Board::from_fen("4k3/8/8/8/8/4N3/8/4RK2 w - - 0 1").unwrap();
        let got: HashSet<String> = checks(&b).iter().map(|m| m.to_string()).collect();
        let expected: HashSet<String> = ["e3d5", "e3f5", "e3c4", "e3g4", "e3c2", "e3g2", "e3d1"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(got, expected);
    }

    #[test]
    fn test_evasions_king_walk() {
        // The h1 rook checks along the first rank; the king cannot stay on it
        let b = Board::from_fen("4k3/8/8/8/8/8/8/4K2r w - - 0 1").unwrap();
        let got: HashSet<String> = evasions(&b).iter().map(|m| m.to_string()).collect();
        let expected: HashSet<String> =
            ["e1d2", "e1e2", "e1f2"].iter().map(|s| s.to_string()).collect();
        assert_eq!(got, expected);
    }

    #[test]
    fn test_evasions_properties() {
        for fen in [
            "4k3/8/8/8/8/2b5/8/R3K3 w - - 0 1",
            "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3",
            "4k3/8/8/8/8/5n2/8/4K3 w - - 0 1",
            "2k1r3/8/8/8/8/5n2/8/4K2R w - - 0 1",
        ] {
            let b = Board::from_fen(fen).unwrap();
            assert!(b.is_check(), "not in check: {}", fen);
            let evs = evasions(&b);
            let mut seen = HashSet::new();
            for mv in evs.iter().copied() {
                assert!(seen.insert(mv), "duplicate evasion {} in {}", mv, fen);
                assert!(is_legal_by_make(&b, mv), "illegal evasion {} in {}", mv, fen);
            }
        }
    }

    #[test]
    fn test_evasion_enpassant() {
        // The e4 pawn has just moved two squares and checks the d5 king; it
        // can be captured en passant
        let b = Board::from_fen("8/8/8/3k4/3pP3/8/8/4K3 b - e3 0 1").unwrap();
        assert!(b.is_check());
        let evs = evasions(&b);
        let ep = Move::enpassant("d4".parse().unwrap(), "e3".parse().unwrap());
        assert!(evs.contains(&ep));
        for mv in evs.iter() {
            assert!(is_legal_by_make(&b, *mv));
        }
    }

    #[test]
    fn test_move_if_legal() {
        let b = Board::initial();
        let pinned = b.pinned(b.side());
        let e2e4 = moves::Move::from_uci("e2e4", &b).unwrap();
        assert_eq!(move_if_legal(&b, e2e4, pinned), Some(e2e4));
        let e2e5 = moves::Move::from_uci("e2e5", &b).unwrap();
        assert_eq!(move_if_legal(&b, e2e5, pinned), None);
        let g1f3 = moves::Move::from_uci("g1f3", &b).unwrap();
        assert_eq!(move_if_legal(&b, g1f3, pinned), Some(g1f3));
        let e1g1 = moves::Move::from_uci("e1g1", &b).unwrap();
        assert_eq!(move_if_legal(&b, e1g1, pinned), None);
        // Moving an enemy piece is rejected
        let e7e5 = moves::Move::from_uci("e7e5", &b).unwrap();
        assert_eq!(move_if_legal(&b, e7e5, pinned), None);

        let b =
            Board::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1")
                .unwrap();
        let pinned = b.pinned(b.side());
        let e1g1 = moves::Move::from_uci("e1g1", &b).unwrap();
        assert_eq!(move_if_legal(&b, e1g1, pinned), Some(e1g1));
        let e1c1 = moves::Move::from_uci("e1c1", &b).unwrap();
        assert_eq!(move_if_legal(&b, e1c1, pinned), Some(e1c1));
    }

    #[test]
    fn test_castling_generation() {
        let b = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let quiets = noncaptures(&b);
        let castles: Vec<&Move> = quiets
            .iter()
            .filter(|m| m.kind() == MoveKind::Castle)
            .collect();
        assert_eq!(castles.len(), 2);

        // Castling through an attacked square is not generated
        let b = Board::from_fen("r3k2r/8/8/1b6/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let castles: Vec<Move> = noncaptures(&b)
            .iter()
            .copied()
            .filter(|m| m.kind() == MoveKind::Castle)
            .collect();
        // f1 is attacked by the b5 bishop, so only long castling survives
        assert_eq!(castles.len(), 1);
        assert_eq!(castles[0].castling_side(), Some(CastlingSide::Queen));
    }
}
