use crate::bitboard::Bitboard;
use crate::board::Board;
use crate::types::{
    CastlingRights, CastlingSide, Cell, Color, File, Piece, Square, SquareParseError,
};
use crate::{castling, generic, geometry, movegen, zobrist};

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Kind of a [`Move`]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MoveKind {
    /// Sentinel for "no move"
    Null = 0,
    /// Any move that is not a promotion, en passant capture or castling
    Normal = 1,
    /// En passant capture
    Enpassant = 2,
    /// Castling; the move goes from the king's square to the initial square
    /// of the castling rook
    Castle = 3,
    PromoteKnight = 4,
    PromoteBishop = 5,
    PromoteRook = 6,
    PromoteQueen = 7,
}

impl MoveKind {
    /// The piece a pawn promotes to, for promotion kinds
    #[inline]
    pub const fn promote_to(&self) -> Option<Piece> {
        match *self {
            Self::PromoteKnight => Some(Piece::Knight),
            Self::PromoteBishop => Some(Piece::Bishop),
            Self::PromoteRook => Some(Piece::Rook),
            Self::PromoteQueen => Some(Piece::Queen),
            _ => None,
        }
    }

    #[inline]
    pub const fn is_promote(&self) -> bool {
        self.promote_to().is_some()
    }
}

/// Chess move
///
/// The move is identified by its source square, destination square and kind.
/// Castling is encoded as a move of the king onto the initial square of the
/// castling rook, so the board side alone distinguishes short and long castling.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Move {
    kind: MoveKind,
    src: Square,
    dst: Square,
}

impl Move {
    /// The "no move" sentinel
    pub const NULL: Move = Move {
        kind: MoveKind::Null,
        src: Square::from_index(0),
        dst: Square::from_index(0),
    };

    #[inline]
    pub const fn new(kind: MoveKind, src: Square, dst: Square) -> Move {
        Move { kind, src, dst }
    }

    /// Creates a normal (non-promotion, non-castling, non-en-passant) move
    #[inline]
    pub const fn normal(src: Square, dst: Square) -> Move {
        Move::new(MoveKind::Normal, src, dst)
    }

    /// Creates a promotion move
    ///
    /// # Panics
    ///
    /// The function panics if `piece` is not a valid promotion target.
    #[inline]
    pub const fn promotion(src: Square, dst: Square, piece: Piece) -> Move {
        let kind = match piece {
            Piece::Knight => MoveKind::PromoteKnight,
            Piece::Bishop => MoveKind::PromoteBishop,
            Piece::Rook => MoveKind::PromoteRook,
            Piece::Queen => MoveKind::PromoteQueen,
            _ => panic!("invalid promotion piece"),
        };
        Move::new(kind, src, dst)
    }

    /// Creates an en passant capture
    #[inline]
    pub const fn enpassant(src: Square, dst: Square) -> Move {
        Move::new(MoveKind::Enpassant, src, dst)
    }

    /// Creates a castling move from the king's square and the initial square of
    /// the castling rook
    #[inline]
    pub const fn castle(king: Square, rook: Square) -> Move {
        Move::new(MoveKind::Castle, king, rook)
    }

    #[inline]
    pub const fn kind(&self) -> MoveKind {
        self.kind
    }

    #[inline]
    pub const fn src(&self) -> Square {
        self.src
    }

    #[inline]
    pub const fn dst(&self) -> Square {
        self.dst
    }

    /// For castling moves, the side of the board the king castles to
    #[inline]
    pub fn castling_side(&self) -> Option<CastlingSide> {
        if self.kind != MoveKind::Castle {
            return None;
        }
        if self.dst.file() > self.src.file() {
            Some(CastlingSide::King)
        } else {
            Some(CastlingSide::Queen)
        }
    }

    /// Parses a move from UCI notation in the context of board `b`
    ///
    /// The board is required to distinguish en passant captures and castling
    /// from ordinary moves. The move itself is not checked for legality.
    pub fn from_uci(s: &str, b: &Board) -> Result<Move, UciParseError> {
        if s == "0000" {
            return Ok(Move::NULL);
        }
        if !matches!(s.len(), 4 | 5) {
            return Err(UciParseError::BadLength);
        }
        let src = Square::from_str(&s[0..2]).map_err(UciParseError::BadSrc)?;
        let dst = Square::from_str(&s[2..4]).map_err(UciParseError::BadDst)?;
        if s.len() == 5 {
            let piece = match s.as_bytes()[4] {
                b'n' => Piece::Knight,
                b'b' => Piece::Bishop,
                b'r' => Piece::Rook,
                b'q' => Piece::Queen,
                c => return Err(UciParseError::BadPromote(c as char)),
            };
            return Ok(Move::promotion(src, dst, piece));
        }

        let side = b.side();
        let src_cell = b.get(src);

        if src_cell == Cell::from_parts(side, Piece::King) {
            let rank = geometry::castling_rank(side);
            if src == Square::from_parts(File::E, rank) {
                if dst == Square::from_parts(File::G, rank) {
                    return Ok(Move::castle(src, b.initial_kr_square(side)));
                }
                if dst == Square::from_parts(File::C, rank) {
                    return Ok(Move::castle(src, b.initial_qr_square(side)));
                }
            }
        }

        if src_cell == Cell::from_parts(side, Piece::Pawn)
            && src.file() != dst.file()
            && b.get(dst).is_free()
        {
            return Ok(Move::enpassant(src, dst));
        }

        Ok(Move::normal(src, dst))
    }
}

impl Default for Move {
    #[inline]
    fn default() -> Self {
        Move::NULL
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        if self.kind == MoveKind::Null {
            return write!(f, "0000");
        }
        // Castling is printed UCI-style, as a king move of two squares
        if self.kind == MoveKind::Castle {
            let file = match self.castling_side().unwrap() {
                CastlingSide::King => File::G,
                CastlingSide::Queen => File::C,
            };
            let dst = Square::from_parts(file, self.src.rank());
            return write!(f, "{}{}", self.src, dst);
        }
        write!(f, "{}{}", self.src, self.dst)?;
        match self.kind {
            MoveKind::PromoteKnight => write!(f, "n")?,
            MoveKind::PromoteBishop => write!(f, "b")?,
            MoveKind::PromoteRook => write!(f, "r")?,
            MoveKind::PromoteQueen => write!(f, "q")?,
            _ => {}
        };
        Ok(())
    }
}

/// Error parsing a move from UCI notation
#[derive(Debug, Copy, Clone, Error, Eq, PartialEq)]
pub enum UciParseError {
    #[error("bad string length")]
    BadLength,
    #[error("bad source: {0}")]
    BadSrc(SquareParseError),
    #[error("bad destination: {0}")]
    BadDst(SquareParseError),
    #[error("bad promote char {0:?}")]
    BadPromote(char),
}

/// Error returned when an illegal move is applied to a board
#[derive(Debug, Copy, Clone, Error, Eq, PartialEq)]
pub enum MakeMoveError {
    #[error("move is not legal")]
    NotLegal,
}

/// Data required to undo a move made with [`make_move_unchecked`]
#[derive(Debug, Copy, Clone)]
pub struct RawUndo {
    hash: u64,
    dst_cell: Cell,
    castling: CastlingRights,
    ep_square: Option<Square>,
    move_counter: u16,
}

fn update_castling(b: &mut Board, change: Bitboard) {
    if (change & castling::ALL_SRCS).is_empty() {
        return;
    }

    let mut rights = b.r.castling;
    for (c, s) in [
        (Color::White, CastlingSide::Queen),
        (Color::White, CastlingSide::King),
        (Color::Black, CastlingSide::Queen),
        (Color::Black, CastlingSide::King),
    ] {
        if (change & castling::srcs(c, s)).is_nonempty() {
            rights.unset(c, s);
        }
    }

    if rights != b.r.castling {
        b.hash ^= zobrist::castling(b.r.castling);
        b.r.castling = rights;
        b.hash ^= zobrist::castling(b.r.castling);
    }
}

#[inline]
fn do_make_enpassant<C: generic::Color>(b: &mut Board, mv: Move, change: Bitboard, inv: bool) {
    let victim_pos = unsafe { mv.dst.add_unchecked(-geometry::pawn_forward_delta(C::COLOR)) };
    let victim = Bitboard::from_square(victim_pos);
    let our_pawn = Cell::from_parts(C::COLOR, Piece::Pawn);
    let their_pawn = Cell::from_parts(C::COLOR.inv(), Piece::Pawn);
    if inv {
        b.r.put(mv.src, our_pawn);
        b.r.put(mv.dst, Cell::EMPTY);
        b.r.put(victim_pos, their_pawn);
    } else {
        b.r.put(mv.src, Cell::EMPTY);
        b.r.put(mv.dst, our_pawn);
        b.r.put(victim_pos, Cell::EMPTY);
        b.hash ^= zobrist::pieces(our_pawn, mv.src)
            ^ zobrist::pieces(our_pawn, mv.dst)
            ^ zobrist::pieces(their_pawn, victim_pos);
    }
    *b.color_mut(C::COLOR) ^= change;
    *b.piece_mut(our_pawn) ^= change;
    *b.color_mut(C::COLOR.inv()) ^= victim;
    *b.piece_mut(their_pawn) ^= victim;
}

#[inline]
fn do_make_castling_kingside<C: generic::Color>(b: &mut Board, inv: bool) {
    let king = Cell::from_parts(C::COLOR, Piece::King);
    let rook = Cell::from_parts(C::COLOR, Piece::Rook);
    let rank = geometry::castling_rank(C::COLOR);
    if inv {
        b.r.put2(File::E, rank, king);
        b.r.put2(File::F, rank, Cell::EMPTY);
        b.r.put2(File::G, rank, Cell::EMPTY);
        b.r.put2(File::H, rank, rook);
    } else {
        b.r.put2(File::E, rank, Cell::EMPTY);
        b.r.put2(File::F, rank, rook);
        b.r.put2(File::G, rank, king);
        b.r.put2(File::H, rank, Cell::EMPTY);
        b.hash ^= zobrist::castling_delta(C::COLOR, CastlingSide::King);
    }
    *b.color_mut(C::COLOR) ^= Bitboard::from_raw(0xf0 << C::CASTLING_OFFSET);
    *b.piece_mut(rook) ^= Bitboard::from_raw(0xa0 << C::CASTLING_OFFSET);
    *b.piece_mut(king) ^= Bitboard::from_raw(0x50 << C::CASTLING_OFFSET);
    if !inv {
        b.hash ^= zobrist::castling(b.r.castling);
        b.r.castling.unset_color(C::COLOR);
        b.hash ^= zobrist::castling(b.r.castling);
    }
}

#[inline]
fn do_make_castling_queenside<C: generic::Color>(b: &mut Board, inv: bool) {
    let king = Cell::from_parts(C::COLOR, Piece::King);
    let rook = Cell::from_parts(C::COLOR, Piece::Rook);
    let rank = geometry::castling_rank(C::COLOR);
    if inv {
        b.r.put2(File::A, rank, rook);
        b.r.put2(File::C, rank, Cell::EMPTY);
        b.r.put2(File::D, rank, Cell::EMPTY);
        b.r.put2(File::E, rank, king);
    } else {
        b.r.put2(File::A, rank, Cell::EMPTY);
        b.r.put2(File::C, rank, king);
        b.r.put2(File::D, rank, rook);
        b.r.put2(File::E, rank, Cell::EMPTY);
        b.hash ^= zobrist::castling_delta(C::COLOR, CastlingSide::Queen);
    }
    *b.color_mut(C::COLOR) ^= Bitboard::from_raw(0x1d << C::CASTLING_OFFSET);
    *b.piece_mut(rook) ^= Bitboard::from_raw(0x09 << C::CASTLING_OFFSET);
    *b.piece_mut(king) ^= Bitboard::from_raw(0x14 << C::CASTLING_OFFSET);
    if !inv {
        b.hash ^= zobrist::castling(b.r.castling);
        b.r.castling.unset_color(C::COLOR);
        b.hash ^= zobrist::castling(b.r.castling);
    }
}

fn do_make_move<C: generic::Color>(b: &mut Board, mv: Move) -> RawUndo {
    let src_cell = b.get(mv.src);
    let dst_cell = b.get(mv.dst);
    let undo = RawUndo {
        hash: b.hash,
        dst_cell,
        castling: b.r.castling,
        ep_square: b.r.ep_square,
        move_counter: b.r.move_counter,
    };
    let src = Bitboard::from_square(mv.src);
    let dst = Bitboard::from_square(mv.dst);
    let change = src | dst;
    let pawn = Cell::from_parts(C::COLOR, Piece::Pawn);
    if let Some(p) = b.r.ep_square {
        b.hash ^= zobrist::enpassant(p);
        b.r.ep_square = None;
    }
    match mv.kind {
        MoveKind::Normal => {
            b.r.put(mv.src, Cell::EMPTY);
            b.r.put(mv.dst, src_cell);
            b.hash ^= zobrist::pieces(src_cell, mv.src)
                ^ zobrist::pieces(src_cell, mv.dst)
                ^ zobrist::pieces(dst_cell, mv.dst);
            *b.color_mut(C::COLOR) ^= change;
            *b.piece_mut(src_cell) ^= change;
            *b.color_mut(C::COLOR.inv()) &= !dst;
            *b.piece_mut(dst_cell) &= !dst;
            update_castling(b, change);
            // A double pawn push sets the en passant square
            if src_cell == pawn
                && mv.dst.index().wrapping_sub(mv.src.index()) as isize
                    == 2 * geometry::pawn_forward_delta(C::COLOR)
            {
                let ep = unsafe { mv.src.add_unchecked(geometry::pawn_forward_delta(C::COLOR)) };
                b.r.ep_square = Some(ep);
                b.hash ^= zobrist::enpassant(ep);
            }
        }
        MoveKind::PromoteKnight
        | MoveKind::PromoteBishop
        | MoveKind::PromoteRook
        | MoveKind::PromoteQueen => {
            let promote = Cell::from_parts(C::COLOR, mv.kind.promote_to().unwrap());
            b.r.put(mv.src, Cell::EMPTY);
            b.r.put(mv.dst, promote);
            b.hash ^= zobrist::pieces(pawn, mv.src)
                ^ zobrist::pieces(promote, mv.dst)
                ^ zobrist::pieces(dst_cell, mv.dst);
            *b.color_mut(C::COLOR) ^= change;
            *b.piece_mut(pawn) ^= src;
            *b.piece_mut(promote) ^= dst;
            *b.color_mut(C::COLOR.inv()) &= !dst;
            *b.piece_mut(dst_cell) &= !dst;
            update_castling(b, change);
        }
        MoveKind::Castle => match mv.castling_side().unwrap() {
            CastlingSide::King => do_make_castling_kingside::<C>(b, false),
            CastlingSide::Queen => do_make_castling_queenside::<C>(b, false),
        },
        MoveKind::Enpassant => {
            do_make_enpassant::<C>(b, mv, change, false);
        }
        MoveKind::Null => {
            // Do nothing
        }
    }

    let is_capture = match mv.kind {
        MoveKind::Enpassant => true,
        MoveKind::Normal
        | MoveKind::PromoteKnight
        | MoveKind::PromoteBishop
        | MoveKind::PromoteRook
        | MoveKind::PromoteQueen => dst_cell.is_occupied(),
        MoveKind::Castle | MoveKind::Null => false,
    };
    if is_capture || (mv.kind != MoveKind::Null && src_cell == pawn) {
        b.r.move_counter = 0;
    } else {
        b.r.move_counter += 1;
    }
    b.r.side = C::COLOR.inv();
    b.hash ^= zobrist::MOVE_SIDE;
    if C::COLOR == Color::Black {
        b.r.move_number += 1;
    }
    b.all = b.white | b.black;

    undo
}

fn do_unmake_move<C: generic::Color>(b: &mut Board, mv: Move, u: RawUndo) {
    let src = Bitboard::from_square(mv.src);
    let dst = Bitboard::from_square(mv.dst);
    let change = src | dst;

    match mv.kind {
        MoveKind::Normal => {
            let src_cell = b.get(mv.dst);
            b.r.put(mv.src, src_cell);
            b.r.put(mv.dst, u.dst_cell);
            *b.color_mut(C::COLOR) ^= change;
            *b.piece_mut(src_cell) ^= change;
            if u.dst_cell.is_occupied() {
                *b.color_mut(C::COLOR.inv()) |= dst;
                *b.piece_mut(u.dst_cell) |= dst;
            }
        }
        MoveKind::PromoteKnight
        | MoveKind::PromoteBishop
        | MoveKind::PromoteRook
        | MoveKind::PromoteQueen => {
            let pawn = Cell::from_parts(C::COLOR, Piece::Pawn);
            let promote = Cell::from_parts(C::COLOR, mv.kind.promote_to().unwrap());
            b.r.put(mv.src, pawn);
            b.r.put(mv.dst, u.dst_cell);
            *b.color_mut(C::COLOR) ^= change;
            *b.piece_mut(pawn) ^= src;
            *b.piece_mut(promote) ^= dst;
            if u.dst_cell.is_occupied() {
                *b.color_mut(C::COLOR.inv()) |= dst;
                *b.piece_mut(u.dst_cell) |= dst;
            }
        }
        MoveKind::Castle => match mv.castling_side().unwrap() {
            CastlingSide::King => do_make_castling_kingside::<C>(b, true),
            CastlingSide::Queen => do_make_castling_queenside::<C>(b, true),
        },
        MoveKind::Enpassant => {
            do_make_enpassant::<C>(b, mv, change, true);
        }
        MoveKind::Null => {
            // Do nothing
        }
    }

    b.hash = u.hash;
    b.r.castling = u.castling;
    b.r.ep_square = u.ep_square;
    b.r.move_counter = u.move_counter;
    b.r.side = C::COLOR;
    if C::COLOR == Color::Black {
        b.r.move_number -= 1;
    }
    b.all = b.white | b.black;
}

/// Makes move `mv` on board `b` without checking its legality
///
/// # Safety
///
/// The move must be a pseudo-legal move generated for this very position. The
/// resulting board may leave the opponent's king attacked; in this case the
/// move must be unmade before doing anything else with the board.
pub unsafe fn make_move_unchecked(b: &mut Board, mv: Move) -> RawUndo {
    match b.r.side {
        Color::White => do_make_move::<generic::White>(b, mv),
        Color::Black => do_make_move::<generic::Black>(b, mv),
    }
}

/// Reverts a move made with [`make_move_unchecked`]
///
/// # Safety
///
/// `mv` must be the latest move made on board `b`, and `u` must be the undo
/// token returned for it.
pub unsafe fn unmake_move_unchecked(b: &mut Board, mv: Move, u: RawUndo) {
    match b.r.side {
        Color::White => do_unmake_move::<generic::Black>(b, mv, u),
        Color::Black => do_unmake_move::<generic::White>(b, mv, u),
    }
}

/// Validates move `mv` and makes it on a copy of board `b`
///
/// Returns the resulting board, or an error when the move is not legal.
pub fn make_move(b: &Board, mv: Move) -> Result<Board, MakeMoveError> {
    let ok = if b.is_check() {
        movegen::evasions(b).contains(&mv)
    } else {
        let pinned = b.pinned(b.side());
        movegen::move_if_legal(b, mv, pinned).is_some()
    };
    if !ok {
        return Err(MakeMoveError::NotLegal);
    }
    let mut b_copy = b.clone();
    let _ = unsafe { make_move_unchecked(&mut b_copy, mv) };
    debug_assert!(!b_copy.is_opponent_king_attacked());
    Ok(b_copy)
}
