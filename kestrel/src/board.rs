//! Board and related things

use crate::bitboard::Bitboard;
use crate::types::{
    self, CastlingRights, CastlingSide, Cell, Color, File, Piece, Rank, Square,
};
use crate::{attack, between, geometry, movegen, zobrist};

use std::fmt::{self, Display};
use std::hash::{Hash, Hasher};
use std::num::ParseIntError;
use std::str::FromStr;

use thiserror::Error;

/// Board validation error
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum ValidateError {
    /// Invalid en passant square specified (i.e. it is located on an invalid rank)
    #[error("invalid enpassant position {0}")]
    InvalidEnpassant(Square),
    /// Too many pieces of given color
    #[error("too many pieces of color {0:?}")]
    TooManyPieces(Color),
    /// One of the sides doesn't have a king
    #[error("no king of color {0:?}")]
    NoKing(Color),
    /// One of the sides has more than one king
    #[error("more than one king of color {0:?}")]
    TooManyKings(Color),
    /// There is a pawn on the 1st or on the 8th rank
    #[error("invalid pawn position {0}")]
    InvalidPawn(Square),
    /// Opponent's king is under attack
    #[error("opponent's king is attacked")]
    OpponentKingAttacked,
}

/// Error parsing the first part of FEN (i.e. the positions of pieces on the board)
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum CellsParseError {
    /// Rank is too large
    #[error("too many items in rank {0}")]
    RankOverflow(Rank),
    /// Rank is too small
    #[error("not enough items in rank {0}")]
    RankUnderflow(Rank),
    /// Too many ranks
    #[error("too many ranks")]
    Overflow,
    /// Not enough ranks
    #[error("not enough ranks")]
    Underflow,
    /// Unexpected character
    #[error("unexpected char {0:?}")]
    UnexpectedChar(char),
}

/// Error parsing [`RawBoard`] from FEN
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum RawFenParseError {
    /// FEN contains non-ASCII characters
    #[error("non-ASCII data in FEN")]
    NonAscii,
    /// FEN doesn't have board part
    #[error("board not specified")]
    NoBoard,
    /// Error parsing board from FEN
    #[error("bad board: {0}")]
    Board(#[from] CellsParseError),
    /// FEN doesn't have move side part
    #[error("no move side")]
    NoMoveSide,
    /// Error parsing move side from FEN
    #[error("bad move side: {0}")]
    MoveSide(#[from] types::ColorParseError),
    /// FEN doesn't have castling rights part
    #[error("no castling rights")]
    NoCastling,
    /// Error parsing castling rights from FEN
    #[error("bad castling rights: {0}")]
    Castling(#[from] types::CastlingRightsParseError),
    /// FEN doesn't have enpassant part
    #[error("no enpassant")]
    NoEnpassant,
    /// Error parsing enpassant from FEN
    #[error("bad enpassant: {0}")]
    Enpassant(#[from] types::SquareParseError),
    /// Enpassant rank is invalid
    #[error("invalid enpassant rank {0}")]
    InvalidEnpassantRank(Rank),
    /// Error parsing move counter
    #[error("bad move counter: {0}")]
    MoveCounter(ParseIntError),
    /// Error parsing move number
    #[error("bad move number: {0}")]
    MoveNumber(ParseIntError),
    /// FEN contains extra data
    #[error("extra data in FEN")]
    ExtraData,
}

/// Error parsing [`Board`] from FEN
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum FenParseError {
    /// Board cannot be parsed
    #[error("cannot parse fen: {0}")]
    Fen(#[from] RawFenParseError),
    /// Board was parsed, but it's invalid
    #[error("invalid position: {0}")]
    Valid(#[from] ValidateError),
}

/// Raw chess board
///
/// Raw board contains all the necessary information about the chess position. But, unlike
/// [`Board`], it is not validated and may contain an invalid position.
///
/// Raw board can be used to build or edit the position programmatically. After changing the
/// necessary fields, it must be converted to [`Board`] via [`Board::try_from()`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct RawBoard {
    /// Contents of the board
    pub cells: [Cell; 64],
    /// Side to move
    pub side: Color,
    /// Castling rights
    pub castling: CastlingRights,
    /// En passant target square
    ///
    /// `None` if no en passant capture is possible. Otherwise, it contains the
    /// square skipped by the pawn which has just made a double move, i.e. the
    /// destination square of a possible en passant capture, as in FEN.
    pub ep_square: Option<Square>,
    /// Number of half-moves without pawn moves or captures
    pub move_counter: u16,
    /// Move number
    ///
    /// Note that this is move number, not half-move number. It is incremented after each
    /// move by Black.
    pub move_number: u16,
}

impl RawBoard {
    /// Returns an empty `RawBoard`
    ///
    /// Does the same as [`RawBoard::default()`], except that this function is `const`.
    #[inline]
    pub const fn empty() -> RawBoard {
        RawBoard {
            cells: [Cell::EMPTY; 64],
            side: Color::White,
            castling: CastlingRights::EMPTY,
            ep_square: None,
            move_counter: 0,
            move_number: 1,
        }
    }

    /// Returns a board with the initial position
    pub fn initial() -> RawBoard {
        let mut res = RawBoard {
            cells: [Cell::EMPTY; 64],
            side: Color::White,
            castling: CastlingRights::FULL,
            ep_square: None,
            move_counter: 0,
            move_number: 1,
        };
        for file in File::iter() {
            res.put2(file, Rank::R2, Cell::from_parts(Color::White, Piece::Pawn));
            res.put2(file, Rank::R7, Cell::from_parts(Color::Black, Piece::Pawn));
        }
        for (color, rank) in [(Color::White, Rank::R1), (Color::Black, Rank::R8)] {
            res.put2(File::A, rank, Cell::from_parts(color, Piece::Rook));
            res.put2(File::B, rank, Cell::from_parts(color, Piece::Knight));
            res.put2(File::C, rank, Cell::from_parts(color, Piece::Bishop));
            res.put2(File::D, rank, Cell::from_parts(color, Piece::Queen));
            res.put2(File::E, rank, Cell::from_parts(color, Piece::King));
            res.put2(File::F, rank, Cell::from_parts(color, Piece::Bishop));
            res.put2(File::G, rank, Cell::from_parts(color, Piece::Knight));
            res.put2(File::H, rank, Cell::from_parts(color, Piece::Rook));
        }
        res
    }

    /// Parses a board from FEN
    #[inline]
    pub fn from_fen(fen: &str) -> Result<RawBoard, RawFenParseError> {
        RawBoard::from_str(fen)
    }

    /// Returns the contents of square `sq`
    #[inline]
    pub fn get(&self, sq: Square) -> Cell {
        unsafe { *self.cells.get_unchecked(sq.index()) }
    }

    /// Returns the contents of the square with file `file` and rank `rank`
    #[inline]
    pub fn get2(&self, file: File, rank: Rank) -> Cell {
        self.get(Square::from_parts(file, rank))
    }

    /// Puts `cell` to square `sq`
    #[inline]
    pub fn put(&mut self, sq: Square, cell: Cell) {
        unsafe {
            *self.cells.get_unchecked_mut(sq.index()) = cell;
        }
    }

    /// Puts `cell` to the square with file `file` and rank `rank`
    #[inline]
    pub fn put2(&mut self, file: File, rank: Rank, cell: Cell) {
        self.put(Square::from_parts(file, rank), cell);
    }

    /// Returns Zobrist hash of the board
    ///
    /// Note that Zobrist hash doesn't contain move counter and move number, so it can be used
    /// to detect draw by repetitions.
    #[inline]
    pub fn zobrist_hash(&self) -> u64 {
        let mut hash = if self.side == Color::White {
            zobrist::MOVE_SIDE
        } else {
            0
        };
        if let Some(p) = self.ep_square {
            hash ^= zobrist::enpassant(p);
        }
        hash ^= zobrist::castling(self.castling);
        for (i, cell) in self.cells.iter().enumerate() {
            if cell.is_occupied() {
                hash ^= zobrist::pieces(*cell, Square::from_index(i));
            }
        }
        hash
    }

    /// Converts the board into a FEN string
    #[inline]
    pub fn as_fen(&self) -> String {
        self.to_string()
    }
}

impl Default for RawBoard {
    #[inline]
    fn default() -> RawBoard {
        RawBoard::empty()
    }
}

/// Board that contains a valid position
///
/// This board always contains a valid chess position. It is used for literally every chess
/// operation: move generation, making and validating moves, verifying for check.
///
/// It contains a [`RawBoard`] alongside with auxiliary bitboards to make all the chess
/// operations faster.
///
/// # Safety
///
/// The board must be always valid (i. e. `Ok(b.clone()) == b.raw().try_into()` must always
/// hold). The only allowed exception is attack on the opponent's king after making a
/// semi-legal move. In this case, you must call [`Board::is_opponent_king_attacked()`] and
/// undo the offending move before doing anything else.
#[derive(Debug, Clone)]
pub struct Board {
    pub(crate) r: RawBoard,
    pub(crate) hash: u64,
    pub(crate) white: Bitboard,
    pub(crate) black: Bitboard,
    pub(crate) all: Bitboard,
    pub(crate) pieces: [Bitboard; Cell::COUNT],
}

impl Board {
    /// Returns a board with the initial position
    pub fn initial() -> Board {
        RawBoard::initial().try_into().unwrap()
    }

    /// Parses a board from FEN
    pub fn from_fen(fen: &str) -> Result<Board, FenParseError> {
        Board::from_str(fen)
    }

    /// Returns a view over the raw board
    #[inline]
    pub fn raw(&self) -> &RawBoard {
        &self.r
    }

    /// Returns the contents of square `sq`
    #[inline]
    pub fn get(&self, sq: Square) -> Cell {
        self.r.get(sq)
    }

    /// Returns the contents of the square with file `file` and rank `rank`
    #[inline]
    pub fn get2(&self, file: File, rank: Rank) -> Cell {
        self.r.get2(file, rank)
    }

    /// Returns side to move
    #[inline]
    pub fn side(&self) -> Color {
        self.r.side
    }

    /// Returns the en passant target square, if any
    #[inline]
    pub fn ep_square(&self) -> Option<Square> {
        self.r.ep_square
    }

    /// Returns the bitboard over all the pieces with color `c`
    #[inline]
    pub fn color(&self, c: Color) -> Bitboard {
        if c == Color::White {
            self.white
        } else {
            self.black
        }
    }

    #[inline]
    pub(crate) fn color_mut(&mut self, c: Color) -> &mut Bitboard {
        if c == Color::White {
            &mut self.white
        } else {
            &mut self.black
        }
    }

    /// Returns the bitboard over all the occupied squares
    #[inline]
    pub fn occupied(&self) -> Bitboard {
        self.all
    }

    /// Returns the bitboard over all the empty squares
    #[inline]
    pub fn empty_squares(&self) -> Bitboard {
        !self.all
    }

    /// Returns the bitboard over all the cells equal to `c`
    ///
    /// **Note**: when `c` is an empty cell, the function just returns an empty bitboard,
    /// not the bitboard over all the empty cells.
    #[inline]
    pub fn piece(&self, c: Cell) -> Bitboard {
        unsafe { *self.pieces.get_unchecked(c.index()) }
    }

    /// Returns the bitboard over all the pieces of color `c` and kind `p`
    #[inline]
    pub fn piece2(&self, c: Color, p: Piece) -> Bitboard {
        self.piece(Cell::from_parts(c, p))
    }

    /// Bishops and queens of color `c`
    #[inline]
    pub fn piece_diag(&self, c: Color) -> Bitboard {
        self.piece2(c, Piece::Bishop) | self.piece2(c, Piece::Queen)
    }

    /// Rooks and queens of color `c`
    #[inline]
    pub fn piece_line(&self, c: Color) -> Bitboard {
        self.piece2(c, Piece::Rook) | self.piece2(c, Piece::Queen)
    }

    /// All sliding pieces on the board, regardless of color
    #[inline]
    pub fn sliders(&self) -> Bitboard {
        self.piece_diag(Color::White)
            | self.piece_line(Color::White)
            | self.piece_diag(Color::Black)
            | self.piece_line(Color::Black)
    }

    #[inline]
    pub(crate) fn piece_mut(&mut self, c: Cell) -> &mut Bitboard {
        unsafe { self.pieces.get_unchecked_mut(c.index()) }
    }

    /// Returns the position of the king of color `c`
    #[inline]
    pub fn king_pos(&self, c: Color) -> Square {
        self.piece(Cell::from_parts(c, Piece::King)).first()
    }

    /// Returns the Zobrist hash of the position
    #[inline]
    pub fn zobrist_hash(&self) -> u64 {
        self.hash
    }

    /// Returns the number of pieces of color `c` and kind `p`
    #[inline]
    pub fn piece_count(&self, c: Color, p: Piece) -> u32 {
        self.piece2(c, p).len()
    }

    /// Initial square of the kingside rook of color `c`
    #[inline]
    pub fn initial_kr_square(&self, c: Color) -> Square {
        Square::from_parts(File::H, geometry::castling_rank(c))
    }

    /// Initial square of the queenside rook of color `c`
    #[inline]
    pub fn initial_qr_square(&self, c: Color) -> Square {
        Square::from_parts(File::A, geometry::castling_rank(c))
    }

    /// Returns `true` if color `c` can still castle to at least one side
    #[inline]
    pub fn can_castle(&self, c: Color) -> bool {
        self.r.castling.has_color(c)
    }

    /// Returns `true` if color `c` can still castle kingside
    #[inline]
    pub fn can_castle_kingside(&self, c: Color) -> bool {
        self.r.castling.has(c, CastlingSide::King)
    }

    /// Returns `true` if color `c` can still castle queenside
    #[inline]
    pub fn can_castle_queenside(&self, c: Color) -> bool {
        self.r.castling.has(c, CastlingSide::Queen)
    }

    /// Returns `true` if square `sq` is attacked by any piece of color `by`
    #[inline]
    pub fn is_attacked(&self, sq: Square, by: Color) -> bool {
        movegen::is_square_attacked(self, sq, by)
    }

    /// Returns `true` if the piece on `from` attacks square `to`
    ///
    /// Returns `false` when `from` is empty.
    pub fn piece_attacks_square(&self, from: Square, to: Square) -> bool {
        let dst = Bitboard::from_square(to);
        let att = match self.get(from).piece() {
            None => return false,
            Some(Piece::Pawn) => match self.get(from).color() {
                Some(c) => attack::pawn(c, from),
                None => return false,
            },
            Some(Piece::King) => attack::king(from),
            Some(Piece::Knight) => attack::knight(from),
            Some(Piece::Bishop) => attack::bishop(from, self.all),
            Some(Piece::Rook) => attack::rook(from, self.all),
            Some(Piece::Queen) => attack::queen(from, self.all),
        };
        (att & dst).is_nonempty()
    }

    /// Returns `true` if the opponent's king is under attack
    ///
    /// If it is under attack, you must undo the offending move before doing anything else.
    /// See doc for [`Board`] for more details.
    #[inline]
    pub fn is_opponent_king_attacked(&self) -> bool {
        let c = self.r.side;
        movegen::is_square_attacked(self, self.king_pos(c.inv()), c)
    }

    /// Returns `true` if the current side is in check
    #[inline]
    pub fn is_check(&self) -> bool {
        let c = self.r.side;
        movegen::is_square_attacked(self, self.king_pos(c), c.inv())
    }

    /// Returns all the pieces that give check currently
    #[inline]
    pub fn checkers(&self) -> Bitboard {
        let c = self.r.side;
        movegen::square_attackers(self, self.king_pos(c), c.inv())
    }

    fn bishop_xray(&self, blockers: Bitboard, king: Square) -> Bitboard {
        let near = attack::bishop(king, self.all) & blockers;
        attack::bishop(king, self.all ^ near)
    }

    fn rook_xray(&self, blockers: Bitboard, king: Square) -> Bitboard {
        let near = attack::rook(king, self.all) & blockers;
        attack::rook(king, self.all ^ near)
    }

    /// Pieces of color `c` that cannot move freely, as moving them would expose
    /// their own king to an enemy sliding attack
    pub fn pinned(&self, c: Color) -> Bitboard {
        let king = self.king_pos(c);
        let ours = self.color(c);
        let mut pinned = Bitboard::EMPTY;

        let pinners = self.bishop_xray(ours, king) & self.piece_diag(c.inv());
        for p in pinners {
            pinned |= between::between(p, king) & ours;
        }

        let pinners = self.rook_xray(ours, king) & self.piece_line(c.inv());
        for p in pinners {
            pinned |= between::between(p, king) & ours;
        }

        pinned
    }

    /// Pieces of color `c` whose move may uncover a check from a friendly
    /// slider standing behind them on a line through the enemy king
    pub fn discovered_check_candidates(&self, c: Color) -> Bitboard {
        let king = self.king_pos(c.inv());
        let ours = self.color(c);
        let mut dc = Bitboard::EMPTY;

        let snipers = self.bishop_xray(ours, king) & self.piece_diag(c);
        for p in snipers {
            dc |= between::between(p, king) & ours;
        }

        let snipers = self.rook_xray(ours, king) & self.piece_line(c);
        for p in snipers {
            dc |= between::between(p, king) & ours;
        }

        dc
    }

    /// Light self-consistency check, intended for debug assertions
    pub fn is_ok(&self) -> bool {
        let mut white = Bitboard::EMPTY;
        let mut black = Bitboard::EMPTY;
        for (idx, cell) in self.r.cells.iter().enumerate() {
            let sq = Square::from_index(idx);
            match cell.color() {
                Some(Color::White) => white.set(sq),
                Some(Color::Black) => black.set(sq),
                None => {}
            }
            if cell.is_occupied() && !self.piece(*cell).has(sq) {
                return false;
            }
        }
        white == self.white
            && black == self.black
            && self.all == (self.white | self.black)
            && self.piece2(Color::White, Piece::King).len() == 1
            && self.piece2(Color::Black, Piece::King).len() == 1
    }

    /// Converts the board into a FEN string
    #[inline]
    pub fn as_fen(&self) -> String {
        self.to_string()
    }
}

impl PartialEq for Board {
    #[inline]
    fn eq(&self, other: &Board) -> bool {
        self.r == other.r
    }
}

impl Eq for Board {}

impl Hash for Board {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.r.hash(state)
    }
}

impl TryFrom<RawBoard> for Board {
    type Error = ValidateError;

    fn try_from(mut raw: RawBoard) -> Result<Board, ValidateError> {
        // Check enpassant
        if let Some(p) = raw.ep_square {
            // Check InvalidEnpassant
            if p.rank() != geometry::enpassant_dst_rank(raw.side) {
                return Err(ValidateError::InvalidEnpassant(p));
            }

            // Reset enpassant if the last move couldn't have been the matching
            // double pawn push
            let victim = p.add(-geometry::pawn_forward_delta(raw.side));
            let src = p.add(geometry::pawn_forward_delta(raw.side));
            if raw.get(victim) != Cell::from_parts(raw.side.inv(), Piece::Pawn)
                || raw.get(p) != Cell::EMPTY
                || raw.get(src) != Cell::EMPTY
            {
                raw.ep_square = None;
            }
        }

        // Reset bad castling flags
        for color in [Color::White, Color::Black] {
            let rank = geometry::castling_rank(color);
            if raw.get2(File::E, rank) != Cell::from_parts(color, Piece::King) {
                raw.castling.unset(color, CastlingSide::Queen);
                raw.castling.unset(color, CastlingSide::King);
            }
            if raw.get2(File::A, rank) != Cell::from_parts(color, Piece::Rook) {
                raw.castling.unset(color, CastlingSide::Queen);
            }
            if raw.get2(File::H, rank) != Cell::from_parts(color, Piece::Rook) {
                raw.castling.unset(color, CastlingSide::King);
            }
        }

        // Calculate bitboards
        let mut white = Bitboard::EMPTY;
        let mut black = Bitboard::EMPTY;
        let mut pieces = [Bitboard::EMPTY; Cell::COUNT];
        for (idx, cell) in raw.cells.iter().enumerate() {
            let sq = Square::from_index(idx);
            if let Some(color) = cell.color() {
                match color {
                    Color::White => white.set(sq),
                    Color::Black => black.set(sq),
                };
                pieces[cell.index()].set(sq);
            }
        }

        // Check TooManyPieces, NoKing, TooManyKings
        if white.len() > 16 {
            return Err(ValidateError::TooManyPieces(Color::White));
        }
        if black.len() > 16 {
            return Err(ValidateError::TooManyPieces(Color::Black));
        }
        let white_king = pieces[Cell::from_parts(Color::White, Piece::King).index()];
        let black_king = pieces[Cell::from_parts(Color::Black, Piece::King).index()];
        if white_king.is_empty() {
            return Err(ValidateError::NoKing(Color::White));
        }
        if black_king.is_empty() {
            return Err(ValidateError::NoKing(Color::Black));
        }
        if white_king.len() > 1 {
            return Err(ValidateError::TooManyKings(Color::White));
        }
        if black_king.len() > 1 {
            return Err(ValidateError::TooManyKings(Color::Black));
        }

        // Check InvalidPawn
        let pawns = pieces[Cell::from_parts(Color::White, Piece::Pawn).index()]
            | pieces[Cell::from_parts(Color::Black, Piece::Pawn).index()];
        const BAD_PAWN_POSES: Bitboard = Bitboard::from_raw(0xff000000000000ff);
        let bad_pawns = pawns & BAD_PAWN_POSES;
        if bad_pawns.is_nonempty() {
            return Err(ValidateError::InvalidPawn(bad_pawns.first()));
        }

        // Check OpponentKingAttacked
        let res = Board {
            r: raw,
            hash: raw.zobrist_hash(),
            white,
            black,
            all: white | black,
            pieces,
        };
        if res.is_opponent_king_attacked() {
            return Err(ValidateError::OpponentKingAttacked);
        }

        Ok(res)
    }
}

impl TryFrom<&RawBoard> for Board {
    type Error = ValidateError;

    fn try_from(raw: &RawBoard) -> Result<Board, ValidateError> {
        (*raw).try_into()
    }
}

fn parse_cells(s: &str) -> Result<[Cell; 64], CellsParseError> {
    type Error = CellsParseError;

    let mut file = 0_usize;
    let mut row = 0_usize;
    let mut cells = [Cell::EMPTY; 64];
    // FEN lists ranks from the 8th one down
    let row_rank = |row: usize| Rank::from_index(7 - row);
    for b in s.bytes() {
        match b {
            b'1'..=b'8' => {
                let add = (b - b'0') as usize;
                if file + add > 8 {
                    return Err(Error::RankOverflow(row_rank(row)));
                }
                file += add;
            }
            b'/' => {
                if file < 8 {
                    return Err(Error::RankUnderflow(row_rank(row)));
                }
                row += 1;
                file = 0;
                if row >= 8 {
                    return Err(Error::Overflow);
                }
            }
            _ => {
                if file >= 8 {
                    return Err(Error::RankOverflow(row_rank(row)));
                }
                let cell = Cell::from_char(b as char).ok_or(Error::UnexpectedChar(b as char))?;
                cells[Square::from_parts(File::from_index(file), row_rank(row)).index()] = cell;
                file += 1;
            }
        };
    }

    if file < 8 {
        return Err(Error::RankUnderflow(row_rank(row)));
    }
    if row < 7 {
        return Err(Error::Underflow);
    }

    Ok(cells)
}

fn parse_ep_square(s: &str, side: Color) -> Result<Option<Square>, RawFenParseError> {
    if s == "-" {
        return Ok(None);
    }
    let ep = Square::from_str(s)?;
    if ep.rank() != geometry::enpassant_dst_rank(side) {
        return Err(RawFenParseError::InvalidEnpassantRank(ep.rank()));
    }
    Ok(Some(ep))
}

impl FromStr for RawBoard {
    type Err = RawFenParseError;

    fn from_str(s: &str) -> Result<RawBoard, Self::Err> {
        type Error = RawFenParseError;

        if !s.is_ascii() {
            return Err(Error::NonAscii);
        }
        let mut iter = s.split(' ').fuse();

        let cells = parse_cells(iter.next().ok_or(Error::NoBoard)?)?;
        let side = Color::from_str(iter.next().ok_or(Error::NoMoveSide)?)?;
        let castling = CastlingRights::from_str(iter.next().ok_or(Error::NoCastling)?)?;
        let ep_square = parse_ep_square(iter.next().ok_or(Error::NoEnpassant)?, side)?;
        let move_counter = match iter.next() {
            Some(s) => u16::from_str(s).map_err(Error::MoveCounter)?,
            None => 0,
        };
        let move_number = match iter.next() {
            Some(s) => u16::from_str(s).map_err(Error::MoveNumber)?,
            None => 1,
        };

        if iter.next().is_some() {
            return Err(Error::ExtraData);
        }

        Ok(RawBoard {
            cells,
            side,
            castling,
            ep_square,
            move_counter,
            move_number,
        })
    }
}

impl FromStr for Board {
    type Err = FenParseError;

    fn from_str(s: &str) -> Result<Board, Self::Err> {
        Ok(RawBoard::from_str(s)?.try_into()?)
    }
}

fn format_cells(cells: &[Cell; 64], f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
    for row in 0..8 {
        let rank = Rank::from_index(7 - row);
        if row != 0 {
            write!(f, "/")?;
        }
        let mut empty = 0;
        for file in File::iter() {
            let cell = cells[Square::from_parts(file, rank).index()];
            if cell.is_free() {
                empty += 1;
                continue;
            }
            if empty != 0 {
                write!(f, "{}", (b'0' + empty) as char)?;
                empty = 0;
            }
            write!(f, "{}", cell)?;
        }
        if empty != 0 {
            write!(f, "{}", (b'0' + empty) as char)?;
        }
    }
    Ok(())
}

impl Display for RawBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        format_cells(&self.cells, f)?;
        write!(f, " {} {}", self.side, self.castling)?;
        match self.ep_square {
            Some(p) => write!(f, " {}", p)?,
            None => write!(f, " -")?,
        };
        write!(f, " {} {}", self.move_counter, self.move_number)?;
        Ok(())
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        self.r.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial() {
        const INI_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

        assert_eq!(RawBoard::initial().to_string(), INI_FEN);
        assert_eq!(Board::initial().to_string(), INI_FEN);
        assert_eq!(RawBoard::from_str(INI_FEN), Ok(RawBoard::initial()));
        assert_eq!(Board::from_str(INI_FEN), Ok(Board::initial()));
        assert!(Board::initial().is_ok());
    }

    #[test]
    fn test_midgame() {
        const FEN: &str = "1rq1r1k1/1p3ppp/pB3n2/3ppP2/Pbb1P3/1PN2B2/2P2QPP/R1R4K w - - 1 21";

        let board = Board::from_fen(FEN).unwrap();
        assert_eq!(board.as_fen(), FEN);
        assert_eq!(
            board.get2(File::B, Rank::R4),
            Cell::from_parts(Color::Black, Piece::Bishop)
        );
        assert_eq!(
            board.get2(File::F, Rank::R2),
            Cell::from_parts(Color::White, Piece::Queen)
        );
        assert_eq!(
            board.king_pos(Color::White),
            Square::from_parts(File::H, Rank::R1)
        );
        assert_eq!(
            board.king_pos(Color::Black),
            Square::from_parts(File::G, Rank::R8)
        );
        assert_eq!(board.raw().side, Color::White);
        assert_eq!(board.raw().castling, CastlingRights::EMPTY);
        assert_eq!(board.raw().ep_square, None);
        assert_eq!(board.raw().move_counter, 1);
        assert_eq!(board.raw().move_number, 21);
    }

    #[test]
    fn test_fixes() {
        const FEN: &str = "r1bq1b1r/ppppkppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQK1R1 w KQkq c6 6 5";

        let raw = RawBoard::from_fen(FEN).unwrap();
        assert_eq!(raw.castling, CastlingRights::FULL);
        assert_eq!(raw.ep_square, Some(Square::from_parts(File::C, Rank::R6)));
        assert_eq!(raw.as_fen(), FEN);

        let board: Board = raw.try_into().unwrap();
        assert_eq!(
            board.raw().castling,
            CastlingRights::EMPTY.with(Color::White, CastlingSide::Queen)
        );
        assert_eq!(board.raw().ep_square, None);
        assert_eq!(
            board.as_fen(),
            "r1bq1b1r/ppppkppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQK1R1 w Q - 6 5"
        );
    }

    #[test]
    fn test_incomplete() {
        assert_eq!(
            RawBoard::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR"),
            Err(RawFenParseError::NoMoveSide)
        );

        assert_eq!(
            RawBoard::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w"),
            Err(RawFenParseError::NoCastling)
        );

        assert_eq!(
            RawBoard::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq"),
            Err(RawFenParseError::NoEnpassant)
        );

        let raw = RawBoard::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -").unwrap();
        assert_eq!(raw.move_counter, 0);
        assert_eq!(raw.move_number, 1);

        let raw =
            RawBoard::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 10").unwrap();
        assert_eq!(raw.move_counter, 10);
        assert_eq!(raw.move_number, 1);
    }

    #[test]
    fn test_check_and_checkers() {
        let b = Board::from_fen("4k3/8/8/8/8/4r3/8/4K3 w - - 0 1").unwrap();
        assert!(b.is_check());
        assert_eq!(
            b.checkers(),
            Bitboard::from_square(Square::from_parts(File::E, Rank::R3))
        );

        let b = Board::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        assert!(!b.is_check());
        assert_eq!(b.checkers(), Bitboard::EMPTY);
    }

    #[test]
    fn test_pinned() {
        // White bishop on d2 is pinned by the rook on d8; the knight on f3 is not pinned
        let b = Board::from_fen("3rk3/8/8/8/8/5N2/3B4/3K4 w - - 0 1").unwrap();
        let pinned = b.pinned(Color::White);
        assert_eq!(
            pinned,
            Bitboard::from_square(Square::from_parts(File::D, Rank::R2))
        );

        // Diagonal pin
        let b = Board::from_fen("4k3/8/8/7b/8/5P2/8/3K4 w - - 0 1").unwrap();
        assert_eq!(
            b.pinned(Color::White),
            Bitboard::from_square(Square::from_parts(File::F, Rank::R3))
        );
    }

    #[test]
    fn test_discovered_check_candidates() {
        // White knight on e4 hides the e1 rook's attack on the black king
        let b = Board::from_fen("4k3/8/8/8/4N3/8/8/2K1R3 w - - 0 1").unwrap();
        assert_eq!(
            b.discovered_check_candidates(Color::White),
            Bitboard::from_square(Square::from_parts(File::E, Rank::R4))
        );

        // A piece shielding the king from its own slider is not a candidate
        // for the opponent
        assert_eq!(b.discovered_check_candidates(Color::Black), Bitboard::EMPTY);
    }

    #[test]
    fn test_piece_attacks_square() {
        let b = Board::initial();
        let g1 = Square::from_parts(File::G, Rank::R1);
        let f3 = Square::from_parts(File::F, Rank::R3);
        let e2 = Square::from_parts(File::E, Rank::R2);
        let e3 = Square::from_parts(File::E, Rank::R3);
        let d1 = Square::from_parts(File::D, Rank::R1);
        assert!(b.piece_attacks_square(g1, f3));
        assert!(!b.piece_attacks_square(d1, e3));
        // Pawns attack diagonally, not forward
        assert!(!b.piece_attacks_square(e2, e3));
        assert!(b.piece_attacks_square(e2, f3));
    }
}
