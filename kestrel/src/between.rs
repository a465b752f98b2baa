//! Between and line tables
//!
//! `between(a, b)` is the set of squares strictly between `a` and `b` when
//! they share a rank, file or diagonal, and empty otherwise. `line(a, b)` is
//! the whole line through both squares (endpoints included), used for
//! pin-alignment tests.

use crate::bitboard::Bitboard;
use crate::types::Square;

const fn dir_between(a: usize, b: usize) -> (i8, i8) {
    let (ar, af) = ((a / 8) as i8, (a % 8) as i8);
    let (br, bf) = ((b / 8) as i8, (b % 8) as i8);
    let (dr, df) = (br - ar, bf - af);
    if a == b {
        return (0, 0);
    }
    if dr == 0 || df == 0 || dr == df || dr == -df {
        (dr.signum(), df.signum())
    } else {
        (0, 0)
    }
}

const fn between_raw(a: usize, b: usize) -> u64 {
    let (dr, df) = dir_between(a, b);
    if dr == 0 && df == 0 {
        return 0;
    }
    let mut res = 0_u64;
    let mut r = (a / 8) as i8 + dr;
    let mut f = (a % 8) as i8 + df;
    while (r * 8 + f) as usize != b {
        res |= 1_u64 << ((r * 8 + f) as usize);
        r += dr;
        f += df;
    }
    res
}

const fn line_raw(a: usize, b: usize) -> u64 {
    let (dr, df) = dir_between(a, b);
    if dr == 0 && df == 0 {
        return 0;
    }
    let mut res = 1_u64 << a;
    let mut d = 0;
    while d < 2 {
        let (sr, sf) = if d == 0 { (dr, df) } else { (-dr, -df) };
        let mut r = (a / 8) as i8 + sr;
        let mut f = (a % 8) as i8 + sf;
        while 0 <= r && r < 8 && 0 <= f && f < 8 {
            res |= 1_u64 << ((r * 8 + f) as usize);
            r += sr;
            f += sf;
        }
        d += 1;
    }
    res
}

const fn build_between() -> [[Bitboard; 64]; 64] {
    let mut res = [[Bitboard::EMPTY; 64]; 64];
    let mut a = 0;
    while a < 64 {
        let mut b = 0;
        while b < 64 {
            res[a][b] = Bitboard::from_raw(between_raw(a, b));
            b += 1;
        }
        a += 1;
    }
    res
}

const fn build_line() -> [[Bitboard; 64]; 64] {
    let mut res = [[Bitboard::EMPTY; 64]; 64];
    let mut a = 0;
    while a < 64 {
        let mut b = 0;
        while b < 64 {
            res[a][b] = Bitboard::from_raw(line_raw(a, b));
            b += 1;
        }
        a += 1;
    }
    res
}

static BETWEEN: [[Bitboard; 64]; 64] = build_between();
static LINE: [[Bitboard; 64]; 64] = build_line();

/// Squares strictly between `a` and `b`; empty unless the squares share a
/// rank, file or diagonal
#[inline]
pub fn between(a: Square, b: Square) -> Bitboard {
    unsafe {
        *BETWEEN
            .get_unchecked(a.index())
            .get_unchecked(b.index())
    }
}

/// The full line through `a` and `b` (endpoints included); empty unless the
/// squares share a rank, file or diagonal
#[inline]
pub fn line(a: Square, b: Square) -> Bitboard {
    unsafe { *LINE.get_unchecked(a.index()).get_unchecked(b.index()) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{File, Rank};

    #[test]
    fn test_bishop_between() {
        let b4 = Square::from_parts(File::B, Rank::R4);
        let e7 = Square::from_parts(File::E, Rank::R7);
        let res = Bitboard::EMPTY
            .with2(File::C, Rank::R5)
            .with2(File::D, Rank::R6);
        assert_eq!(between(b4, e7), res);
        assert_eq!(between(e7, b4), res);

        let f3 = Square::from_parts(File::F, Rank::R3);
        let c6 = Square::from_parts(File::C, Rank::R6);
        let res = Bitboard::EMPTY
            .with2(File::E, Rank::R4)
            .with2(File::D, Rank::R5);
        assert_eq!(between(f3, c6), res);
        assert_eq!(between(c6, f3), res);
    }

    #[test]
    fn test_rook_between() {
        let b4 = Square::from_parts(File::B, Rank::R4);
        let e4 = Square::from_parts(File::E, Rank::R4);
        let res = Bitboard::EMPTY
            .with2(File::C, Rank::R4)
            .with2(File::D, Rank::R4);
        assert_eq!(between(b4, e4), res);
        assert_eq!(between(e4, b4), res);

        let d3 = Square::from_parts(File::D, Rank::R3);
        let d6 = Square::from_parts(File::D, Rank::R6);
        let res = Bitboard::EMPTY
            .with2(File::D, Rank::R4)
            .with2(File::D, Rank::R5);
        assert_eq!(between(d3, d6), res);
        assert_eq!(between(d6, d3), res);
    }

    #[test]
    fn test_not_collinear() {
        let b4 = Square::from_parts(File::B, Rank::R4);
        let e5 = Square::from_parts(File::E, Rank::R5);
        assert_eq!(between(b4, e5), Bitboard::EMPTY);
        assert_eq!(line(b4, e5), Bitboard::EMPTY);
        assert_eq!(between(b4, b4), Bitboard::EMPTY);
    }

    #[test]
    fn test_adjacent() {
        let d4 = Square::from_parts(File::D, Rank::R4);
        let d5 = Square::from_parts(File::D, Rank::R5);
        assert_eq!(between(d4, d5), Bitboard::EMPTY);
        assert!(line(d4, d5).has(d4));
        assert!(line(d4, d5).has(d5));
    }

    #[test]
    fn test_line() {
        let b4 = Square::from_parts(File::B, Rank::R4);
        let e4 = Square::from_parts(File::E, Rank::R4);
        let l = line(b4, e4);
        assert_eq!(l.len(), 8);
        for f in File::iter() {
            assert!(l.has(Square::from_parts(f, Rank::R4)));
        }

        let a1 = Square::from_parts(File::A, Rank::R1);
        let h8 = Square::from_parts(File::H, Rank::R8);
        let l = line(a1, h8);
        assert_eq!(l.len(), 8);
        assert!(l.has(Square::from_parts(File::D, Rank::R4)));
        assert_eq!(line(h8, a1), l);
    }
}
