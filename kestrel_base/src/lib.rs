//! Base types for the Kestrel chess move generator
//!
//! This crate contains the board primitives shared by the rest of Kestrel:
//! squares, files, ranks, colors, pieces, castling rights, bitboards and
//! the related constants. It is kept free of any move generation logic.

pub mod bitboard;
pub mod bitboard_consts;
pub mod geometry;
pub mod types;
