// Bitboard masks, iterators and helpers for move generation and search
//
// Square mapping: A8=0, B8=1, ..., H8=7, A7=8, ..., H1=63 (rank-major from the
// black side). Every module uses this mapping.

use crate::error::{EngineError, EngineResult};

/// 64-bit set of board squares, one bit per square
pub type Bitboard = u64;

/// Square index 0..63
pub type Square = usize;

// File masks (A is column 0, H column 7)
pub const FILE_A: Bitboard = 0x0101010101010101;
pub const FILE_B: Bitboard = 0x0202020202020202;
pub const FILE_G: Bitboard = 0x4040404040404040;
pub const FILE_H: Bitboard = 0x8080808080808080;

pub const NOT_FILE_A: Bitboard = !FILE_A;
pub const NOT_FILE_H: Bitboard = !FILE_H;
pub const NOT_FILE_AB: Bitboard = !(FILE_A | FILE_B);
pub const NOT_FILE_GH: Bitboard = !(FILE_G | FILE_H);

// Rank masks (A8 is square 0, so rank 8 is the low byte)
pub const RANK_8: Bitboard = 0x00000000000000FF;
pub const RANK_7: Bitboard = 0x000000000000FF00;
pub const RANK_2: Bitboard = 0x00FF000000000000;
pub const RANK_1: Bitboard = 0xFF00000000000000;

// Squares the castling logic refers to by name
pub const A8: Square = 0;
pub const B8: Square = 1;
pub const C8: Square = 2;
pub const D8: Square = 3;
pub const E8: Square = 4;
pub const F8: Square = 5;
pub const G8: Square = 6;
pub const H8: Square = 7;
pub const A1: Square = 56;
pub const B1: Square = 57;
pub const C1: Square = 58;
pub const D1: Square = 59;
pub const E1: Square = 60;
pub const F1: Square = 61;
pub const G1: Square = 62;
pub const H1: Square = 63;

/// Square index from a 0-based file (a=0) and a 0-based rank (rank 1 = 0)
#[inline]
pub const fn square(file: usize, rank: usize) -> Square {
    (7 - rank) * 8 + file
}

/// Coordinate name of a square, e.g. 0 -> "a8", 63 -> "h1"
pub fn square_name(sq: Square) -> String {
    let file = (b'a' + (sq % 8) as u8) as char;
    let rank = (b'8' - (sq / 8) as u8) as char;
    format!("{}{}", file, rank)
}

// Bit operations
#[inline]
pub fn set_bit(bb: &mut Bitboard, sq: Square) {
    *bb |= 1u64 << sq;
}

#[inline]
pub fn clear_bit(bb: &mut Bitboard, sq: Square) {
    *bb &= !(1u64 << sq);
}

#[inline]
pub fn get_bit(bb: Bitboard, sq: Square) -> bool {
    bb & (1u64 << sq) != 0
}

#[inline]
pub fn count_bits(bb: Bitboard) -> u32 {
    bb.count_ones()
}

/// Index of the lowest set bit.
///
/// An empty board here means a caller expected a piece that is not there,
/// which is reported as `EngineError::EmptyBitboard` rather than a sentinel.
#[inline]
pub fn lsb_index(bb: Bitboard) -> EngineResult<Square> {
    if bb == 0 {
        Err(EngineError::EmptyBitboard)
    } else {
        Ok(bb.trailing_zeros() as Square)
    }
}

#[inline]
pub fn pop_lsb(bb: &mut Bitboard) -> Option<Square> {
    if *bb == 0 {
        return None;
    }
    let lsb = bb.trailing_zeros() as Square;
    *bb &= *bb - 1;
    Some(lsb)
}

pub struct BitIter {
    bb: Bitboard,
}

impl Iterator for BitIter {
    type Item = Square;
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        pop_lsb(&mut self.bb)
    }
}

#[inline]
pub fn iter_bits(bb: Bitboard) -> BitIter {
    BitIter { bb }
}
