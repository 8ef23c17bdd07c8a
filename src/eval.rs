//! Static evaluation: material plus piece-square tables
//!
//! Tables are written from white's point of view with a8 at index 0, the same
//! orientation as the board. A black piece on `sq` reads the white entry of
//! the mirrored square `sq ^ 56`. Queens have no positional table.

use crate::piece::{Color, Piece, PieceKind};
use crate::utils::{iter_bits, Bitboard, Square};

pub const PAWN_VALUE: i32 = 100;
pub const KNIGHT_VALUE: i32 = 300;
pub const BISHOP_VALUE: i32 = 350;
pub const ROOK_VALUE: i32 = 500;
pub const QUEEN_VALUE: i32 = 1000;
pub const KING_VALUE: i32 = 10000;

#[rustfmt::skip]
const PAWN_TABLE: [i32; 64] = [
     90,  90,  90,  90,  90,  90,  90,  90,
     30,  30,  30,  40,  40,  30,  30,  30,
     20,  20,  20,  30,  30,  30,  20,  20,
     10,  10,  10,  20,  20,  10,  10,  10,
      5,   5,  10,  20,  20,   5,   5,   5,
      0,   0,   0,   5,   5,   0,   0,   0,
      0,   0,   0, -10, -10,   0,   0,   0,
      0,   0,   0,   0,   0,   0,   0,   0,
];

#[rustfmt::skip]
const KNIGHT_TABLE: [i32; 64] = [
     -5,   0,   0,   0,   0,   0,   0,  -5,
     -5,   0,   0,  10,  10,   0,   0,  -5,
     -5,   5,  20,  20,  20,  20,   5,  -5,
     -5,  10,  20,  30,  30,  20,  10,  -5,
     -5,  10,  20,  30,  30,  20,  10,  -5,
     -5,   5,  20,  10,  10,  20,   5,  -5,
     -5,   0,   0,   0,   0,   0,   0,  -5,
     -5, -10,   0,   0,   0,   0, -10,  -5,
];

#[rustfmt::skip]
const BISHOP_TABLE: [i32; 64] = [
      0,   0,   0,   0,   0,   0,   0,   0,
      0,   0,   0,   0,   0,   0,   0,   0,
      0,   0,   0,  10,  10,   0,   0,   0,
      0,   0,  10,  20,  20,  10,   0,   0,
      0,   0,  10,  20,  20,  10,   0,   0,
      0,  10,   0,   0,   0,   0,  10,   0,
      0,  30,   0,   0,   0,   0,  30,   0,
      0,   0, -10,   0,   0, -10,   0,   0,
];

#[rustfmt::skip]
const ROOK_TABLE: [i32; 64] = [
     50,  50,  50,  50,  50,  50,  50,  50,
     50,  50,  50,  50,  50,  50,  50,  50,
      0,   0,  10,  20,  20,  10,   0,   0,
      0,   0,  10,  20,  20,  10,   0,   0,
      0,   0,  10,  20,  20,  10,   0,   0,
      0,   0,  10,  20,  20,  10,   0,   0,
      0,   0,  10,  20,  20,  10,   0,   0,
      0,   0,   0,  20,  20,   0,   0,   0,
];

#[rustfmt::skip]
const KING_TABLE: [i32; 64] = [
      0,   0,   0,   0,   0,   0,   0,   0,
      0,   0,   5,   5,   5,   5,   0,   0,
      0,   5,   5,  10,  10,   5,   5,   0,
      0,   5,  10,  20,  20,  10,   5,   0,
      0,   5,  10,  20,  20,  10,   5,   0,
      0,   0,   5,  10,  10,   5,   0,   0,
      0,   5,   5,  -5,  -5,   0,   5,   0,
      0,   0,   5,   0, -15,   0,  10,   0,
];

#[inline]
pub fn material_value(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::Pawn => PAWN_VALUE,
        PieceKind::Knight => KNIGHT_VALUE,
        PieceKind::Bishop => BISHOP_VALUE,
        PieceKind::Rook => ROOK_VALUE,
        PieceKind::Queen => QUEEN_VALUE,
        PieceKind::King => KING_VALUE,
    }
}

/// Positional bonus for `kind` on `sq`, seen from its own side
#[inline]
pub fn square_bonus(kind: PieceKind, color: Color, sq: Square) -> i32 {
    let sq = match color {
        Color::White => sq,
        Color::Black => sq ^ 56,
    };
    match kind {
        PieceKind::Pawn => PAWN_TABLE[sq],
        PieceKind::Knight => KNIGHT_TABLE[sq],
        PieceKind::Bishop => BISHOP_TABLE[sq],
        PieceKind::Rook => ROOK_TABLE[sq],
        PieceKind::Queen => 0,
        PieceKind::King => KING_TABLE[sq],
    }
}

/// Score of the piece bitboards from white's point of view
pub fn evaluate_absolute(pieces: &[Bitboard; 12]) -> i32 {
    let mut score = 0;
    for piece in Piece::ALL {
        let (kind, color) = (piece.kind(), piece.color());
        let sign = match color {
            Color::White => 1,
            Color::Black => -1,
        };
        for sq in iter_bits(pieces[piece.index()]) {
            score += sign * (material_value(kind) + square_bonus(kind, color, sq));
        }
    }
    score
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::{square, E1, E8};

    #[test]
    fn tables_mirror_between_colours() {
        // white pawn on e4 and black pawn on e5 get the same bonus
        let e4 = square(4, 3);
        let e5 = square(4, 4);
        assert_eq!(
            square_bonus(PieceKind::Pawn, Color::White, e4),
            square_bonus(PieceKind::Pawn, Color::Black, e5)
        );
        assert_eq!(square_bonus(PieceKind::King, Color::White, E1), -15);
        assert_eq!(square_bonus(PieceKind::King, Color::Black, E8), -15);
        assert_eq!(square_bonus(PieceKind::Queen, Color::White, e4), 0);
    }

    #[test]
    fn lone_kings_balance() {
        let mut pieces = [0u64; 12];
        pieces[Piece::WhiteKing.index()] = 1 << E1;
        pieces[Piece::BlackKing.index()] = 1 << E8;
        assert_eq!(evaluate_absolute(&pieces), 0);

        pieces[Piece::WhiteRook.index()] = 1 << square(0, 0);
        assert_eq!(evaluate_absolute(&pieces), ROOK_VALUE);
    }
}
