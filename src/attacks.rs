//! Attack generation from first principles
//!
//! Pure functions computing what a piece attacks from a square. The sliding
//! ray casts here are the slow ground truth: they are only used to fill the
//! magic lookup tables and to check them.

use std::fmt;

use crate::piece::Color;
use crate::utils::{
    count_bits, pop_lsb, set_bit, Bitboard, Square, NOT_FILE_A, NOT_FILE_AB, NOT_FILE_GH,
    NOT_FILE_H,
};

/// Sliding piece families that use magic lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slider {
    Bishop,
    Rook,
}

impl fmt::Display for Slider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slider::Bishop => write!(f, "bishop"),
            Slider::Rook => write!(f, "rook"),
        }
    }
}

impl Slider {
    pub fn relevant_mask(self, sq: Square) -> Bitboard {
        match self {
            Slider::Bishop => bishop_relevant_mask(sq),
            Slider::Rook => rook_relevant_mask(sq),
        }
    }

    pub fn attacks_for_occupancy(self, sq: Square, occupancy: Bitboard) -> Bitboard {
        match self {
            Slider::Bishop => bishop_attacks_for_occupancy(sq, occupancy),
            Slider::Rook => rook_attacks_for_occupancy(sq, occupancy),
        }
    }
}

// ============================================================================
// LEAPING PIECES
// ============================================================================

/// Squares a pawn of `color` standing on `sq` attacks
pub fn pawn_attacks(sq: Square, color: Color) -> Bitboard {
    let pawn = 1u64 << sq;
    let mut attacks = 0u64;
    match color {
        // White pawns advance towards lower indices
        Color::White => {
            if pawn & NOT_FILE_H != 0 {
                attacks |= pawn >> 7;
            }
            if pawn & NOT_FILE_A != 0 {
                attacks |= pawn >> 9;
            }
        }
        Color::Black => {
            if pawn & NOT_FILE_H != 0 {
                attacks |= pawn << 9;
            }
            if pawn & NOT_FILE_A != 0 {
                attacks |= pawn << 7;
            }
        }
    }
    attacks
}

pub fn knight_attacks(sq: Square) -> Bitboard {
    let knight = 1u64 << sq;
    let mut attacks = 0u64;
    if knight & NOT_FILE_H != 0 {
        attacks |= knight >> 15;
        attacks |= knight << 17;
    }
    if knight & NOT_FILE_A != 0 {
        attacks |= knight >> 17;
        attacks |= knight << 15;
    }
    if knight & NOT_FILE_GH != 0 {
        attacks |= knight >> 6;
        attacks |= knight << 10;
    }
    if knight & NOT_FILE_AB != 0 {
        attacks |= knight >> 10;
        attacks |= knight << 6;
    }
    attacks
}

pub fn king_attacks(sq: Square) -> Bitboard {
    let king = 1u64 << sq;
    let mut attacks = (king >> 8) | (king << 8);
    if king & NOT_FILE_H != 0 {
        attacks |= (king >> 7) | (king << 9) | (king << 1);
    }
    if king & NOT_FILE_A != 0 {
        attacks |= (king >> 9) | (king << 7) | (king >> 1);
    }
    attacks
}

// ============================================================================
// RELEVANT OCCUPANCY MASKS (blockers that matter, edges excluded)
// ============================================================================

pub fn bishop_relevant_mask(sq: Square) -> Bitboard {
    let mut mask = 0u64;
    let rank = (sq / 8) as i32;
    let file = (sq % 8) as i32;

    for (dr, df) in [(1, 1), (1, -1), (-1, 1), (-1, -1)] {
        let (mut r, mut f) = (rank + dr, file + df);
        while (1..7).contains(&r) && (1..7).contains(&f) {
            set_bit(&mut mask, (r * 8 + f) as Square);
            r += dr;
            f += df;
        }
    }
    mask
}

pub fn rook_relevant_mask(sq: Square) -> Bitboard {
    let mut mask = 0u64;
    let rank = sq / 8;
    let file = sq % 8;

    for r in (rank + 1)..7 {
        set_bit(&mut mask, r * 8 + file);
    }
    for r in (1..rank).rev() {
        set_bit(&mut mask, r * 8 + file);
    }
    for f in (file + 1)..7 {
        set_bit(&mut mask, rank * 8 + f);
    }
    for f in (1..file).rev() {
        set_bit(&mut mask, rank * 8 + f);
    }
    mask
}

// ============================================================================
// RAY CASTING (slow path, used to build and verify tables)
// ============================================================================

/// Cast a ray from `sq` in direction (dr, df); the first occupied square is
/// included and ends the ray.
fn cast_ray(sq: Square, occupancy: Bitboard, dr: i32, df: i32) -> Bitboard {
    let mut attacks = 0u64;
    let (mut r, mut f) = ((sq / 8) as i32 + dr, (sq % 8) as i32 + df);
    while (0..8).contains(&r) && (0..8).contains(&f) {
        let bit = 1u64 << (r * 8 + f);
        attacks |= bit;
        if occupancy & bit != 0 {
            break;
        }
        r += dr;
        f += df;
    }
    attacks
}

pub fn bishop_attacks_for_occupancy(sq: Square, occupancy: Bitboard) -> Bitboard {
    cast_ray(sq, occupancy, 1, 1)
        | cast_ray(sq, occupancy, 1, -1)
        | cast_ray(sq, occupancy, -1, 1)
        | cast_ray(sq, occupancy, -1, -1)
}

pub fn rook_attacks_for_occupancy(sq: Square, occupancy: Bitboard) -> Bitboard {
    cast_ray(sq, occupancy, 1, 0)
        | cast_ray(sq, occupancy, -1, 0)
        | cast_ray(sq, occupancy, 0, 1)
        | cast_ray(sq, occupancy, 0, -1)
}

// ============================================================================
// OCCUPANCY ENUMERATION
// ============================================================================

/// Map `index` in `[0, 2^popcount(mask))` to one blocker pattern over `mask`.
///
/// Bit `i` of `index` decides whether the `i`-th lowest square of `mask` is
/// occupied, so the mapping is a bijection between indices and subsets.
pub fn occupancy_subset(index: usize, mask: Bitboard) -> Bitboard {
    let mut remaining = mask;
    let mut occupancy = 0u64;
    for bit in 0..count_bits(mask) {
        let Some(sq) = pop_lsb(&mut remaining) else {
            break;
        };
        if index & (1 << bit) != 0 {
            set_bit(&mut occupancy, sq);
        }
    }
    occupancy
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::{square, A1, A8, H1, H8};
    use std::collections::HashSet;

    #[test]
    fn pawn_attacks_do_not_wrap() {
        // a2 white pawn attacks b3 only
        assert_eq!(pawn_attacks(square(0, 1), Color::White), 1u64 << square(1, 2));
        // h7 black pawn attacks g6 only
        assert_eq!(pawn_attacks(square(7, 6), Color::Black), 1u64 << square(6, 5));
        // e4 white pawn attacks d5 and f5
        assert_eq!(
            pawn_attacks(square(4, 3), Color::White),
            (1u64 << square(3, 4)) | (1u64 << square(5, 4))
        );
    }

    #[test]
    fn leaper_counts() {
        assert_eq!(knight_attacks(A8).count_ones(), 2);
        assert_eq!(knight_attacks(square(3, 3)).count_ones(), 8);
        assert_eq!(knight_attacks(square(7, 4)).count_ones(), 4);
        assert_eq!(king_attacks(H1).count_ones(), 3);
        assert_eq!(king_attacks(square(4, 4)).count_ones(), 8);
        assert_eq!(king_attacks(square(0, 4)).count_ones(), 5);
    }

    #[test]
    fn relevant_bit_counts_match_table_sizes() {
        let max_bishop = (0..64).map(|sq| bishop_relevant_mask(sq).count_ones()).max();
        let max_rook = (0..64).map(|sq| rook_relevant_mask(sq).count_ones()).max();
        assert_eq!(max_bishop, Some(9));
        assert_eq!(max_rook, Some(12));
        assert_eq!(rook_relevant_mask(A1).count_ones(), 12);
        assert_eq!(rook_relevant_mask(square(3, 3)).count_ones(), 10);
        assert_eq!(bishop_relevant_mask(H8).count_ones(), 6);
        assert_eq!(bishop_relevant_mask(square(3, 3)).count_ones(), 9);
    }

    #[test]
    fn rays_stop_on_first_blocker() {
        // Rook a1 with a blocker on a4: a2, a3, a4 north plus b1..h1 east
        let blocker = 1u64 << square(0, 3);
        assert_eq!(rook_attacks_for_occupancy(A1, blocker).count_ones(), 10);
        assert_eq!(rook_attacks_for_occupancy(A1, 0).count_ones(), 14);
        assert_eq!(bishop_attacks_for_occupancy(square(3, 3), 0).count_ones(), 13);
    }

    #[test]
    fn occupancy_enumeration_is_a_bijection() {
        let mask = rook_relevant_mask(square(3, 3));
        let count = 1usize << mask.count_ones();
        let subsets: HashSet<Bitboard> = (0..count).map(|i| occupancy_subset(i, mask)).collect();
        assert_eq!(subsets.len(), count);
        assert!(subsets.iter().all(|s| s & !mask == 0));
        assert_eq!(occupancy_subset(0, mask), 0);
        assert_eq!(occupancy_subset(count - 1, mask), mask);
    }
}
