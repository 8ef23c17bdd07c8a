//! Precomputed attack lookup
//!
//! Built once and then shared read-only by every position that refers to it.
//! Sliding lookups index dense per-square tables sized for the worst case
//! (4096 rook slots, 512 bishop slots), so the index is just the magic hash.

use std::time::Instant;

use tracing::debug;

use crate::attacks::{self, occupancy_subset, Slider};
use crate::error::{EngineError, EngineResult};
use crate::magic::{MagicNumbers, MAGIC_SEED};
use crate::piece::Color;
use crate::utils::{Bitboard, Square};

const BISHOP_SLOTS: usize = 512;
const ROOK_SLOTS: usize = 4096;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttackTables {
    pawn: [[Bitboard; 64]; 2],
    knight: [Bitboard; 64],
    king: [Bitboard; 64],
    bishop_masks: [Bitboard; 64],
    rook_masks: [Bitboard; 64],
    bishop_bits: [u32; 64],
    rook_bits: [u32; 64],
    magics: MagicNumbers,
    bishop: Vec<[Bitboard; BISHOP_SLOTS]>,
    rook: Vec<[Bitboard; ROOK_SLOTS]>,
}

impl AttackTables {
    /// Solve magic numbers from the fixed seed and fill every table
    pub fn new() -> EngineResult<Self> {
        let started = Instant::now();
        let magics = MagicNumbers::with_seed(MAGIC_SEED)?;
        let tables = Self::from_magics(&magics)?;
        debug!(elapsed = ?started.elapsed(), "attack tables built");
        Ok(tables)
    }

    /// Fill the tables from known magic numbers.
    ///
    /// Every magic is checked while filling: a zero magic is reported as
    /// `MagicMissing`, one that maps two different attack sets to the same
    /// slot as `MagicCollision`.
    pub fn from_magics(magics: &MagicNumbers) -> EngineResult<Self> {
        let mut tables = AttackTables {
            pawn: [[0; 64]; 2],
            knight: [0; 64],
            king: [0; 64],
            bishop_masks: [0; 64],
            rook_masks: [0; 64],
            bishop_bits: [0; 64],
            rook_bits: [0; 64],
            magics: magics.clone(),
            bishop: vec![[0; BISHOP_SLOTS]; 64],
            rook: vec![[0; ROOK_SLOTS]; 64],
        };

        for sq in 0..64 {
            tables.pawn[Color::White.index()][sq] = attacks::pawn_attacks(sq, Color::White);
            tables.pawn[Color::Black.index()][sq] = attacks::pawn_attacks(sq, Color::Black);
            tables.knight[sq] = attacks::knight_attacks(sq);
            tables.king[sq] = attacks::king_attacks(sq);

            tables.bishop_masks[sq] = attacks::bishop_relevant_mask(sq);
            tables.rook_masks[sq] = attacks::rook_relevant_mask(sq);
            tables.bishop_bits[sq] = tables.bishop_masks[sq].count_ones();
            tables.rook_bits[sq] = tables.rook_masks[sq].count_ones();

            fill_slider(
                &mut tables.bishop[sq],
                sq,
                Slider::Bishop,
                tables.bishop_masks[sq],
                magics.bishop[sq],
            )?;
            fill_slider(
                &mut tables.rook[sq],
                sq,
                Slider::Rook,
                tables.rook_masks[sq],
                magics.rook[sq],
            )?;
        }

        Ok(tables)
    }

    pub fn magics(&self) -> &MagicNumbers {
        &self.magics
    }

    #[inline]
    pub fn pawn_attacks(&self, color: Color, sq: Square) -> Bitboard {
        self.pawn[color.index()][sq]
    }

    #[inline]
    pub fn knight_attacks(&self, sq: Square) -> Bitboard {
        self.knight[sq]
    }

    #[inline]
    pub fn king_attacks(&self, sq: Square) -> Bitboard {
        self.king[sq]
    }

    #[inline]
    pub fn bishop_attacks(&self, sq: Square, occupancy: Bitboard) -> Bitboard {
        let relevant = occupancy & self.bishop_masks[sq];
        let index = relevant.wrapping_mul(self.magics.bishop[sq]) >> (64 - self.bishop_bits[sq]);
        self.bishop[sq][index as usize]
    }

    #[inline]
    pub fn rook_attacks(&self, sq: Square, occupancy: Bitboard) -> Bitboard {
        let relevant = occupancy & self.rook_masks[sq];
        let index = relevant.wrapping_mul(self.magics.rook[sq]) >> (64 - self.rook_bits[sq]);
        self.rook[sq][index as usize]
    }

    #[inline]
    pub fn queen_attacks(&self, sq: Square, occupancy: Bitboard) -> Bitboard {
        self.bishop_attacks(sq, occupancy) | self.rook_attacks(sq, occupancy)
    }
}

fn fill_slider(
    table: &mut [Bitboard],
    sq: Square,
    slider: Slider,
    mask: Bitboard,
    magic: u64,
) -> EngineResult<()> {
    if magic == 0 {
        return Err(EngineError::MagicMissing { square: sq, slider });
    }
    let bits = mask.count_ones();
    for index in 0..(1usize << bits) {
        let occupancy = occupancy_subset(index, mask);
        let attacks = slider.attacks_for_occupancy(sq, occupancy);
        let slot = (occupancy.wrapping_mul(magic) >> (64 - bits)) as usize;
        if table[slot] != 0 && table[slot] != attacks {
            return Err(EngineError::MagicCollision { square: sq, slider });
        }
        table[slot] = attacks;
    }
    Ok(())
}
