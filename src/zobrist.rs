// Zobrist keys for incremental position hashing
//
// Keys come from a seeded StdRng so two tables built from the same seed hash
// every position identically. Positions borrow the keys, nothing is global.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::piece::Piece;
use crate::utils::Square;

/// Seed used by `ZobristKeys::default`
pub const ZOBRIST_SEED: u64 = 0x5EED_0F_C0FFEE;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZobristKeys {
    pieces: [[u64; 64]; 12],
    en_passant: [u64; 64],
    castling: [u64; 16],
    side: u64,
}

impl ZobristKeys {
    pub fn new(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut keys = ZobristKeys {
            pieces: [[0; 64]; 12],
            en_passant: [0; 64],
            castling: [0; 16],
            side: 0,
        };
        for piece in keys.pieces.iter_mut() {
            for key in piece.iter_mut() {
                *key = rng.random::<u64>();
            }
        }
        for key in keys.en_passant.iter_mut() {
            *key = rng.random::<u64>();
        }
        for key in keys.castling.iter_mut() {
            *key = rng.random::<u64>();
        }
        keys.side = rng.random::<u64>();
        keys
    }

    #[inline]
    pub fn piece(&self, piece: Piece, sq: Square) -> u64 {
        self.pieces[piece.index()][sq]
    }

    #[inline]
    pub fn en_passant(&self, sq: Square) -> u64 {
        self.en_passant[sq]
    }

    /// Key for a full castling-rights value (0..15)
    #[inline]
    pub fn castling(&self, rights: u8) -> u64 {
        self.castling[(rights & 0xF) as usize]
    }

    /// Toggled whenever the side to move changes
    #[inline]
    pub fn side(&self) -> u64 {
        self.side
    }
}

impl Default for ZobristKeys {
    fn default() -> Self {
        Self::new(ZOBRIST_SEED)
    }
}
