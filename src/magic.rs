//! Magic number search for sliding piece lookup
//!
//! A magic number for a square turns `occupancy & mask` into a table index
//! with one multiply and one shift:
//!
//! ```text
//! index = (occupancy * magic) >> (64 - relevant_bits)
//! ```
//!
//! The multiply must map every blocker subset of the mask to a slot holding
//! its attack set, so two subsets may share a slot only when their attacks are
//! identical. Candidates are sparse random numbers tried until one works.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace};

use crate::attacks::{occupancy_subset, Slider};
use crate::error::{EngineError, EngineResult};
use crate::utils::{Bitboard, Square};

/// Candidate draws per square before giving up
pub const MAX_MAGIC_ATTEMPTS: u64 = 100_000_000;

/// Seed used by `AttackTables::new`, so every run builds identical tables
pub const MAGIC_SEED: u64 = 0x7A3C_5D1E_9B04_F268;

/// Largest relevant-occupancy set: a rook on a corner
const MAX_SUBSETS: usize = 4096;

/// Search one square's magic number.
///
/// `relevant_bits` is the popcount of the square's relevant mask. Returns
/// `EngineError::MagicNotFound` once `max_attempts` candidates have been
/// rejected; table construction passes `MAX_MAGIC_ATTEMPTS`.
pub fn find_magic(
    square: Square,
    relevant_bits: u32,
    slider: Slider,
    rng: &mut impl Rng,
    max_attempts: u64,
) -> EngineResult<u64> {
    let mask = slider.relevant_mask(square);
    let subsets = 1usize << relevant_bits;
    let shift = 64 - relevant_bits;

    let mut occupancies = [0u64; MAX_SUBSETS];
    let mut attacks = [0u64; MAX_SUBSETS];
    for index in 0..subsets {
        occupancies[index] = occupancy_subset(index, mask);
        attacks[index] = slider.attacks_for_occupancy(square, occupancies[index]);
    }

    // 0 marks a free slot; slider attacks always contain at least one square
    let mut used: Vec<Bitboard> = vec![0; subsets];

    for attempt in 0..max_attempts {
        let magic = rng.random::<u64>() & rng.random::<u64>() & rng.random::<u64>();

        // Too few high bits means the index will not spread
        if (mask.wrapping_mul(magic) & 0xFF00_0000_0000_0000).count_ones() < 6 {
            continue;
        }

        used.fill(0);
        let fits = (0..subsets).all(|index| {
            let slot = (occupancies[index].wrapping_mul(magic) >> shift) as usize;
            if used[slot] == 0 {
                used[slot] = attacks[index];
                true
            } else {
                used[slot] == attacks[index]
            }
        });

        if fits {
            trace!(square, %slider, attempt, magic = format_args!("{magic:#018x}"), "magic found");
            return Ok(magic);
        }
    }

    Err(EngineError::MagicNotFound {
        square,
        slider,
        attempts: max_attempts,
    })
}

/// One magic number per square for each slider family
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MagicNumbers {
    pub bishop: [u64; 64],
    pub rook: [u64; 64],
}

impl MagicNumbers {
    /// Solve all 128 magics, drawing candidates from `rng`
    pub fn find(rng: &mut impl Rng) -> EngineResult<Self> {
        let mut magics = MagicNumbers {
            bishop: [0; 64],
            rook: [0; 64],
        };
        for square in 0..64 {
            let bits = Slider::Bishop.relevant_mask(square).count_ones();
            magics.bishop[square] =
                find_magic(square, bits, Slider::Bishop, rng, MAX_MAGIC_ATTEMPTS)?;
        }
        for square in 0..64 {
            let bits = Slider::Rook.relevant_mask(square).count_ones();
            magics.rook[square] =
                find_magic(square, bits, Slider::Rook, rng, MAX_MAGIC_ATTEMPTS)?;
        }
        debug!("solved 128 magic numbers");
        Ok(magics)
    }

    pub fn with_seed(seed: u64) -> EngineResult<Self> {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::find(&mut rng)
    }

    pub fn get(&self, slider: Slider, square: Square) -> u64 {
        match slider {
            Slider::Bishop => self.bishop[square],
            Slider::Rook => self.rook[square],
        }
    }
}
