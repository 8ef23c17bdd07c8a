//! Error types for the engine core
//!
//! Only construction-time failures are errors. An illegal move is a normal
//! search outcome and is reported by `Position::make_move` as `false`.

use thiserror::Error;

use crate::attacks::Slider;
use crate::utils::Square;

/// Errors that can occur while building tables or loading positions
#[derive(Error, Debug)]
pub enum EngineError {
    /// The magic-number search ran out of candidate draws
    #[error("no magic number found for {slider} on square {square} after {attempts} draws")]
    MagicNotFound {
        square: Square,
        slider: Slider,
        attempts: u64,
    },

    /// Sliding tables were requested before magic numbers existed
    #[error("magic number for {slider} on square {square} is not initialized")]
    MagicMissing { square: Square, slider: Slider },

    /// A supplied magic number maps two different attack sets to one slot
    #[error("magic number for {slider} on square {square} produces a destructive collision")]
    MagicCollision { square: Square, slider: Slider },

    /// Lowest-set-bit query on an empty bitboard
    #[error("lowest set bit requested from an empty bitboard")]
    EmptyBitboard,

    /// Structured position input breaks the layout contract
    #[error("invalid piece layout: {reason}")]
    InvalidLayout { reason: &'static str },

    /// FEN text rejected by the parser
    #[error("invalid FEN: {0}")]
    Fen(#[from] shakmaty::fen::ParseFenError),
}

/// Result type alias for engine operations
pub type EngineResult<T> = Result<T, EngineError>;
