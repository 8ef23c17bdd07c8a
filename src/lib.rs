//! torre: a bitboard chess engine core
//!
//! Attack tables are built once from magic numbers solved at startup and
//! shared by reference with every `Position` and search.
//!
//! ```no_run
//! use torre::{AttackTables, Position, SearchEngine, SearchParams, ZobristKeys};
//!
//! let tables = AttackTables::new()?;
//! let keys = ZobristKeys::default();
//! let position = Position::starting(&tables, &keys);
//! let report = SearchEngine::new(SearchParams::new().max_depth(5)).search(&position);
//! println!("{:?} {}", report.best_move, report.score);
//! # Ok::<(), torre::EngineError>(())
//! ```

pub mod attacks;
pub mod board;
pub mod error;
pub mod eval;
pub mod magic;
pub mod moves;
pub mod piece;
pub mod search;
pub mod setup;
pub mod tables;
pub mod utils;
pub mod zobrist;

pub use board::Position;
pub use error::{EngineError, EngineResult};
pub use magic::MagicNumbers;
pub use moves::{Move, MoveList};
pub use piece::{Color, Piece, PieceKind};
pub use search::{perft, perft_divide, SearchEngine, SearchParams, SearchReport};
pub use setup::{PieceLayout, START_FEN};
pub use tables::AttackTables;
pub use zobrist::ZobristKeys;
