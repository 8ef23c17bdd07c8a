//! Search for the torre engine core
//!
//! Iterative-deepening alpha-beta with quiescence, move ordering and
//! perft enumeration.

pub mod ordering;
pub mod params;
pub mod perft;
pub mod pv;
pub mod search;
pub mod stats;

pub use self::ordering::MoveOrdering;
pub use self::params::SearchParams;
pub use self::perft::{perft, perft_divide};
pub use self::pv::PvTable;
pub use self::search::{SearchEngine, SearchReport, DRAW_SCORE, INFINITY, MATE_SCORE, MAX_PLY};
pub use self::stats::SearchStats;
