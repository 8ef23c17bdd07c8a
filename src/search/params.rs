//! Search parameters and configuration
//!
//! Depth is the only termination control; every pruning heuristic can be
//! switched off independently, which the tests use to compare results.

/// Search parameters for the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParams {
    /// Deepest iteration of iterative deepening, in plies
    pub max_depth: u8,

    /// Half-width of the aspiration window around the previous score, in centipawns
    pub aspiration_window: i32,

    /// Narrow the window around the previous iteration's score
    pub enable_aspiration: bool,

    /// Enable null-move pruning
    pub enable_null_move_pruning: bool,

    /// Null move is tried from this depth and searched at `depth - limit`
    pub null_move_reduction_limit: u8,

    /// Enable late move reduction
    pub enable_lmr: bool,

    /// Moves searched at full depth before reductions start
    pub lmr_full_depth_moves: u32,

    /// Minimum remaining depth for a reduced probe
    pub lmr_reduction_limit: u8,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            max_depth: 8,
            aspiration_window: 50, // 0.5 pawn
            enable_aspiration: true,
            enable_null_move_pruning: true,
            null_move_reduction_limit: 3,
            enable_lmr: true,
            lmr_full_depth_moves: 4,
            lmr_reduction_limit: 3,
        }
    }
}

impl SearchParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set maximum depth in plies
    pub fn max_depth(mut self, depth: u8) -> Self {
        self.max_depth = depth;
        self
    }

    pub fn aspiration_window(mut self, window: i32) -> Self {
        self.aspiration_window = window;
        self
    }

    pub fn enable_aspiration(mut self, enable: bool) -> Self {
        self.enable_aspiration = enable;
        self
    }

    /// Enable or disable null-move pruning
    pub fn enable_null_move_pruning(mut self, enable: bool) -> Self {
        self.enable_null_move_pruning = enable;
        self
    }

    pub fn null_move_reduction_limit(mut self, limit: u8) -> Self {
        self.null_move_reduction_limit = limit;
        self
    }

    /// Enable or disable LMR
    pub fn enable_lmr(mut self, enable: bool) -> Self {
        self.enable_lmr = enable;
        self
    }

    pub fn lmr_full_depth_moves(mut self, moves: u32) -> Self {
        self.lmr_full_depth_moves = moves;
        self
    }

    pub fn lmr_reduction_limit(mut self, depth: u8) -> Self {
        self.lmr_reduction_limit = depth;
        self
    }

    /// Plain alpha-beta: no null move, no reductions, no aspiration
    pub fn exhaustive(self) -> Self {
        self.enable_null_move_pruning(false)
            .enable_lmr(false)
            .enable_aspiration(false)
    }
}
