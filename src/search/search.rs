//! Main search engine implementation
//!
//! Iterative deepening over a fail-hard negamax with principal-variation
//! windows, check extension, null-move pruning and late move reduction.
//! Leaves are resolved by a capture-only quiescence search.
//!
//! Positions are restored by copy: every move is tried on the live position
//! after saving a clone, and the clone is written back once the subtree is
//! done.

use tracing::{debug, info};

use super::params::SearchParams;
use super::perft;
use super::pv::PvTable;
use super::stats::SearchStats;
use super::ordering::{MoveOrdering, PV_SCORE};
use crate::board::Position;
use crate::moves::{Move, MoveList};

/// Score of a mate delivered at the root; shallower mates score higher
pub const MATE_SCORE: i32 = 49_000;
/// Bound beyond any reachable score
pub const INFINITY: i32 = 50_000;
pub const DRAW_SCORE: i32 = 0;
/// Hard ceiling on search ply, quiescence included
pub const MAX_PLY: usize = 64;

/// Outcome of an iterative-deepening search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchReport {
    /// `None` when the root has no legal move
    pub best_move: Option<Move>,
    /// Relative to the side to move at the root
    pub score: i32,
    /// Main-search plus quiescence nodes
    pub nodes: u64,
    /// Deepest completed iteration
    pub depth: u8,
    pub principal_variation: Vec<Move>,
}

impl SearchReport {
    /// Whether the score announces a forced mate for either side
    pub fn is_mate(&self) -> bool {
        self.score.abs() > MATE_SCORE - MAX_PLY as i32
    }
}

/// Search engine owning the per-search scratch state
pub struct SearchEngine {
    params: SearchParams,
    stats: SearchStats,
    ordering: MoveOrdering,
    pv: PvTable,
    ply: usize,
    follow_pv: bool,
    score_pv: bool,
    best_move: Move,
}

impl Default for SearchEngine {
    fn default() -> Self {
        Self::new(SearchParams::default())
    }
}

impl SearchEngine {
    pub fn new(params: SearchParams) -> Self {
        Self {
            params,
            stats: SearchStats::new(),
            ordering: MoveOrdering::new(),
            pv: PvTable::new(),
            ply: 0,
            follow_pv: false,
            score_pv: false,
            best_move: Move::NULL,
        }
    }

    pub fn params(&self) -> &SearchParams {
        &self.params
    }

    /// Statistics of the last search
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Search to the configured `max_depth`
    pub fn search(&mut self, position: &Position<'_>) -> SearchReport {
        self.run_iterative_deepening(position, self.params.max_depth)
    }

    /// Leaf count of the legal move tree, recorded as nodes in the stats
    pub fn perft(&mut self, position: &Position<'_>, depth: u32) -> u64 {
        self.stats.reset();
        self.stats.start_timing();
        let nodes = perft::perft(position, depth);
        self.stats.nodes = nodes;
        self.stats.update_timing();
        nodes
    }

    fn reset(&mut self) {
        self.stats.reset();
        self.ordering.clear();
        self.pv.clear();
        self.ply = 0;
        self.follow_pv = false;
        self.score_pv = false;
        self.best_move = Move::NULL;
    }

    /// Search depths 1..=`max_depth`, each inside an aspiration window
    /// around the previous score. A result on or outside the window is not
    /// trusted: that depth is searched again with the full window.
    pub fn run_iterative_deepening(&mut self, position: &Position<'_>, max_depth: u8) -> SearchReport {
        self.reset();
        self.stats.start_timing();

        let mut pos = position.clone();
        let mut report = SearchReport {
            best_move: None,
            score: 0,
            nodes: 0,
            depth: 0,
            principal_variation: Vec::new(),
        };

        let mut alpha = -INFINITY;
        let mut beta = INFINITY;
        let mut depth = 1;

        while depth <= max_depth {
            self.follow_pv = true;
            self.score_pv = false;
            self.best_move = Move::NULL;
            self.ply = 0;
            self.pv.begin_iteration();

            let score = self.negamax(&mut pos, alpha, beta, i32::from(depth));
            debug_assert_eq!(pos, *position, "search must restore the root position");

            let full_window = alpha == -INFINITY && beta == INFINITY;
            if !full_window && (score <= alpha || score >= beta) {
                debug!(depth, score, alpha, beta, "aspiration window failed, re-searching");
                self.stats.inc_aspiration_failure();
                alpha = -INFINITY;
                beta = INFINITY;
                continue;
            }

            report.best_move = (!self.best_move.is_null()).then_some(self.best_move);
            report.score = score;
            report.depth = depth;
            report.principal_variation = self.pv.line().to_vec();
            report.nodes = self.stats.total_nodes();

            info!(
                depth,
                score,
                nodes = report.nodes,
                pv = %format_line(&report.principal_variation),
                "iteration complete"
            );

            if self.params.enable_aspiration {
                alpha = score - self.params.aspiration_window;
                beta = score + self.params.aspiration_window;
            }
            depth += 1;
        }

        self.stats.update_timing();
        self.stats.log_summary();
        report
    }

    fn negamax(&mut self, pos: &mut Position<'_>, mut alpha: i32, beta: i32, mut depth: i32) -> i32 {
        self.pv.start(self.ply);

        if self.ply >= MAX_PLY {
            return pos.static_evaluate();
        }
        if depth <= 0 {
            return self.quiescence(pos, alpha, beta);
        }

        self.stats.inc_node();

        let in_check = pos.is_king_in_check();
        if in_check {
            depth += 1;
        }

        let reduction = i32::from(self.params.null_move_reduction_limit);
        if self.params.enable_null_move_pruning && depth >= reduction && !in_check && self.ply > 0 {
            let saved = pos.clone();
            self.ply += 1;
            pos.make_null_move();
            let score = -self.negamax(pos, -beta, -beta + 1, depth - reduction);
            self.ply -= 1;
            *pos = saved;

            if score >= beta {
                self.stats.inc_null_move_cutoff();
                return beta;
            }
        }

        let mut moves = pos.generate_pseudolegal_moves();
        if self.follow_pv {
            self.enable_pv_scoring(&moves);
        }
        self.sort_moves(pos, &mut moves);

        let mut legal_moves = 0;
        let mut moves_searched = 0u32;

        for &mv in moves.iter() {
            let saved = pos.clone();
            self.ply += 1;
            if !pos.make_move(mv) {
                self.ply -= 1;
                continue;
            }
            legal_moves += 1;

            let score = if moves_searched == 0 {
                -self.negamax(pos, -beta, -alpha, depth - 1)
            } else {
                let reduce = self.params.enable_lmr
                    && moves_searched >= self.params.lmr_full_depth_moves
                    && depth >= i32::from(self.params.lmr_reduction_limit)
                    && !in_check
                    && mv.is_quiet();

                let mut score = if reduce {
                    self.stats.inc_lmr_probe();
                    -self.negamax(pos, -alpha - 1, -alpha, depth - 2)
                } else {
                    // force the full-depth probe below
                    alpha + 1
                };

                if score > alpha {
                    score = -self.negamax(pos, -alpha - 1, -alpha, depth - 1);
                    if score > alpha && score < beta {
                        self.stats.inc_pvs_research();
                        score = -self.negamax(pos, -beta, -alpha, depth - 1);
                    }
                }
                score
            };

            self.ply -= 1;
            *pos = saved;
            moves_searched += 1;

            if score >= beta {
                if !mv.is_capture() {
                    self.ordering.store_killer(self.ply, mv);
                }
                self.stats.inc_beta_cutoff();
                return beta;
            }

            if score > alpha {
                if !mv.is_capture() {
                    self.ordering.update_history(mv, depth);
                }
                alpha = score;
                self.pv.update(self.ply, mv);
                if self.ply == 0 {
                    self.best_move = mv;
                }
            }
        }

        if legal_moves == 0 {
            return if in_check {
                -MATE_SCORE + self.ply as i32
            } else {
                DRAW_SCORE
            };
        }

        alpha
    }

    fn quiescence(&mut self, pos: &mut Position<'_>, mut alpha: i32, beta: i32) -> i32 {
        self.stats.inc_qsearch_node();

        let stand_pat = pos.static_evaluate();
        if self.ply >= MAX_PLY {
            return stand_pat;
        }
        if stand_pat >= beta {
            return beta;
        }
        if stand_pat > alpha {
            alpha = stand_pat;
        }

        let mut moves = pos.generate_pseudolegal_moves();
        self.sort_moves(pos, &mut moves);

        for &mv in moves.iter() {
            if !mv.is_capture() {
                continue;
            }
            let saved = pos.clone();
            self.ply += 1;
            if !pos.make_move(mv) {
                self.ply -= 1;
                continue;
            }

            let score = -self.quiescence(pos, -beta, -alpha);

            self.ply -= 1;
            *pos = saved;

            if score >= beta {
                return beta;
            }
            if score > alpha {
                alpha = score;
            }
        }

        alpha
    }

    /// Keep following the previous iteration's line while it is playable here
    fn enable_pv_scoring(&mut self, moves: &MoveList) {
        self.follow_pv = false;
        let pv_move = self.pv.line_move(self.ply);
        if !pv_move.is_null() && moves.contains(pv_move) {
            self.follow_pv = true;
            self.score_pv = true;
        }
    }

    fn sort_moves(&mut self, pos: &Position<'_>, moves: &mut MoveList) {
        let ply = self.ply;
        let pv_move = self.pv.line_move(ply);
        let ordering = &self.ordering;
        let score_pv = &mut self.score_pv;
        moves.sort_by_score(|mv| {
            if *score_pv && mv == pv_move {
                *score_pv = false;
                return PV_SCORE;
            }
            ordering.score_move(pos, mv, ply)
        });
    }
}

fn format_line(line: &[Move]) -> String {
    line.iter()
        .map(|mv| mv.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
