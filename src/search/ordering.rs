//! Move ordering heuristics
//!
//! Moves are scored once and then sorted: principal-variation move first,
//! then captures by most valuable victim / least valuable attacker, then the
//! two killer moves of the ply, then quiet moves by history score.

use crate::board::Position;
use crate::moves::Move;
use crate::piece::PieceKind;

use super::search::MAX_PLY;

pub const PV_SCORE: i32 = 20_000;
pub const CAPTURE_SCORE: i32 = 10_000;
pub const FIRST_KILLER_SCORE: i32 = 9_000;
pub const SECOND_KILLER_SCORE: i32 = 8_000;

/// Most valuable victim / least valuable attacker, indexed [attacker][victim]
#[rustfmt::skip]
pub const MVV_LVA: [[i32; 6]; 6] = [
    //  P    N    B    R    Q    K   (victim)
    [105, 205, 305, 405, 505, 605], // pawn
    [104, 204, 304, 404, 504, 604], // knight
    [103, 203, 303, 403, 503, 603], // bishop
    [102, 202, 302, 402, 502, 602], // rook
    [101, 201, 301, 401, 501, 601], // queen
    [100, 200, 300, 400, 500, 600], // king
];

/// Killer and history tables, scoped to one search
#[derive(Clone)]
pub struct MoveOrdering {
    killers: [[Move; MAX_PLY]; 2],
    history: [[i32; 64]; 12],
}

impl Default for MoveOrdering {
    fn default() -> Self {
        Self::new()
    }
}

impl MoveOrdering {
    pub fn new() -> Self {
        Self {
            killers: [[Move::NULL; MAX_PLY]; 2],
            history: [[0; 64]; 12],
        }
    }

    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// Ordering score of `mv` in `pos` at `ply`, PV preference excluded
    pub fn score_move(&self, pos: &Position<'_>, mv: Move, ply: usize) -> i32 {
        if mv.is_capture() {
            let victim = if mv.is_en_passant() {
                PieceKind::Pawn
            } else {
                pos.piece_at(mv.target())
                    .map_or(PieceKind::Pawn, |piece| piece.kind())
            };
            let attacker = mv.piece().kind();
            return CAPTURE_SCORE + MVV_LVA[attacker as usize][victim as usize];
        }

        if ply < MAX_PLY {
            if self.killers[0][ply] == mv {
                return FIRST_KILLER_SCORE;
            }
            if self.killers[1][ply] == mv {
                return SECOND_KILLER_SCORE;
            }
        }
        self.history_score(mv)
    }

    /// Remember a quiet move that caused a beta cutoff; the previous first
    /// killer moves to the second slot.
    pub fn store_killer(&mut self, ply: usize, mv: Move) {
        if ply >= MAX_PLY || self.killers[0][ply] == mv {
            return;
        }
        self.killers[1][ply] = self.killers[0][ply];
        self.killers[0][ply] = mv;
    }

    pub fn killers(&self, ply: usize) -> [Move; 2] {
        [self.killers[0][ply], self.killers[1][ply]]
    }

    #[inline]
    pub fn history_score(&self, mv: Move) -> i32 {
        self.history[mv.piece().index()][mv.target()]
    }

    /// Reward a quiet move that raised alpha, weighted by remaining depth
    pub fn update_history(&mut self, mv: Move, depth: i32) {
        self.history[mv.piece().index()][mv.target()] += depth;
    }
}
