//! Triangular principal-variation table
//!
//! Row `ply` holds the best line found from that ply onward; `length[ply]`
//! is one past its last entry. A new best move at `ply` is written in front
//! of the line its child left in row `ply + 1`.

use crate::moves::Move;

use super::search::MAX_PLY;

const ROWS: usize = MAX_PLY + 1;

#[derive(Clone)]
pub struct PvTable {
    table: [[Move; ROWS]; ROWS],
    length: [usize; ROWS],
    // length of the root line the current iteration follows
    followed: usize,
}

impl Default for PvTable {
    fn default() -> Self {
        Self::new()
    }
}

impl PvTable {
    pub fn new() -> Self {
        Self {
            table: [[Move::NULL; ROWS]; ROWS],
            length: [0; ROWS],
            followed: 0,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// Freeze the root line found so far so the next iteration can follow
    /// it while the table is rewritten.
    pub fn begin_iteration(&mut self) {
        self.followed = self.length[0];
    }

    /// Empty the line at `ply`; called on entry to every node
    #[inline]
    pub fn start(&mut self, ply: usize) {
        self.length[ply] = ply;
    }

    /// Record `mv` as best at `ply` followed by the child's line
    pub fn update(&mut self, ply: usize, mv: Move) {
        self.table[ply][ply] = mv;
        let child_len = self.length[ply + 1].max(ply + 1);
        for next in (ply + 1)..child_len {
            self.table[ply][next] = self.table[ply + 1][next];
        }
        self.length[ply] = child_len;
    }

    /// Move the previous iteration's line plays at `ply`
    #[inline]
    pub fn line_move(&self, ply: usize) -> Move {
        if ply < self.followed {
            self.table[0][ply]
        } else {
            Move::NULL
        }
    }

    /// Best line from the root
    pub fn line(&self) -> &[Move] {
        &self.table[0][..self.length[0]]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::Piece;

    fn mv(from: usize, to: usize) -> Move {
        Move::new(from, to, Piece::WhiteKnight, None, 0)
    }

    #[test]
    fn child_line_is_spliced_behind_parent_move() {
        let mut pv = PvTable::new();
        pv.start(0);
        pv.start(1);
        pv.start(2);
        pv.update(2, mv(1, 2));
        pv.update(1, mv(3, 4));
        pv.update(0, mv(5, 6));
        assert_eq!(pv.line(), &[mv(5, 6), mv(3, 4), mv(1, 2)]);
        assert_eq!(pv.line_move(1), Move::NULL);

        pv.begin_iteration();
        pv.start(0);
        assert_eq!(pv.line_move(1), mv(3, 4));
        assert_eq!(pv.line_move(3), Move::NULL);
    }

    #[test]
    fn restarting_a_ply_truncates_its_line() {
        let mut pv = PvTable::new();
        pv.start(0);
        pv.start(1);
        pv.update(1, mv(3, 4));
        pv.update(0, mv(5, 6));
        // a later root move whose child produced no line
        pv.start(1);
        pv.update(0, mv(7, 8));
        assert_eq!(pv.line(), &[mv(7, 8)]);
    }
}
