//! Packed move encoding and the fixed-capacity move list
//!
//! A move is one 32-bit word:
//!
//! ```text
//! bits  0-5   start square
//! bits  6-11  target square
//! bits 12-15  moving piece (0-11)
//! bits 16-19  promoted piece (0 = none)
//! bit  20     capture
//! bit  21     double pawn push
//! bit  22     en passant
//! bit  23     castling
//! ```

use std::fmt;

use crate::piece::Piece;
use crate::utils::{square_name, Square};

pub const FLAG_NONE: u32 = 0;
pub const FLAG_CAPTURE: u32 = 1 << 20;
pub const FLAG_DOUBLE_PUSH: u32 = 1 << 21;
pub const FLAG_EN_PASSANT: u32 = 1 << 22;
pub const FLAG_CASTLING: u32 = 1 << 23;

/// Capacity of a move list. No legal chess position has more than 218 moves.
pub const MAX_MOVES: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Move(u32);

impl Move {
    /// "No move": never produced by move generation
    pub const NULL: Move = Move(0);

    #[inline]
    pub fn new(start: Square, target: Square, piece: Piece, promoted: Option<Piece>, flags: u32) -> Move {
        let promoted = promoted.map_or(0, |p| p.index() as u32);
        Move(
            (start as u32 & 0x3F)
                | ((target as u32 & 0x3F) << 6)
                | ((piece.index() as u32 & 0xF) << 12)
                | ((promoted & 0xF) << 16)
                | flags,
        )
    }

    #[inline]
    pub fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub fn is_null(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub fn start(self) -> Square {
        (self.0 & 0x3F) as Square
    }

    #[inline]
    pub fn target(self) -> Square {
        ((self.0 >> 6) & 0x3F) as Square
    }

    #[inline]
    pub fn piece(self) -> Piece {
        // four bits can hold 12..15, which no constructor writes
        Piece::from_index(((self.0 >> 12) & 0xF) as usize).unwrap_or(Piece::WhitePawn)
    }

    #[inline]
    pub fn promoted(self) -> Option<Piece> {
        match (self.0 >> 16) & 0xF {
            0 => None,
            idx => Piece::from_index(idx as usize),
        }
    }

    #[inline]
    pub fn is_capture(self) -> bool {
        self.0 & FLAG_CAPTURE != 0
    }

    #[inline]
    pub fn is_double_push(self) -> bool {
        self.0 & FLAG_DOUBLE_PUSH != 0
    }

    #[inline]
    pub fn is_en_passant(self) -> bool {
        self.0 & FLAG_EN_PASSANT != 0
    }

    #[inline]
    pub fn is_castling(self) -> bool {
        self.0 & FLAG_CASTLING != 0
    }

    /// Neither a capture nor a promotion
    #[inline]
    pub fn is_quiet(self) -> bool {
        !self.is_capture() && self.promoted().is_none()
    }
}

/// Coordinate notation, e.g. `e2e4` or `e7e8q`
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            return write!(f, "0000");
        }
        write!(f, "{}{}", square_name(self.start()), square_name(self.target()))?;
        if let Some(promoted) = self.promoted() {
            write!(f, "{}", promoted.to_char().to_ascii_lowercase())?;
        }
        Ok(())
    }
}

/// Move list backed by a fixed array, so generation never allocates
#[derive(Clone)]
pub struct MoveList {
    moves: [Move; MAX_MOVES],
    count: usize,
}

impl Default for MoveList {
    fn default() -> Self {
        Self::new()
    }
}

impl MoveList {
    pub fn new() -> Self {
        MoveList {
            moves: [Move::NULL; MAX_MOVES],
            count: 0,
        }
    }

    #[inline]
    pub fn push(&mut self, mv: Move) {
        debug_assert!(self.count < MAX_MOVES, "move list overflow");
        self.moves[self.count] = mv;
        self.count += 1;
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.count]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.as_slice().iter()
    }

    pub fn contains(&self, mv: Move) -> bool {
        self.as_slice().contains(&mv)
    }

    /// Reorder by descending score; moves with equal scores keep their
    /// generation order. Each move is scored exactly once.
    pub fn sort_by_score(&mut self, mut score: impl FnMut(Move) -> i32) {
        let mut scored = [(0i32, Move::NULL); MAX_MOVES];
        for (slot, &mv) in scored.iter_mut().zip(self.as_slice()) {
            *slot = (score(mv), mv);
        }
        let scored = &mut scored[..self.count];
        scored.sort_by(|a, b| b.0.cmp(&a.0));
        for (dst, (_, mv)) in self.moves.iter_mut().zip(scored.iter()) {
            *dst = *mv;
        }
    }
}

impl fmt::Debug for MoveList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::square;

    #[test]
    fn fields_survive_packing() {
        let e7 = square(4, 6);
        let d8 = square(3, 7);
        let mv = Move::new(e7, d8, Piece::WhitePawn, Some(Piece::WhiteQueen), FLAG_CAPTURE);
        assert_eq!(mv.start(), e7);
        assert_eq!(mv.target(), d8);
        assert_eq!(mv.piece(), Piece::WhitePawn);
        assert_eq!(mv.promoted(), Some(Piece::WhiteQueen));
        assert!(mv.is_capture());
        assert!(!mv.is_double_push() && !mv.is_en_passant() && !mv.is_castling());
        assert!(!mv.is_quiet());
        assert_eq!(mv.to_string(), "e7d8q");
    }

    #[test]
    fn flags_are_independent_bits() {
        let mv = Move::new(60, 62, Piece::WhiteKing, None, FLAG_CASTLING);
        assert!(mv.is_castling() && mv.is_quiet());
        assert_eq!(mv.promoted(), None);
        assert_eq!(mv.to_string(), "e1g1");
        assert_eq!(Move::NULL.to_string(), "0000");
    }

    #[test]
    fn sort_is_stable_and_descending() {
        let mut list = MoveList::new();
        let moves: Vec<Move> = (0..5)
            .map(|i| Move::new(48 + i, 40 + i, Piece::WhitePawn, None, FLAG_NONE))
            .collect();
        for &mv in &moves {
            list.push(mv);
        }
        // moves 1 and 3 score highest and tie
        list.sort_by_score(|mv| if mv.start() % 2 == 1 { 10 } else { 0 });
        let sorted: Vec<Move> = list.iter().copied().collect();
        assert_eq!(sorted, vec![moves[1], moves[3], moves[0], moves[2], moves[4]]);
    }
}
