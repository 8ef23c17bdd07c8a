// Bitboard position: move generation, make-move and attack detection
//
// Square mapping: A8=0 .. H1=63. White pawns move towards lower indices.
//
// A position is a plain value. The search copies it before every move and
// restores the copy afterwards, so nothing in here keeps an undo stack.

use std::fmt;

use crate::error::{EngineError, EngineResult};
use crate::eval;
use crate::moves::{
    Move, MoveList, FLAG_CAPTURE, FLAG_CASTLING, FLAG_DOUBLE_PUSH, FLAG_EN_PASSANT, FLAG_NONE,
};
use crate::piece::{Color, Piece, PieceKind};
use crate::setup::{
    PieceLayout, BLACK_KINGSIDE, BLACK_QUEENSIDE, WHITE_KINGSIDE, WHITE_QUEENSIDE,
};
use crate::tables::AttackTables;
use crate::utils::{
    clear_bit, get_bit, iter_bits, lsb_index, set_bit, Bitboard, Square, A1, A8, B1, B8, C1, C8,
    D1, D8, E1, E8, F1, F8, G1, G8, H1, H8, RANK_2, RANK_7,
};
use crate::zobrist::ZobristKeys;

/// Index of the combined occupancy in `Position::occupancy`
pub const BOTH: usize = 2;

/// Castling rights that survive a move touching each square: moving the king
/// or a rook, or capturing on a rook's home square, drops the matching right.
#[rustfmt::skip]
const CASTLING_MASK: [u8; 64] = [
     7, 15, 15, 15,  3, 15, 15, 11,
    15, 15, 15, 15, 15, 15, 15, 15,
    15, 15, 15, 15, 15, 15, 15, 15,
    15, 15, 15, 15, 15, 15, 15, 15,
    15, 15, 15, 15, 15, 15, 15, 15,
    15, 15, 15, 15, 15, 15, 15, 15,
    15, 15, 15, 15, 15, 15, 15, 15,
    13, 15, 15, 15, 12, 15, 15, 14,
];

#[derive(Clone)]
pub struct Position<'a> {
    tables: &'a AttackTables,
    keys: &'a ZobristKeys,
    pieces: [Bitboard; 12],
    occupancy: [Bitboard; 3],
    side: Color,
    en_passant: Option<Square>,
    castling: u8,
    hash: u64,
}

impl<'a> Position<'a> {
    /// Build a consistent position from structured input.
    ///
    /// Besides the layout's own checks, the side that just moved must not be
    /// left in check: such a position could only be reached by an illegal move.
    pub fn from_layout(
        tables: &'a AttackTables,
        keys: &'a ZobristKeys,
        layout: &PieceLayout,
    ) -> EngineResult<Self> {
        layout.validate()?;

        let mut pos = Position {
            tables,
            keys,
            pieces: [0; 12],
            occupancy: [0; 3],
            side: layout.side,
            en_passant: layout.en_passant,
            castling: layout.castling,
            hash: 0,
        };
        for (sq, piece) in layout.squares.iter().enumerate() {
            if let Some(piece) = piece {
                set_bit(&mut pos.pieces[piece.index()], sq);
            }
        }
        pos.refresh_occupancy();
        pos.hash = pos.compute_hash();

        let waiting = pos.side.opponent();
        if pos.is_square_attacked(pos.king_square(waiting), pos.side) {
            return Err(EngineError::InvalidLayout {
                reason: "side not to move is in check",
            });
        }
        Ok(pos)
    }

    pub fn from_fen(tables: &'a AttackTables, keys: &'a ZobristKeys, fen: &str) -> EngineResult<Self> {
        Self::from_layout(tables, keys, &PieceLayout::from_fen(fen)?)
    }

    pub fn starting(tables: &'a AttackTables, keys: &'a ZobristKeys) -> Self {
        let mut pos = Position {
            tables,
            keys,
            pieces: [0; 12],
            occupancy: [0; 3],
            side: Color::White,
            en_passant: None,
            castling: 0,
            hash: 0,
        };
        pos.load_unchecked(&PieceLayout::starting());
        pos
    }

    // The starting layout is known good, so it skips validation
    fn load_unchecked(&mut self, layout: &PieceLayout) {
        self.pieces = [0; 12];
        for (sq, piece) in layout.squares.iter().enumerate() {
            if let Some(piece) = piece {
                set_bit(&mut self.pieces[piece.index()], sq);
            }
        }
        self.side = layout.side;
        self.en_passant = layout.en_passant;
        self.castling = layout.castling;
        self.refresh_occupancy();
        self.hash = self.compute_hash();
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    #[inline]
    pub fn side(&self) -> Color {
        self.side
    }

    #[inline]
    pub fn castling(&self) -> u8 {
        self.castling
    }

    #[inline]
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    #[inline]
    pub fn hash(&self) -> u64 {
        self.hash
    }

    #[inline]
    pub fn pieces(&self, piece: Piece) -> Bitboard {
        self.pieces[piece.index()]
    }

    pub fn piece_bitboards(&self) -> &[Bitboard; 12] {
        &self.pieces
    }

    /// Squares held by `color`
    #[inline]
    pub fn occupancy(&self, color: Color) -> Bitboard {
        self.occupancy[color.index()]
    }

    #[inline]
    pub fn occupied(&self) -> Bitboard {
        self.occupancy[BOTH]
    }

    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        if !get_bit(self.occupancy[BOTH], sq) {
            return None;
        }
        Piece::ALL
            .iter()
            .copied()
            .find(|p| get_bit(self.pieces[p.index()], sq))
    }

    /// Every validated position has one king per side; a missing king is a
    /// broken invariant, not a recoverable condition.
    pub fn king_square(&self, color: Color) -> Square {
        let king = Piece::new(PieceKind::King, color);
        lsb_index(self.pieces[king.index()]).expect("king missing from a validated position")
    }

    // ------------------------------------------------------------------
    // Hashing and occupancy upkeep
    // ------------------------------------------------------------------

    /// Hash recomputed from scratch over the current state
    pub fn compute_hash(&self) -> u64 {
        let mut hash = 0u64;
        for piece in Piece::ALL {
            for sq in iter_bits(self.pieces[piece.index()]) {
                hash ^= self.keys.piece(piece, sq);
            }
        }
        if let Some(ep) = self.en_passant {
            hash ^= self.keys.en_passant(ep);
        }
        hash ^= self.keys.castling(self.castling);
        if self.side == Color::Black {
            hash ^= self.keys.side();
        }
        hash
    }

    fn refresh_occupancy(&mut self) {
        self.occupancy = [0; 3];
        for piece in Piece::ALL {
            self.occupancy[piece.color().index()] |= self.pieces[piece.index()];
        }
        self.occupancy[BOTH] = self.occupancy[0] | self.occupancy[1];
    }

    #[inline]
    fn put_piece(&mut self, piece: Piece, sq: Square) {
        set_bit(&mut self.pieces[piece.index()], sq);
        self.hash ^= self.keys.piece(piece, sq);
    }

    #[inline]
    fn remove_piece(&mut self, piece: Piece, sq: Square) {
        clear_bit(&mut self.pieces[piece.index()], sq);
        self.hash ^= self.keys.piece(piece, sq);
    }

    // ------------------------------------------------------------------
    // Attack detection
    // ------------------------------------------------------------------

    /// Whether any piece of `by` attacks `sq`.
    ///
    /// Pawns are probed with the other colour's pawn pattern: a pawn of `by`
    /// attacks `sq` exactly when a pawn of the other colour on `sq` would
    /// attack the pawn's square.
    pub fn is_square_attacked(&self, sq: Square, by: Color) -> bool {
        let t = self.tables;
        let occ = self.occupancy[BOTH];
        let theirs = |kind| self.pieces[Piece::new(kind, by).index()];

        if t.pawn_attacks(by.opponent(), sq) & theirs(PieceKind::Pawn) != 0 {
            return true;
        }
        if t.knight_attacks(sq) & theirs(PieceKind::Knight) != 0 {
            return true;
        }
        if t.king_attacks(sq) & theirs(PieceKind::King) != 0 {
            return true;
        }
        let queens = theirs(PieceKind::Queen);
        if t.bishop_attacks(sq, occ) & (theirs(PieceKind::Bishop) | queens) != 0 {
            return true;
        }
        t.rook_attacks(sq, occ) & (theirs(PieceKind::Rook) | queens) != 0
    }

    #[inline]
    pub fn is_king_in_check(&self) -> bool {
        self.is_square_attacked(self.king_square(self.side), self.side.opponent())
    }

    // ------------------------------------------------------------------
    // Move generation
    // ------------------------------------------------------------------

    /// All moves obeying piece movement rules. Whether the mover's king is
    /// left in check is decided later by `make_move`.
    pub fn generate_pseudolegal_moves(&self) -> MoveList {
        let mut moves = MoveList::new();
        self.generate_pawn_moves(&mut moves);
        for kind in [
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Rook,
            PieceKind::Queen,
        ] {
            self.generate_piece_moves(kind, &mut moves);
        }
        self.generate_castling_moves(&mut moves);
        self.generate_piece_moves(PieceKind::King, &mut moves);
        moves
    }

    /// Moves that survive `make_move`. Used by move-input resolution and
    /// tests; the search filters lazily instead.
    pub fn legal_moves(&self) -> MoveList {
        let mut legal = MoveList::new();
        for &mv in self.generate_pseudolegal_moves().iter() {
            let mut next = self.clone();
            if next.make_move(mv) {
                legal.push(mv);
            }
        }
        legal
    }

    fn generate_pawn_moves(&self, moves: &mut MoveList) {
        let side = self.side;
        let pawn = Piece::new(PieceKind::Pawn, side);
        let enemies = self.occupancy[side.opponent().index()];
        let empty = !self.occupancy[BOTH];
        let (promotion_rank, home_rank) = match side {
            Color::White => (RANK_7, RANK_2),
            Color::Black => (RANK_2, RANK_7),
        };

        for from in iter_bits(self.pieces[pawn.index()]) {
            let promotes = get_bit(promotion_rank, from);
            // pawns never stand on a back rank, so one step forward is on the board
            let to = forward(from, side);

            if get_bit(empty, to) {
                if promotes {
                    push_promotions(moves, from, to, pawn, FLAG_NONE);
                } else {
                    moves.push(Move::new(from, to, pawn, None, FLAG_NONE));
                    if get_bit(home_rank, from) {
                        let double = forward(to, side);
                        if get_bit(empty, double) {
                            moves.push(Move::new(from, double, pawn, None, FLAG_DOUBLE_PUSH));
                        }
                    }
                }
            }

            let attacks = self.tables.pawn_attacks(side, from);
            for target in iter_bits(attacks & enemies) {
                if promotes {
                    push_promotions(moves, from, target, pawn, FLAG_CAPTURE);
                } else {
                    moves.push(Move::new(from, target, pawn, None, FLAG_CAPTURE));
                }
            }

            if let Some(ep) = self.en_passant {
                if get_bit(attacks, ep) {
                    moves.push(Move::new(from, ep, pawn, None, FLAG_CAPTURE | FLAG_EN_PASSANT));
                }
            }
        }
    }

    fn generate_piece_moves(&self, kind: PieceKind, moves: &mut MoveList) {
        let piece = Piece::new(kind, self.side);
        let own = self.occupancy[self.side.index()];
        let enemies = self.occupancy[self.side.opponent().index()];
        let occ = self.occupancy[BOTH];

        for from in iter_bits(self.pieces[piece.index()]) {
            let attacks = match kind {
                PieceKind::Knight => self.tables.knight_attacks(from),
                PieceKind::Bishop => self.tables.bishop_attacks(from, occ),
                PieceKind::Rook => self.tables.rook_attacks(from, occ),
                PieceKind::Queen => self.tables.queen_attacks(from, occ),
                PieceKind::King => self.tables.king_attacks(from),
                PieceKind::Pawn => unreachable!("pawns have their own generator"),
            };
            for to in iter_bits(attacks & !own) {
                let flags = if get_bit(enemies, to) {
                    FLAG_CAPTURE
                } else {
                    FLAG_NONE
                };
                moves.push(Move::new(from, to, piece, None, flags));
            }
        }
    }

    fn generate_castling_moves(&self, moves: &mut MoveList) {
        let side = self.side;
        let enemy = side.opponent();
        let king = Piece::new(PieceKind::King, side);
        let rook = Piece::new(PieceKind::Rook, side);

        // (right, king from, king to, rook home, squares that must be empty,
        //  squares that must not be attacked)
        let options: [(u8, Square, Square, Square, &[Square], [Square; 2]); 2] = match side {
            Color::White => [
                (WHITE_KINGSIDE, E1, G1, H1, &[F1, G1], [E1, F1]),
                (WHITE_QUEENSIDE, E1, C1, A1, &[B1, C1, D1], [E1, D1]),
            ],
            Color::Black => [
                (BLACK_KINGSIDE, E8, G8, H8, &[F8, G8], [E8, F8]),
                (BLACK_QUEENSIDE, E8, C8, A8, &[B8, C8, D8], [E8, D8]),
            ],
        };

        for (right, from, to, rook_home, between, path) in options {
            if self.castling & right == 0
                || !get_bit(self.pieces[king.index()], from)
                || !get_bit(self.pieces[rook.index()], rook_home)
            {
                continue;
            }
            if between.iter().any(|&sq| get_bit(self.occupancy[BOTH], sq)) {
                continue;
            }
            if path.iter().any(|&sq| self.is_square_attacked(sq, enemy)) {
                continue;
            }
            moves.push(Move::new(from, to, king, None, FLAG_CASTLING));
        }
    }

    // ------------------------------------------------------------------
    // Making moves
    // ------------------------------------------------------------------

    /// Play a pseudo-legal move.
    ///
    /// Returns `false` and leaves the position untouched when the move would
    /// leave the mover's own king in check.
    pub fn make_move(&mut self, mv: Move) -> bool {
        let snapshot = self.clone();
        let side = self.side;
        let enemy = side.opponent();
        let from = mv.start();
        let to = mv.target();
        let piece = mv.piece();

        self.remove_piece(piece, from);

        if mv.is_capture() && !mv.is_en_passant() {
            if let Some(victim) = self.enemy_piece_on(to, enemy) {
                self.remove_piece(victim, to);
            }
        }

        self.put_piece(mv.promoted().unwrap_or(piece), to);

        if mv.is_en_passant() {
            let victim_sq = backward(to, side);
            self.remove_piece(Piece::new(PieceKind::Pawn, enemy), victim_sq);
        }

        if let Some(ep) = self.en_passant.take() {
            self.hash ^= self.keys.en_passant(ep);
        }
        if mv.is_double_push() {
            let ep = backward(to, side);
            self.en_passant = Some(ep);
            self.hash ^= self.keys.en_passant(ep);
        }

        if mv.is_castling() {
            let rook = Piece::new(PieceKind::Rook, side);
            let (rook_from, rook_to) = match to {
                G1 => (H1, F1),
                C1 => (A1, D1),
                G8 => (H8, F8),
                C8 => (A8, D8),
                _ => unreachable!("castling move to {to}"),
            };
            self.remove_piece(rook, rook_from);
            self.put_piece(rook, rook_to);
        }

        self.hash ^= self.keys.castling(self.castling);
        self.castling &= CASTLING_MASK[from] & CASTLING_MASK[to];
        self.hash ^= self.keys.castling(self.castling);

        self.refresh_occupancy();

        if self.is_square_attacked(self.king_square(side), enemy) {
            *self = snapshot;
            return false;
        }

        self.side = enemy;
        self.hash ^= self.keys.side();
        true
    }

    /// Pass the turn: the other side moves and any en-passant target lapses
    pub fn make_null_move(&mut self) {
        if let Some(ep) = self.en_passant.take() {
            self.hash ^= self.keys.en_passant(ep);
        }
        self.side = self.side.opponent();
        self.hash ^= self.keys.side();
    }

    /// Play a move given by its squares, as read from user input.
    ///
    /// A promotion without a hint promotes to a queen. Returns `false` when
    /// no legal move matches.
    pub fn apply_user_move(
        &mut self,
        start: Square,
        target: Square,
        promotion: Option<PieceKind>,
    ) -> bool {
        let wanted = promotion.unwrap_or(PieceKind::Queen);
        let candidate = self.generate_pseudolegal_moves().iter().copied().find(|mv| {
            mv.start() == start
                && mv.target() == target
                && mv.promoted().map_or(true, |p| p.kind() == wanted)
        });
        match candidate {
            Some(mv) => self.make_move(mv),
            None => false,
        }
    }

    fn enemy_piece_on(&self, sq: Square, enemy: Color) -> Option<Piece> {
        PieceKind::ALL
            .iter()
            .map(|&kind| Piece::new(kind, enemy))
            .find(|p| get_bit(self.pieces[p.index()], sq))
    }

    // ------------------------------------------------------------------
    // Evaluation
    // ------------------------------------------------------------------

    /// Material and placement score relative to the side to move
    pub fn static_evaluate(&self) -> i32 {
        let score = eval::evaluate_absolute(&self.pieces);
        match self.side {
            Color::White => score,
            Color::Black => -score,
        }
    }
}

#[inline]
fn forward(sq: Square, side: Color) -> Square {
    match side {
        Color::White => sq - 8,
        Color::Black => sq + 8,
    }
}

#[inline]
fn backward(sq: Square, side: Color) -> Square {
    match side {
        Color::White => sq + 8,
        Color::Black => sq - 8,
    }
}

fn push_promotions(moves: &mut MoveList, from: Square, to: Square, pawn: Piece, flags: u32) {
    for kind in PieceKind::PROMOTIONS {
        let promoted = Piece::new(kind, pawn.color());
        moves.push(Move::new(from, to, pawn, Some(promoted), flags));
    }
}

// Tables and keys are shared configuration; two positions are equal when
// their game state is.
impl PartialEq for Position<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.pieces == other.pieces
            && self.occupancy == other.occupancy
            && self.side == other.side
            && self.en_passant == other.en_passant
            && self.castling == other.castling
            && self.hash == other.hash
    }
}

impl Eq for Position<'_> {}

impl fmt::Debug for Position<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Position")
            .field("pieces", &self.pieces)
            .field("occupancy", &self.occupancy)
            .field("side", &self.side)
            .field("en_passant", &self.en_passant)
            .field("castling", &self.castling)
            .field("hash", &format_args!("{:#018x}", self.hash))
            .finish()
    }
}
