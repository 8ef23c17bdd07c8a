//! Structured position input
//!
//! `PieceLayout` is what a position is loaded from: one optional piece per
//! square plus side to move, castling rights and the en-passant target. FEN
//! text is tokenised by shakmaty and converted into this form.

use shakmaty::fen::Fen;

use crate::error::{EngineError, EngineResult};
use crate::piece::{Color, Piece, PieceKind};
use crate::utils::Square;

// Castling-rights bits
pub const WHITE_KINGSIDE: u8 = 1;
pub const WHITE_QUEENSIDE: u8 = 2;
pub const BLACK_KINGSIDE: u8 = 4;
pub const BLACK_QUEENSIDE: u8 = 8;
pub const ALL_CASTLING: u8 = WHITE_KINGSIDE | WHITE_QUEENSIDE | BLACK_KINGSIDE | BLACK_QUEENSIDE;

pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieceLayout {
    pub squares: [Option<Piece>; 64],
    pub side: Color,
    pub castling: u8,
    pub en_passant: Option<Square>,
}

impl Default for PieceLayout {
    fn default() -> Self {
        PieceLayout {
            squares: [None; 64],
            side: Color::White,
            castling: 0,
            en_passant: None,
        }
    }
}

impl PieceLayout {
    /// The standard initial position
    pub fn starting() -> Self {
        const BACK_RANK: [PieceKind; 8] = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        let mut layout = PieceLayout {
            castling: ALL_CASTLING,
            ..Default::default()
        };
        for (file, kind) in BACK_RANK.iter().enumerate() {
            layout.squares[file] = Some(Piece::new(*kind, Color::Black));
            layout.squares[8 + file] = Some(Piece::BlackPawn);
            layout.squares[48 + file] = Some(Piece::WhitePawn);
            layout.squares[56 + file] = Some(Piece::new(*kind, Color::White));
        }
        layout
    }

    /// Parse FEN text. Move counters are accepted and ignored.
    pub fn from_fen(fen: &str) -> EngineResult<Self> {
        let fen: Fen = fen.parse()?;
        let setup = fen.into_setup();

        let mut layout = PieceLayout::default();
        for sq in setup.board.occupied() {
            if let Some(piece) = setup.board.piece_at(sq) {
                layout.squares[from_shakmaty_square(sq)] = Some(from_shakmaty_piece(piece));
            }
        }

        layout.side = match setup.turn {
            shakmaty::Color::White => Color::White,
            shakmaty::Color::Black => Color::Black,
        };

        // shakmaty records castling rights as the rooks' home squares
        let rights = setup.castling_rights;
        for (rook, bit) in [
            (shakmaty::Square::H1, WHITE_KINGSIDE),
            (shakmaty::Square::A1, WHITE_QUEENSIDE),
            (shakmaty::Square::H8, BLACK_KINGSIDE),
            (shakmaty::Square::A8, BLACK_QUEENSIDE),
        ] {
            if rights.contains(rook) {
                layout.castling |= bit;
            }
        }

        layout.en_passant = setup.ep_square.map(from_shakmaty_square);
        Ok(layout)
    }

    /// Place a piece, replacing whatever stood there
    pub fn with_piece(mut self, sq: Square, piece: Piece) -> Self {
        self.squares[sq] = Some(piece);
        self
    }

    /// Colour-flipped copy: the board is reflected top to bottom, every piece
    /// changes colour and the other side moves.
    pub fn mirrored(&self) -> Self {
        let mut squares = [None; 64];
        for (sq, piece) in self.squares.iter().enumerate() {
            squares[sq ^ 56] = piece.map(Piece::flipped);
        }
        PieceLayout {
            squares,
            side: self.side.opponent(),
            castling: ((self.castling & 0b0011) << 2) | ((self.castling >> 2) & 0b0011),
            en_passant: self.en_passant.map(|sq| sq ^ 56),
        }
    }

    /// Check the contract a position relies on: one king per side, no pawn
    /// on a back rank, and an en-passant target on the rank the side to move
    /// captures onto.
    pub fn validate(&self) -> EngineResult<()> {
        for king in [Piece::WhiteKing, Piece::BlackKing] {
            let count = self.squares.iter().filter(|p| **p == Some(king)).count();
            if count != 1 {
                return Err(EngineError::InvalidLayout {
                    reason: "each side needs exactly one king",
                });
            }
        }

        let back_rank_pawn = (0..8).chain(56..64).any(|sq| {
            matches!(
                self.squares[sq],
                Some(Piece::WhitePawn) | Some(Piece::BlackPawn)
            )
        });
        if back_rank_pawn {
            return Err(EngineError::InvalidLayout {
                reason: "pawn on the first or last rank",
            });
        }

        if self.castling & !ALL_CASTLING != 0 {
            return Err(EngineError::InvalidLayout {
                reason: "unknown castling-rights bits",
            });
        }

        if let Some(ep) = self.en_passant {
            // rank 6 when white captures, rank 3 when black does
            let expected = match self.side {
                Color::White => 16..24,
                Color::Black => 40..48,
            };
            if !expected.contains(&ep) || self.squares[ep].is_some() {
                return Err(EngineError::InvalidLayout {
                    reason: "en-passant square on the wrong rank",
                });
            }
        }

        Ok(())
    }
}

/// shakmaty counts squares from a1; this crate counts from a8
fn from_shakmaty_square(sq: shakmaty::Square) -> Square {
    (sq as usize) ^ 56
}

fn from_shakmaty_piece(piece: shakmaty::Piece) -> Piece {
    let kind = match piece.role {
        shakmaty::Role::Pawn => PieceKind::Pawn,
        shakmaty::Role::Knight => PieceKind::Knight,
        shakmaty::Role::Bishop => PieceKind::Bishop,
        shakmaty::Role::Rook => PieceKind::Rook,
        shakmaty::Role::Queen => PieceKind::Queen,
        shakmaty::Role::King => PieceKind::King,
    };
    let color = match piece.color {
        shakmaty::Color::White => Color::White,
        shakmaty::Color::Black => Color::Black,
    };
    Piece::new(kind, color)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::{square, E1, E8};

    #[test]
    fn start_fen_matches_starting_layout() {
        assert_eq!(PieceLayout::from_fen(START_FEN).unwrap(), PieceLayout::starting());
    }

    #[test]
    fn fen_fields_are_converted() {
        let layout =
            PieceLayout::from_fen("rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w Kq f6 0 3")
                .unwrap();
        assert_eq!(layout.side, Color::White);
        assert_eq!(layout.castling, WHITE_KINGSIDE | BLACK_QUEENSIDE);
        assert_eq!(layout.en_passant, Some(square(5, 5)));
        assert_eq!(layout.squares[square(4, 4)], Some(Piece::WhitePawn));
        assert_eq!(layout.squares[E1], Some(Piece::WhiteKing));
        assert_eq!(layout.squares[E8], Some(Piece::BlackKing));
        assert!(layout.validate().is_ok());
    }

    #[test]
    fn malformed_fen_is_rejected() {
        assert!(matches!(
            PieceLayout::from_fen("not a fen"),
            Err(EngineError::Fen(_))
        ));
    }

    #[test]
    fn missing_king_is_invalid() {
        let layout = PieceLayout::default().with_piece(E1, Piece::WhiteKing);
        assert!(matches!(
            layout.validate(),
            Err(EngineError::InvalidLayout { .. })
        ));
    }

    #[test]
    fn en_passant_rank_is_checked() {
        let mut layout = PieceLayout::starting();
        layout.en_passant = Some(square(4, 2)); // e3 with white to move
        assert!(layout.validate().is_err());
        layout.side = Color::Black;
        assert!(layout.validate().is_ok());
    }

    #[test]
    fn mirror_swaps_everything() {
        let layout = PieceLayout::starting();
        assert_eq!(layout.mirrored().squares, layout.squares);
        assert_eq!(layout.mirrored().side, Color::Black);

        let mut lopsided = PieceLayout::default()
            .with_piece(E1, Piece::WhiteKing)
            .with_piece(E8, Piece::BlackKing)
            .with_piece(square(0, 1), Piece::WhitePawn);
        lopsided.castling = WHITE_KINGSIDE;
        let m = lopsided.mirrored();
        assert_eq!(m.squares[square(0, 6)], Some(Piece::BlackPawn));
        assert_eq!(m.castling, BLACK_KINGSIDE);
        assert_eq!(m.mirrored(), lopsided);
    }
}
