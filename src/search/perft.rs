//! Move-path enumeration for move generator validation

use crate::board::Position;
use crate::moves::Move;

/// Number of legal move sequences of exactly `depth` plies
pub fn perft(position: &Position<'_>, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }
    let mut nodes = 0;
    for &mv in position.generate_pseudolegal_moves().iter() {
        let mut next = position.clone();
        if !next.make_move(mv) {
            continue;
        }
        nodes += if depth == 1 { 1 } else { perft(&next, depth - 1) };
    }
    nodes
}

/// Per-root-move breakdown of `perft`, in generation order
pub fn perft_divide(position: &Position<'_>, depth: u32) -> Vec<(Move, u64)> {
    if depth == 0 {
        return Vec::new();
    }
    let mut counts = Vec::new();
    for &mv in position.generate_pseudolegal_moves().iter() {
        let mut next = position.clone();
        if next.make_move(mv) {
            counts.push((mv, perft(&next, depth - 1)));
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{keys, tables};

    #[test]
    fn depth_zero_counts_the_root() {
        let pos = Position::starting(tables(), keys());
        assert_eq!(perft(&pos, 0), 1);
        assert!(perft_divide(&pos, 0).is_empty());
    }

    #[test]
    fn divide_sums_to_perft() {
        let pos = Position::from_fen(
            tables(),
            keys(),
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        )
        .unwrap();
        let divide = perft_divide(&pos, 2);
        assert_eq!(divide.len(), 48);
        assert_eq!(divide.iter().map(|(_, n)| n).sum::<u64>(), 2039);
    }

    #[test]
    fn checkmated_side_has_no_paths() {
        let pos = Position::from_fen(
            tables(),
            keys(),
            "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3",
        )
        .unwrap();
        assert_eq!(perft(&pos, 1), 0);
        assert_eq!(perft(&pos, 3), 0);
    }
}
