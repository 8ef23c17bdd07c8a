mod common;

use torre::search::{DRAW_SCORE, MATE_SCORE};
use torre::{Position, SearchEngine, SearchParams};

use common::{keys, position, sq, tables};

fn search(pos: &Position<'_>, depth: u8) -> torre::SearchReport {
    let mut engine = SearchEngine::new(SearchParams::new());
    engine.run_iterative_deepening(pos, depth)
}

#[test]
fn mate_in_1_scholars_mate() {
    let pos = position("r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 4 4");
    let report = search(&pos, 3);
    assert_eq!(report.best_move.map(|m| m.to_string()).as_deref(), Some("h5f7"));
    assert_eq!(report.score, MATE_SCORE - 1);
    assert!(report.is_mate());
}

#[test]
fn mate_in_1_back_rank() {
    let pos = position("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1");
    let report = search(&pos, 4);
    assert_eq!(report.best_move.map(|m| m.to_string()).as_deref(), Some("a1a8"));
    assert_eq!(report.score, MATE_SCORE - 1);
    assert_eq!(report.principal_variation.len(), 1);
}

#[test]
fn mate_in_2_rook_ladder() {
    // 1. Rh7 Kb8 2. Rg8#
    let pos = position("k7/8/8/8/8/8/7R/6RK w - - 0 1");
    let mut engine = SearchEngine::new(SearchParams::new().exhaustive());
    let report = engine.run_iterative_deepening(&pos, 4);
    assert_eq!(report.score, MATE_SCORE - 3);
    assert_eq!(report.principal_variation.len(), 3);
}

#[test]
fn fools_mate_is_scored_as_loss() {
    let mut pos = Position::starting(tables(), keys());
    for (from, to) in [("f2", "f3"), ("e7", "e5"), ("g2", "g4"), ("d8", "h4")] {
        assert!(pos.apply_user_move(sq(from), sq(to), None), "{from}{to}");
    }
    assert!(pos.is_king_in_check());
    assert!(pos.legal_moves().is_empty());

    let report = search(&pos, 3);
    assert_eq!(report.score, -MATE_SCORE);
    assert_eq!(report.best_move, None);
    assert!(report.principal_variation.is_empty());
}

#[test]
fn stalemate_is_scored_as_draw() {
    let pos = position("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1");
    assert!(!pos.is_king_in_check());
    let report = search(&pos, 3);
    assert_eq!(report.score, DRAW_SCORE);
    assert_eq!(report.best_move, None);
}

#[test]
fn queen_mates_next_to_cornered_king() {
    let pos = position("7k/5Q2/5K2/8/8/8/8/8 w - - 0 1");
    let report = search(&pos, 3);
    assert_eq!(report.best_move.map(|m| m.to_string()).as_deref(), Some("f7g7"));
    assert_eq!(report.score, MATE_SCORE - 1);
}

#[test]
fn search_leaves_the_input_untouched() {
    let pos = position("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1");
    let before = pos.clone();
    let report = search(&pos, 4);
    assert_eq!(pos, before);
    assert!(pos.legal_moves().contains(report.best_move.unwrap()));
    assert_eq!(pos.hash(), pos.compute_hash());
}

#[test]
fn pv_is_a_legal_line() {
    let pos = Position::starting(tables(), keys());
    let report = search(&pos, 5);
    assert!(!report.principal_variation.is_empty());
    let mut line = pos.clone();
    for &mv in &report.principal_variation {
        assert!(line.legal_moves().contains(mv), "{mv} not legal in PV");
        assert!(line.make_move(mv));
    }
}
