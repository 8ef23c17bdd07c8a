mod common;

use torre::perft;

use common::{position, shakmaty_perft, shakmaty_position};

fn run_perft_check(fen: &str, depth: u32, name: &str) {
    let ours = perft(&position(fen), depth);
    let reference = shakmaty_perft(&shakmaty_position(fen), depth);
    assert_eq!(ours, reference, "mismatch in {name} at depth {depth}");
}

#[test]
fn perft_en_passant_discovered_check() {
    // capturing c5 en passant would expose the king on a5 along the rank
    run_perft_check("8/8/8/k1pP4/8/8/8/4K3 w - c6 0 1", 3, "en passant discovered check");
    run_perft_check("8/8/8/8/k2Pp2Q/8/8/3K4 b - d3 0 1", 3, "en passant pin along rank");
}

#[test]
fn perft_castling_prevented_by_attack() {
    run_perft_check("4k3/8/8/8/8/8/8/R3K2r w Q - 0 1", 2, "castling out of check");
    run_perft_check("4k3/8/8/8/8/8/5r2/R3K2R w KQ - 0 1", 2, "castling through attack");
    run_perft_check("r3k2r/8/8/8/8/8/8/1R2K1R1 b kq - 0 1", 2, "black castling through attack");
}

#[test]
fn perft_rook_capture_removes_castling() {
    run_perft_check("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1", 3, "rooks facing on open files");
}

#[test]
fn perft_promotion_captures() {
    run_perft_check("n1n5/PPPk4/8/8/8/8/4Kppp/5N1N b - - 0 1", 3, "promotion captures");
    run_perft_check("8/P1k5/K7/8/8/8/8/8 w - - 0 1", 4, "lone promotion");
}

#[test]
fn perft_kiwipete() {
    run_perft_check(
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        3,
        "kiwipete",
    );
}

#[test]
fn perft_talkchess_position_5() {
    run_perft_check(
        "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
        3,
        "position 5",
    );
}
