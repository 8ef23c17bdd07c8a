#![allow(dead_code)]

use std::sync::OnceLock;

use shakmaty::fen::Fen;
use shakmaty::{CastlingMode, Chess, Position as _};
use torre::utils::{square, Square};
use torre::{AttackTables, Position, ZobristKeys};

pub fn tables() -> &'static AttackTables {
    static TABLES: OnceLock<AttackTables> = OnceLock::new();
    TABLES.get_or_init(|| AttackTables::new().expect("attack tables"))
}

pub fn keys() -> &'static ZobristKeys {
    static KEYS: OnceLock<ZobristKeys> = OnceLock::new();
    KEYS.get_or_init(ZobristKeys::default)
}

pub fn position(fen: &str) -> Position<'static> {
    Position::from_fen(tables(), keys(), fen).expect("valid FEN")
}

/// Square index from a coordinate such as "e2"
pub fn sq(name: &str) -> Square {
    let bytes = name.as_bytes();
    let file = (bytes[0] - b'a') as usize;
    let rank = (bytes[1] - b'1') as usize;
    square(file, rank)
}

pub fn shakmaty_perft(pos: &Chess, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }
    let mut nodes = 0;
    for m in pos.legal_moves() {
        let mut new_pos = pos.clone();
        new_pos.play_unchecked(&m);
        nodes += shakmaty_perft(&new_pos, depth - 1);
    }
    nodes
}

pub fn shakmaty_position(fen: &str) -> Chess {
    let fen: Fen = fen.parse().expect("valid FEN");
    fen.into_position(CastlingMode::Standard)
        .expect("shakmaty should accept FEN")
}
