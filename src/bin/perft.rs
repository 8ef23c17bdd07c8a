use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use shakmaty::fen::Fen;
use shakmaty::{CastlingMode, Chess, Position as _};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use torre::{perft_divide, AttackTables, EngineResult, Position, ZobristKeys, START_FEN};

#[derive(Parser, Debug)]
#[command(author, version, about = "Count legal move paths from a position", long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = String::from(START_FEN))]
    fen: String,

    #[arg(short, long, default_value_t = 4)]
    depth: u32,

    /// Print the count below each root move
    #[arg(long)]
    divide: bool,

    /// Cross-check the total against shakmaty's move generator
    #[arg(long)]
    verify: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> EngineResult<bool> {
    let tables = AttackTables::new()?;
    let keys = ZobristKeys::default();
    let position = Position::from_fen(&tables, &keys, &args.fen)?;

    info!(fen = %args.fen, depth = args.depth, "running perft");

    let start = Instant::now();
    let divide = perft_divide(&position, args.depth);
    let nodes = if args.depth == 0 {
        1
    } else {
        divide.iter().map(|(_, count)| count).sum()
    };
    let elapsed = start.elapsed();

    if args.divide {
        for (mv, count) in &divide {
            println!("{mv}: {count}");
        }
        println!();
    }
    println!(
        "perft({}) = {} nodes ({} ms, {:.2} Mnps)",
        args.depth,
        nodes,
        elapsed.as_millis(),
        nodes as f64 / elapsed.as_micros().max(1) as f64
    );

    if !args.verify {
        return Ok(true);
    }

    let fen: Fen = args.fen.parse()?;
    let reference: Chess = match fen.into_position(CastlingMode::Standard) {
        Ok(pos) => pos,
        Err(err) => {
            error!("shakmaty rejected the position: {err}");
            return Ok(false);
        }
    };
    let expected = perft_shakmaty(&reference, args.depth);
    if expected == nodes {
        info!(nodes, "matches shakmaty");
        Ok(true)
    } else {
        error!(expected, got = nodes, "perft mismatch against shakmaty");
        Ok(false)
    }
}

fn perft_shakmaty(pos: &Chess, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }
    let mut nodes = 0;
    for m in pos.legal_moves() {
        let mut next = pos.clone();
        next.play_unchecked(&m);
        nodes += perft_shakmaty(&next, depth - 1);
    }
    nodes
}
