use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use torre::{perft, AttackTables, Position, SearchEngine, SearchParams, ZobristKeys, START_FEN};

struct BenchCase {
    name: &'static str,
    fen: &'static str,
    depth: u32,
    expected_nodes: u64,
}

const CASES: &[BenchCase] = &[
    BenchCase {
        name: "startpos",
        fen: START_FEN,
        depth: 4,
        expected_nodes: 197_281,
    },
    BenchCase {
        name: "kiwipete",
        fen: "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        depth: 3,
        expected_nodes: 97_862,
    },
];

fn bench_perft(c: &mut Criterion) {
    let tables = AttackTables::new().expect("attack tables");
    let keys = ZobristKeys::default();

    let mut group = c.benchmark_group("perft");
    group.sample_size(10);
    group.measurement_time(Duration::from_secs(10));

    for case in CASES {
        let position = Position::from_fen(&tables, &keys, case.fen).expect("valid FEN");
        assert_eq!(perft(&position, case.depth), case.expected_nodes, "{}", case.name);

        group.throughput(Throughput::Elements(case.expected_nodes));
        group.bench_with_input(BenchmarkId::new(case.name, case.depth), &position, |b, pos| {
            b.iter(|| perft(black_box(pos), black_box(case.depth)))
        });
    }
    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let tables = AttackTables::new().expect("attack tables");
    let keys = ZobristKeys::default();
    let position = Position::starting(&tables, &keys);

    let mut group = c.benchmark_group("search");
    group.sample_size(10);
    group.bench_function("startpos_depth_5", |b| {
        b.iter(|| {
            let mut engine = SearchEngine::new(SearchParams::new().max_depth(5));
            engine.search(black_box(&position))
        })
    });
    group.finish();
}

criterion_group!(benches, bench_perft, bench_search);
criterion_main!(benches);
