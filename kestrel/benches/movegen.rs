use criterion::{black_box, criterion_group, criterion_main, Criterion};
use kestrel::{movegen, moves, perft, Board, Color, Square};

const BOARDS: [(&str, &str); 8] = [
    (
        "initial",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    ),
    (
        "kiwipete",
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    ),
    (
        "sicilian",
        "r1b1k2r/2qnbppp/p2ppn2/1p4B1/3NPPP1/2N2Q2/PPP4P/2KR1B1R w kq - 0 11",
    ),
    (
        "middle",
        "1rq1r1k1/1p3ppp/pB3n2/3ppP2/Pbb1P3/1PN2B2/2P2QPP/R1R4K w - - 1 21",
    ),
    (
        "open_position",
        "4r1k1/3R1ppp/8/5P2/p7/6PP/4pK2/1rN1B3 w - - 4 43",
    ),
    ("queen", "6K1/8/8/1k3q2/3Q4/8/8/8 w - - 0 1"),
    (
        "pawn_promote",
        "8/PPPPPPPP/8/2k1K3/8/8/pppppppp/8 w - - 0 1",
    ),
    (
        "max",
        "3Q4/1Q4Q1/4Q3/2Q4R/Q4Q2/3Q4/NR4Q1/kN1BB1K1 w - - 0 1",
    ),
];

fn boards() -> impl Iterator<Item = (&'static str, Board)> {
    BOARDS
        .iter()
        .map(|&(name, fen)| (name, Board::from_fen(fen).unwrap()))
}

fn bench_gen_legal(c: &mut Criterion) {
    let mut group = c.benchmark_group("gen_legal");
    for (name, board) in boards() {
        group.bench_function(name, |b| b.iter(|| black_box(movegen::legal(&board).len())));
    }
}

fn bench_gen_captures(c: &mut Criterion) {
    let mut group = c.benchmark_group("gen_captures");
    for (name, board) in boards() {
        group.bench_function(name, |b| {
            b.iter(|| black_box(movegen::captures(&board).len()))
        });
    }
}

fn bench_gen_noncaptures(c: &mut Criterion) {
    let mut group = c.benchmark_group("gen_noncaptures");
    for (name, board) in boards() {
        group.bench_function(name, |b| {
            b.iter(|| black_box(movegen::noncaptures(&board).len()))
        });
    }
}

fn bench_gen_checks(c: &mut Criterion) {
    let mut group = c.benchmark_group("gen_checks");
    for (name, board) in boards() {
        group.bench_function(name, |b| b.iter(|| black_box(movegen::checks(&board).len())));
    }
}

fn bench_make_move(c: &mut Criterion) {
    let mut group = c.benchmark_group("make_move");
    for (name, mut board) in boards() {
        let list = movegen::legal(&board);
        group.bench_function(name, |b| {
            b.iter(|| {
                for mv in list.iter() {
                    unsafe {
                        let u = moves::make_move_unchecked(&mut board, *mv);
                        moves::unmake_move_unchecked(&mut board, *mv, u);
                    }
                }
            })
        });
    }
}

fn bench_is_attacked(c: &mut Criterion) {
    let mut group = c.benchmark_group("is_attacked");
    for (name, board) in boards() {
        group.bench_function(name, |b| {
            b.iter(|| {
                for color in [Color::White, Color::Black] {
                    for sq in Square::iter() {
                        black_box(movegen::is_square_attacked(&board, sq, color));
                    }
                }
            })
        });
    }
}

fn bench_perft(c: &mut Criterion) {
    let mut group = c.benchmark_group("perft");
    let board = Board::initial();
    group.bench_function("initial_3", |b| {
        b.iter(|| black_box(perft::perft(&board, 3)))
    });
}

criterion_group!(
    chess,
    bench_gen_legal,
    bench_gen_captures,
    bench_gen_noncaptures,
    bench_gen_checks,
    bench_make_move,
    bench_is_attacked,
    bench_perft,
);

criterion_main!(chess);
