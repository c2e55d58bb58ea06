use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use blockfall::core::collision::{check_collision, landing_position, try_rotate};
use blockfall::core::{Board, GameSession, GameSnapshot, Piece};
use blockfall::types::{GameAction, GameMode, ShapeKind};

fn bench_fall_tick(c: &mut Criterion) {
    let mut session = GameSession::seeded(12345);
    session.start_game(GameMode::Solo);

    c.bench_function("fall_tick_1s", |b| {
        b.iter(|| {
            session.advance(black_box(Duration::from_secs(1)));
            if session.is_game_over() {
                session.restart_game();
            }
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_lines", |b| {
        b.iter(|| {
            let mut board = Board::new();
            for y in 16..20 {
                board.fill_row_except(y, &[], ShapeKind::I);
            }
            board.clear_full_rows();
        })
    });
}

fn bench_collision(c: &mut Criterion) {
    let board = Board::from_rows(&["ZZ..ZZZ.ZZ", "ZZZZ.ZZZZZ", "ZZZZZZZZZ."]);
    let piece = Piece::spawn(ShapeKind::T);

    c.bench_function("collision_check", |b| {
        b.iter(|| check_collision(black_box(&piece), black_box(&board)))
    });

    c.bench_function("landing_position", |b| {
        b.iter(|| landing_position(black_box(&piece), black_box(&board)))
    });

    c.bench_function("rotate_with_kicks", |b| {
        let wall = Piece { x: 8, ..piece };
        b.iter(|| try_rotate(black_box(&wall), black_box(&board)))
    });
}

fn bench_actions(c: &mut Criterion) {
    let mut session = GameSession::seeded(12345);
    session.start_game(GameMode::Duo);

    c.bench_function("move_and_rotate", |b| {
        b.iter(|| {
            session.apply_action(GameAction::MoveLeft);
            session.apply_action(GameAction::Rotate);
            session.apply_action(GameAction::MoveRight);
        })
    });
}

fn bench_snapshot(c: &mut Criterion) {
    let mut session = GameSession::seeded(12345);
    session.start_game(GameMode::Solo);
    let mut snap = GameSnapshot::default();

    c.bench_function("snapshot_into", |b| {
        b.iter(|| session.snapshot_into(black_box(&mut snap)))
    });
}

criterion_group!(
    benches,
    bench_fall_tick,
    bench_line_clear,
    bench_collision,
    bench_actions,
    bench_snapshot
);
criterion_main!(benches);
