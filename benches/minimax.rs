use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use tictactoe::{apply, best_for_maximizer, initial_state, legal_actions, minimax, Action, Board};

fn openings() -> Vec<Board> {
    let start = initial_state();
    legal_actions(&start)
        .into_iter()
        .filter_map(|action| apply(&start, action).ok())
        .collect()
}

fn bench_full_tree(c: &mut Criterion) {
    let start = initial_state();
    c.bench_function("minimax/empty_board", |bch| {
        bch.iter(|| black_box(best_for_maximizer(black_box(&start))))
    });
}

fn bench_replies(c: &mut Criterion) {
    let boards = openings();
    c.bench_function("minimax/first_reply", |bch| {
        bch.iter(|| {
            let replies: Vec<Option<Action>> = boards.iter().map(minimax).collect();
            black_box(replies)
        })
    });
}

criterion_group!(benches, bench_full_tree, bench_replies);
criterion_main!(benches);
