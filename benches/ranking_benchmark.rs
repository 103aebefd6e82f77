use criterion::{black_box, criterion_group, criterion_main, Criterion};
use liftboard::services::ranker::{rank_candidates, Candidate};

fn synthetic_candidates(count: usize) -> Vec<Candidate> {
    (0..count)
        .map(|i| Candidate {
            user_id: format!("user-{:06}", i),
            display_name: format!("User {}", i),
            avatar_key: "🦁".to_string(),
            // Plenty of ties to exercise the secondary sort key
            value: f64::from((i % 500) as u32) * 10.0,
        })
        .collect()
}

fn benchmark_rank_candidates(c: &mut Criterion) {
    let small = synthetic_candidates(1_000);
    let large = synthetic_candidates(50_000);

    let mut group = c.benchmark_group("rank_candidates");

    group.bench_function("sort_rank_truncate_1k", |b| {
        b.iter(|| rank_candidates(black_box(small.clone())))
    });

    group.bench_function("sort_rank_truncate_50k", |b| {
        b.iter(|| rank_candidates(black_box(large.clone())))
    });

    group.finish();
}

criterion_group!(benches, benchmark_rank_candidates);
criterion_main!(benches);
