use criterion::{black_box, criterion_group, criterion_main, Criterion};
use lazyseq::prelude::*;

fn bench_filter_map_take(c: &mut Criterion) {
    let numbers = range(0, 100_000);
    c.bench_function("filter_map_take", |b| {
        b.iter(|| {
            let out = (&numbers)
                .filter(|x| x % 3 == 0)
                .map(|x| x * 2)
                .take(1_000)
                .to_vec()
                .unwrap();
            black_box(out);
        })
    });
}

fn bench_group_by(c: &mut Criterion) {
    let numbers = range(0, 50_000);
    c.bench_function("group_by_mod_64", |b| {
        b.iter(|| {
            let groups = (&numbers).group_by(|x| x % 64).count();
            black_box(groups);
        })
    });
}

fn bench_hash_join(c: &mut Criterion) {
    let outer = from_vec((0..10_000).collect::<Vec<u32>>());
    let inner = from_vec((0..10_000).map(|i| (i % 5_000, i)).collect::<Vec<(u32, u32)>>());
    c.bench_function("hash_join_10k", |b| {
        b.iter(|| {
            let matched = (&outer)
                .join(&inner, |o| *o, |i| i.0, |o, i| o + i.1)
                .count();
            black_box(matched);
        })
    });
}

fn bench_distinct(c: &mut Criterion) {
    let words = from_vec(
        (0..20_000)
            .map(|i| format!("word-{}", i % 1_000))
            .collect::<Vec<String>>(),
    );
    c.bench_function("distinct_strings", |b| {
        b.iter(|| {
            let n = (&words).distinct().count();
            black_box(n);
        })
    });
}

criterion_group!(
    benches,
    bench_filter_map_take,
    bench_group_by,
    bench_hash_join,
    bench_distinct
);
criterion_main!(benches);
