use criterion::{black_box, criterion_group, criterion_main, Criterion};
use dicepass::source::{rolls_to_value, SamplingPlan, DEFAULT_SUCCESS_PROBABILITY};

fn bench_compute_plan(c: &mut Criterion) {
    c.bench_function("plan d6 over 7776 words", |b| {
        b.iter(|| SamplingPlan::compute(black_box(6), black_box(7776), DEFAULT_SUCCESS_PROBABILITY))
    });

    c.bench_function("plan d20 over 999983", |b| {
        b.iter(|| {
            SamplingPlan::compute(black_box(20), black_box(999_983), DEFAULT_SUCCESS_PROBABILITY)
        })
    });
}

fn bench_reduce_rolls(c: &mut Criterion) {
    let rolls = [3u32, 17, 20, 1, 9, 12, 5, 14];
    c.bench_function("reduce 8 d20 rolls", |b| {
        b.iter(|| rolls_to_value(black_box(20), black_box(&rolls)))
    });
}

criterion_group!(benches, bench_compute_plan, bench_reduce_rolls);
criterion_main!(benches);
