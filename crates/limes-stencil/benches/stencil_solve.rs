use criterion::{black_box, criterion_group, criterion_main, Criterion};
use limes_stencil::{solve_stencil, Stencil};

fn stencil_benchmark(c: &mut Criterion) {
    let shifts: Vec<f64> = (-4..=4).map(|k| k as f64).collect();

    c.bench_function("stencil/solve_9_order_4", |b| {
        b.iter(|| solve_stencil(black_box(&shifts), black_box(4)).expect("stencil"));
    });

    let stencil = Stencil::new(&shifts, 2).expect("stencil");
    c.bench_function("stencil/apply_9", |b| {
        b.iter(|| stencil.apply(f64::sin, black_box(0.3), black_box(1e-2)));
    });
}

criterion_group!(benches, stencil_benchmark);
criterion_main!(benches);
