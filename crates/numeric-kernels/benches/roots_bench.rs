use criterion::{criterion_group, criterion_main, Criterion};
use numeric_kernels::roots::{lin_bairstow, quartic_roots, solve_cubic};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::hint::black_box;

fn bench_cubic_trig_branch(c: &mut Criterion) {
    c.bench_function("cubic_three_real_roots", |bench| {
        bench.iter(|| {
            // x^3 - 6x^2 + 11x - 6
            let outcome = solve_cubic(1.0, -6.0, 11.0, -6.0);
            black_box(outcome);
        })
    });
}

fn bench_quartic_resolvent(c: &mut Criterion) {
    c.bench_function("quartic_resolvent_path", |bench| {
        bench.iter(|| {
            // (x-1)(x-2)(x-3)(x-5)
            let roots = quartic_roots(&[-11.0, 41.0, -61.0, 30.0]);
            black_box(roots.len());
        })
    });
}

fn bench_lin_bairstow_degree_6(c: &mut Criterion) {
    // (x-1)(x-2)(x-3)(x+1)(x+2)(x+3) = x^6 - 14x^4 + 49x^2 - 36
    let coefficients = [1.0, 0.0, -14.0, 0.0, 49.0, 0.0, -36.0];

    c.bench_function("lin_bairstow_degree_6", |bench| {
        bench.iter(|| {
            let mut c = coefficients;
            let mut tolerance = 1e-10;
            let mut rng = StdRng::seed_from_u64(7);
            let roots = lin_bairstow(&mut c, &mut tolerance, &mut rng).unwrap();
            black_box(roots.len());
        })
    });
}

criterion_group!(
    benches,
    bench_cubic_trig_branch,
    bench_quartic_resolvent,
    bench_lin_bairstow_degree_6
);
criterion_main!(benches);
