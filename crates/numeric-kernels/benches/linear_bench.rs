use criterion::{criterion_group, criterion_main, Criterion};
use ndarray::Array2;
use numeric_kernels::eigen::jacobi_n;
use numeric_kernels::linear::{invert_matrix, lu_factor, lu_solve};
use std::hint::black_box;

fn dominant_matrix(n: usize) -> Array2<f64> {
    Array2::from_shape_fn((n, n), |(i, j)| {
        if i == j {
            n as f64 + 2.0
        } else {
            ((i * 31 + j * 17) as f64).sin()
        }
    })
}

fn bench_lu_solve_8(c: &mut Criterion) {
    let a0 = dominant_matrix(8);
    let b0: Vec<f64> = (0..8).map(|i| (i as f64).cos()).collect();

    c.bench_function("lu_solve_8x8", |bench| {
        bench.iter(|| {
            let mut a = a0.clone();
            let pivots = lu_factor(&mut a).unwrap();
            let mut x = b0.clone();
            lu_solve(&a, &pivots, &mut x);
            black_box(x[0]);
        })
    });
}

fn bench_invert_16(c: &mut Criterion) {
    let a0 = dominant_matrix(16);

    c.bench_function("invert_16x16", |bench| {
        bench.iter(|| {
            let mut a = a0.clone();
            let ai = invert_matrix(&mut a).unwrap();
            black_box(ai[[0, 0]]);
        })
    });
}

fn bench_jacobi_8(c: &mut Criterion) {
    let raw = dominant_matrix(8);
    let a0 = Array2::from_shape_fn((8, 8), |(i, j)| 0.5 * (raw[[i, j]] + raw[[j, i]]));

    c.bench_function("jacobi_8x8", |bench| {
        bench.iter(|| {
            let mut a = a0.clone();
            let mut w = [0.0; 8];
            let mut v = Array2::zeros((8, 8));
            jacobi_n(&mut a, &mut w, &mut v).unwrap();
            black_box(w[0]);
        })
    });
}

criterion_group!(benches, bench_lu_solve_8, bench_invert_16, bench_jacobi_8);
criterion_main!(benches);
