use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use hypgen::{lap, lapjv, murty};

fn sample_costs() -> nalgebra::DMatrix<f64> {
    #[rustfmt::skip]
    let costs = nalgebra::DMatrix::from_row_slice(10, 10, &[
         7., 51., 52., 87., 38., 60., 74., 66.,  0., 20.,
        50., 12.,  0., 64.,  8., 53.,  0., 46., 76., 42.,
        27., 77.,  0., 18., 22., 48., 44., 13.,  0., 57.,
        62.,  0.,  3.,  8.,  5.,  6., 14.,  0., 26., 39.,
         0., 97.,  0.,  5., 13.,  0., 41., 31., 62., 48.,
        79., 68.,  0.,  0., 15., 12., 17., 47., 35., 43.,
        76., 99., 48., 27., 34.,  0.,  0.,  0., 28.,  0.,
         0., 20.,  9., 27., 46., 15., 84., 19.,  3., 24.,
        56., 10., 45., 39.,  0., 93., 67., 79., 19., 38.,
        27.,  0., 39., 53., 46., 24., 69., 46., 23.,  1.,
    ]);
    costs
}

pub fn solver_benchmarks(c: &mut Criterion) {
    let costs = sample_costs();

    c.bench_function("lap", |b| b.iter(|| lap(black_box(&costs))));
    c.bench_function("lapjv", |b| b.iter(|| lapjv(black_box(&costs))));
}

pub fn murty_benchmark(c: &mut Criterion) {
    let costs = sample_costs();

    c.bench_function("murty_k10", |b| b.iter(|| murty(black_box(&costs), 10)));
}

pub fn random_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("lapjv_random_of_size");
    for size in (1..7).map(|i| 2usize.pow(i)) {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter_batched_ref(
                || nalgebra::DMatrix::<f64>::new_random(size, size),
                |costs| lapjv(costs),
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, solver_benchmarks, murty_benchmark, random_benchmarks);
criterion_main!(benches);
