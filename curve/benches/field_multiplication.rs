use criterion::{black_box, criterion_group, criterion_main, Criterion};
use curve::{BaseField, RandomField, ScalarField};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn bench_basefield_mul(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let a = BaseField::random(&mut rng);
    let b = BaseField::random(&mut rng);
    c.bench_function("basefield_mul", |bencher| {
        bencher.iter(|| black_box(black_box(a) * black_box(b)))
    });
}

fn bench_basefield_square(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let a = BaseField::random(&mut rng);
    c.bench_function("basefield_square", |bencher| {
        bencher.iter(|| black_box(black_box(a).square()))
    });
}

fn bench_basefield_invert(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let a = BaseField::random(&mut rng);
    c.bench_function("basefield_invert", |bencher| {
        bencher.iter(|| black_box(black_box(a).invert()))
    });
}

fn bench_basefield_sqrt(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let a = BaseField::random(&mut rng).square();
    c.bench_function("basefield_sqrt", |bencher| {
        bencher.iter(|| black_box(black_box(a).sqrt()))
    });
}

fn bench_scalarfield_mul(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let a = ScalarField::random(&mut rng);
    let b = ScalarField::random(&mut rng);
    c.bench_function("scalarfield_mul", |bencher| {
        bencher.iter(|| black_box(black_box(a) * black_box(b)))
    });
}

fn bench_scalarfield_inverse(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let a = ScalarField::random(&mut rng);
    c.bench_function("scalarfield_inverse", |bencher| {
        bencher.iter(|| black_box(black_box(a).inverse()))
    });
}

criterion_group!(
    benches,
    bench_basefield_mul,
    bench_basefield_square,
    bench_basefield_invert,
    bench_basefield_sqrt,
    bench_scalarfield_mul,
    bench_scalarfield_inverse
);
criterion_main!(benches);
