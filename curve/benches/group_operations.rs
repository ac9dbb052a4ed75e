use criterion::{black_box, criterion_group, criterion_main, Criterion};
use curve::{
    double_scalar_mul_basepoint, Affine, GeneratorTable, Group, Jacobian, RandomField, ScalarField,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn random_scalar(rng: &mut StdRng) -> ScalarField {
    ScalarField::random(rng)
}

fn bench_jacobian_double(c: &mut Criterion) {
    let g = Jacobian::generator();
    c.bench_function("jacobian_double", |bencher| {
        bencher.iter(|| black_box(black_box(g).double()))
    });
}

fn bench_jacobian_add(c: &mut Criterion) {
    let g = Jacobian::generator();
    let h = g.mul_u64(7);
    c.bench_function("jacobian_add", |bencher| {
        bencher.iter(|| black_box(black_box(g) + black_box(h)))
    });
}

fn bench_jacobian_add_affine(c: &mut Criterion) {
    let g = Jacobian::generator().mul_u64(3);
    let h = Affine::generator();
    c.bench_function("jacobian_add_affine", |bencher| {
        bencher.iter(|| black_box(black_box(g).add_affine(black_box(&h))))
    });
}

fn bench_jacobian_scalar_mul(c: &mut Criterion) {
    let g = Jacobian::generator();
    let mut rng = StdRng::seed_from_u64(42);
    let scalar = random_scalar(&mut rng);

    c.bench_function("jacobian_scalar_mul", |bencher| {
        bencher.iter(|| black_box(black_box(g).scalar_mul(black_box(&scalar))))
    });
}

fn bench_jacobian_scalar_mul_vartime(c: &mut Criterion) {
    let g = Jacobian::generator();
    let mut rng = StdRng::seed_from_u64(42);
    let scalar = random_scalar(&mut rng);

    c.bench_function("jacobian_scalar_mul_vartime", |bencher| {
        bencher.iter(|| black_box(black_box(g).scalar_mul_vartime(black_box(&scalar))))
    });
}

fn bench_generator_table_build(c: &mut Criterion) {
    c.bench_function("generator_table_build", |bencher| {
        bencher.iter(|| black_box(GeneratorTable::new()))
    });
}

fn bench_generator_table_mul(c: &mut Criterion) {
    let table = GeneratorTable::new();
    let mut rng = StdRng::seed_from_u64(42);
    let scalar = random_scalar(&mut rng);

    c.bench_function("generator_table_mul", |bencher| {
        bencher.iter(|| black_box(table.mul(black_box(&scalar))))
    });
}

fn bench_double_scalar_mul(c: &mut Criterion) {
    let table = GeneratorTable::new();
    let mut rng = StdRng::seed_from_u64(42);
    let a = random_scalar(&mut rng);
    let b = random_scalar(&mut rng);
    let p = Jacobian::generator().scalar_mul(&random_scalar(&mut rng));

    c.bench_function("double_scalar_mul_basepoint", |bencher| {
        bencher.iter(|| {
            black_box(double_scalar_mul_basepoint(
                &table,
                black_box(&a),
                black_box(&b),
                black_box(&p),
            ))
        })
    });
}

fn bench_batch_normalize(c: &mut Criterion) {
    let g = Jacobian::generator();
    let points: Vec<Jacobian> = (1..=64).map(|i| g.mul_u64(i)).collect();

    c.bench_function("batch_normalize_64", |bencher| {
        bencher.iter(|| black_box(Jacobian::batch_normalize(black_box(&points))))
    });
}

criterion_group!(
    benches,
    bench_jacobian_double,
    bench_jacobian_add,
    bench_jacobian_add_affine,
    bench_jacobian_scalar_mul,
    bench_jacobian_scalar_mul_vartime,
    bench_generator_table_build,
    bench_generator_table_mul,
    bench_double_scalar_mul,
    bench_batch_normalize
);
criterion_main!(benches);
