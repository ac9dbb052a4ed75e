//! Fixed-vs-random timing classes for the secret-scalar multipliers.
//!
//! Each group measures one operation on two input classes: a fixed sparse
//! scalar and uniformly random scalars. For the constant-time paths the two
//! classes should report the same time within noise. The vartime multiplier
//! is included as a control and should show a clear gap.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use curve::{GeneratorTable, Group, Jacobian, RandomField, ScalarField};
use rand::rngs::StdRng;
use rand::SeedableRng;

const SAMPLES: usize = 256;

fn input_classes() -> [(&'static str, Vec<ScalarField>); 2] {
    let mut rng = StdRng::seed_from_u64(42);
    let fixed = vec![ScalarField::ONE; SAMPLES];
    let random = (0..SAMPLES).map(|_| ScalarField::random(&mut rng)).collect();
    [("fixed", fixed), ("random", random)]
}

fn bench_classes<F>(c: &mut Criterion, name: &str, op: F)
where
    F: Fn(&ScalarField) -> Jacobian,
{
    let mut group = c.benchmark_group(name);
    for (class, inputs) in input_classes() {
        group.bench_with_input(BenchmarkId::from_parameter(class), &inputs, |bencher, inputs| {
            let mut i = 0;
            bencher.iter(|| {
                i = (i + 1) % inputs.len();
                black_box(op(black_box(&inputs[i])))
            })
        });
    }
    group.finish();
}

fn bench_scalar_mul_classes(c: &mut Criterion) {
    let p = Jacobian::generator().mul_u64(0x1234_5678);
    bench_classes(c, "ct_scalar_mul", |k| p.scalar_mul(k));
}

fn bench_generator_table_mul_classes(c: &mut Criterion) {
    let table = GeneratorTable::new();
    bench_classes(c, "ct_generator_table_mul", |k| table.mul(k));
}

fn bench_vartime_control(c: &mut Criterion) {
    let table = GeneratorTable::new();
    bench_classes(c, "vartime_generator_table_mul", |k| table.mul_vartime(k));
}

criterion_group!(
    benches,
    bench_scalar_mul_classes,
    bench_generator_table_mul_classes,
    bench_vartime_control
);
criterion_main!(benches);
