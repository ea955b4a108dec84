use criterion::{Criterion, black_box, criterion_group, criterion_main};
use poisson_sampler::{Poisson, Policy, RngSource, poisson_sample4};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Duration;

// One λ per regime of each policy, plus the thresholds themselves
const LAMBDAS: [f64; 7] = [0.5, 10.0, 63.0, 100.0, 999.0, 4_000.0, 100_000.0];

fn bench_policies(cr: &mut Criterion) {
    let n = 10_000;
    let mut rng = ChaCha8Rng::seed_from_u64(42);

    for policy in [Policy::Primary, Policy::Robust] {
        for &lambda in &LAMBDAS {
            let poisson = Poisson::with_policy(lambda, policy).unwrap();
            let bench_name = format!("{policy}_{}_n{n}_lambda{lambda:.1}", poisson.method());
            cr.bench_function(&bench_name, |bench| {
                bench.iter(|| {
                    for _ in 0..n {
                        black_box(poisson.draw(&mut rng));
                    }
                });
            });
        }
    }
}

fn bench_draw4(cr: &mut Criterion) {
    let lambda = 100.0;
    let n = 10_000;
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    cr.bench_function("poisson_sample4_lambda100", |bench| {
        let mut source = RngSource::new(&mut rng);
        bench.iter(|| {
            for _ in 0..n / 4 {
                black_box(poisson_sample4(&mut source, lambda));
            }
        });
    });
}

criterion_group!(
    name = benches;
    config = Criterion::default()
        .warm_up_time(Duration::from_secs(1))
        .measurement_time(Duration::from_secs(5))
        .sample_size(10);
    targets = bench_policies, bench_draw4
);
criterion_main!(benches);
