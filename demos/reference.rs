use poisson_sampler::{Poisson, Policy};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// Draws `N` Poisson samples for each of the command line arguments
/// (interpreted as λ values) and prints, per λ, the sampler that was
/// selected, the empirical mean and variance, and the throughput.
///
/// Usage: `cargo run --release --example reference -- [l1 l2 ...] [--seed <u64>] [--policy primary|robust] [--n <usize>]`
///
/// If no λ values are given, defaults to `[1.0, 10.0, 100.0, 1000.0, 10000.0]`.
///
/// Set `RUST_LOG=poisson_sampler=debug` to see how each sampler is configured.
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut lambdas = Vec::new();
    let mut seed: u64 = 0;
    let mut policy = Policy::Primary;
    let mut n: usize = 1_000_000;
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--seed" {
            match args.next().map(|val| val.parse::<u64>()) {
                Some(Ok(parsed)) => seed = parsed,
                Some(Err(e)) => tracing::warn!("invalid value for --seed ({e}); using default 0"),
                None => tracing::warn!("--seed given but no value; using default 0"),
            }
        } else if arg == "--policy" {
            match args.next().map(|val| val.parse::<Policy>()) {
                Some(Ok(parsed)) => policy = parsed,
                Some(Err(e)) => tracing::warn!("{e}; using the primary policy"),
                None => tracing::warn!("--policy given but no value; using the primary policy"),
            }
        } else if arg == "--n" {
            match args.next().map(|val| val.parse::<usize>()) {
                Some(Ok(parsed)) if parsed > 1 => n = parsed,
                _ => tracing::warn!("--n needs an integer above 1; using {n}"),
            }
        } else {
            let l = arg.trim();
            if l.is_empty() {
                continue;
            }
            match l.parse::<f64>() {
                Ok(lambda) => lambdas.push(lambda),
                Err(_) => tracing::warn!("could not parse '{l}' as f64; skipping"),
            }
        }
    }

    if lambdas.is_empty() {
        lambdas = vec![1.0, 10.0, 100.0, 1_000.0, 10_000.0];
        tracing::info!("using default lambda values: {lambdas:.1?}");
    }

    let mut rng = StdRng::seed_from_u64(seed);
    println!("policy {policy}, {n} samples per lambda, seed {seed}");
    for &lambda in &lambdas {
        let poisson = match Poisson::with_policy(lambda, policy) {
            Ok(poisson) => poisson,
            Err(e) => {
                tracing::error!("skipping lambda {lambda}: {e}");
                continue;
            }
        };

        let start = Instant::now();
        let samples = poisson.draw_vec(&mut rng, n);
        let elapsed = start.elapsed();

        let mean = samples.iter().map(|&k| k as f64).sum::<f64>() / n as f64;
        let var = samples
            .iter()
            .map(|&k| (k as f64 - mean).powi(2))
            .sum::<f64>()
            / (n as f64 - 1.0);
        println!(
            "  lambda {lambda:>10.1}  {:<18} mean = {mean:>12.4}  var = {var:>12.4}  {:>8.2} MSample/s",
            poisson.method(),
            n as f64 / elapsed.as_secs_f64() / 1e6
        );
    }
}
