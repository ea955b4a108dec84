use crate::factorial::log_factorial;
use crate::knuth;
use crate::rng::VariateSource;
use std::f64::consts::PI;

/// Attempts after which a single draw is reported as suspicious. Mean attempts
/// sit around 1.3 to 1.4 across the regime.
const WARN_ATTEMPTS: u64 = 10_000;
/// Attempts after which the variate stream is considered broken.
const MAX_ATTEMPTS: u64 = 100_000_000;
/// At or below this λ the envelope constant `c = 0.767 - 3.36/λ` is not
/// positive and PA has no valid acceptance test.
pub(crate) const MIN_LAMBDA: f64 = 3.36 / 0.767;

/// Per-λ constants of Atkinson's rejection method PA.
///
/// The proposal is a logistic distribution with location λ and scale `1/β`,
/// whose density is matched to the Poisson pmf through the constant `c`.
#[derive(Debug, Clone, Copy)]
struct Envelope {
    alpha: f64,
    beta: f64,
    log_k: f64,
    log_lambda: f64,
}

impl Envelope {
    fn new(lambda: f64) -> Self {
        let c = 0.767 - 3.36 / lambda;
        let beta = PI / (3.0 * lambda).sqrt();
        let alpha = beta * lambda;
        Self {
            alpha,
            beta,
            log_k: c.ln() - lambda - beta.ln(),
            log_lambda: lambda.ln(),
        }
    }
}

/// Sample Poisson(λ) with Atkinson's rejection method PA.
///
/// Suited to the large regime, [`crate::SMALL_THRESHOLD`] ≤ λ ≤
/// [`crate::HUGE_THRESHOLD`]. The acceptance test is carried out in the log
/// domain, so `n!` never has to be formed. For λ ≤ [`MIN_LAMBDA`] the draw
/// is delegated to Knuth's method.
pub(crate) fn sample<S: VariateSource + ?Sized>(source: &mut S, lambda: f64) -> u32 {
    sample_counted(source, lambda).0
}

/// As [`sample`], also returning the number of proposals made (zero when
/// the draw was delegated to Knuth's method).
pub(crate) fn sample_counted<S: VariateSource + ?Sized>(source: &mut S, lambda: f64) -> (u32, u64) {
    if lambda <= MIN_LAMBDA {
        return (knuth::sample(source, lambda), 0);
    }
    let env = Envelope::new(lambda);
    let mut attempts: u64 = 0;

    loop {
        attempts += 1;
        if attempts == WARN_ATTEMPTS {
            tracing::warn!(
                lambda,
                attempts,
                "Atkinson rejection loop is far beyond its expected length; check the uniform source"
            );
        }
        assert!(
            attempts <= MAX_ATTEMPTS,
            "Atkinson sampler rejected {MAX_ATTEMPTS} proposals for lambda = {lambda}; the uniform stream is degenerate"
        );

        // Inverse CDF of the logistic proposal
        let u = source.uniform_double();
        let x = (env.alpha - ((1.0 - u) / u).ln()) / env.beta;
        let n = (x + 0.5).floor();
        if n < 0.0 {
            // Skip the second draw, the proposal is already out of support
            continue;
        }

        let v = source.uniform_double();
        let y = env.alpha - env.beta * x;
        let t = 1.0 + y.exp();
        let lhs = y + (v / (t * t)).ln();
        let rhs = env.log_k + n * env.log_lambda - log_factorial(n);
        if lhs <= rhs {
            return (n as u32, attempts);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{RngSource, SequenceSource};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn median_proposal_is_accepted() {
        // u = 0.5 puts x exactly at λ; with v = 0.5, lhs = ln(1/8) ≈ -2.079
        // against rhs ≈ -1.825.
        let mut source = SequenceSource::uniforms([0.5, 0.5]);
        assert_eq!(sample_counted(&mut source, 100.0), (100, 1));
        assert_eq!(source.uniforms_drawn(), 2);
    }

    #[test]
    fn upper_quartile_proposal() {
        // x ≈ 106.057 rounds to 106; lhs ≈ -2.367 ≤ rhs ≈ -2.031.
        let mut source = SequenceSource::uniforms([0.75, 0.5]);
        assert_eq!(sample(&mut source, 100.0), 106);
    }

    #[test]
    fn rejection_restarts_with_fresh_pair() {
        // v = 0.999 gives lhs ≈ -1.387 > rhs, so the first proposal is rejected.
        let mut source = SequenceSource::uniforms([0.5, 0.999, 0.5, 0.5]);
        assert_eq!(sample_counted(&mut source, 100.0), (100, 2));
        assert_eq!(source.uniforms_drawn(), 4);
    }

    #[test]
    fn negative_proposal_skips_second_draw() {
        // u = 1e-12 gives x ≈ -52.3: rejected after a single draw.
        let mut source = SequenceSource::uniforms([1e-12, 0.5, 0.5]);
        assert_eq!(sample_counted(&mut source, 100.0), (100, 2));
        assert_eq!(source.uniforms_drawn(), 3);
    }

    #[test]
    fn mean_attempts_stay_small_across_regime() {
        let mut rng = StdRng::seed_from_u64(2024);
        let mut source = RngSource::new(&mut rng);
        let n = 20_000;
        for lambda in [64.0, 100.0, 250.0, 1000.0, 2500.0, 4000.0] {
            let total: u64 = (0..n).map(|_| sample_counted(&mut source, lambda).1).sum();
            let mean = total as f64 / n as f64;
            assert!(mean < 2.0, "lambda = {lambda}: mean attempts {mean}");
        }
    }

    #[test]
    fn small_lambda_delegates_to_knuth() {
        // 0.9 * 0.001 drops below e^-2 on the second draw
        let mut source = SequenceSource::uniforms([0.9, 0.001]);
        assert_eq!(sample_counted(&mut source, 2.0), (1, 0));
        assert_eq!(source.uniforms_drawn(), 2);

        let mut rng = StdRng::seed_from_u64(1);
        let mut source = RngSource::new(&mut rng);
        let n = 20_000;
        for lambda in [0.3, 2.0, MIN_LAMBDA] {
            let mean = (0..n).map(|_| sample(&mut source, lambda) as f64).sum::<f64>() / n as f64;
            assert!((mean - lambda).abs() < 5.0 * (lambda / n as f64).sqrt(), "lambda = {lambda}: mean {mean}");
        }
    }

    #[test]
    fn envelope_is_finite_just_above_floor() {
        let env = Envelope::new(MIN_LAMBDA * 1.01);
        assert!(env.log_k.is_finite());
        let mut rng = StdRng::seed_from_u64(4);
        let mut source = RngSource::new(&mut rng);
        let (_, attempts) = sample_counted(&mut source, 5.0);
        assert!(attempts >= 1);
    }

    #[test]
    fn envelope_constants() {
        let env = Envelope::new(300.0);
        assert!((env.beta - PI / 30.0).abs() < 1e-15);
        assert!((env.alpha - 10.0 * PI).abs() < 1e-12);
        assert!((env.log_lambda - 300.0_f64.ln()).abs() < 1e-15);
        let c: f64 = 0.767 - 3.36 / 300.0;
        assert!((env.log_k - (c.ln() - 300.0 - (PI / 30.0).ln())).abs() < 1e-12);
    }
}
