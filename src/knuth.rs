use crate::rng::VariateSource;

/// Upper bound on uniforms consumed by one draw. Far beyond anything reachable
/// for λ below the small-regime threshold.
const MAX_DRAWS: u32 = 1 << 20;

/// Sample Poisson(λ) with Knuth's product method.
///
/// Multiplies uniforms until the running product drops to `e^(-λ)`, which
/// counts unit-rate exponential arrivals inside an interval of length λ.
/// Consumes `k + 1` uniforms for a result of `k`, so the cost grows linearly
/// with λ and `e^(-λ)` underflows once λ reaches the hundreds. Callers keep
/// this to λ < [`crate::SMALL_THRESHOLD`].
pub(crate) fn sample<S: VariateSource + ?Sized>(source: &mut S, lambda: f64) -> u32 {
    let limit = (-lambda).exp();
    let mut k: u32 = 0;
    let mut product = 1.0;

    loop {
        k += 1;
        product *= source.uniform_double();
        if product <= limit {
            return k - 1;
        }
        assert!(
            k < MAX_DRAWS,
            "Knuth sampler exceeded {MAX_DRAWS} draws for lambda = {lambda}; the uniform stream is degenerate"
        );
    }
}
