use crate::rng::VariateSource;

/// Width of the slices λ is consumed in. `e^(-500)` is still a normal `f64`,
/// while `e^(-λ)` underflows long before λ reaches 1000.
pub const INVERSION_CHUNK: f64 = 500.0;

/// Sample Poisson(λ) by inverting the CDF with a single uniform.
///
/// Walks the pmf recurrence `p(k) = p(k - 1) · λ / k`, accumulating the CDF
/// until it reaches the uniform target. The normalising factor `e^(-λ)` is
/// applied in slices of [`INVERSION_CHUNK`] so that neither the running term
/// nor the running sum leaves the representable range. Exactly one uniform is
/// consumed; the walk is linear in the returned count.
pub(crate) fn sample<S: VariateSource + ?Sized>(source: &mut S, lambda: f64) -> u32 {
    let u = source.uniform_double();
    let chunk_decay = (-INVERSION_CHUNK).exp();

    let mut term = 1.0;
    let mut cdf = 1.0;
    let mut k: u32 = 0;
    let mut consumed = 0.0;

    loop {
        let decay = if lambda > consumed + INVERSION_CHUNK {
            chunk_decay
        } else {
            (consumed - lambda).exp()
        };
        term *= decay;
        cdf *= decay;
        consumed += INVERSION_CHUNK;

        while u > cdf {
            k += 1;
            term *= lambda / k as f64;
            if term == 0.0 {
                // Nothing representable is left in the tail
                tracing::warn!(lambda, u, k, cdf, "CDF inversion ran out of tail mass");
                return k;
            }
            cdf += term;
        }

        if consumed >= lambda {
            return k;
        }
    }
}
